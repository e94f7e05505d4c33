use crate::utils::async_helper::spawn_and_send;
use futures_util::FutureExt;
use std::sync::mpsc::{channel, Receiver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Google serves `=s96-c` sized avatars; ask for a crisper one
pub fn sized_avatar_url(url: &str, size: u32) -> String {
    match url.rsplit_once('=') {
        Some((base, suffix)) if suffix.starts_with('s') => format!("{}=s{}-c", base, size),
        _ => url.to_string(),
    }
}

/// Decode image bytes into an egui image
pub fn decode_avatar(bytes: &[u8]) -> Result<egui::ColorImage, AvatarError> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        size,
        rgba.as_flat_samples().as_slice(),
    ))
}

/// Download and decode the user's avatar in the background
pub fn fetch_avatar(url: String) -> Receiver<Result<egui::ColorImage, AvatarError>> {
    let (tx, rx) = channel();
    let url = sized_avatar_url(&url, 192);

    spawn_and_send(
        move || {
            async move {
                let bytes = crate::utils::http::client()
                    .get(&url)
                    .send()
                    .await?
                    .error_for_status()?
                    .bytes()
                    .await?;
                log::debug!("[Avatar] Downloaded {} bytes", bytes.len());
                decode_avatar(&bytes)
            }
            .boxed()
        },
        tx,
    );

    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resizes_google_avatar_urls() {
        assert_eq!(
            sized_avatar_url("https://lh3.googleusercontent.com/a/abc=s96-c", 192),
            "https://lh3.googleusercontent.com/a/abc=s192-c"
        );
        assert_eq!(
            sized_avatar_url("https://example.com/me.png", 192),
            "https://example.com/me.png"
        );
    }

    #[test]
    fn decodes_png_bytes() {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = decode_avatar(&png).unwrap();
        assert_eq!(decoded.size, [3, 2]);
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(decode_avatar(b"nope"), Err(AvatarError::Image(_))));
    }
}
