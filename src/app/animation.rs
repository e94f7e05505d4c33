//! Vector animation boundary.
//!
//! Scenes hand a content source (asset path) to an `AnimationRenderer` and get
//! back a disposable `AnimationHandle`. The mount target is the rect passed to
//! `paint` every frame. The bundled `LottieRenderer` only reads the asset
//! header (canvas size, frame rate, in/out points) to drive playback timing.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke};
use serde::Deserialize;
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy)]
pub struct AnimationOptions {
    pub looping: bool,
    pub autoplay: bool,
    /// Uniform scale applied inside the mount rect
    pub scale: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            looping: true,
            autoplay: true,
            scale: 1.0,
        }
    }
}

pub trait AnimationRenderer {
    fn load(&self, source: &str, options: AnimationOptions) -> Box<dyn AnimationHandle>;
}

pub trait AnimationHandle {
    /// Draw the current frame into `rect`; `time` is egui's input time in seconds
    fn paint(&mut self, painter: &egui::Painter, rect: Rect, time: f64);

    /// Tear down; later paints draw nothing
    fn stop(&mut self);

    fn is_stopped(&self) -> bool;
}

fn default_frame_rate() -> f32 {
    30.0
}

fn default_out_point() -> f32 {
    90.0
}

fn default_canvas() -> f32 {
    512.0
}

/// The few top-level Lottie fields playback needs
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LottieHeader {
    #[serde(rename = "fr", default = "default_frame_rate")]
    pub frame_rate: f32,
    #[serde(rename = "ip", default)]
    pub in_point: f32,
    #[serde(rename = "op", default = "default_out_point")]
    pub out_point: f32,
    #[serde(rename = "w", default = "default_canvas")]
    pub width: f32,
    #[serde(rename = "h", default = "default_canvas")]
    pub height: f32,
    #[serde(rename = "nm", default)]
    pub name: Option<String>,
}

impl Default for LottieHeader {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            in_point: 0.0,
            out_point: default_out_point(),
            width: default_canvas(),
            height: default_canvas(),
            name: None,
        }
    }
}

impl LottieHeader {
    pub fn total_frames(&self) -> f32 {
        (self.out_point - self.in_point).max(1.0)
    }
}

/// Loads headers from an assets directory
pub struct LottieRenderer {
    assets_dir: PathBuf,
}

impl LottieRenderer {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    fn read_header(path: &Path) -> Option<LottieHeader> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("[Animation] {} not readable ({}), using default timing", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<LottieHeader>(&json) {
            Ok(header) => Some(header),
            Err(e) => {
                log::warn!("[Animation] {} has no usable header ({}), using default timing", path.display(), e);
                None
            }
        }
    }
}

impl AnimationRenderer for LottieRenderer {
    fn load(&self, source: &str, options: AnimationOptions) -> Box<dyn AnimationHandle> {
        let path = self.assets_dir.join(source);
        let header = Self::read_header(&path).unwrap_or_default();
        log::debug!(
            "[Animation] Loaded {} ({} frames @ {} fps)",
            source,
            header.total_frames(),
            header.frame_rate
        );
        Box::new(LottiePlayback::new(source.to_string(), header, options))
    }
}

pub struct LottiePlayback {
    source: String,
    header: LottieHeader,
    options: AnimationOptions,
    started_at: Option<f64>,
    stopped: bool,
}

impl LottiePlayback {
    pub fn new(source: String, header: LottieHeader, options: AnimationOptions) -> Self {
        Self {
            source,
            header,
            options,
            started_at: None,
            stopped: false,
        }
    }

    /// Frame offset (from the in point) after `elapsed` seconds of playback
    pub fn frame_at(&self, elapsed: f64) -> f32 {
        if !self.options.autoplay {
            return 0.0;
        }
        let total = self.header.total_frames();
        let frame = (elapsed.max(0.0) as f32) * self.header.frame_rate;
        if self.options.looping {
            frame % total
        } else {
            frame.min(total)
        }
    }

    /// Playback phase in [0, 1]
    pub fn phase_at(&self, elapsed: f64) -> f32 {
        self.frame_at(elapsed) / self.header.total_frames()
    }

    /// Largest rect with the asset's aspect ratio, scaled and centered in `target`
    pub fn fit_rect(&self, target: Rect) -> Rect {
        let aspect = if self.header.height > 0.0 {
            self.header.width / self.header.height
        } else {
            1.0
        };
        let mut size = target.size();
        if size.x / size.y.max(f32::EPSILON) > aspect {
            size.x = size.y * aspect;
        } else {
            size.y = size.x / aspect.max(f32::EPSILON);
        }
        Rect::from_center_size(target.center(), size * self.options.scale)
    }
}

impl AnimationHandle for LottiePlayback {
    fn paint(&mut self, painter: &egui::Painter, rect: Rect, time: f64) {
        if self.stopped {
            return;
        }
        let started = *self.started_at.get_or_insert(time);
        let phase = self.phase_at(time - started);
        let frame = self.fit_rect(rect);
        paint_pulsar(painter, frame, phase);
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            log::debug!("[Animation] Stopped {}", self.source);
        }
    }

    fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Drop for LottiePlayback {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Stand-in artwork: breathing core with two counter-rotating dot rings
fn paint_pulsar(painter: &egui::Painter, frame: Rect, phase: f32) {
    let center = frame.center();
    let radius = frame.width().min(frame.height()) / 2.0;
    let breath = 0.5 + 0.5 * (phase * TAU).sin();

    painter.circle_filled(
        center,
        radius * (0.55 + 0.1 * breath),
        Color32::from_rgba_unmultiplied(120, 90, 255, 28),
    );
    painter.circle_filled(
        center,
        radius * (0.28 + 0.06 * breath),
        Color32::from_rgba_unmultiplied(190, 170, 255, 200),
    );
    painter.circle_stroke(
        center,
        radius * 0.8,
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(200, 190, 255, 60)),
    );

    for (ring, dots, direction) in [(0.8f32, 10usize, 1.0f32), (0.62, 6, -1.0)] {
        for i in 0..dots {
            let angle = TAU * (i as f32 / dots as f32 + direction * phase);
            let pos = Pos2::new(
                center.x + radius * ring * angle.cos(),
                center.y + radius * ring * angle.sin(),
            );
            painter.circle_filled(pos, 1.5 + breath, Color32::from_rgb(230, 225, 255));
        }
    }
}
