//#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
mod api;
mod app;
mod constants;
mod data;
mod models;
mod screens;
mod services;
mod state;
mod ui_components;
mod utils;

use app::CosmosApp;
use eframe::egui;

// App version and metadata
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_NAME: &str = "X-11";
const APP_DESCRIPTION: &str = "Explore the Digital Cosmos";

// Google OAuth Credentials - loaded from .env file at compile time
// Empty values switch the app to the offline demo provider
pub const GOOGLE_CLIENT_ID: &str = env!("GOOGLE_CLIENT_ID");
pub const GOOGLE_CLIENT_SECRET: &str = env!("GOOGLE_CLIENT_SECRET");

const APP_HEIGHT: f32 = 820.0;
const APP_WIDTH: f32 = 1280.0;

fn main() -> Result<(), eframe::Error> {
    // Runtime overrides (X11_PROVIDER, RUST_LOG) may also live in .env
    let env_loaded = dotenvy::dotenv().is_ok();

    // Set RUST_LOG=debug for verbose output, RUST_LOG=info for normal logs
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_core", log::LevelFilter::Warn)
        .filter_module("wgpu_hal", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .init();

    log::info!("[Main] Starting {} v{}", APP_NAME, APP_VERSION);
    if env_loaded {
        log::debug!("[Main] Runtime .env loaded");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{} - {}",
                APP_NAME, APP_VERSION, APP_DESCRIPTION
            ))
            .with_inner_size([APP_WIDTH, APP_HEIGHT])
            .with_min_inner_size([960.0, 640.0])
            .with_resizable(true)
            .with_decorations(true)
            .with_icon(load_icon()),
        persist_window: true, // Remember window position
        ..Default::default()
    };

    eframe::run_native(
        &format!("{} v{}", APP_NAME, APP_VERSION),
        options,
        Box::new(|cc| Ok(Box::new(CosmosApp::new(cc)))),
    )
}

/// Load app icon - deep space gradient with a ringed planet
fn load_icon() -> egui::IconData {
    let (icon_width, icon_height) = (64usize, 64usize);
    let mut pixels = vec![0u8; icon_width * icon_height * 4];

    let center = (icon_width as f32 / 2.0, icon_height as f32 / 2.0);

    for y in 0..icon_height {
        for x in 0..icon_width {
            let idx = (y * icon_width + x) * 4;
            let dx = x as f32 - center.0;
            let dy = y as f32 - center.1;
            let dist = (dx * dx + dy * dy).sqrt();

            // Night sky gradient
            let brightness = 1.0 - (y as f32 / icon_height as f32) * 0.4;
            let (mut r, mut g, mut b) = (
                12.0 * brightness,
                10.0 * brightness,
                40.0 * brightness,
            );

            // Planet body
            if dist < 14.0 {
                r = 150.0;
                g = 110.0;
                b = 255.0;
            }

            // Tilted ring: ellipse band around the planet
            let ring = (dx / 26.0).powi(2) + (dy / 8.0).powi(2);
            if (0.8..1.0).contains(&ring) && !(dist < 14.0 && dy < 0.0) {
                r = 235.0;
                g = 225.0;
                b = 255.0;
            }

            pixels[idx] = r as u8; // R
            pixels[idx + 1] = g as u8; // G
            pixels[idx + 2] = b as u8; // B
            pixels[idx + 3] = 255; // A
        }
    }

    egui::IconData {
        rgba: pixels,
        width: icon_width as u32,
        height: icon_height as u32,
    }
}
