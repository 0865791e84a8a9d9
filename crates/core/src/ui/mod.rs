//! User interface for the sticker maker.
//!
//! A small eframe window that walks the user through the upload / generate /
//! preview cycle driven by the [`crate::state`] reducer.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`app`]: the eframe application, event plumbing and textures
//! - [`uploader`]: drag-and-drop target, file picker and style selector
//! - [`preview`]: side-by-side original/sticker panes with download and reset
//! - [`settings`]: style preference persisted between sessions
//!
//! All state changes flow through [`crate::state::AppState::apply`]; the
//! views only translate widget interactions into events.

mod app;
mod preview;
mod settings;
mod uploader;

pub use app::StickerApp;
pub use settings::Settings;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::image_file::ImageFile;
use eframe::egui;

/// Launches the sticker maker window and blocks until it is closed.
///
/// # Arguments
/// * `config` - Application configuration with API key and model
/// * `initial_image` - Optional image to upload immediately on startup
///   (used by the CLI when a path is passed together with `--gui`)
pub fn run_app(config: Config, initial_image: Option<ImageFile>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Sticker Maker",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(StickerApp::new(config, initial_image)) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))?;

    Ok(())
}
