//! Main sticker maker application.
//!
//! This module contains the `StickerApp` struct which implements the
//! `eframe::App` trait and owns the state container, the channel to the
//! background generation task, and the preview textures.

use super::preview::{self, PreviewAction};
use super::settings::Settings;
use super::uploader;
use crate::config::Config;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::image_file::{self, ImageFile, DOWNLOAD_FILE_NAME};
use crate::state::{AppEvent, AppState, Effect};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Result of one background generation request.
///
/// Sent through a channel from the async task to the UI thread, where it is
/// folded back into the state machine as an [`AppEvent::Resolved`].
pub(crate) struct GenerationOutcome {
    /// Token of the request this outcome belongs to.
    pub request: u64,
    /// Generated sticker as a data URL, or the error text for logging.
    pub outcome: std::result::Result<String, String>,
}

/// The sticker maker window.
pub struct StickerApp {
    state: AppState,
    config: Config,

    // Channel from the background generation task
    rx: Receiver<GenerationOutcome>,
    tx: Sender<GenerationOutcome>,

    // Textures are decoded lazily from the data URLs held in the state
    original_texture: Option<egui::TextureHandle>,
    generated_texture: Option<egui::TextureHandle>,

    // Image handed over by the CLI, uploaded on the first frame
    pending_upload: Option<ImageFile>,

    settings: Settings,
}

impl StickerApp {
    /// Creates a new application instance.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    /// * `initial_image` - Optional image to upload on the first frame
    pub fn new(config: Config, initial_image: Option<ImageFile>) -> Self {
        let (tx, rx) = channel();

        // Restore the style chosen in a previous session
        let settings = Settings::load();
        let mut state = AppState::default();
        state.apply(AppEvent::SelectStyle(settings.style));

        let mut config = config;
        config.model_name = settings.effective_model(&config);

        Self {
            state,
            config,
            rx,
            tx,
            original_texture: None,
            generated_texture: None,
            pending_upload: initial_image,
            settings,
        }
    }

    /// Read-only view of the application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Routes an event through the reducer and runs any resulting effect.
    fn dispatch(&mut self, event: AppEvent, ctx: &egui::Context) {
        let invalidate = matches!(event, AppEvent::Upload(_) | AppEvent::Reset);
        if let Some(effect) = self.state.apply(event) {
            self.run_effect(effect, ctx);
        }
        if invalidate {
            self.original_texture = None;
            self.generated_texture = None;
        }
        if self.settings.style != self.state.style {
            self.settings.style = self.state.style;
            if let Err(e) = self.settings.save() {
                eprintln!("Warning: Failed to save settings: {}", e);
            }
        }
    }

    /// Executes a reducer effect by spawning the generation task.
    ///
    /// The task runs on its own thread with a current-thread tokio runtime;
    /// the outcome comes back through the channel tagged with the request
    /// token, so stale resolutions are discarded by the reducer.
    fn run_effect(&self, effect: Effect, ctx: &egui::Context) {
        let Effect::Generate { request, base64_payload, mime_type, style } = effect;

        let tx = self.tx.clone();
        let config = self.config.clone();
        let ctx = ctx.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            let outcome = match runtime {
                Ok(rt) => rt.block_on(async {
                    let client = GeminiClient::new(&config).map_err(|e| e.to_string())?;
                    client
                        .generate_sticker(base64_payload, mime_type, style)
                        .await
                        .map(|sticker| sticker.data_url())
                        .map_err(|e| e.to_string())
                }),
                Err(e) => Err(format!("Failed to create async runtime: {}", e)),
            };

            let _ = tx.send(GenerationOutcome { request, outcome });
            ctx.request_repaint();
        });
    }

    /// Drains resolved generations from the background task.
    fn process_outcomes(&mut self, ctx: &egui::Context) {
        let resolved: Vec<GenerationOutcome> = self.rx.try_iter().collect();
        for GenerationOutcome { request, outcome } in resolved {
            self.dispatch(AppEvent::Resolved { request, outcome }, ctx);
        }
    }

    /// Decodes a data URL into an egui texture.
    fn load_texture(ctx: &egui::Context, id: &str, data_url: &str) -> Result<egui::TextureHandle> {
        let bytes = image_file::decode_data_url(data_url)?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| crate::error::AppError::image(format!("Failed to decode image: {}", e)))?;

        let rgba = decoded.to_rgba8();
        let size = [decoded.width() as usize, decoded.height() as usize];
        let pixels = rgba.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());

        Ok(ctx.load_texture(id, color_image, egui::TextureOptions::LINEAR))
    }

    /// Makes sure the preview textures match the current state.
    fn refresh_textures(&mut self, ctx: &egui::Context) {
        if self.original_texture.is_none() {
            if let Some(file) = &self.state.original {
                match Self::load_texture(ctx, "original", &file.display_url) {
                    Ok(texture) => self.original_texture = Some(texture),
                    Err(e) => eprintln!("Warning: Failed to load original preview: {}", e),
                }
            }
        }

        if self.generated_texture.is_none() {
            if let Some(url) = self.state.generated.clone() {
                match Self::load_texture(ctx, "sticker", &url) {
                    Ok(texture) => self.generated_texture = Some(texture),
                    Err(e) => eprintln!("Warning: Failed to load sticker preview: {}", e),
                }
            }
        }
    }

    /// Saves the generated sticker through a native save dialog.
    fn download_sticker(&self) {
        let Some(url) = &self.state.generated else {
            return;
        };

        let bytes = match image_file::decode_data_url(url) {
            Ok(bytes) => bytes,
            Err(e) => {
                eprintln!("Warning: Failed to decode sticker for download: {}", e);
                return;
            }
        };

        if let Some(path) = rfd::FileDialog::new()
            .set_file_name(DOWNLOAD_FILE_NAME)
            .save_file()
        {
            if let Err(e) = std::fs::write(&path, bytes) {
                eprintln!("Warning: Failed to save sticker: {}", e);
            }
        }
    }
}

impl eframe::App for StickerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // Upload handed over by the CLI, once the context exists
        if let Some(file) = self.pending_upload.take() {
            self.dispatch(AppEvent::Upload(file), ctx);
        }

        self.process_outcomes(ctx);
        self.refresh_textures(ctx);

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("AI Sticker Maker");
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(
                        "Powered by Generative AI. Create amazing stickers from your images.",
                    )
                    .small()
                    .color(egui::Color32::GRAY),
                );
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.original.is_none() {
                // Uploader view: both selection paths converge on the codec
                let events = uploader::show(ui, self.state.style);
                for event in events {
                    self.dispatch(event, ctx);
                }
            } else {
                let action = preview::show(
                    ui,
                    &self.state,
                    self.original_texture.as_ref(),
                    self.generated_texture.as_ref(),
                );
                match action {
                    PreviewAction::Download => self.download_sticker(),
                    PreviewAction::Reset => self.dispatch(AppEvent::Reset, ctx),
                    PreviewAction::None => {}
                }
            }
        });
    }
}
