//! Preview view: original and generated sticker side by side.
//!
//! Shows a spinner while a generation is in flight, the fixed failure
//! message in the failed state, and download/reset actions.

use crate::state::{AppState, Phase};
use eframe::egui;

/// Largest edge of a preview pane, in points.
const PANE_SIZE: f32 = 380.0;

/// What the user asked for on this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PreviewAction {
    None,
    /// Save the generated sticker to disk.
    Download,
    /// Clear everything and go back to the uploader.
    Reset,
}

/// Renders the preview view and returns the requested action.
pub(crate) fn show(
    ui: &mut egui::Ui,
    state: &AppState,
    original: Option<&egui::TextureHandle>,
    generated: Option<&egui::TextureHandle>,
) -> PreviewAction {
    let mut action = PreviewAction::None;

    ui.add_space(12.0);
    ui.columns(2, |columns| {
        columns[0].vertical_centered(|ui| {
            ui.strong("Original");
            ui.add_space(8.0);
            show_texture(ui, original);
            if let Some(file) = &state.original {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(format!("{} ({} bytes)", file.name, file.size_bytes))
                        .small()
                        .color(egui::Color32::GRAY),
                );
            }
        });

        columns[1].vertical_centered(|ui| {
            ui.strong("AI Sticker");
            ui.add_space(8.0);
            match state.phase() {
                Phase::Generating => {
                    ui.add_space(PANE_SIZE / 3.0);
                    ui.spinner();
                    ui.label("Generating Sticker...");
                }
                Phase::Failed => {
                    ui.add_space(PANE_SIZE / 3.0);
                    ui.label(
                        egui::RichText::new("Generation Failed")
                            .strong()
                            .color(egui::Color32::LIGHT_RED),
                    );
                    if let Some(message) = &state.error {
                        ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
                    }
                }
                _ => show_texture(ui, generated),
            }
        });
    });

    ui.add_space(16.0);
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            if state.phase() == Phase::Ready && ui.button("⬇ Download Sticker").clicked() {
                action = PreviewAction::Download;
            }
            if ui.button("⟲ Convert Another").clicked() {
                action = PreviewAction::Reset;
            }
        });
    });

    action
}

/// Draws a texture scaled into the pane, or a placeholder while decoding.
fn show_texture(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>) {
    match texture {
        Some(texture) => {
            ui.add(
                egui::Image::new(texture).max_size(egui::vec2(PANE_SIZE, PANE_SIZE)),
            );
        }
        None => {
            ui.label(egui::RichText::new("…").color(egui::Color32::GRAY));
        }
    }
}
