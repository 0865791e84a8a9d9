//! Upload view: drag-and-drop target, file picker and style selector.
//!
//! Both selection paths (drop and browse) converge on the [`ImageFile`]
//! codec; non-image files are ignored without any state change.

use crate::image_file::{self, ImageFile};
use crate::state::AppEvent;
use crate::style::StickerStyle;
use eframe::egui;
use std::path::Path;

/// File extensions offered by the native picker.
const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Renders the upload view and returns the events it produced.
pub(crate) fn show(ui: &mut egui::Ui, current_style: StickerStyle) -> Vec<AppEvent> {
    let mut events = Vec::new();

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading("Upload Your Image");
        ui.label(
            egui::RichText::new(
                "Drag & drop an image file or click to browse. \
                 The AI will instantly transform it into a cool sticker.",
            )
            .color(egui::Color32::LIGHT_GRAY),
        );
        ui.add_space(12.0);

        // Style is captured at upload time, so it is only offered here
        let mut style = current_style;
        ui.horizontal(|ui| {
            ui.label("Style:");
            for option in StickerStyle::ALL {
                ui.radio_value(&mut style, *option, option.label());
            }
        });
        if style != current_style {
            events.push(AppEvent::SelectStyle(style));
        }

        ui.add_space(16.0);

        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke = if hovering {
            egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE)
        } else {
            egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
        };

        egui::Frame::group(ui.style())
            .stroke(stroke)
            .inner_margin(egui::Margin::same(40))
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width().min(480.0));
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("🖼").size(42.0));
                    ui.label("Drag & drop your image here");
                    ui.label(egui::RichText::new("or").color(egui::Color32::GRAY));
                    if ui.button("Browse Files").clicked() {
                        if let Some(file) = pick_image() {
                            events.push(AppEvent::Upload(file));
                        }
                    }
                });
            });
    });

    // Dropped files arrive through the raw input, independent of widgets
    let dropped = ui.ctx().input(|i| i.raw.dropped_files.clone());
    if let Some(file) = dropped.iter().find_map(image_from_drop) {
        events.push(AppEvent::Upload(file));
    }

    events
}

/// Opens the native file picker and decodes the selection.
fn pick_image() -> Option<ImageFile> {
    let path = rfd::FileDialog::new()
        .add_filter("Images", PICKER_EXTENSIONS)
        .pick_file()?;
    image_from_path(&path)
}

/// Decodes a dropped file, whichever form the platform delivered it in.
fn image_from_drop(file: &egui::DroppedFile) -> Option<ImageFile> {
    if let Some(path) = &file.path {
        return image_from_path(path);
    }
    // Some platforms deliver bytes and a declared MIME instead of a path
    let bytes = file.bytes.as_deref()?;
    ImageFile::from_bytes(file.name.clone(), file.mime.clone(), bytes)
}

/// Reads and encodes an image from disk; non-image extensions are skipped.
fn image_from_path(path: &Path) -> Option<ImageFile> {
    let mime = image_file::mime_from_extension(path)?;
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Warning: Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    ImageFile::from_bytes(name, mime, &bytes)
}
