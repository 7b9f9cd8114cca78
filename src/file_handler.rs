use eframe::egui;
use egui::Color32;

use crate::palette::{self, PaletteError};

/// Result of one dropped or picked picture.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteUpload {
    pub file_name: String,
    pub result: Result<Vec<Color32>, PaletteError>,
}

/// Turns pictures dropped on the window into color palettes.
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
    processed_files: Vec<String>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up any newly dropped files from the UI context.
    /// Returns true if there is something to process.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        let mut new_dropped_files = false;
        ctx.input(|i| {
            if !i.raw.dropped_files.is_empty() {
                self.dropped_files = i.raw.dropped_files.clone();
                new_dropped_files = true;
            }
        });
        new_dropped_files
    }

    /// Extract a palette from every dropped file not seen before.
    pub fn process_dropped_files(&mut self) -> Vec<PaletteUpload> {
        let files = std::mem::take(&mut self.dropped_files);
        let mut uploads = Vec::new();
        for file in &files {
            let file_name = display_name(file);
            if self.processed_files.contains(&file_name) {
                continue;
            }
            let result = read_palette(file, &file_name);
            if let Err(err) = &result {
                log::warn!("{err}");
            }
            self.processed_files.push(file_name.clone());
            uploads.push(PaletteUpload { file_name, result });
        }
        uploads
    }

    /// Forget which files were already processed, so the same picture can be
    /// dropped again.
    pub fn clear_processed_files(&mut self) {
        self.dropped_files.clear();
        self.processed_files.clear();
    }

    /// Dim the window while files are dragged over it.
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }
        let text = ctx.input(|i| {
            let mut text = "Drop a picture to extract its colors:\n".to_owned();
            for file in &i.raw.hovered_files {
                match &file.path {
                    Some(path) => text += &format!("\n{}", path.display()),
                    None if !file.mime.is_empty() => text += &format!("\n{}", file.mime),
                    None => text += "\n(unnamed file)",
                }
            }
            text
        });

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        let font = ctx
            .style()
            .text_styles
            .get(&egui::TextStyle::Heading)
            .cloned()
            .unwrap_or_else(|| FontId::proportional(20.0));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            text,
            font,
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn read_palette(file: &egui::DroppedFile, file_name: &str) -> Result<Vec<Color32>, PaletteError> {
    if !palette::looks_like_image(&file.mime, file_name) {
        return Err(PaletteError::NotAnImage(file_name.to_owned()));
    }

    if let Some(bytes) = &file.bytes {
        log::info!("Reading palette from memory: {file_name} ({} bytes)", bytes.len());
        return palette::extract_palette(file_name, bytes);
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        log::info!("Reading palette from {}", path.display());
        let bytes = std::fs::read(path).map_err(|err| PaletteError::Unreadable {
            name: file_name.to_owned(),
            reason: err.to_string(),
        })?;
        return palette::extract_palette(file_name, &bytes);
    }

    Err(PaletteError::Unreadable {
        name: file_name.to_owned(),
        reason: "no file contents available".to_owned(),
    })
}
