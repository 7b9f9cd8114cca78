use std::collections::HashMap;

use egui::Color32;

use crate::config::EditorConfig;
use crate::file_handler::FileHandler;
use crate::panels;
use crate::renderer::SurfaceRenderer;
use crate::store::{DesignStore, EframeStorage, MemoryStorage, STORAGE_KEY};
use crate::tutorial::{self, Tutorial, TutorialPlayer};
use crate::workbench::Workbench;

/// Which view fills the central panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Design,
    Preview,
}

/// Design list operations that need the platform storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignAction {
    Save,
    Load(String),
    Delete(String),
    Export,
}

pub struct NailStudioApp {
    pub(crate) workbench: Workbench,
    pub(crate) store: DesignStore,
    /// Used when the platform has no persistent storage.
    fallback_storage: MemoryStorage,
    pub(crate) renderer: SurfaceRenderer,
    file_handler: FileHandler,
    pub(crate) tutorials: Vec<Tutorial>,
    pub(crate) tutorial: Option<TutorialPlayer>,
    /// Colors extracted from the last uploaded picture.
    pub(crate) palette: Vec<Color32>,
    /// Dismissable inline message.
    pub(crate) message: Option<String>,
    pub(crate) design_name: String,
    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) export_dir: String,
    pub(crate) view: ViewMode,
    /// Nail targeted by patterns and per-nail colors.
    pub(crate) selected_nail: usize,
    /// Nail that received the current pointer press.
    pub(crate) active_nail: Option<usize>,
    pub(crate) thumbnails: HashMap<String, Vec<egui::TextureHandle>>,
}

impl std::fmt::Debug for NailStudioApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NailStudioApp")
            .field("workbench", &self.workbench)
            .field("designs", &self.store.list().len())
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}

impl NailStudioApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: EditorConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        let saved = cc.storage.and_then(|storage| storage.get_string(STORAGE_KEY));
        Self::with_parts(Workbench::new(config), DesignStore::from_saved(saved.as_deref()))
    }

    fn with_parts(workbench: Workbench, store: DesignStore) -> Self {
        let tutorials = tutorial::builtin_catalog().unwrap_or_else(|err| {
            log::error!("Tutorial catalog is unreadable: {err}");
            Vec::new()
        });
        workbench
            .events()
            .subscribe(Box::new(crate::event::LogEventHandler));
        Self {
            workbench,
            store,
            fallback_storage: MemoryStorage::new(),
            renderer: SurfaceRenderer::default(),
            file_handler: FileHandler::new(),
            tutorials,
            tutorial: None,
            palette: Vec::new(),
            message: None,
            design_name: String::new(),
            #[cfg(not(target_arch = "wasm32"))]
            export_dir: "nail-export".to_owned(),
            view: ViewMode::Design,
            selected_nail: 0,
            active_nail: None,
            thumbnails: HashMap::new(),
        }
    }

    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    pub fn set_view(&mut self, view: ViewMode) {
        if self.view == view {
            return;
        }
        self.view = view;
        match view {
            ViewMode::Preview => self.workbench.show_preview(),
            ViewMode::Design => self.workbench.hide_preview(),
        }
    }

    pub fn start_tutorial(&mut self, index: usize) {
        if let Some(tutorial) = self.tutorials.get(index).cloned() {
            self.tutorial = Some(TutorialPlayer::start(tutorial, &mut self.workbench));
        }
    }

    fn show_error(&mut self, context: &str, err: impl std::fmt::Display) {
        log::error!("{context}: {err}");
        self.message = Some(format!("{context}: {err}"));
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if !self.file_handler.check_for_dropped_files(ctx) {
            return;
        }
        for upload in self.file_handler.process_dropped_files() {
            match upload.result {
                Ok(colors) => {
                    log::info!("{} colors from {}", colors.len(), upload.file_name);
                    self.palette = colors;
                    self.message = None;
                }
                Err(err) => self.message = Some(err.to_string()),
            }
        }
        self.file_handler.clear_processed_files();
    }

    fn run_design_action(&mut self, action: DesignAction, frame: &mut eframe::Frame) {
        match action {
            DesignAction::Save => {
                let draft = match self.workbench.capture() {
                    Ok(draft) => draft,
                    Err(err) => return self.show_error("Could not capture the design", err),
                };
                let name = std::mem::take(&mut self.design_name);
                let result = match frame.storage_mut() {
                    Some(storage) => self.store.save(&mut EframeStorage(storage), &name, &draft),
                    None => self.store.save(&mut self.fallback_storage, &name, &draft),
                };
                if let Err(err) = result {
                    self.show_error("Could not save the design", err);
                }
            }
            DesignAction::Load(id) => {
                let result = self
                    .store
                    .load(&id)
                    .and_then(|design| self.workbench.apply_design(design));
                match result {
                    Ok(()) => self.active_nail = None,
                    Err(err) => self.show_error("Could not load the design", err),
                }
            }
            DesignAction::Delete(id) => {
                let result = match frame.storage_mut() {
                    Some(storage) => self.store.delete(&mut EframeStorage(storage), &id),
                    None => self.store.delete(&mut self.fallback_storage, &id),
                };
                match result {
                    Ok(_) => {
                        self.thumbnails.remove(&id);
                    }
                    Err(err) => self.show_error("Could not delete the design", err),
                }
            }
            DesignAction::Export => self.export(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export(&mut self) {
        let directory = std::path::PathBuf::from(&self.export_dir);
        match crate::export::write_to_dir(self.workbench.surfaces(), &directory) {
            Ok(count) => {
                self.message = Some(format!("Exported {count} nails to {}", directory.display()))
            }
            Err(err) => self.show_error("Export failed", err),
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn export(&mut self) {
        match crate::export::download_pngs(self.workbench.surfaces()) {
            Ok(count) => self.message = Some(format!("Downloaded {count} nails")),
            Err(err) => self.show_error("Export failed", err),
        }
    }

    #[cfg(test)]
    fn headless(store: DesignStore) -> Self {
        Self::with_parts(Workbench::with_seed(EditorConfig::default(), 3), store)
    }
}

impl eframe::App for NailStudioApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.workbench.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.renderer.begin_frame();
        self.handle_dropped_files(ctx);
        self.workbench.tick();

        panels::message_bar(self, ctx);
        panels::tools_panel(self, ctx);
        if let Some(action) = panels::designs_panel(self, ctx) {
            self.run_design_action(action, frame);
        }
        panels::tutorial_window(self, ctx);
        panels::central_panel(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);

        if self.workbench.scheduler().has_active() {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TaskKind;
    use crate::store::KeyValueStore;

    #[test]
    fn preview_loop_follows_the_view() {
        let mut app = NailStudioApp::headless(DesignStore::default());
        app.set_view(ViewMode::Preview);
        assert!(app.workbench.scheduler().is_active(TaskKind::RenderLoop));
        app.set_view(ViewMode::Design);
        assert!(!app.workbench.scheduler().has_active());
    }

    #[test]
    fn tutorials_drive_the_workbench() {
        let mut app = NailStudioApp::headless(DesignStore::default());
        let index = app
            .tutorials
            .iter()
            .position(|t| t.id == "geometric-design")
            .unwrap();
        app.start_tutorial(index);
        let player = app.tutorial.as_ref().unwrap();
        assert_eq!(player.current_index(), 0);
        assert_eq!(player.step_count(), app.tutorials[index].steps.len());
    }

    #[test]
    fn saving_without_storage_uses_memory() {
        let mut app = NailStudioApp::headless(DesignStore::default());
        let draft = app.workbench.capture().unwrap();
        app.store
            .save(&mut app.fallback_storage, "Test", &draft)
            .unwrap();
        assert!(app.fallback_storage.get_string(STORAGE_KEY).is_some());
    }
}
