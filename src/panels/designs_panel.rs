use std::collections::HashMap;

use egui::TextureHandle;

use crate::NailStudioApp;
use crate::app::DesignAction;
use crate::snapshot;
use crate::store::DesignRecord;

const THUMBNAIL_HEIGHT: f32 = 40.0;

/// Saved designs, export and the tutorial catalog. Returns the storage
/// operation the user asked for, if any.
pub fn designs_panel(app: &mut NailStudioApp, ctx: &egui::Context) -> Option<DesignAction> {
    let mut action = None;
    egui::SidePanel::right("designs_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("My designs");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut app.design_name)
                            .hint_text("Design name")
                            .desired_width(150.0),
                    );
                    if ui.button("💾 Save").clicked() {
                        action = Some(DesignAction::Save);
                    }
                });

                if app.store.list().is_empty() {
                    ui.weak("No saved designs yet.");
                }
                for record in app.store.list() {
                    ui.group(|ui| {
                        ui.horizontal(|ui| {
                            ui.strong(&record.name);
                            ui.weak(&record.date);
                        });
                        ui.horizontal(|ui| {
                            for texture in thumbnails_for(&mut app.thumbnails, ctx, record) {
                                let size = texture.size_vec2();
                                let scale = THUMBNAIL_HEIGHT / size.y.max(1.0);
                                ui.image((texture.id(), size * scale));
                            }
                        });
                        ui.horizontal(|ui| {
                            if ui.button("Load").clicked() {
                                action = Some(DesignAction::Load(record.id.clone()));
                            }
                            if ui.button("🗑 Delete").clicked() {
                                action = Some(DesignAction::Delete(record.id.clone()));
                            }
                        });
                    });
                }

                ui.separator();
                ui.heading("Export");
                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.horizontal(|ui| {
                        ui.label("Folder");
                        ui.text_edit_singleline(&mut app.export_dir);
                    });
                }
                if ui.button("Export nails as PNG").clicked() {
                    action = Some(DesignAction::Export);
                }

                ui.separator();
                ui.heading("Tutorials");
                let mut start = None;
                for (index, tutorial) in app.tutorials.iter().enumerate() {
                    ui.group(|ui| {
                        ui.strong(&tutorial.title);
                        ui.weak(format!(
                            "{} · {}",
                            tutorial.difficulty.label(),
                            tutorial.duration
                        ));
                        ui.label(&tutorial.description);
                        if ui.button("Start").clicked() {
                            start = Some(index);
                        }
                    });
                }
                if let Some(index) = start {
                    app.start_tutorial(index);
                }
            });
        });
    action
}

fn thumbnails_for<'a>(
    cache: &'a mut HashMap<String, Vec<TextureHandle>>,
    ctx: &egui::Context,
    record: &DesignRecord,
) -> &'a [TextureHandle] {
    cache.entry(record.id.clone()).or_insert_with(|| {
        record
            .thumbnails
            .iter()
            .enumerate()
            .filter_map(|(nail, uri)| match snapshot::from_data_uri(uri) {
                Ok(image) => {
                    let size = [image.width() as usize, image.height() as usize];
                    let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
                    let name = format!("thumbnail_{}_{nail}", record.id);
                    Some(ctx.load_texture(name, pixels, egui::TextureOptions::LINEAR))
                }
                Err(err) => {
                    log::warn!("Unreadable thumbnail in design {}: {err}", record.id);
                    None
                }
            })
            .collect()
    })
}
