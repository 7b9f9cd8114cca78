use crate::NailStudioApp;
use crate::color::{self, SWATCHES};
use crate::components::{ToolButton, color_swatch};
use crate::config::{BRUSH_SIZE_RANGE, GLITTER_DENSITY_RANGE};
use crate::patterns::Pattern;
use crate::shape::NailShape;
use crate::surface::NAIL_COUNT;
use crate::texture::NailTexture;
use crate::tools::{Tool, ToolKind};

pub fn tools_panel(app: &mut NailStudioApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(230.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                tool_section(app, ui);
                ui.separator();
                color_section(app, ui);
                ui.separator();
                nail_section(app, ui);
                ui.separator();
                history_section(app, ui);
            });
        });
}

fn tool_section(app: &mut NailStudioApp, ui: &mut egui::Ui) {
    ui.heading("Tools");
    let active = app.workbench.tool().kind();
    ui.horizontal_wrapped(|ui| {
        for kind in ToolKind::ALL {
            if ToolButton::new(kind, kind == active).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", kind.name());
                app.workbench.set_tool(kind);
            }
        }
    });

    let mut brush_size = app.workbench.config().brush_size;
    if ui
        .add(egui::Slider::new(&mut brush_size, BRUSH_SIZE_RANGE).text("Brush size"))
        .changed()
    {
        app.workbench.set_brush_size(brush_size);
    }

    let mut density = app.workbench.config().glitter_density;
    if ui
        .add(egui::Slider::new(&mut density, GLITTER_DENSITY_RANGE).text("Glitter density"))
        .changed()
    {
        app.workbench.set_glitter_density(density);
    }
}

fn color_section(app: &mut NailStudioApp, ui: &mut egui::Ui) {
    ui.heading("Polish");
    let current = app.workbench.config().color;
    let mut picked = None;

    ui.horizontal_wrapped(|ui| {
        for swatch in SWATCHES {
            if color_swatch(ui, swatch, swatch == current).clicked() {
                picked = Some(swatch);
            }
        }
    });
    ui.horizontal(|ui| {
        let mut color = current;
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut color,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            picked = Some(color);
        }
        ui.label(color::to_hex(current));
    });

    if !app.palette.is_empty() {
        ui.label("From your picture:");
        ui.horizontal_wrapped(|ui| {
            for &swatch in &app.palette {
                if color_swatch(ui, swatch, swatch == current).clicked() {
                    picked = Some(swatch);
                }
            }
        });
        if ui.small_button("Forget picture colors").clicked() {
            app.palette.clear();
        }
    } else {
        ui.weak("Drop a picture here to pick colors from it.");
    }

    if let Some(color) = picked {
        app.workbench.set_color(color);
    }

    ui.horizontal(|ui| {
        ui.label("Only nail");
        egui::ComboBox::from_id_salt("selected_nail")
            .selected_text(format!("{}", app.selected_nail + 1))
            .show_ui(ui, |ui| {
                for nail in 0..NAIL_COUNT {
                    ui.selectable_value(&mut app.selected_nail, nail, format!("{}", nail + 1));
                }
            });
        let mut nail_color = app.workbench.nail_colors()[app.selected_nail];
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut nail_color,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            if let Err(err) = app.workbench.set_nail_color(app.selected_nail, nail_color) {
                log::warn!("{err}");
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Skin tone");
        let mut skin = app.workbench.config().skin_tone;
        if egui::color_picker::color_edit_button_srgba(
            ui,
            &mut skin,
            egui::color_picker::Alpha::Opaque,
        )
        .changed()
        {
            app.workbench.set_skin_tone(skin);
        }
    });
}

fn nail_section(app: &mut NailStudioApp, ui: &mut egui::Ui) {
    ui.heading("Nails");

    let current_shape = app.workbench.config().shape;
    ui.horizontal_wrapped(|ui| {
        for shape in NailShape::ALL {
            if ui.selectable_label(shape == current_shape, shape.label()).clicked() {
                app.workbench.set_shape(shape);
            }
        }
    });

    let current_texture = app.workbench.config().texture;
    ui.horizontal_wrapped(|ui| {
        for texture in NailTexture::ALL {
            if ui
                .selectable_label(texture == current_texture, texture.label())
                .clicked()
            {
                app.workbench.set_texture(texture);
            }
        }
    });

    ui.menu_button(format!("Patterns for nail {}", app.selected_nail + 1), |ui| {
        let mut category = None;
        for pattern in Pattern::ALL {
            if category != Some(pattern.category()) {
                category = Some(pattern.category());
                ui.label(egui::RichText::new(pattern.category().label()).strong());
            }
            if ui.button(pattern.name()).clicked() {
                if let Err(err) = app.workbench.apply_pattern(app.selected_nail, pattern) {
                    log::warn!("{err}");
                }
                ui.close_menu();
            }
        }
    });
}

fn history_section(app: &mut NailStudioApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        if ui
            .add_enabled(app.workbench.can_undo(), egui::Button::new("Undo"))
            .clicked()
        {
            if let Err(err) = app.workbench.undo() {
                log::debug!("{err}");
            }
        }
        if ui
            .add_enabled(app.workbench.can_redo(), egui::Button::new("Redo"))
            .clicked()
        {
            if let Err(err) = app.workbench.redo() {
                log::debug!("{err}");
            }
        }
    });

    ui.horizontal_wrapped(|ui| {
        let results = [
            ui.button(format!("Clear nail {}", app.selected_nail + 1))
                .clicked()
                .then(|| app.workbench.clear(app.selected_nail)),
            ui.button("Clear all")
                .clicked()
                .then(|| app.workbench.clear_all()),
            ui.button("French all")
                .on_hover_text("Pale base with a tip in the selected color")
                .clicked()
                .then(|| app.workbench.apply_french_all()),
        ];
        for err in results.into_iter().flatten().filter_map(Result::err) {
            log::warn!("{err}");
        }
    });

    let drawn: usize = app
        .workbench
        .surfaces()
        .iter()
        .map(|surface| surface.layers().len())
        .sum();
    ui.weak(format!("{drawn} drawn objects"));
}
