use egui::{Pos2, Rect, Sense, Vec2, vec2};

use crate::NailStudioApp;
use crate::app::ViewMode;
use crate::command::CommandResult;
use crate::renderer::surface_transform;
use crate::surface::NAIL_COUNT;

const SURFACE_SPACING: f32 = 16.0;

pub fn central_panel(app: &mut NailStudioApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut view = app.view;
            ui.selectable_value(&mut view, ViewMode::Design, "✏ Design");
            ui.selectable_value(&mut view, ViewMode::Preview, "✋ Try on");
            app.set_view(view);
        });
        ui.separator();

        match app.view {
            ViewMode::Design => design_view(app, ui),
            ViewMode::Preview => app.workbench.preview_mut().ui(ui),
        }
    });
}

fn design_view(app: &mut NailStudioApp, ui: &mut egui::Ui) {
    let available = ui.available_size();
    let surface_size = app.workbench.surfaces()[0].size();
    let nails = NAIL_COUNT as f32;
    let scale = ((available.x - SURFACE_SPACING * (nails + 1.0)) / (surface_size.x * nails))
        .min((available.y - 2.0 * SURFACE_SPACING) / surface_size.y)
        .clamp(0.5, 3.0);

    let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
    let origin = response.rect.min + Vec2::splat(SURFACE_SPACING);
    let step = surface_size.x * scale + SURFACE_SPACING;
    let rects: [Rect; NAIL_COUNT] = std::array::from_fn(|nail| {
        Rect::from_min_size(origin + vec2(step * nail as f32, 0.0), surface_size * scale)
    });

    handle_pointer(app, ui, &response, &rects);

    let preview = app.workbench.tool_preview();
    for (nail, rect) in rects.iter().enumerate() {
        let surface = &app.workbench.surfaces()[nail];
        app.renderer
            .paint(ui.ctx(), &painter, *rect, surface, preview.as_ref());

        let label_color = if nail == app.selected_nail {
            ui.visuals().strong_text_color()
        } else {
            ui.visuals().weak_text_color()
        };
        painter.text(
            rect.center_bottom() + vec2(0.0, 4.0),
            egui::Align2::CENTER_TOP,
            format!("{}", nail + 1),
            egui::FontId::proportional(14.0),
            label_color,
        );
    }
}

/// Route raw pointer input to the nail under the press. A gesture stays on
/// the nail it started on until release.
fn handle_pointer(
    app: &mut NailStudioApp,
    ui: &egui::Ui,
    response: &egui::Response,
    rects: &[Rect; NAIL_COUNT],
) {
    let (pressed, down, released, pos, delta) = ui.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_down(),
            i.pointer.primary_released(),
            i.pointer.interact_pos(),
            i.pointer.delta(),
        )
    });
    let Some(pos) = pos else {
        return;
    };
    let to_local = |app: &NailStudioApp, nail: usize, pos: Pos2| -> Pos2 {
        surface_transform(&app.workbench.surfaces()[nail], rects[nail]).inverse() * pos
    };

    if pressed && response.hovered() {
        if let Some(nail) = rects.iter().position(|rect| rect.contains(pos)) {
            app.selected_nail = nail;
            app.active_nail = Some(nail);
            let local = to_local(app, nail, pos);
            report(app.workbench.pointer_down(nail, local));
        }
    }

    let Some(nail) = app.active_nail else {
        return;
    };
    let local = to_local(app, nail, pos);
    if down && delta != Vec2::ZERO {
        report(app.workbench.pointer_move(nail, local));
    }
    if released {
        app.active_nail = None;
        report(app.workbench.pointer_up(nail, local));
    }
}

fn report(result: CommandResult) {
    if let Err(err) = result {
        log::warn!("Pointer input dropped: {err}");
    }
}
