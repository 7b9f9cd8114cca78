use crate::NailStudioApp;

/// Inline, dismissable message above everything else.
pub fn message_bar(app: &mut NailStudioApp, ctx: &egui::Context) {
    let Some(message) = app.message.clone() else {
        return;
    };
    egui::TopBottomPanel::top("message_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.colored_label(ui.visuals().warn_fg_color, message);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✖").on_hover_text("Dismiss").clicked() {
                    app.message = None;
                }
            });
        });
    });
}
