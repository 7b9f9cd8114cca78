use crate::NailStudioApp;

/// Floating step-by-step guide while a tutorial runs.
pub fn tutorial_window(app: &mut NailStudioApp, ctx: &egui::Context) {
    let Some(player) = app.tutorial.as_mut() else {
        return;
    };
    let workbench = &mut app.workbench;
    let mut open = true;
    let mut close = false;

    egui::Window::new(player.tutorial().title.clone())
        .open(&mut open)
        .collapsible(true)
        .resizable(false)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(player.tutorial().difficulty.label());
                ui.weak(&player.tutorial().duration);
            });
            ui.add(
                egui::ProgressBar::new(player.progress())
                    .text(format!(
                        "Step {} of {}",
                        player.current_index() + 1,
                        player.step_count()
                    )),
            );

            if let Some(step) = player.current_step() {
                ui.heading(&step.title);
                ui.label(&step.description);
                ui.label(egui::RichText::new(&step.action).italics());
            }

            let mut done = player.is_complete(player.current_index());
            if ui.checkbox(&mut done, "Done").changed() && done {
                player.mark_complete();
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!player.is_first(), egui::Button::new("⏴ Previous"))
                    .clicked()
                {
                    player.previous(workbench);
                }
                if player.is_last() {
                    if ui.button("Finish").clicked() {
                        close = true;
                    }
                } else if ui.button("Next ⏵").clicked() {
                    player.next(workbench);
                }
            });
        });

    if close || !open {
        if let Some(player) = app.tutorial.take() {
            player.close();
        }
    }
}
