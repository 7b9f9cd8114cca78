//! 3D try-on preview of the current design on a hand.

mod camera;
mod hand;
mod mesh;
mod raster;

use egui::Color32;
use glam::{Mat4, Vec2, Vec3};

use crate::environment::{EnvironmentLoader, EnvironmentSource};
use crate::scheduler::{FrameScheduler, FrameTask, TaskKind};
use crate::shape::NailShape;
use crate::surface::NAIL_COUNT;
use crate::texture::NailTexture;

pub use camera::OrbitCamera;
pub use hand::{FINGERS, FingerSpec, HandModel, NodeRole, SceneNode, Transform};
pub use mesh::Mesh;
pub use raster::{BACKGROUND, RenderParams, render};

/// Amplitude of the idle breathing motion, in world units.
pub const BREATHING_AMPLITUDE: f32 = 0.05;
/// Angular speed of the breathing motion, in radians per second.
pub const BREATHING_SPEED: f32 = 1.5;

/// Vertical offset of the hand at `time` seconds.
pub fn breathing_offset(time: f32) -> f32 {
    (time * BREATHING_SPEED).sin() * BREATHING_AMPLITUDE
}

/// Owns the hand model and, while visible, a render loop.
#[derive(Debug)]
pub struct HandPreview {
    model: HandModel,
    camera: OrbitCamera,
    environment: EnvironmentLoader,
    render_task: Option<FrameTask>,
    /// Last projected frame. Dropped with the render loop.
    frame: Option<egui::Mesh>,
    elapsed: f32,
}

impl HandPreview {
    pub fn new(
        shape: NailShape,
        texture: NailTexture,
        nail_colors: [Color32; NAIL_COUNT],
        skin_tone: Color32,
        environment: EnvironmentSource,
    ) -> Self {
        Self {
            model: HandModel::build(shape, texture, nail_colors, skin_tone),
            camera: OrbitCamera::default(),
            environment: EnvironmentLoader::new(environment),
            render_task: None,
            frame: None,
            elapsed: 0.0,
        }
    }

    pub fn model(&self) -> &HandModel {
        &self.model
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn rebuild_nails(
        &mut self,
        shape: NailShape,
        texture: NailTexture,
        nail_colors: [Color32; NAIL_COUNT],
    ) {
        self.model.rebuild_nails(shape, texture, nail_colors);
        if crate::texture::material_params(texture, Color32::WHITE).environment {
            self.environment.request();
        }
    }

    pub fn set_skin_tone(&mut self, tone: Color32) {
        self.model.set_skin_tone(tone);
    }

    /// Start the render loop. Showing an already visible preview is a no-op.
    pub fn show(&mut self, scheduler: &FrameScheduler) {
        if self.render_task.is_none() {
            self.render_task = scheduler.schedule(TaskKind::RenderLoop);
            self.environment.request();
        }
    }

    /// Stop the render loop and release the cached frame.
    pub fn hide(&mut self) {
        if let Some(task) = self.render_task.take() {
            task.cancel();
        }
        self.frame = None;
    }

    pub fn is_visible(&self) -> bool {
        self.render_task.is_some()
    }

    pub fn has_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Advance animation by `dt` seconds. Does nothing while hidden.
    pub fn advance(&mut self, dt: f32) {
        if self.render_task.is_none() {
            return;
        }
        self.elapsed += dt;
        self.camera.update();
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Project the current state for a viewport of `rect`.
    pub fn render_frame(&mut self, rect: egui::Rect) -> Option<&egui::Mesh> {
        self.render_task.as_ref()?;
        let root = Mat4::from_translation(Vec3::Y * breathing_offset(self.elapsed));
        let params = RenderParams {
            rect,
            root,
            time: self.elapsed,
            environment: self.environment.poll(),
        };
        self.frame = Some(render(&self.model, &self.camera, &params));
        self.frame.as_ref()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size().max(egui::vec2(200.0, 200.0));
        let (response, painter) = ui.allocate_painter(size, egui::Sense::drag());
        let rect = response.rect;
        painter.rect_filled(rect, 4.0, BACKGROUND);

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.drag(Vec2::new(delta.x, delta.y));
        } else if response.dragged_by(egui::PointerButton::Secondary) {
            let delta = response.drag_delta();
            self.camera.pan(Vec2::new(delta.x, delta.y));
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(scroll);
            }
        }

        let dt = ui.input(|i| i.stable_dt).min(0.1);
        self.advance(dt);

        if let Some(mesh) = self.render_frame(rect) {
            painter.add(egui::Shape::mesh(mesh.clone()));
        } else {
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "Preview paused",
                egui::FontId::proportional(14.0),
                Color32::GRAY,
            );
        }
    }
}

impl Drop for HandPreview {
    fn drop(&mut self) {
        self.hide();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> HandPreview {
        HandPreview::new(
            NailShape::Round,
            NailTexture::Glossy,
            [Color32::RED; NAIL_COUNT],
            Color32::BROWN,
            EnvironmentSource::Studio,
        )
    }

    #[test]
    fn breathing_stays_small() {
        for step in 0..200 {
            assert!(breathing_offset(step as f32 * 0.1).abs() <= BREATHING_AMPLITUDE);
        }
    }

    #[test]
    fn hiding_cancels_the_render_loop() {
        let scheduler = FrameScheduler::new();
        let mut preview = preview();
        preview.show(&scheduler);
        preview.show(&scheduler);
        assert_eq!(scheduler.active_count(), 1);

        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(320.0, 240.0));
        assert!(preview.render_frame(rect).is_some());
        assert!(preview.has_frame());

        preview.hide();
        assert!(!scheduler.is_active(TaskKind::RenderLoop));
        assert!(!preview.has_frame());
        assert!(preview.render_frame(rect).is_none());
    }

    #[test]
    fn dropping_the_preview_cancels_the_render_loop() {
        let scheduler = FrameScheduler::new();
        let mut preview = preview();
        preview.show(&scheduler);
        drop(preview);
        assert!(!scheduler.has_active());
    }

    #[test]
    fn hidden_preview_does_not_animate() {
        let mut preview = preview();
        preview.advance(1.0);
        assert_eq!(preview.elapsed(), 0.0);
    }
}
