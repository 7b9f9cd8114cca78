use egui::{Pos2, Rect};
use rand::Rng;

use super::{Tool, ToolContext, ToolKind};
use crate::color;
use crate::command::Command;
use crate::config::EditorConfig;
use crate::geometry;
use crate::primitive::{CircleKind, CirclePrimitive, Primitive};

/// Sampling attempts per unit of glitter density.
pub const ATTEMPTS_PER_DENSITY: u32 = 2;

/// Scatter radius relative to the brush size.
const SPREAD_FACTOR: f32 = 1.5;

/// Sprinkles sparkles around the release point.
#[derive(Debug, Clone, Default)]
pub struct GlitterTool {
    pressed_on: Option<usize>,
}

impl Tool for GlitterTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Glitter
    }

    fn reset(&mut self) {
        self.pressed_on = None;
    }

    fn on_pointer_down(&mut self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        self.pressed_on = Some(ctx.nail);
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let nail = self.pressed_on.take()?;
        if nail != ctx.nail {
            return None;
        }
        let sparkles = scatter_glitter(pos, ctx.surface.bounds(), ctx.config, ctx.rng);
        if sparkles.is_empty() {
            return None;
        }
        Some(Command::AddPrimitives {
            nail,
            primitives: sparkles.into_iter().map(Primitive::Circle).collect(),
        })
    }
}

/// Sample `density × 2` candidate points around `center` and keep those that
/// pass the containment heuristic for `bounds`.
pub fn scatter_glitter(
    center: Pos2,
    bounds: Rect,
    config: &EditorConfig,
    rng: &mut impl Rng,
) -> Vec<CirclePrimitive> {
    let attempts = config.glitter_density * ATTEMPTS_PER_DENSITY;
    let spread = config.brush_size * SPREAD_FACTOR;

    (0..attempts)
        .filter_map(|_| {
            let point = geometry::sample_disk(center, spread, rng);
            if !geometry::is_inside(bounds, point) {
                return None;
            }
            Some(CirclePrimitive {
                center: point,
                radius: rng.gen_range(1.0..=3.0),
                fill: color::brighten(config.color, rng.gen_range(0..100)),
                opacity: rng.gen_range(0.7..=1.0),
                kind: CircleKind::Glitter,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sparkles_are_small_and_inside() {
        let bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 200.0));
        let config = EditorConfig {
            glitter_density: 10,
            brush_size: 20.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        let sparkles = scatter_glitter(pos2(5.0, 190.0), bounds, &config, &mut rng);
        assert!(sparkles.len() <= 20);
        for sparkle in &sparkles {
            assert!((1.0..=3.0).contains(&sparkle.radius));
            assert!((0.7..=1.0).contains(&sparkle.opacity));
            assert!(geometry::is_inside(bounds, sparkle.center));
        }
    }

    #[test]
    fn far_outside_yields_nothing() {
        let bounds = Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 200.0));
        let mut rng = StdRng::seed_from_u64(1);
        let sparkles = scatter_glitter(pos2(500.0, 500.0), bounds, &EditorConfig::default(), &mut rng);
        assert!(sparkles.is_empty());
    }
}
