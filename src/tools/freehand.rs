use egui::{Color32, Pos2};

use super::{Tool, ToolContext, ToolKind, ToolPreview};
use crate::command::Command;
use crate::primitive::{Primitive, StrokePrimitive};

/// Pen parameters that tell brush, pencil, spray and eraser apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreehandPreset {
    /// Multiplier on the configured brush size.
    pub width_scale: f32,
    pub softness: f32,
    pub opacity: f32,
    /// Paints with the nail's base fill instead of the selected color.
    pub erases: bool,
}

impl FreehandPreset {
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Pencil => Self {
                width_scale: 0.5,
                softness: 0.0,
                opacity: 1.0,
                erases: false,
            },
            ToolKind::Spray => Self {
                width_scale: 1.5,
                softness: 0.8,
                opacity: 0.6,
                erases: false,
            },
            ToolKind::Eraser => Self {
                width_scale: 1.0,
                softness: 0.0,
                opacity: 1.0,
                erases: true,
            },
            _ => Self {
                width_scale: 1.0,
                softness: 0.35,
                opacity: 1.0,
                erases: false,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct StrokeInProgress {
    nail: usize,
    stroke: StrokePrimitive,
}

/// Continuous stroke tool
#[derive(Debug, Clone)]
pub struct FreehandTool {
    kind: ToolKind,
    preset: FreehandPreset,
    current: Option<StrokeInProgress>,
}

impl FreehandTool {
    pub fn new(kind: ToolKind) -> Self {
        let kind = if kind.is_freehand() { kind } else { ToolKind::Brush };
        Self {
            kind,
            preset: FreehandPreset::for_kind(kind),
            current: None,
        }
    }

    pub fn preset(&self) -> FreehandPreset {
        self.preset
    }

    fn stroke_color(&self, ctx: &ToolContext<'_>) -> Color32 {
        if self.preset.erases {
            ctx.surface.outline().fill
        } else {
            ctx.config.color
        }
    }
}

impl Tool for FreehandTool {
    fn kind(&self) -> ToolKind {
        self.kind
    }

    fn reset(&mut self) {
        self.current = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        self.current = Some(StrokeInProgress {
            nail: ctx.nail,
            stroke: StrokePrimitive {
                points: vec![pos],
                color: self.stroke_color(ctx),
                width: ctx.config.brush_size * self.preset.width_scale,
                softness: self.preset.softness,
                opacity: self.preset.opacity,
            },
        });
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if let Some(current) = &mut self.current {
            if current.nail == ctx.nail && current.stroke.points.last() != Some(&pos) {
                current.stroke.points.push(pos);
            }
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        let current = self.current.take()?;
        Some(Command::AddPrimitives {
            nail: current.nail,
            primitives: vec![Primitive::Stroke(current.stroke)],
        })
    }

    fn preview(&self) -> Option<ToolPreview> {
        self.current.as_ref().map(|current| ToolPreview {
            nail: current.nail,
            primitive: Primitive::Stroke(current.stroke.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::surface::DrawingSurface;
    use egui::pos2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn draw(tool: &mut FreehandTool, config: &EditorConfig) -> Option<Command> {
        let surface = DrawingSurface::new(1, config);
        let mut rng = StdRng::seed_from_u64(0);
        let mut ctx = ToolContext {
            nail: 1,
            surface: &surface,
            config,
            rng: &mut rng,
        };
        tool.on_pointer_down(pos2(10.0, 10.0), &mut ctx);
        tool.on_pointer_move(pos2(20.0, 15.0), &mut ctx);
        tool.on_pointer_move(pos2(30.0, 25.0), &mut ctx);
        tool.on_pointer_up(pos2(30.0, 25.0), &mut ctx)
    }

    #[test]
    fn one_gesture_is_one_primitive() {
        let mut tool = FreehandTool::new(ToolKind::Brush);
        let Some(Command::AddPrimitives { nail, primitives }) = draw(&mut tool, &EditorConfig::default())
        else {
            panic!("expected a stroke");
        };
        assert_eq!(nail, 1);
        assert_eq!(primitives.len(), 1);
        let Primitive::Stroke(stroke) = &primitives[0] else { panic!() };
        assert_eq!(stroke.points.len(), 3);
        assert!(tool.preview().is_none());
    }

    #[test]
    fn eraser_paints_with_the_base_fill() {
        let config = EditorConfig::default();
        let base = DrawingSurface::new(1, &config).outline().fill;
        let mut tool = FreehandTool::new(ToolKind::Eraser);
        let Some(Command::AddPrimitives { primitives, .. }) = draw(&mut tool, &config) else {
            panic!("expected a stroke");
        };
        let Primitive::Stroke(stroke) = &primitives[0] else { panic!() };
        assert_eq!(stroke.color, base);
        assert_ne!(stroke.color, config.color);
    }

    #[test]
    fn pencil_is_thinner_than_spray() {
        let config = EditorConfig::default();
        let width = |kind| {
            let mut tool = FreehandTool::new(kind);
            match draw(&mut tool, &config) {
                Some(Command::AddPrimitives { primitives, .. }) => match &primitives[0] {
                    Primitive::Stroke(stroke) => stroke.width,
                    _ => unreachable!(),
                },
                _ => unreachable!(),
            }
        };
        assert_eq!(width(ToolKind::Pencil), 2.5);
        assert_eq!(width(ToolKind::Spray), 7.5);
    }
}
