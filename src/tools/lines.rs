use egui::Pos2;

use super::{Tool, ToolContext, ToolKind, ToolPreview};
use crate::command::Command;
use crate::primitive::{LinePrimitive, Primitive};

#[derive(Debug, Clone, Copy)]
struct Anchor {
    nail: usize,
    start: Pos2,
    preview: Option<LinePrimitive>,
}

/// Straight segment from press point to release point.
#[derive(Debug, Clone, Default)]
pub struct LinesTool {
    anchor: Option<Anchor>,
}

impl Tool for LinesTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Lines
    }

    fn reset(&mut self) {
        self.anchor = None;
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        self.anchor = Some(Anchor {
            nail: ctx.nail,
            start: pos,
            preview: None,
        });
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if let Some(anchor) = &mut self.anchor {
            if anchor.nail == ctx.nail && ctx.surface.contains(pos) {
                anchor.preview = Some(LinePrimitive {
                    from: anchor.start,
                    to: pos,
                    color: ctx.config.color,
                    width: ctx.config.brush_size,
                    dashed: true,
                });
            }
        }
        None
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let anchor = self.anchor.take()?;
        if anchor.nail != ctx.nail || !ctx.surface.contains(pos) {
            return None;
        }
        Some(Command::AddPrimitives {
            nail: anchor.nail,
            primitives: vec![Primitive::Line(LinePrimitive {
                from: anchor.start,
                to: pos,
                color: ctx.config.color,
                width: ctx.config.brush_size,
                dashed: false,
            })],
        })
    }

    fn preview(&self) -> Option<ToolPreview> {
        let anchor = self.anchor.as_ref()?;
        anchor.preview.map(|line| ToolPreview {
            nail: anchor.nail,
            primitive: Primitive::Line(line),
        })
    }
}
