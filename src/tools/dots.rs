use egui::Pos2;

use super::{Tool, ToolContext, ToolKind};
use crate::command::Command;
use crate::primitive::{CircleKind, CirclePrimitive, Primitive};

/// Places one dot per click. Dragging does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotsTool;

impl Tool for DotsTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Dots
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        if !ctx.surface.contains(pos) {
            return None;
        }
        Some(Command::AddPrimitives {
            nail: ctx.nail,
            primitives: vec![Primitive::Circle(CirclePrimitive {
                center: pos,
                radius: ctx.config.brush_size / 2.0,
                fill: ctx.config.color,
                opacity: 1.0,
                kind: CircleKind::Dot,
            })],
        })
    }
}
