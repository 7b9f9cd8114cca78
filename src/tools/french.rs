use egui::Pos2;

use super::{Tool, ToolContext, ToolKind};
use crate::command::Command;

/// One-shot french manicure on the pressed nail.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchTool;

impl Tool for FrenchTool {
    fn kind(&self) -> ToolKind {
        ToolKind::French
    }

    fn on_pointer_down(&mut self, _pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        Some(Command::FrenchTip {
            nail: ctx.nail,
            color: ctx.config.color,
        })
    }
}
