use egui::Color32;

use super::{CommandContext, CommandResult};
use crate::primitive::Primitive;
use crate::surface::NAIL_COUNT;

/// Undoable edits to the drawing surfaces
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Append primitives on top of a nail's drawing
    AddPrimitives {
        nail: usize,
        primitives: Vec<Primitive>,
    },

    /// Remove everything above the outline of one nail
    Clear { nail: usize },

    /// Same as `Clear`, for every nail
    ClearAll,

    /// Turn one nail into a french manicure
    FrenchTip { nail: usize, color: Color32 },

    /// Same as `FrenchTip`, for every nail
    FrenchAll { color: Color32 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddPrimitives { .. } => "add primitives",
            Command::Clear { .. } => "clear",
            Command::ClearAll => "clear all",
            Command::FrenchTip { .. } => "french tip",
            Command::FrenchAll { .. } => "french tips",
        }
    }

    /// Nails whose contents this command changes.
    pub fn affected_nails(&self) -> Vec<usize> {
        match self {
            Command::AddPrimitives { nail, .. }
            | Command::Clear { nail }
            | Command::FrenchTip { nail, .. } => vec![*nail],
            Command::ClearAll | Command::FrenchAll { .. } => (0..NAIL_COUNT).collect(),
        }
    }

    /// Execute the command with the given context
    pub fn execute(&self, ctx: &mut CommandContext<'_>) -> CommandResult {
        match self {
            Command::AddPrimitives { nail, primitives } => {
                ctx.surface_mut(*nail)?.extend(primitives.iter().cloned());
            }
            Command::Clear { nail } => {
                ctx.surface_mut(*nail)?.clear();
            }
            Command::ClearAll => {
                for surface in ctx.surfaces.iter_mut() {
                    surface.clear();
                }
            }
            Command::FrenchTip { nail, color } => {
                ctx.surface_mut(*nail)?.apply_french(*color);
            }
            Command::FrenchAll { color } => {
                for surface in ctx.surfaces.iter_mut() {
                    surface.apply_french(*color);
                }
            }
        }
        Ok(())
    }
}
