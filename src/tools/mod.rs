//! Drawing tools and the dispatcher that routes pointer input to them.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::config::EditorConfig;
use crate::primitive::Primitive;
use crate::surface::DrawingSurface;
use egui::Pos2;

mod dots;
mod french;
mod freehand;
mod glitter;
mod lines;

pub use dots::DotsTool;
pub use french::FrenchTool;
pub use freehand::{FreehandPreset, FreehandTool};
pub use glitter::{ATTEMPTS_PER_DENSITY, GlitterTool, scatter_glitter};
pub use lines::LinesTool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Brush,
    Pencil,
    Spray,
    Eraser,
    Glitter,
    Dots,
    Lines,
    French,
}

impl ToolKind {
    pub const ALL: [ToolKind; 8] = [
        ToolKind::Brush,
        ToolKind::Pencil,
        ToolKind::Spray,
        ToolKind::Eraser,
        ToolKind::Glitter,
        ToolKind::Dots,
        ToolKind::Lines,
        ToolKind::French,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Pencil => "pencil",
            ToolKind::Spray => "spray",
            ToolKind::Eraser => "eraser",
            ToolKind::Glitter => "glitter",
            ToolKind::Dots => "dots",
            ToolKind::Lines => "lines",
            ToolKind::French => "french",
        }
    }

    /// Unknown names resolve to `Brush`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::debug!("Unknown tool {name:?}, using brush");
                ToolKind::Brush
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Pencil => "Pencil",
            ToolKind::Spray => "Spray",
            ToolKind::Eraser => "Eraser",
            ToolKind::Glitter => "Glitter",
            ToolKind::Dots => "Dots",
            ToolKind::Lines => "Lines",
            ToolKind::French => "French tip",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Brush => "🖌",
            ToolKind::Pencil => "✏",
            ToolKind::Spray => "💨",
            ToolKind::Eraser => "⌫",
            ToolKind::Glitter => "✨",
            ToolKind::Dots => "●",
            ToolKind::Lines => "╱",
            ToolKind::French => "💅",
        }
    }

    /// Captures a continuous stroke while the pointer is held.
    pub fn is_freehand(self) -> bool {
        matches!(
            self,
            ToolKind::Brush | ToolKind::Pencil | ToolKind::Spray | ToolKind::Eraser
        )
    }
}

/// Everything a tool may read while handling one pointer event.
pub struct ToolContext<'a> {
    pub nail: usize,
    pub surface: &'a DrawingSurface,
    pub config: &'a EditorConfig,
    pub rng: &'a mut StdRng,
}

/// Transient drawing shown while a gesture is in progress. Not part of any
/// surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolPreview {
    pub nail: usize,
    pub primitive: Primitive,
}

/// Tool trait defines the interface for all drawing tools
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Drop any half-finished gesture.
    fn reset(&mut self) {}

    /// Handle pointer press on a nail.
    /// Return a Command if the press alone completes an action.
    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command>;

    /// Handle pointer drag while the pointer is held down.
    fn on_pointer_move(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }

    /// Handle pointer release.
    /// Return a Command to **finalize** an action if applicable.
    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        None
    }

    fn preview(&self) -> Option<ToolPreview> {
        None
    }
}

/// Enum representing all available tool types
#[derive(Debug, Clone)]
pub enum ToolType {
    Freehand(FreehandTool),
    Glitter(GlitterTool),
    Dots(DotsTool),
    Lines(LinesTool),
    French(FrenchTool),
}

impl Tool for ToolType {
    fn kind(&self) -> ToolKind {
        match self {
            Self::Freehand(tool) => tool.kind(),
            Self::Glitter(tool) => tool.kind(),
            Self::Dots(tool) => tool.kind(),
            Self::Lines(tool) => tool.kind(),
            Self::French(tool) => tool.kind(),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Freehand(tool) => tool.reset(),
            Self::Glitter(tool) => tool.reset(),
            Self::Dots(tool) => tool.reset(),
            Self::Lines(tool) => tool.reset(),
            Self::French(tool) => tool.reset(),
        }
    }

    fn on_pointer_down(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_down(pos, ctx),
            Self::Glitter(tool) => tool.on_pointer_down(pos, ctx),
            Self::Dots(tool) => tool.on_pointer_down(pos, ctx),
            Self::Lines(tool) => tool.on_pointer_down(pos, ctx),
            Self::French(tool) => tool.on_pointer_down(pos, ctx),
        }
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_move(pos, ctx),
            Self::Glitter(tool) => tool.on_pointer_move(pos, ctx),
            Self::Dots(tool) => tool.on_pointer_move(pos, ctx),
            Self::Lines(tool) => tool.on_pointer_move(pos, ctx),
            Self::French(tool) => tool.on_pointer_move(pos, ctx),
        }
    }

    fn on_pointer_up(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        match self {
            Self::Freehand(tool) => tool.on_pointer_up(pos, ctx),
            Self::Glitter(tool) => tool.on_pointer_up(pos, ctx),
            Self::Dots(tool) => tool.on_pointer_up(pos, ctx),
            Self::Lines(tool) => tool.on_pointer_up(pos, ctx),
            Self::French(tool) => tool.on_pointer_up(pos, ctx),
        }
    }

    fn preview(&self) -> Option<ToolPreview> {
        match self {
            Self::Freehand(tool) => tool.preview(),
            Self::Glitter(tool) => tool.preview(),
            Self::Dots(tool) => tool.preview(),
            Self::Lines(tool) => tool.preview(),
            Self::French(tool) => tool.preview(),
        }
    }
}

/// Factory function to create a new tool of the specified kind
pub fn new_tool(kind: ToolKind) -> ToolType {
    match kind {
        ToolKind::Brush | ToolKind::Pencil | ToolKind::Spray | ToolKind::Eraser => {
            ToolType::Freehand(FreehandTool::new(kind))
        }
        ToolKind::Glitter => ToolType::Glitter(GlitterTool::default()),
        ToolKind::Dots => ToolType::Dots(DotsTool),
        ToolKind::Lines => ToolType::Lines(LinesTool::default()),
        ToolKind::French => ToolType::French(FrenchTool),
    }
}
