use std::ops::RangeInclusive;

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::{DEFAULT_POLISH, DEFAULT_SKIN};
use crate::shape::NailShape;
use crate::texture::NailTexture;
use crate::tools::ToolKind;

pub const BRUSH_SIZE_RANGE: RangeInclusive<f32> = 1.0..=50.0;
pub const GLITTER_DENSITY_RANGE: RangeInclusive<u32> = 1..=10;

/// Editing parameters shared by all five nails.
///
/// The workbench owns the only instance and hands it to tools and surfaces
/// explicitly; it is also what the app persists between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tool: ToolKind,
    #[serde(with = "crate::color::hex_serde")]
    pub color: Color32,
    pub brush_size: f32,
    pub glitter_density: u32,
    pub shape: NailShape,
    pub texture: NailTexture,
    #[serde(with = "crate::color::hex_serde")]
    pub skin_tone: Color32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            color: DEFAULT_POLISH,
            brush_size: 5.0,
            glitter_density: 5,
            shape: NailShape::Round,
            texture: NailTexture::Glossy,
            skin_tone: DEFAULT_SKIN,
        }
    }
}

impl EditorConfig {
    pub fn set_brush_size(&mut self, size: f32) {
        self.brush_size = size.clamp(*BRUSH_SIZE_RANGE.start(), *BRUSH_SIZE_RANGE.end());
    }

    pub fn set_glitter_density(&mut self, density: u32) {
        self.glitter_density =
            density.clamp(*GLITTER_DENSITY_RANGE.start(), *GLITTER_DENSITY_RANGE.end());
    }

    /// Clamp values that may come from an older or hand-edited save.
    pub fn sanitized(mut self) -> Self {
        self.set_brush_size(self.brush_size);
        self.set_glitter_density(self.glitter_density);
        self
    }
}
