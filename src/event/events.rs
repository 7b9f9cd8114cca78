use egui::Color32;

use crate::shape::NailShape;
use crate::texture::NailTexture;
use crate::tools::ToolKind;

/// Configuration and content changes broadcast by the workbench
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged {
        old: ToolKind,
        new: ToolKind,
    },
    /// The selected polish color, applied to every nail.
    ColorChanged(Color32),
    NailColorChanged {
        nail: usize,
        color: Color32,
    },
    ShapeChanged(NailShape),
    TextureChanged(NailTexture),
    SkinToneChanged(Color32),
    BrushSizeChanged(f32),
    GlitterDensityChanged(u32),
    /// Primitives were added to or removed from nails.
    SurfacesChanged {
        nails: Vec<usize>,
    },
    DesignLoaded {
        id: String,
    },
}
