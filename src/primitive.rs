//! Drawable objects committed to a drawing surface.

use std::sync::Arc;

use egui::{Color32, Pos2, Rect};
use uuid::Uuid;

use crate::shape::{NailShape, Outline};
use crate::texture::NailTexture;

/// The base nail shape. Every surface has exactly one, beneath everything
/// else, and clearing never removes it.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePrimitive {
    pub shape: NailShape,
    pub texture: NailTexture,
    pub polygon: Outline,
    pub fill: Color32,
    pub opacity: f32,
    /// Diagonal highlight drawn over metallic nails.
    pub sheen: bool,
}

impl OutlinePrimitive {
    pub fn new(shape: NailShape, texture: NailTexture, nail_color: Color32, size: egui::Vec2) -> Self {
        Self {
            shape,
            texture,
            polygon: Outline::new(shape, size),
            fill: texture.outline_fill(nail_color),
            opacity: texture.surface_opacity(),
            sheen: texture == NailTexture::Metallic,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.polygon.bounds()
    }

    /// Diagonal highlight band across the outline bounds.
    pub fn sheen_band(&self) -> [Pos2; 4] {
        let b = self.bounds();
        let at = |x: f32, y: f32| egui::pos2(b.left() + b.width() * x, b.top() + b.height() * y);
        [at(0.0, 0.55), at(1.0, 0.25), at(1.0, 0.4), at(0.0, 0.7)]
    }
}

/// Opacity of the white sheen over metallic nails.
pub const SHEEN_OPACITY: f32 = 0.3;

/// Committed freehand stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePrimitive {
    pub points: Vec<Pos2>,
    pub color: Color32,
    pub width: f32,
    /// 0 is a hard edge, 1 is fully feathered.
    pub softness: f32,
    pub opacity: f32,
}

impl StrokePrimitive {
    /// Feathered edge drawn under soft strokes, as (width, opacity).
    pub fn halo(&self) -> Option<(f32, f32)> {
        (self.softness > 0.0)
            .then(|| (self.width * (1.0 + self.softness), self.opacity * 0.35 * self.softness))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleKind {
    /// Animated by the shimmer effect.
    Glitter,
    Dot,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: Pos2,
    pub radius: f32,
    pub fill: Color32,
    pub opacity: f32,
    pub kind: CircleKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub from: Pos2,
    pub to: Pos2,
    pub color: Color32,
    pub width: f32,
    pub dashed: bool,
}

/// Filled shape placed by a pattern preset.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonPrimitive {
    pub points: Vec<Pos2>,
    pub fill: Color32,
    pub opacity: f32,
}

/// Two-tone french tip: the outline clipped to a horizontal band.
#[derive(Debug, Clone, PartialEq)]
pub struct TipOverlay {
    pub color: Color32,
    pub band: Rect,
    pub polygon: Vec<Pos2>,
}

/// Flattened picture restored from a saved design.
#[derive(Clone)]
pub struct RasterImage {
    id: Uuid,
    image: Arc<image::RgbaImage>,
}

impl RasterImage {
    pub fn new(image: image::RgbaImage) -> Self {
        Self {
            id: Uuid::new_v4(),
            image: Arc::new(image),
        }
    }

    /// Stable identity, used to cache the GPU texture.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }
}

impl std::fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterImage")
            .field("id", &self.id)
            .field("size", &self.image.dimensions())
            .finish()
    }
}

impl PartialEq for RasterImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Anything drawn above the outline.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Stroke(StrokePrimitive),
    Circle(CirclePrimitive),
    Line(LinePrimitive),
    Polygon(PolygonPrimitive),
    TipOverlay(TipOverlay),
    Raster(RasterImage),
}

impl Primitive {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive::Stroke(_) => "stroke",
            Primitive::Circle(_) => "circle",
            Primitive::Line(_) => "line",
            Primitive::Polygon(_) => "polygon",
            Primitive::TipOverlay(_) => "tip",
            Primitive::Raster(_) => "raster",
        }
    }
}
