//! One paintable nail.
//!
//! A surface owns the nail outline plus everything drawn above it. The
//! outline is a separate field rather than the head of the primitive list, so
//! no operation on the list can remove it.

use egui::{Color32, Pos2, Rect, Vec2, pos2};
use rand::Rng;

use crate::color::{self, BASE_TONE};
use crate::config::EditorConfig;
use crate::geometry;
use crate::primitive::{
    CircleKind, CirclePrimitive, OutlinePrimitive, Primitive, RasterImage, TipOverlay,
};
use crate::shape::NailShape;
use crate::texture::NailTexture;

pub const NAIL_COUNT: usize = 5;

/// Default size of a drawing surface in points.
pub const SURFACE_SIZE: Vec2 = Vec2::new(120.0, 200.0);

/// Start of the french tip band, as a fraction of the outline height.
pub const FRENCH_BAND_START: f32 = 0.75;

/// Shimmer never shrinks or grows a sparkle past these radii.
const SHIMMER_RADIUS_LIMITS: (f32, f32) = (0.5, 4.5);

/// Saved contents of a surface, used to undo destructive operations.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceBackup {
    /// The outline had the french base tone instead of its usual fill.
    french_base: bool,
    layers: Vec<Primitive>,
}

#[derive(Debug, Clone)]
pub struct DrawingSurface {
    index: usize,
    size: Vec2,
    color: Color32,
    outline: OutlinePrimitive,
    layers: Vec<Primitive>,
    /// Full-nail glitter texture. Decoration only, never part of `layers`.
    overlay: Vec<CirclePrimitive>,
}

impl DrawingSurface {
    pub fn new(index: usize, config: &EditorConfig) -> Self {
        Self::with_size(index, SURFACE_SIZE, config.shape, config.texture, config.color)
    }

    pub fn with_size(
        index: usize,
        size: Vec2,
        shape: NailShape,
        texture: NailTexture,
        color: Color32,
    ) -> Self {
        Self {
            index,
            size,
            color,
            outline: OutlinePrimitive::new(shape, texture, color, size),
            layers: Vec::new(),
            overlay: Vec::new(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Nail polish color.
    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn shape(&self) -> NailShape {
        self.outline.shape
    }

    pub fn texture(&self) -> NailTexture {
        self.outline.texture
    }

    pub fn outline(&self) -> &OutlinePrimitive {
        &self.outline
    }

    /// Primitives above the outline, bottom first.
    pub fn layers(&self) -> &[Primitive] {
        &self.layers
    }

    pub fn overlay(&self) -> &[CirclePrimitive] {
        &self.overlay
    }

    /// The picture a loaded design put at the bottom of the layers. While it
    /// is there it replaces the outline fill, the sheen and the glitter
    /// overlay, since it already shows them.
    pub fn base_raster(&self) -> Option<&RasterImage> {
        match self.layers.first() {
            Some(Primitive::Raster(raster)) => Some(raster),
            _ => None,
        }
    }

    /// Number of drawn objects, counting the outline.
    pub fn primitive_count(&self) -> usize {
        1 + self.layers.len()
    }

    pub fn bounds(&self) -> Rect {
        self.outline.bounds()
    }

    pub fn contains(&self, point: Pos2) -> bool {
        geometry::is_inside(self.bounds(), point)
    }

    /// Rebuild the outline for a new shape, texture or color. Drawn layers
    /// are kept. The glitter overlay is dropped unless the texture is still
    /// glitter; call [`Self::regenerate_overlay`] to refresh it.
    pub fn reskin(&mut self, shape: NailShape, texture: NailTexture, color: Color32) {
        self.color = color;
        self.outline = OutlinePrimitive::new(shape, texture, color, self.size);
        if texture != NailTexture::Glitter {
            self.overlay.clear();
        }
    }

    pub fn set_color(&mut self, color: Color32) {
        self.reskin(self.shape(), self.texture(), color);
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.layers.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.layers.extend(primitives);
    }

    /// Remove everything above the outline. Returns what was removed.
    pub fn clear(&mut self) -> Vec<Primitive> {
        std::mem::take(&mut self.layers)
    }

    pub fn backup(&self) -> SurfaceBackup {
        SurfaceBackup {
            french_base: self.outline.fill != self.texture().outline_fill(self.color),
            layers: self.layers.clone(),
        }
    }

    /// Put back the contents of a backup. The outline is rebuilt from the
    /// current shape, texture and color; only the french base tone comes
    /// from the backup.
    pub fn restore(&mut self, backup: SurfaceBackup) {
        self.outline = OutlinePrimitive::new(self.shape(), self.texture(), self.color, self.size);
        if backup.french_base {
            self.outline.fill = BASE_TONE;
        }
        self.layers = backup.layers;
    }

    /// Classic two-tone french manicure: wipes the drawing, turns the nail
    /// pale and paints the tip band in `tip_color`.
    pub fn apply_french(&mut self, tip_color: Color32) {
        self.layers.clear();
        self.outline.fill = BASE_TONE;

        let bounds = self.bounds();
        let top = bounds.top() + bounds.height() * FRENCH_BAND_START;
        let band = Rect::from_min_max(pos2(bounds.left(), top), bounds.max);
        let polygon = geometry::clip_below(self.outline.polygon.points(), top);
        self.layers.push(Primitive::TipOverlay(TipOverlay {
            color: tip_color,
            band,
            polygon,
        }));
    }

    /// Replace the drawing with a flattened picture. Vector history is lost.
    pub fn load_raster(&mut self, raster: RasterImage) {
        self.layers = vec![Primitive::Raster(raster)];
    }

    /// Scatter the full-nail glitter decoration. No-op unless the texture is
    /// glitter.
    pub fn regenerate_overlay(&mut self, density: u32, rng: &mut impl Rng) {
        self.overlay.clear();
        if self.texture() != NailTexture::Glitter {
            return;
        }

        let coverage = (0.01 * density as f32).min(0.1);
        let target = (self.size.x * self.size.y * coverage / 100.0).floor() as usize;
        let bounds = self.bounds();
        let mut attempts = 0;
        while self.overlay.len() < target && attempts < target * 3 {
            attempts += 1;
            let point = pos2(
                rng.gen_range(bounds.left()..=bounds.right()),
                rng.gen_range(bounds.top()..=bounds.bottom()),
            );
            if !geometry::is_inside(bounds, point) {
                continue;
            }
            self.overlay.push(CirclePrimitive {
                center: point,
                radius: rng.gen_range(1.0..=3.0),
                fill: color::lighten(self.color, rng.gen_range(30.0..=80.0)),
                opacity: rng.gen_range(0.7..=1.0),
                kind: CircleKind::Glitter,
            });
        }
    }

    /// One animation step of the glitter shimmer.
    pub fn shimmer(&mut self, rng: &mut impl Rng) {
        let drawn = self.layers.iter_mut().filter_map(|primitive| match primitive {
            Primitive::Circle(circle) if circle.kind == CircleKind::Glitter => Some(circle),
            _ => None,
        });
        for circle in drawn.chain(self.overlay.iter_mut()) {
            circle.opacity = rng.gen_range(0.5..=1.0);
            if rng.gen_bool(0.2) {
                let (min, max) = SHIMMER_RADIUS_LIMITS;
                circle.radius = (circle.radius * rng.gen_range(0.9..=1.1)).clamp(min, max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::StrokePrimitive;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn stroke() -> Primitive {
        Primitive::Stroke(StrokePrimitive {
            points: vec![pos2(10.0, 10.0), pos2(20.0, 20.0)],
            color: Color32::RED,
            width: 5.0,
            softness: 0.0,
            opacity: 1.0,
        })
    }

    #[test]
    fn clear_keeps_the_outline() {
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        surface.extend((0..7).map(|_| stroke()));
        assert_eq!(surface.primitive_count(), 8);
        assert_eq!(surface.clear().len(), 7);
        assert_eq!(surface.primitive_count(), 1);
    }

    #[test]
    fn french_tip_sits_in_the_bottom_quarter() {
        let mut surface = DrawingSurface::new(2, &EditorConfig::default());
        surface.push(stroke());
        surface.apply_french(Color32::WHITE);

        assert_eq!(surface.primitive_count(), 2);
        assert_eq!(surface.outline().fill, BASE_TONE);
        let Primitive::TipOverlay(tip) = &surface.layers()[0] else {
            panic!("expected a tip overlay");
        };
        assert_eq!(tip.band.top(), 150.0);
        assert!(tip.polygon.iter().all(|p| p.y >= 150.0 - 1e-3));
    }

    #[test]
    fn overlay_only_exists_for_glitter() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        surface.regenerate_overlay(5, &mut rng);
        assert!(surface.overlay().is_empty());

        surface.reskin(NailShape::Round, NailTexture::Glitter, Color32::RED);
        surface.regenerate_overlay(5, &mut rng);
        assert!(!surface.overlay().is_empty());
        assert!(surface.overlay().len() <= 120);
        assert_eq!(surface.primitive_count(), 1);
        let bounds = surface.bounds();
        assert!(surface.overlay().iter().all(|c| geometry::is_inside(bounds, c.center)));

        surface.reskin(NailShape::Round, NailTexture::Matte, Color32::RED);
        assert!(surface.overlay().is_empty());
    }

    #[test]
    fn shimmer_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut surface =
            DrawingSurface::with_size(0, SURFACE_SIZE, NailShape::Round, NailTexture::Glitter, Color32::RED);
        surface.push(Primitive::Circle(CirclePrimitive {
            center: pos2(60.0, 100.0),
            radius: 2.0,
            fill: Color32::GOLD,
            opacity: 1.0,
            kind: CircleKind::Glitter,
        }));
        surface.push(Primitive::Circle(CirclePrimitive {
            center: pos2(50.0, 100.0),
            radius: 2.0,
            fill: Color32::GOLD,
            opacity: 1.0,
            kind: CircleKind::Dot,
        }));
        for _ in 0..50 {
            surface.shimmer(&mut rng);
        }
        let Primitive::Circle(sparkle) = &surface.layers()[0] else { unreachable!() };
        assert!((0.5..=1.0).contains(&sparkle.opacity));
        let Primitive::Circle(dot) = &surface.layers()[1] else { unreachable!() };
        assert_eq!(dot.opacity, 1.0);
        assert_eq!(dot.radius, 2.0);
    }

    #[test]
    fn restore_follows_the_current_color() {
        let mut surface =
            DrawingSurface::with_size(0, SURFACE_SIZE, NailShape::Round, NailTexture::Glitter, Color32::RED);
        let backup = surface.backup();
        surface.push(stroke());
        surface.set_color(Color32::BLUE);
        surface.restore(backup);
        assert_eq!(surface.color(), Color32::BLUE);
        assert_eq!(surface.outline().fill, Color32::BLUE);
        assert_eq!(surface.primitive_count(), 1);
    }

    #[test]
    fn restore_brings_back_the_french_base() {
        let mut surface =
            DrawingSurface::with_size(0, SURFACE_SIZE, NailShape::Round, NailTexture::Glitter, Color32::RED);
        surface.apply_french(Color32::WHITE);
        let frenched = surface.backup();
        surface.set_color(Color32::GREEN);
        assert_eq!(surface.outline().fill, Color32::GREEN);
        surface.restore(frenched);
        assert_eq!(surface.outline().fill, BASE_TONE);
        assert_eq!(surface.primitive_count(), 2);
    }

    #[test]
    fn restore_keeps_a_newer_outline() {
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        let backup = surface.backup();
        surface.push(stroke());
        surface.reskin(NailShape::Coffin, NailTexture::Glossy, Color32::RED);
        surface.restore(backup);
        assert_eq!(surface.shape(), NailShape::Coffin);
        assert_eq!(surface.primitive_count(), 1);
    }
}
