use std::collections::HashMap;

use eframe::egui::{self, Color32, Painter, Pos2, Rect, Shape, Stroke, TextureHandle, TextureOptions};
use egui::emath::RectTransform;
use uuid::Uuid;

use crate::color::with_opacity;
use crate::primitive::{
    CirclePrimitive, LinePrimitive, Primitive, RasterImage, SHEEN_OPACITY, StrokePrimitive,
};
use crate::surface::DrawingSurface;
use crate::tools::ToolPreview;

const DASH_LENGTH: f32 = 5.0;
const GAP_LENGTH: f32 = 5.0;

/// Paints drawing surfaces with egui shapes.
///
/// Raster layers are uploaded once and cached by image id. Textures not
/// drawn for `max_idle_frames` frames are released.
pub struct SurfaceRenderer {
    textures: HashMap<Uuid, (TextureHandle, u64)>,
    current_frame: u64,
    max_idle_frames: u64,
}

impl std::fmt::Debug for SurfaceRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SurfaceRenderer")
            .field("cached_textures", &self.textures.len())
            .field("current_frame", &self.current_frame)
            .finish()
    }
}

impl Default for SurfaceRenderer {
    fn default() -> Self {
        Self::new(120)
    }
}

impl SurfaceRenderer {
    pub fn new(max_idle_frames: u64) -> Self {
        Self {
            textures: HashMap::new(),
            current_frame: 0,
            max_idle_frames,
        }
    }

    /// Call once per frame before painting.
    pub fn begin_frame(&mut self) {
        self.current_frame += 1;
        let (frame, idle) = (self.current_frame, self.max_idle_frames);
        self.textures
            .retain(|_, (_, last_used)| frame.saturating_sub(*last_used) <= idle);
    }

    pub fn cache_size(&self) -> usize {
        self.textures.len()
    }

    /// Paint `surface` scaled into `rect`, then the tool preview if it
    /// belongs to this surface.
    pub fn paint(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        rect: Rect,
        surface: &DrawingSurface,
        preview: Option<&ToolPreview>,
    ) {
        let painter = painter.with_clip_rect(rect);
        let to_screen = surface_transform(surface, rect);
        let scale = to_screen.scale().x;
        let map = |points: &[Pos2]| points.iter().map(|p| to_screen * *p).collect::<Vec<_>>();

        // A loaded picture already shows the outline and its decoration.
        if surface.base_raster().is_none() {
            let outline = surface.outline();
            painter.add(Shape::convex_polygon(
                map(outline.polygon.points()),
                with_opacity(outline.fill, outline.opacity),
                Stroke::NONE,
            ));
            if outline.sheen {
                painter.add(Shape::convex_polygon(
                    map(&outline.sheen_band()),
                    with_opacity(Color32::WHITE, SHEEN_OPACITY),
                    Stroke::NONE,
                ));
            }
            for circle in surface.overlay() {
                paint_circle(&painter, &to_screen, scale, circle);
            }
        }

        for primitive in surface.layers() {
            match primitive {
                Primitive::Stroke(stroke) => paint_stroke(&painter, &to_screen, scale, stroke),
                Primitive::Circle(circle) => paint_circle(&painter, &to_screen, scale, circle),
                Primitive::Line(line) => paint_line(&painter, &to_screen, scale, line),
                Primitive::Polygon(polygon) => {
                    painter.add(Shape::convex_polygon(
                        map(&polygon.points),
                        with_opacity(polygon.fill, polygon.opacity),
                        Stroke::NONE,
                    ));
                }
                Primitive::TipOverlay(tip) => {
                    painter.add(Shape::convex_polygon(
                        map(&tip.polygon),
                        tip.color,
                        Stroke::NONE,
                    ));
                }
                Primitive::Raster(raster) => {
                    let texture = self.texture_for(ctx, raster);
                    painter.image(
                        texture,
                        rect,
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            }
        }

        if let Some(preview) = preview.filter(|p| p.nail == surface.index()) {
            match &preview.primitive {
                Primitive::Stroke(stroke) => paint_stroke(&painter, &to_screen, scale, stroke),
                Primitive::Line(line) => paint_line(&painter, &to_screen, scale, line),
                Primitive::Circle(circle) => paint_circle(&painter, &to_screen, scale, circle),
                other => log::trace!("No preview for {}", other.kind_name()),
            }
        }
    }

    fn texture_for(&mut self, ctx: &egui::Context, raster: &RasterImage) -> egui::TextureId {
        let frame = self.current_frame;
        let (handle, last_used) = self.textures.entry(raster.id()).or_insert_with(|| {
            let image = raster.image();
            let size = [image.width() as usize, image.height() as usize];
            let pixels = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
            log::debug!("Uploading raster {} ({}x{})", raster.id(), size[0], size[1]);
            let handle = ctx.load_texture(format!("raster_{}", raster.id()), pixels, TextureOptions::LINEAR);
            (handle, frame)
        });
        *last_used = frame;
        handle.id()
    }
}

/// Maps surface coordinates into `rect`. Use `.inverse()` for pointer input.
pub fn surface_transform(surface: &DrawingSurface, rect: Rect) -> RectTransform {
    RectTransform::from_to(Rect::from_min_size(Pos2::ZERO, surface.size()), rect)
}

fn paint_stroke(painter: &Painter, to_screen: &RectTransform, scale: f32, stroke: &StrokePrimitive) {
    let points: Vec<Pos2> = stroke.points.iter().map(|p| to_screen * *p).collect();
    let width = stroke.width * scale;
    if let [point] = points.as_slice() {
        painter.circle_filled(*point, width / 2.0, with_opacity(stroke.color, stroke.opacity));
        return;
    }
    if let Some((halo_width, halo_opacity)) = stroke.halo() {
        painter.add(Shape::line(
            points.clone(),
            Stroke::new(halo_width * scale, with_opacity(stroke.color, halo_opacity)),
        ));
    }
    painter.add(Shape::line(
        points,
        Stroke::new(width, with_opacity(stroke.color, stroke.opacity)),
    ));
}

fn paint_circle(painter: &Painter, to_screen: &RectTransform, scale: f32, circle: &CirclePrimitive) {
    painter.circle_filled(
        to_screen * circle.center,
        circle.radius * scale,
        with_opacity(circle.fill, circle.opacity),
    );
}

fn paint_line(painter: &Painter, to_screen: &RectTransform, scale: f32, line: &LinePrimitive) {
    let points = [to_screen * line.from, to_screen * line.to];
    let stroke = Stroke::new(line.width * scale, line.color);
    if line.dashed {
        painter.extend(Shape::dashed_line(
            &points,
            stroke,
            DASH_LENGTH * scale,
            GAP_LENGTH * scale,
        ));
    } else {
        painter.line_segment(points, stroke);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use egui::{pos2, vec2};

    fn painter(ctx: &egui::Context) -> Painter {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(600.0, 400.0));
        Painter::new(ctx.clone(), egui::LayerId::background(), rect)
    }

    #[test]
    fn transform_scales_surface_into_rect() {
        let surface = DrawingSurface::new(0, &EditorConfig::default());
        let rect = Rect::from_min_size(pos2(10.0, 20.0), surface.size() * 2.0);
        let to_screen = surface_transform(&surface, rect);
        assert_eq!(to_screen * pos2(0.0, 0.0), pos2(10.0, 20.0));
        assert_eq!(to_screen.inverse() * pos2(30.0, 40.0), pos2(10.0, 10.0));
    }

    #[test]
    fn rasters_are_uploaded_once() {
        let ctx = egui::Context::default();
        let painter = painter(&ctx);
        let mut renderer = SurfaceRenderer::new(2);
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        surface.load_raster(RasterImage::new(image::RgbaImage::new(4, 4)));
        let rect = Rect::from_min_size(Pos2::ZERO, surface.size());

        renderer.begin_frame();
        renderer.paint(&ctx, &painter, rect, &surface, None);
        renderer.paint(&ctx, &painter, rect, &surface, None);
        assert_eq!(renderer.cache_size(), 1);

        for _ in 0..3 {
            renderer.begin_frame();
        }
        assert_eq!(renderer.cache_size(), 0);
    }
}
