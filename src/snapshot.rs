//! CPU rasterisation of drawing surfaces.
//!
//! Thumbnails, saved designs and exports all go through [`rasterize`], so a
//! surface always flattens to the same pixels.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use egui::{Color32, Pos2};
use image::{ImageFormat, RgbaImage};
use tiny_skia::{
    FillRule, IntSize, LineCap, LineJoin, Mask, Paint, Path, PathBuilder, Pixmap, PixmapPaint,
    Stroke, StrokeDash, Transform,
};

use crate::primitive::{
    CirclePrimitive, LinePrimitive, Primitive, RasterImage, SHEEN_OPACITY, StrokePrimitive,
};
use crate::surface::DrawingSurface;

pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot rasterize a {width}x{height} surface")]
    InvalidSize { width: u32, height: u32 },

    #[error("not a PNG data URI")]
    NotDataUri,

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Flatten a surface (outline, decoration and every layer) into straight
/// RGBA. Everything is clipped to the nail outline. A loaded picture at the
/// bottom is copied as is and stands in for the outline and decoration.
pub fn rasterize(surface: &DrawingSurface) -> Result<RgbaImage, SnapshotError> {
    let width = surface.size().x.ceil().max(0.0) as u32;
    let height = surface.size().y.ceil().max(0.0) as u32;
    let invalid = || SnapshotError::InvalidSize { width, height };

    let base = surface
        .base_raster()
        .and_then(|raster| premultiplied(raster.image()))
        .filter(|pixmap| pixmap.width() == width && pixmap.height() == height);
    let flattened = base.is_some();
    let mut pixmap = match base {
        Some(pixmap) => pixmap,
        None => Pixmap::new(width, height).ok_or_else(invalid)?,
    };
    let mut clip = Mask::new(width, height).ok_or_else(invalid)?;

    let outline = surface.outline();
    let Some(outline_path) = polygon_path(outline.polygon.points()) else {
        return Ok(to_image(&pixmap));
    };
    clip.fill_path(&outline_path, FillRule::Winding, true, Transform::identity());

    let mut canvas = Canvas {
        pixmap: &mut pixmap,
        clip: &clip,
    };
    let layers = if flattened {
        &surface.layers()[1..]
    } else {
        canvas.fill(&outline_path, outline.fill, outline.opacity);
        if outline.sheen {
            if let Some(path) = polygon_path(&outline.sheen_band()) {
                canvas.fill(&path, Color32::WHITE, SHEEN_OPACITY);
            }
        }
        for circle in surface.overlay() {
            canvas.circle(circle);
        }
        surface.layers()
    };
    for primitive in layers {
        canvas.primitive(primitive);
    }

    Ok(to_image(&pixmap))
}

struct Canvas<'a> {
    pixmap: &'a mut Pixmap,
    clip: &'a Mask,
}

impl Canvas<'_> {
    fn primitive(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Stroke(stroke) => self.stroke(stroke),
            Primitive::Circle(circle) => self.circle(circle),
            Primitive::Line(line) => self.line(line),
            Primitive::Polygon(polygon) => {
                if let Some(path) = polygon_path(&polygon.points) {
                    self.fill(&path, polygon.fill, polygon.opacity);
                }
            }
            Primitive::TipOverlay(tip) => {
                if let Some(path) = polygon_path(&tip.polygon) {
                    self.fill(&path, tip.color, 1.0);
                }
            }
            Primitive::Raster(raster) => self.raster(raster),
        }
    }

    fn fill(&mut self, path: &Path, color: Color32, opacity: f32) {
        self.pixmap.fill_path(
            path,
            &paint(color, opacity),
            FillRule::Winding,
            Transform::identity(),
            Some(self.clip),
        );
    }

    fn stroke_path(&mut self, path: &Path, color: Color32, opacity: f32, stroke: &Stroke) {
        self.pixmap.stroke_path(
            path,
            &paint(color, opacity),
            stroke,
            Transform::identity(),
            Some(self.clip),
        );
    }

    fn stroke(&mut self, stroke: &StrokePrimitive) {
        if let [point] = stroke.points.as_slice() {
            // A click without movement leaves a round dab.
            if let Some(dab) = PathBuilder::from_circle(point.x, point.y, stroke.width / 2.0) {
                self.fill(&dab, stroke.color, stroke.opacity);
            }
            return;
        }
        let Some(path) = polyline_path(&stroke.points) else {
            return;
        };
        if let Some((width, opacity)) = stroke.halo() {
            self.stroke_path(&path, stroke.color, opacity, &round_stroke(width));
        }
        self.stroke_path(&path, stroke.color, stroke.opacity, &round_stroke(stroke.width));
    }

    fn circle(&mut self, circle: &CirclePrimitive) {
        if let Some(path) = PathBuilder::from_circle(circle.center.x, circle.center.y, circle.radius)
        {
            self.fill(&path, circle.fill, circle.opacity);
        }
    }

    fn line(&mut self, line: &LinePrimitive) {
        let Some(path) = polyline_path(&[line.from, line.to]) else {
            return;
        };
        let mut stroke = round_stroke(line.width);
        if line.dashed {
            stroke.dash = StrokeDash::new(vec![6.0, 4.0], 0.0);
        }
        self.stroke_path(&path, line.color, 1.0, &stroke);
    }

    fn raster(&mut self, raster: &RasterImage) {
        let Some(source) = premultiplied(raster.image()) else {
            log::warn!("Skipping malformed raster layer {}", raster.id());
            return;
        };
        self.pixmap.draw_pixmap(
            0,
            0,
            source.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            Some(self.clip),
        );
    }
}

/// Inverse of [`to_image`]. Exact for anything `to_image` produced.
fn premultiplied(image: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(image.width(), image.height())?;
    let data = image
        .pixels()
        .flat_map(|pixel| {
            let [r, g, b, a] = pixel.0;
            let scale = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
            [scale(r), scale(g), scale(b), a]
        })
        .collect();
    Pixmap::from_vec(data, size)
}

fn paint(color: Color32, opacity: f32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let alpha = (a as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, alpha);
    paint.anti_alias = true;
    paint
}

fn round_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    }
}

fn polyline_path(points: &[Pos2]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    builder.finish()
}

fn polygon_path(points: &[Pos2]) -> Option<Path> {
    if points.len() < 3 {
        return None;
    }
    let (first, rest) = points.split_first()?;
    let mut builder = PathBuilder::new();
    builder.move_to(first.x, first.y);
    for point in rest {
        builder.line_to(point.x, point.y);
    }
    builder.close();
    builder.finish()
}

/// tiny-skia works premultiplied; images and PNGs are straight alpha.
fn to_image(pixmap: &Pixmap) -> RgbaImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|pixel| {
            let color = pixel.demultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, SnapshotError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage, SnapshotError> {
    Ok(image::load_from_memory_with_format(bytes, ImageFormat::Png)?.to_rgba8())
}

pub fn to_data_uri(image: &RgbaImage) -> Result<String, SnapshotError> {
    Ok(png_data_uri(&encode_png(image)?))
}

/// Wrap already encoded PNG bytes.
pub fn png_data_uri(png: &[u8]) -> String {
    format!("{DATA_URI_PREFIX}{}", STANDARD.encode(png))
}

pub fn from_data_uri(uri: &str) -> Result<RgbaImage, SnapshotError> {
    let payload = uri
        .strip_prefix(DATA_URI_PREFIX)
        .ok_or(SnapshotError::NotDataUri)?;
    decode_png(&STANDARD.decode(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::primitive::{CircleKind, StrokePrimitive};
    use crate::surface::SURFACE_SIZE;
    use egui::pos2;

    #[test]
    fn outline_is_opaque_inside_and_clear_outside() {
        let config = EditorConfig {
            texture: crate::texture::NailTexture::Matte,
            ..Default::default()
        };
        let surface = DrawingSurface::new(0, &config);
        let image = rasterize(&surface).unwrap();
        assert_eq!(image.dimensions(), (SURFACE_SIZE.x as u32, SURFACE_SIZE.y as u32));

        let center = image.get_pixel(60, 100).0;
        assert_eq!(center, [0xFF, 0xF3, 0xF3, 0xFF]);
        // Round outline: the corners are cut away.
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn strokes_are_clipped_to_the_outline() {
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        surface.push(Primitive::Stroke(StrokePrimitive {
            points: vec![pos2(-20.0, 2.0), pos2(140.0, 2.0)],
            color: Color32::BLUE,
            width: 4.0,
            softness: 0.0,
            opacity: 1.0,
        }));
        let image = rasterize(&surface).unwrap();
        assert_eq!(image.get_pixel(1, 2).0[3], 0);
        let middle = image.get_pixel(60, 2).0;
        assert_eq!(middle[2], 0xFF);
        assert!(middle[0] < 0x20);
    }

    #[test]
    fn circles_land_where_they_are_placed() {
        let mut surface = DrawingSurface::new(0, &EditorConfig::default());
        surface.push(Primitive::Circle(CirclePrimitive {
            center: pos2(60.0, 100.0),
            radius: 8.0,
            fill: Color32::BLACK,
            opacity: 1.0,
            kind: CircleKind::Dot,
        }));
        let image = rasterize(&surface).unwrap();
        assert_eq!(image.get_pixel(60, 100).0, [0, 0, 0, 0xFF]);
    }

    #[test]
    fn data_uri_is_lossless() {
        let surface = DrawingSurface::new(2, &EditorConfig::default());
        let image = rasterize(&surface).unwrap();
        let uri = to_data_uri(&image).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));
        assert_eq!(from_data_uri(&uri).unwrap(), image);
    }

    #[test]
    fn rejects_other_uris() {
        assert!(matches!(
            from_data_uri("https://example.com/nail.png"),
            Err(SnapshotError::NotDataUri)
        ));
        assert!(matches!(
            from_data_uri("data:image/png;base64,@@@"),
            Err(SnapshotError::Base64(_))
        ));
    }
}
