//! Color extraction from a user-supplied picture.

use std::collections::HashMap;

use egui::Color32;

/// Most frequent colors returned by [`extract_palette`].
pub const MAX_COLORS: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaletteError {
    #[error("{0} is not an image. Please choose a PNG, JPEG, GIF, WebP or BMP file.")]
    NotAnImage(String),

    #[error("could not read {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

/// Upload validation: a declared `image/*` type, or failing that an image
/// file extension.
pub fn looks_like_image(mime: &str, file_name: &str) -> bool {
    if !mime.is_empty() {
        return mime.starts_with("image/");
    }
    std::path::Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| matches!(ext.as_str(), "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp"))
}

/// The [`MAX_COLORS`] most frequent exact colors of an encoded image, most
/// frequent first. Ties keep the order in which colors first appear.
pub fn extract_palette(file_name: &str, bytes: &[u8]) -> Result<Vec<Color32>, PaletteError> {
    let image = image::load_from_memory(bytes)
        .map_err(|_| PaletteError::NotAnImage(file_name.to_owned()))?
        .to_rgb8();

    let mut counts: HashMap<[u8; 3], (usize, usize)> = HashMap::new();
    for (order, pixel) in image.pixels().enumerate() {
        counts.entry(pixel.0).or_insert((0, order)).0 += 1;
    }

    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then(first_a.cmp(first_b))
    });

    log::debug!("{file_name}: {} distinct colors", ranked.len());
    Ok(ranked
        .into_iter()
        .take(MAX_COLORS)
        .map(|([r, g, b], _)| Color32::from_rgb(r, g, b))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::encode_png;
    use image::{Rgba, RgbaImage};

    #[test]
    fn most_frequent_colors_come_first() {
        let mut picture = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        for x in 0..10 {
            picture.put_pixel(x, 0, Rgba([0, 0, 255, 255]));
        }
        picture.put_pixel(5, 5, Rgba([0, 255, 0, 255]));
        let bytes = encode_png(&picture).unwrap();

        let palette = extract_palette("swatch.png", &bytes).unwrap();
        assert_eq!(palette, [Color32::RED, Color32::BLUE, Color32::GREEN]);
    }

    #[test]
    fn keeps_at_most_sixteen() {
        let picture = RgbaImage::from_fn(32, 1, |x, _| Rgba([x as u8 * 8, 0, 0, 255]));
        let palette = extract_palette("ramp.png", &encode_png(&picture).unwrap()).unwrap();
        assert_eq!(palette.len(), MAX_COLORS);
    }

    #[test]
    fn text_is_not_an_image() {
        assert_eq!(
            extract_palette("notes.txt", b"hello"),
            Err(PaletteError::NotAnImage("notes.txt".to_owned()))
        );
        assert!(!looks_like_image("text/plain", "notes.txt"));
        assert!(looks_like_image("", "holiday.JPG"));
        assert!(looks_like_image("image/png", "blob"));
    }
}
