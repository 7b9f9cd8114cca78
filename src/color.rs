use egui::Color32;

/// Pale pink used for the bare nail and by the eraser.
pub const BASE_TONE: Color32 = Color32::from_rgb(0xFF, 0xF3, 0xF3);

/// Default polish color.
pub const DEFAULT_POLISH: Color32 = Color32::from_rgb(0xFF, 0x69, 0xB4);

/// Default skin tone for the hand preview.
pub const DEFAULT_SKIN: Color32 = Color32::from_rgb(0xE8, 0xC4, 0xA2);

/// Quick-pick palette shown in the tools panel.
pub const SWATCHES: [Color32; 8] = [
    Color32::from_rgb(0xFF, 0x69, 0xB4),
    Color32::from_rgb(0xFF, 0x14, 0x93),
    Color32::from_rgb(0xC7, 0x15, 0x85),
    Color32::from_rgb(0x4B, 0x00, 0x82),
    Color32::from_rgb(0x94, 0x00, 0xD3),
    Color32::from_rgb(0x8A, 0x2B, 0xE2),
    Color32::from_rgb(0xFF, 0xD7, 0x00),
    Color32::from_rgb(0xFF, 0x45, 0x00),
];

/// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
pub fn parse_hex(text: &str) -> Option<Color32> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Format as uppercase `#RRGGBB`, alpha is dropped.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Lighten every channel by `percent` of full scale, clamped.
pub fn lighten(color: Color32, percent: f32) -> Color32 {
    let amount = (2.55 * percent).round() as i32;
    shift(color, amount)
}

/// Add an absolute offset to every channel, clamped.
pub fn brighten(color: Color32, offset: u8) -> Color32 {
    shift(color, offset as i32)
}

fn shift(color: Color32, amount: i32) -> Color32 {
    let apply = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
    Color32::from_rgb(apply(color.r()), apply(color.g()), apply(color.b()))
}

/// Multiply alpha into an opaque color.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Linear RGB in `0..=1` for lighting math.
pub fn to_linear_rgb(color: Color32) -> [f32; 3] {
    [
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
    ]
}

/// Serde adapter storing colors as `#RRGGBB` strings.
pub mod hex_serde {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_hex(&text).ok_or_else(|| D::Error::custom(format!("invalid color: {text}")))
    }
}

/// Same as [`hex_serde`] for the five per-nail colors.
pub mod hex_array_serde {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de::Error, ser::SerializeSeq};

    use crate::surface::NAIL_COUNT;

    pub fn serialize<S: Serializer>(
        colors: &[Color32; NAIL_COUNT],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(NAIL_COUNT))?;
        for color in colors {
            seq.serialize_element(&super::to_hex(*color))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<[Color32; NAIL_COUNT], D::Error> {
        let texts = Vec::<String>::deserialize(deserializer)?;
        if texts.len() != NAIL_COUNT {
            return Err(D::Error::invalid_length(texts.len(), &"five nail colors"));
        }
        let mut colors = [Color32::WHITE; NAIL_COUNT];
        for (slot, text) in colors.iter_mut().zip(&texts) {
            *slot = super::parse_hex(text)
                .ok_or_else(|| D::Error::custom(format!("invalid color: {text}")))?;
        }
        Ok(colors)
    }
}
