//! Rendering parameters for each nail finish.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::color::BASE_TONE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NailTexture {
    #[default]
    Glossy,
    Matte,
    Metallic,
    Glitter,
}

impl NailTexture {
    pub const ALL: [NailTexture; 4] = [
        NailTexture::Glossy,
        NailTexture::Matte,
        NailTexture::Metallic,
        NailTexture::Glitter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NailTexture::Glossy => "glossy",
            NailTexture::Matte => "matte",
            NailTexture::Metallic => "metallic",
            NailTexture::Glitter => "glitter",
        }
    }

    /// Unknown names resolve to `Glossy`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|texture| texture.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::debug!("Unknown nail texture {name:?}, using glossy");
                NailTexture::Glossy
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            NailTexture::Glossy => "Glossy",
            NailTexture::Matte => "Matte",
            NailTexture::Metallic => "Metallic",
            NailTexture::Glitter => "Glitter",
        }
    }

    /// Opacity of the nail outline on the 2D surface.
    pub fn surface_opacity(self) -> f32 {
        match self {
            NailTexture::Glossy => 0.7,
            NailTexture::Matte => 1.0,
            NailTexture::Metallic => 0.8,
            NailTexture::Glitter => 0.9,
        }
    }

    /// Fill of the nail outline on the 2D surface.
    pub fn outline_fill(self, nail_color: Color32) -> Color32 {
        match self {
            NailTexture::Glitter => nail_color,
            _ => BASE_TONE,
        }
    }
}

/// Procedural effect that static parameters cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Glitter,
}

/// Physically-inspired material description for the 3D preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub color: Color32,
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub clearcoat: f32,
    pub reflectivity: f32,
    /// Wants an environment map for reflections. Purely cosmetic.
    pub environment: bool,
    pub overlay: Option<Overlay>,
}

impl MaterialParams {
    /// Plain diffuse material used for skin.
    pub fn skin(color: Color32) -> Self {
        Self {
            color,
            opacity: 1.0,
            metalness: 0.1,
            roughness: 0.8,
            clearcoat: 0.0,
            reflectivity: 0.0,
            environment: false,
            overlay: None,
        }
    }
}

/// Material for a nail with `texture` and polish `base_color`.
pub fn material_params(texture: NailTexture, base_color: Color32) -> MaterialParams {
    match texture {
        NailTexture::Glossy => MaterialParams {
            color: base_color,
            opacity: 1.0,
            metalness: 0.1,
            roughness: 0.1,
            clearcoat: 1.0,
            reflectivity: 1.0,
            environment: false,
            overlay: None,
        },
        NailTexture::Matte => MaterialParams {
            color: base_color,
            opacity: 1.0,
            metalness: 0.0,
            roughness: 0.9,
            clearcoat: 0.0,
            reflectivity: 0.0,
            environment: false,
            overlay: None,
        },
        NailTexture::Metallic => MaterialParams {
            color: base_color,
            opacity: 1.0,
            metalness: 0.9,
            roughness: 0.2,
            clearcoat: 0.0,
            reflectivity: 1.0,
            environment: true,
            overlay: None,
        },
        NailTexture::Glitter => MaterialParams {
            color: base_color,
            opacity: 1.0,
            metalness: 0.5,
            roughness: 0.2,
            clearcoat: 0.8,
            reflectivity: 0.5,
            environment: true,
            overlay: Some(Overlay::Glitter),
        },
    }
}
