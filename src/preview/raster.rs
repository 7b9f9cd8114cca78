//! Software projection of the hand model into an `egui::Mesh`.
//!
//! Triangles are flat shaded and sorted back to front, which is plenty for a
//! few thousand triangles of convex-ish parts.

use egui::{Color32, Pos2, Rect, pos2};
use glam::{Mat4, Vec3};

use super::camera::{NEAR, OrbitCamera};
use super::hand::HandModel;
use crate::color;
use crate::environment::EnvironmentMap;
use crate::texture::{MaterialParams, Overlay};

pub const BACKGROUND: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);

const AMBIENT: f32 = 0.35;

/// Stand-in for reflections while no environment map is available.
const FLAT_SKY: Vec3 = Vec3::new(0.25, 0.25, 0.28);

struct Light {
    direction: Vec3,
    intensity: f32,
}

const LIGHTS: [Light; 2] = [
    Light {
        direction: Vec3::new(5.0, 5.0, 5.0),
        intensity: 0.8,
    },
    Light {
        direction: Vec3::new(-5.0, 5.0, 5.0),
        intensity: 0.5,
    },
];

pub struct RenderParams<'a> {
    pub rect: Rect,
    /// Applied above the hand root, used for the idle animation.
    pub root: Mat4,
    /// Seconds since the preview opened. Drives glitter sparkle.
    pub time: f32,
    pub environment: Option<&'a EnvironmentMap>,
}

struct ShadedTriangle {
    depth: f32,
    points: [Pos2; 3],
    color: Color32,
}

pub fn render(model: &HandModel, camera: &OrbitCamera, params: &RenderParams<'_>) -> egui::Mesh {
    let rect = params.rect;
    let view_projection = camera.view_projection(rect.width() / rect.height().max(1.0));
    let eye = camera.eye();
    let sparkle_frame = (params.time * 8.0) as u32;

    let mut triangles = Vec::new();
    for (index, node) in model.nodes().iter().enumerate() {
        let Some(mesh) = &node.mesh else {
            continue;
        };
        let world = model.world_matrix(index, params.root);
        let normal_matrix = world.inverse().transpose();

        let world_positions: Vec<Vec3> =
            mesh.positions.iter().map(|p| world.transform_point3(*p)).collect();
        let projected: Vec<Option<Pos2>> = world_positions
            .iter()
            .map(|p| {
                let clip = view_projection * p.extend(1.0);
                (clip.w > NEAR).then(|| {
                    let ndc = clip.truncate() / clip.w;
                    pos2(
                        rect.center().x + ndc.x * rect.width() / 2.0,
                        rect.center().y - ndc.y * rect.height() / 2.0,
                    )
                })
            })
            .collect();

        for (t, corners) in mesh.indices.chunks_exact(3).enumerate() {
            let [a, b, c] = [corners[0] as usize, corners[1] as usize, corners[2] as usize];
            let (Some(pa), Some(pb), Some(pc)) = (projected[a], projected[b], projected[c]) else {
                continue;
            };

            let centroid = (world_positions[a] + world_positions[b] + world_positions[c]) / 3.0;
            let to_eye = (eye - centroid).normalize_or_zero();
            let mut normal = normal_matrix
                .transform_vector3(mesh.normals[a] + mesh.normals[b] + mesh.normals[c])
                .normalize_or_zero();
            if normal.dot(to_eye) < 0.0 {
                normal = -normal;
            }

            let sparkle = if node.material.overlay == Some(Overlay::Glitter) {
                sparkle(index as u32, t as u32, sparkle_frame)
            } else {
                0.0
            };

            triangles.push(ShadedTriangle {
                depth: (eye - centroid).length(),
                points: [pa, pb, pc],
                color: shade(&node.material, normal, to_eye, params.environment, sparkle),
            });
        }
    }

    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut output = egui::Mesh::default();
    for triangle in triangles {
        let base = output.vertices.len() as u32;
        for point in triangle.points {
            output.colored_vertex(point, triangle.color);
        }
        output.add_triangle(base, base + 1, base + 2);
    }
    output
}

fn shade(
    material: &MaterialParams,
    normal: Vec3,
    to_eye: Vec3,
    environment: Option<&EnvironmentMap>,
    sparkle: f32,
) -> Color32 {
    let base = Vec3::from_array(color::to_linear_rgb(material.color));
    let shininess = (2.0 / (material.roughness * material.roughness + 0.01)).clamp(4.0, 256.0);

    let mut diffuse = AMBIENT;
    let mut specular = 0.0;
    let mut coat = 0.0;
    for light in &LIGHTS {
        let l = light.direction.normalize();
        diffuse += normal.dot(l).max(0.0) * light.intensity;
        let half = (l + to_eye).normalize_or_zero();
        let n_dot_h = normal.dot(half).max(0.0);
        specular += n_dot_h.powf(shininess) * light.intensity;
        coat += n_dot_h.powf(128.0) * light.intensity;
    }

    let metal = material.metalness;
    let albedo = base * (1.0 - 0.6 * metal);
    let specular_color = Vec3::ONE.lerp(base, metal);
    let strength = (1.0 - material.roughness) * (0.3 + 0.7 * material.reflectivity.max(metal));

    let mut rgb = albedo * diffuse + specular_color * specular * strength;
    rgb += Vec3::splat(coat * material.clearcoat * 0.3);

    if material.environment {
        let view = -to_eye;
        let reflected = view - 2.0 * view.dot(normal) * normal;
        let sky = environment.map_or(FLAT_SKY, |map| Vec3::from_array(map.sample(reflected)));
        rgb += sky * specular_color * material.reflectivity * (1.0 - material.roughness) * 0.6;
    }
    rgb += Vec3::splat(sparkle);

    let to_byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        to_byte(rgb.x),
        to_byte(rgb.y),
        to_byte(rgb.z),
        to_byte(material.opacity),
    )
}

/// Deterministic flicker for glitter facets.
fn sparkle(node: u32, triangle: u32, frame: u32) -> f32 {
    let mut h = node
        .wrapping_mul(0x9E37_79B9)
        .wrapping_add(triangle.wrapping_mul(0x85EB_CA6B))
        .wrapping_add(frame.wrapping_mul(0xC2B2_AE35));
    h ^= h >> 16;
    h = h.wrapping_mul(0x7FEB_352D);
    h ^= h >> 15;
    if h % 100 < 15 { 0.6 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::NailShape;
    use crate::surface::NAIL_COUNT;
    use crate::texture::NailTexture;

    fn params() -> RenderParams<'static> {
        RenderParams {
            rect: Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(400.0, 300.0)),
            root: Mat4::IDENTITY,
            time: 0.0,
            environment: None,
        }
    }

    #[test]
    fn renders_visible_triangles() {
        let model = HandModel::build(
            NailShape::Almond,
            NailTexture::Metallic,
            [Color32::RED; NAIL_COUNT],
            Color32::from_rgb(0xE8, 0xC4, 0xA2),
        );
        let mesh = render(&model, &OrbitCamera::default(), &params());
        assert!(!mesh.indices.is_empty());
        assert_eq!(mesh.vertices.len(), mesh.indices.len());
        let inside = mesh
            .vertices
            .iter()
            .filter(|v| params().rect.contains(v.pos))
            .count();
        assert!(inside > mesh.vertices.len() / 2);
    }

    #[test]
    fn matte_is_darker_in_highlights_than_glossy() {
        // Facing the key light head on, so the highlight is at its peak.
        let normal = Vec3::ONE.normalize();
        let glossy = crate::texture::material_params(NailTexture::Glossy, Color32::from_rgb(120, 20, 60));
        let matte = crate::texture::material_params(NailTexture::Matte, Color32::from_rgb(120, 20, 60));
        let lit_glossy = shade(&glossy, normal, normal, None, 0.0);
        let lit_matte = shade(&matte, normal, normal, None, 0.0);
        assert!(lit_glossy.g() > lit_matte.g() + 50);
    }

    #[test]
    fn studio_map_tints_metallic_nails() {
        let map = crate::environment::EnvironmentSource::Studio.load().unwrap();
        let model = HandModel::build(
            NailShape::Square,
            NailTexture::Metallic,
            [Color32::from_rgb(0x80, 0x80, 0x90); NAIL_COUNT],
            Color32::from_rgb(0xE8, 0xC4, 0xA2),
        );
        let flat = render(&model, &OrbitCamera::default(), &params());
        let reflective = render(
            &model,
            &OrbitCamera::default(),
            &RenderParams {
                rect: params().rect,
                root: Mat4::IDENTITY,
                time: 0.0,
                environment: Some(&map),
            },
        );
        assert_eq!(flat.vertices.len(), reflective.vertices.len());
        let changed = flat
            .vertices
            .iter()
            .zip(&reflective.vertices)
            .filter(|(a, b)| a.color != b.color)
            .count();
        assert!(changed > 0);
    }
}
