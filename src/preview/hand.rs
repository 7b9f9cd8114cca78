//! Procedural hand: palm, jointed fingers and one nail per finger.
//!
//! Nodes live in a flat list with parent indices. A node's transform is
//! relative to its parent.

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use egui::Color32;
use glam::{Mat4, Quat, Vec3};

use super::mesh::Mesh;
use crate::shape::NailShape;
use crate::surface::NAIL_COUNT;
use crate::texture::{self, MaterialParams, NailTexture};

/// Overall nail size relative to the raw profile geometry.
const NAIL_BASE_SCALE: f32 = 0.45;

/// How far the nail is tipped back from the finger axis.
const NAIL_TILT: f32 = 0.12;

const PALM_SIZE: Vec3 = Vec3::new(3.0, 0.5, 4.0);

/// Static description of one finger.
#[derive(Debug, Clone, Copy)]
pub struct FingerSpec {
    pub name: &'static str,
    /// Where the finger leaves the palm.
    pub base: Vec3,
    /// Rotation around Y, away from straight ahead.
    pub splay: f32,
    pub length: f32,
    pub radius: f32,
    pub segments: u32,
    /// Nail width and length multipliers.
    pub nail_width: f32,
    pub nail_length: f32,
}

/// Index 0 is the pinky, 4 the thumb.
pub const FINGERS: [FingerSpec; NAIL_COUNT] = [
    FingerSpec {
        name: "pinky",
        base: Vec3::new(-1.2, 0.0, -2.0),
        splay: 0.08,
        length: 2.1,
        radius: 0.22,
        segments: 3,
        nail_width: 0.65,
        nail_length: 0.65,
    },
    FingerSpec {
        name: "ring",
        base: Vec3::new(-0.6, 0.0, -2.2),
        splay: 0.03,
        length: 2.5,
        radius: 0.26,
        segments: 3,
        nail_width: 0.8,
        nail_length: 0.8,
    },
    FingerSpec {
        name: "middle",
        base: Vec3::new(0.0, 0.0, -2.4),
        splay: 0.0,
        length: 3.0,
        radius: 0.27,
        segments: 3,
        nail_width: 0.85,
        nail_length: 0.95,
    },
    FingerSpec {
        name: "index",
        base: Vec3::new(0.6, 0.0, -2.2),
        splay: -0.03,
        length: 2.6,
        radius: 0.26,
        segments: 3,
        nail_width: 0.8,
        nail_length: 0.85,
    },
    FingerSpec {
        name: "thumb",
        base: Vec3::new(1.5, 0.0, -1.5),
        splay: -0.5,
        length: 2.0,
        radius: 0.3,
        segments: 2,
        nail_width: 0.95,
        nail_length: 0.7,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Grouping only, no geometry.
    Group,
    Skin,
    Nail { finger: usize },
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<usize>,
    pub transform: Transform,
    pub mesh: Option<Arc<Mesh>>,
    pub material: MaterialParams,
    pub role: NodeRole,
}

/// The hand scene graph.
#[derive(Debug, Clone)]
pub struct HandModel {
    nodes: Vec<SceneNode>,
    nail_slots: [usize; NAIL_COUNT],
}

impl HandModel {
    pub fn build(
        shape: NailShape,
        texture: NailTexture,
        nail_colors: [Color32; NAIL_COUNT],
        skin_tone: Color32,
    ) -> Self {
        let skin = MaterialParams::skin(skin_tone);
        let mut model = Self {
            nodes: Vec::new(),
            nail_slots: [0; NAIL_COUNT],
        };

        let root = model.add(SceneNode {
            name: "hand".to_owned(),
            parent: None,
            transform: Transform::default(),
            mesh: None,
            material: skin,
            role: NodeRole::Group,
        });
        model.add(SceneNode {
            name: "palm".to_owned(),
            parent: Some(root),
            transform: Transform::default(),
            mesh: Some(Arc::new(Mesh::cuboid(PALM_SIZE.x, PALM_SIZE.y, PALM_SIZE.z))),
            material: skin,
            role: NodeRole::Skin,
        });

        let joint = Arc::new(Mesh::sphere(1.0, 10, 6));
        let nail_mesh = Arc::new(Mesh::nail(shape));

        for (finger, spec) in FINGERS.iter().enumerate() {
            let segment_length = spec.length / spec.segments as f32;
            let mut parent = model.add(SceneNode {
                name: spec.name.to_owned(),
                parent: Some(root),
                transform: Transform {
                    translation: spec.base,
                    rotation: Quat::from_rotation_y(spec.splay),
                    scale: Vec3::ONE,
                },
                mesh: None,
                material: skin,
                role: NodeRole::Group,
            });

            for segment in 0..spec.segments {
                // Fingers taper slightly towards the tip.
                let taper = 1.0 - 0.08 * segment as f32;
                let radius = spec.radius * taper;
                let knuckle = model.add(SceneNode {
                    name: format!("{}-segment-{segment}", spec.name),
                    parent: Some(parent),
                    transform: Transform::from_translation(if segment == 0 {
                        Vec3::ZERO
                    } else {
                        Vec3::new(0.0, 0.0, -segment_length)
                    }),
                    mesh: None,
                    material: skin,
                    role: NodeRole::Group,
                });
                model.add(SceneNode {
                    name: format!("{}-bone-{segment}", spec.name),
                    parent: Some(knuckle),
                    transform: Transform {
                        translation: Vec3::new(0.0, 0.0, -segment_length / 2.0),
                        rotation: Quat::from_rotation_x(FRAC_PI_2),
                        scale: Vec3::ONE,
                    },
                    mesh: Some(Arc::new(Mesh::cylinder(radius * 0.95, radius, segment_length))),
                    material: skin,
                    role: NodeRole::Skin,
                });
                if segment + 1 < spec.segments {
                    model.add(SceneNode {
                        name: format!("{}-joint-{segment}", spec.name),
                        parent: Some(knuckle),
                        transform: Transform {
                            translation: Vec3::new(0.0, 0.0, -segment_length),
                            rotation: Quat::IDENTITY,
                            scale: Vec3::splat(radius),
                        },
                        mesh: Some(Arc::clone(&joint)),
                        material: skin,
                        role: NodeRole::Skin,
                    });
                }
                parent = knuckle;
            }

            let tip_radius = spec.radius * (1.0 - 0.08 * (spec.segments - 1) as f32);
            let slot = model.add(SceneNode {
                name: format!("{}-nail", spec.name),
                parent: Some(parent),
                transform: Transform {
                    translation: Vec3::new(0.0, tip_radius * 0.85, -segment_length * 0.65),
                    rotation: Quat::from_rotation_x(NAIL_TILT),
                    scale: Vec3::new(spec.nail_width, 1.0, spec.nail_length) * NAIL_BASE_SCALE,
                },
                mesh: Some(Arc::clone(&nail_mesh)),
                material: texture::material_params(texture, nail_colors[finger]),
                role: NodeRole::Nail { finger },
            });
            model.nail_slots[finger] = slot;
        }

        model
    }

    fn add(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn nail(&self, finger: usize) -> Option<&SceneNode> {
        self.nail_slots.get(finger).map(|&slot| &self.nodes[slot])
    }

    pub fn nails(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nail_slots.iter().map(|&slot| &self.nodes[slot])
    }

    /// Every node with geometry that is not a nail.
    pub fn skin_nodes(&self) -> impl Iterator<Item = &SceneNode> + '_ {
        self.nodes
            .iter()
            .filter(|node| node.role == NodeRole::Skin)
    }

    /// Replace every nail with freshly built geometry and material. Each new
    /// nail takes over the placement of the one it replaces.
    pub fn rebuild_nails(
        &mut self,
        shape: NailShape,
        texture: NailTexture,
        nail_colors: [Color32; NAIL_COUNT],
    ) {
        let mesh = Arc::new(Mesh::nail(shape));
        for (finger, &slot) in self.nail_slots.iter().enumerate() {
            let old = &self.nodes[slot];
            let fresh = SceneNode {
                name: old.name.clone(),
                parent: old.parent,
                transform: old.transform,
                mesh: Some(Arc::clone(&mesh)),
                material: texture::material_params(texture, nail_colors[finger]),
                role: NodeRole::Nail { finger },
            };
            self.nodes[slot] = fresh;
        }
        log::debug!("Rebuilt nails as {} / {}", shape.name(), texture.name());
    }

    /// Recolor the skin meshes in place. Nails keep their material and
    /// groups have nothing to color.
    pub fn set_skin_tone(&mut self, tone: Color32) {
        for node in self.nodes.iter_mut().filter(|node| node.role == NodeRole::Skin) {
            node.material.color = tone;
        }
    }

    /// World matrix of `index`, with `root` applied above the hand.
    pub fn world_matrix(&self, index: usize, root: Mat4) -> Mat4 {
        let mut matrix = self.nodes[index].transform.matrix();
        let mut parent = self.nodes[index].parent;
        while let Some(p) = parent {
            matrix = self.nodes[p].transform.matrix() * matrix;
            parent = self.nodes[p].parent;
        }
        root * matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> HandModel {
        HandModel::build(
            NailShape::Round,
            NailTexture::Glossy,
            [Color32::RED; NAIL_COUNT],
            Color32::from_rgb(0xE8, 0xC4, 0xA2),
        )
    }

    #[test]
    fn thumb_has_two_segments_and_others_three() {
        let model = model();
        for (finger, spec) in FINGERS.iter().enumerate() {
            let bones = model
                .nodes()
                .iter()
                .filter(|n| n.name.starts_with(&format!("{}-bone", spec.name)))
                .count();
            let joints = model
                .nodes()
                .iter()
                .filter(|n| n.name.starts_with(&format!("{}-joint", spec.name)))
                .count();
            let expected = if finger == 4 { 2 } else { 3 };
            assert_eq!(bones, expected, "{}", spec.name);
            assert_eq!(joints, expected - 1, "{}", spec.name);
        }
    }

    #[test]
    fn middle_nail_is_the_longest() {
        let model = model();
        let lengths: Vec<f32> = model.nails().map(|n| n.transform.scale.z).collect();
        let widths: Vec<f32> = model.nails().map(|n| n.transform.scale.x).collect();
        assert!(lengths.iter().all(|&l| l <= lengths[2]));
        assert!(widths[4] > widths[0] && lengths[4] < lengths[2]);
        assert!(widths[0] < widths[2] && lengths[0] < lengths[2]);
    }

    #[test]
    fn nails_sit_at_the_finger_tips() {
        let model = model();
        for (finger, spec) in FINGERS.iter().enumerate() {
            let slot = model.nail_slots[finger];
            let position = model.world_matrix(slot, Mat4::IDENTITY).transform_point3(Vec3::ZERO);
            let reach = (position - spec.base).length();
            assert!(reach > spec.length * 0.6 && reach < spec.length, "{}", spec.name);
            assert!(position.y > 0.0);
        }
    }

    #[test]
    fn rebuild_replaces_geometry_but_keeps_placement() {
        let mut model = model();
        let before: Vec<_> = model.nails().cloned().collect();
        model.rebuild_nails(NailShape::Coffin, NailTexture::Matte, [Color32::BLUE; NAIL_COUNT]);
        for (old, new) in before.iter().zip(model.nails()) {
            assert_eq!(old.transform, new.transform);
            assert_eq!(old.parent, new.parent);
            let (Some(old_mesh), Some(new_mesh)) = (&old.mesh, &new.mesh) else {
                panic!("nails always have geometry");
            };
            assert!(!Arc::ptr_eq(old_mesh, new_mesh));
            assert_eq!(new.material.color, Color32::BLUE);
        }
    }
}
