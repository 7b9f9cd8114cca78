//! Triangle meshes for the hand model.
//!
//! Built once and shared behind `Arc`; a mesh is never edited after
//! construction. Changing a nail's shape means building a new one.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::{Quat, Vec2, Vec3};

use crate::shape::{self, NailShape, NailSolid};

const RADIAL_SEGMENTS: u32 = 16;
const CAP_SEGMENTS: u32 = 4;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned box centered on the origin (like Three.js BoxGeometry)
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) / 2.0;
        let mut mesh = Self::default();
        for normal in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            // Two axes spanning the face.
            let u = if normal.x.abs() > 0.5 { Vec3::Z } else { Vec3::X };
            let v = normal.cross(u);
            let base = mesh.positions.len() as u32;
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                mesh.positions.push((normal + u * su + v * sv) * half);
                mesh.normals.push(normal);
            }
            mesh.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    /// UV sphere centered on the origin (like Three.js SphereGeometry)
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let profile: Vec<Vec2> = (0..=height_segments.max(2))
            .map(|i| {
                let phi = -FRAC_PI_2 + PI * i as f32 / height_segments.max(2) as f32;
                Vec2::new(radius * phi.cos(), radius * phi.sin())
            })
            .collect();
        Self::lathe(&profile, width_segments.max(3))
    }

    /// Tapered cylinder along Y, closed at both ends.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32) -> Self {
        let half = height / 2.0;
        Self::lathe(
            &[
                Vec2::new(0.0, -half),
                Vec2::new(radius_bottom, -half),
                Vec2::new(radius_top, half),
                Vec2::new(0.0, half),
            ],
            RADIAL_SEGMENTS,
        )
    }

    /// Cone along Y with the apex at `+height / 2`.
    pub fn cone(radius: f32, height: f32) -> Self {
        let half = height / 2.0;
        Self::lathe(
            &[
                Vec2::new(0.0, -half),
                Vec2::new(radius, -half),
                Vec2::new(0.0, half),
            ],
            RADIAL_SEGMENTS,
        )
    }

    /// Capsule along Y: a cylinder of `length` with hemispherical caps.
    pub fn capsule(radius: f32, length: f32) -> Self {
        let half = length / 2.0;
        let mut profile = Vec::with_capacity(2 * CAP_SEGMENTS as usize + 2);
        for i in 0..=CAP_SEGMENTS {
            let angle = -FRAC_PI_2 + FRAC_PI_2 * i as f32 / CAP_SEGMENTS as f32;
            profile.push(Vec2::new(radius * angle.cos(), -half + radius * angle.sin()));
        }
        for i in 0..=CAP_SEGMENTS {
            let angle = FRAC_PI_2 * i as f32 / CAP_SEGMENTS as f32;
            profile.push(Vec2::new(radius * angle.cos(), half + radius * angle.sin()));
        }
        Self::lathe(&profile, RADIAL_SEGMENTS)
    }

    /// Surface of revolution around Y. `profile` holds (radius, y) pairs from
    /// bottom to top.
    fn lathe(profile: &[Vec2], segments: u32) -> Self {
        let mut mesh = Self::default();
        let ring = segments + 1;

        for (i, point) in profile.iter().enumerate() {
            let before = profile[i.saturating_sub(1)];
            let after = profile[(i + 1).min(profile.len() - 1)];
            let tangent = after - before;
            let outward = Vec2::new(tangent.y, -tangent.x).normalize_or_zero();

            for j in 0..ring {
                let theta = TAU * j as f32 / segments as f32;
                let (sin, cos) = theta.sin_cos();
                mesh.positions.push(Vec3::new(point.x * cos, point.y, point.x * sin));
                mesh.normals
                    .push(Vec3::new(outward.x * cos, outward.y, outward.x * sin));
            }
        }

        for i in 0..profile.len().saturating_sub(1) as u32 {
            for j in 0..segments {
                let a = i * ring + j;
                let b = a + ring;
                let c = b + 1;
                let d = a + 1;
                mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }
        mesh
    }

    /// Non-uniform scale baked into the vertices.
    pub fn scaled(mut self, scale: Vec3) -> Self {
        for position in &mut self.positions {
            *position *= scale;
        }
        let inverse = scale.recip();
        for normal in &mut self.normals {
            *normal = (*normal * inverse).normalize_or_zero();
        }
        self
    }

    pub fn rotated(mut self, rotation: Quat) -> Self {
        for position in &mut self.positions {
            *position = rotation * *position;
        }
        for normal in &mut self.normals {
            *normal = rotation * *normal;
        }
        self
    }

    pub fn from_solid(solid: NailSolid) -> Self {
        match solid {
            NailSolid::Capsule { radius, length } => {
                Self::capsule(radius, length).rotated(Quat::from_rotation_x(FRAC_PI_2))
            }
            NailSolid::Cuboid { width, height, depth } => Self::cuboid(width, height, depth),
            NailSolid::Cone { radius, height } => Self::cone(radius, height),
        }
    }

    /// Nail geometry for `shape`, lying in the XZ plane with its free edge
    /// towards -Z.
    pub fn nail(shape: NailShape) -> Self {
        let profile = shape::profile(shape);
        let mesh = Self::from_solid(profile.solid).scaled(Vec3::from_array(profile.squash));
        if profile.upright {
            mesh.rotated(Quat::from_rotation_x(-FRAC_PI_2))
        } else {
            mesh
        }
    }

    /// Axis-aligned bounds as (min, max).
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(*p), max.max(*p)),
        )
    }
}
