//! Catalog of nail outlines.
//!
//! Each shape is described once on a 100×200 design box and serves both the
//! 2D drawing surfaces (as a clipping/fill polygon) and the 3D preview (as a
//! solid profile).

use egui::{Pos2, Rect, Vec2, pos2};
use serde::{Deserialize, Serialize};

/// Width and height of the box the outline paths are authored in.
pub const DESIGN_SIZE: Vec2 = Vec2::new(100.0, 200.0);

/// Line segments used to approximate each quadratic curve.
const CURVE_STEPS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NailShape {
    #[default]
    Round,
    Square,
    Almond,
    Stiletto,
    Coffin,
}

impl NailShape {
    pub const ALL: [NailShape; 5] = [
        NailShape::Round,
        NailShape::Square,
        NailShape::Almond,
        NailShape::Stiletto,
        NailShape::Coffin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NailShape::Round => "round",
            NailShape::Square => "square",
            NailShape::Almond => "almond",
            NailShape::Stiletto => "stiletto",
            NailShape::Coffin => "coffin",
        }
    }

    /// Unknown names resolve to `Round`.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_else(|| {
                log::debug!("Unknown nail shape {name:?}, using round");
                NailShape::Round
            })
    }

    pub fn label(self) -> &'static str {
        match self {
            NailShape::Round => "Round",
            NailShape::Square => "Square",
            NailShape::Almond => "Almond",
            NailShape::Stiletto => "Stiletto",
            NailShape::Coffin => "Coffin",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PathOp {
    Line(f32, f32),
    Quad(f32, f32, f32, f32),
}

use PathOp::{Line, Quad};

fn path_ops(shape: NailShape) -> ((f32, f32), &'static [PathOp]) {
    match shape {
        NailShape::Round => (
            (50.0, 0.0),
            &[
                Quad(100.0, 0.0, 100.0, 50.0),
                Line(100.0, 150.0),
                Quad(100.0, 200.0, 50.0, 200.0),
                Quad(0.0, 200.0, 0.0, 150.0),
                Line(0.0, 50.0),
                Quad(0.0, 0.0, 50.0, 0.0),
            ],
        ),
        NailShape::Square => (
            (10.0, 0.0),
            &[
                Line(90.0, 0.0),
                Line(100.0, 50.0),
                Line(100.0, 180.0),
                Line(0.0, 180.0),
                Line(0.0, 50.0),
                Line(10.0, 0.0),
            ],
        ),
        NailShape::Almond => (
            (50.0, 0.0),
            &[
                Quad(100.0, 0.0, 100.0, 70.0),
                Line(80.0, 180.0),
                Quad(65.0, 200.0, 50.0, 200.0),
                Quad(35.0, 200.0, 20.0, 180.0),
                Line(0.0, 70.0),
                Quad(0.0, 0.0, 50.0, 0.0),
            ],
        ),
        NailShape::Stiletto => (
            (50.0, 0.0),
            &[
                Quad(90.0, 0.0, 90.0, 70.0),
                Line(60.0, 200.0),
                Quad(55.0, 210.0, 50.0, 210.0),
                Quad(45.0, 210.0, 40.0, 200.0),
                Line(10.0, 70.0),
                Quad(10.0, 0.0, 50.0, 0.0),
            ],
        ),
        NailShape::Coffin => (
            (10.0, 0.0),
            &[
                Line(90.0, 0.0),
                Line(100.0, 70.0),
                Line(70.0, 180.0),
                Line(30.0, 180.0),
                Line(0.0, 70.0),
                Line(10.0, 0.0),
            ],
        ),
    }
}

/// Flattened outline polygon in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    points: Vec<Pos2>,
    bounds: Rect,
}

impl Outline {
    /// Outline of `shape` scaled to a surface of `size`.
    pub fn new(shape: NailShape, size: Vec2) -> Self {
        let scale = size / DESIGN_SIZE;
        let ((x0, y0), ops) = path_ops(shape);
        let mut points = vec![pos2(x0 * scale.x, y0 * scale.y)];
        let mut cursor = pos2(x0, y0);

        for op in ops {
            match *op {
                Line(x, y) => {
                    cursor = pos2(x, y);
                    points.push(pos2(x * scale.x, y * scale.y));
                }
                Quad(cx, cy, x, y) => {
                    let control = pos2(cx, cy);
                    let end = pos2(x, y);
                    for step in 1..=CURVE_STEPS {
                        let t = step as f32 / CURVE_STEPS as f32;
                        let p = quad_point(cursor, control, end, t);
                        points.push(pos2(p.x * scale.x, p.y * scale.y));
                    }
                    cursor = end;
                }
            }
        }

        // Paths return to their start point; the polygon is implicitly closed.
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }

        let bounds = Rect::from_points(&points);
        Self { points, bounds }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Axis-aligned bounds of the polygon.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }
}

pub(crate) fn quad_point(p0: Pos2, p1: Pos2, p2: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    pos2(
        u * u * p0.x + 2.0 * u * t * p1.x + t * t * p2.x,
        u * u * p0.y + 2.0 * u * t * p1.y + t * t * p2.y,
    )
}

/// Solid used for the nail in the 3D preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NailSolid {
    /// Lies along Z, so it already sits flat on the finger.
    Capsule { radius: f32, length: f32 },
    Cuboid { width: f32, height: f32, depth: f32 },
    /// Apex towards +Y.
    Cone { radius: f32, height: f32 },
}

/// 3D description of a nail shape, before per-finger scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NailProfile {
    pub solid: NailSolid,
    /// Non-uniform scale baked into the geometry.
    pub squash: [f32; 3],
    /// Pointed shapes are extruded in their own plane and must be turned 90°
    /// to lie on the finger.
    pub upright: bool,
}

/// 3D profile for `shape`.
pub fn profile(shape: NailShape) -> NailProfile {
    match shape {
        NailShape::Round => NailProfile {
            solid: NailSolid::Capsule { radius: 0.5, length: 1.0 },
            squash: [1.0, 0.3, 1.0],
            upright: false,
        },
        NailShape::Square => NailProfile {
            solid: NailSolid::Cuboid { width: 1.0, height: 0.2, depth: 1.5 },
            squash: [1.0, 1.0, 1.0],
            upright: false,
        },
        NailShape::Almond => NailProfile {
            solid: NailSolid::Cone { radius: 0.5, height: 1.5 },
            squash: [1.0, 1.0, 0.3],
            upright: true,
        },
        NailShape::Stiletto => NailProfile {
            solid: NailSolid::Cone { radius: 0.5, height: 2.0 },
            squash: [1.0, 1.0, 0.3],
            upright: true,
        },
        NailShape::Coffin => NailProfile {
            solid: NailSolid::Cuboid { width: 1.0, height: 2.0, depth: 0.2 },
            squash: [1.0, 0.7, 1.0],
            upright: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_name_falls_back_to_round() {
        assert_eq!(NailShape::from_name("coffin"), NailShape::Coffin);
        assert_eq!(NailShape::from_name("Stiletto"), NailShape::Stiletto);
        assert_eq!(NailShape::from_name("heart"), NailShape::Round);
        assert_eq!(NailShape::from_name(""), NailShape::Round);
    }

    #[test]
    fn round_outline_fills_the_surface() {
        let outline = Outline::new(NailShape::Round, Vec2::new(120.0, 200.0));
        let bounds = outline.bounds();
        assert!((bounds.min.x - 0.0).abs() < 1e-3);
        assert!((bounds.max.x - 120.0).abs() < 1e-3);
        assert!((bounds.min.y - 0.0).abs() < 1e-3);
        assert!((bounds.max.y - 200.0).abs() < 1e-3);
    }

    #[test]
    fn stiletto_tip_extends_past_design_box() {
        let outline = Outline::new(NailShape::Stiletto, DESIGN_SIZE);
        assert!(outline.bounds().max.y > 200.0);
        assert!(outline.bounds().min.x >= 10.0 - 1e-3);
    }

    #[test]
    fn polygon_is_not_closed_twice() {
        let outline = Outline::new(NailShape::Coffin, DESIGN_SIZE);
        assert_eq!(outline.points().len(), 6);
    }

    #[test]
    fn pointed_profiles_are_upright() {
        for shape in NailShape::ALL {
            let upright = matches!(shape, NailShape::Almond | NailShape::Stiletto | NailShape::Coffin);
            assert_eq!(profile(shape).upright, upright, "{shape:?}");
        }
    }
}
