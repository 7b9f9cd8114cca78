//! Ready-made decorations that can be dropped onto a nail.

use std::f32::consts::{FRAC_PI_4, TAU};

use egui::{Color32, Pos2, Vec2, pos2, vec2};
use rand::Rng;

use crate::color;
use crate::primitive::{CircleKind, CirclePrimitive, LinePrimitive, PolygonPrimitive, Primitive};
use crate::shape::quad_point;

const TIP_CURVE_STEPS: usize = 16;
const ELLIPSE_STEPS: usize = 20;

const PETAL_COLORS: [Color32; 5] = [
    Color32::from_rgb(0xFF, 0x69, 0xB4),
    Color32::from_rgb(0xFF, 0x14, 0x93),
    Color32::from_rgb(0xC7, 0x15, 0x85),
    Color32::from_rgb(0xDB, 0x70, 0x93),
    Color32::from_rgb(0xFF, 0xB6, 0xC1),
];

const ABSTRACT_COLORS: [Color32; 5] = [
    Color32::from_rgb(0xFF, 0x69, 0xB4),
    Color32::from_rgb(0x94, 0x00, 0xD3),
    Color32::from_rgb(0x4B, 0x00, 0x82),
    Color32::from_rgb(0x00, 0x00, 0xFF),
    Color32::from_rgb(0x00, 0xFF, 0x00),
];

const DAISY_HEART: Color32 = Color32::from_rgb(0xFF, 0xDD, 0x00);
const VIOLET: Color32 = Color32::from_rgb(0x94, 0x00, 0xD3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCategory {
    French,
    Geometric,
    Floral,
    Abstract,
    Seasonal,
}

impl PatternCategory {
    pub fn label(self) -> &'static str {
        match self {
            PatternCategory::French => "French",
            PatternCategory::Geometric => "Geometric",
            PatternCategory::Floral => "Floral",
            PatternCategory::Abstract => "Abstract",
            PatternCategory::Seasonal => "Seasonal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    FrenchClassic,
    FrenchColored,
    Triangles,
    TrianglesColored,
    Daisy,
    AbstractCircles,
    Snowflakes,
}

impl Pattern {
    pub const ALL: [Pattern; 7] = [
        Pattern::FrenchClassic,
        Pattern::FrenchColored,
        Pattern::Triangles,
        Pattern::TrianglesColored,
        Pattern::Daisy,
        Pattern::AbstractCircles,
        Pattern::Snowflakes,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Pattern::FrenchClassic => "french-classic",
            Pattern::FrenchColored => "french-colored",
            Pattern::Triangles => "geometric-triangles",
            Pattern::TrianglesColored => "geometric-colored",
            Pattern::Daisy => "floral-daisy",
            Pattern::AbstractCircles => "abstract-circles",
            Pattern::Snowflakes => "seasonal-snowflakes",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::FrenchClassic => "Classic French",
            Pattern::FrenchColored => "Colored French",
            Pattern::Triangles => "Triangles",
            Pattern::TrianglesColored => "Colored Triangles",
            Pattern::Daisy => "Daisy",
            Pattern::AbstractCircles => "Abstract Circles",
            Pattern::Snowflakes => "Snowflakes",
        }
    }

    pub fn category(self) -> PatternCategory {
        match self {
            Pattern::FrenchClassic | Pattern::FrenchColored => PatternCategory::French,
            Pattern::Triangles | Pattern::TrianglesColored => PatternCategory::Geometric,
            Pattern::Daisy => PatternCategory::Floral,
            Pattern::AbstractCircles => PatternCategory::Abstract,
            Pattern::Snowflakes => PatternCategory::Seasonal,
        }
    }

    /// Primitives for a surface of `size`, in surface coordinates.
    pub fn primitives(self, size: Vec2, rng: &mut impl Rng) -> Vec<Primitive> {
        match self {
            Pattern::FrenchClassic => vec![french_tip(size, Color32::WHITE)],
            Pattern::FrenchColored => vec![french_tip(size, color::DEFAULT_POLISH)],
            Pattern::Triangles => triangles(size, color::DEFAULT_POLISH, rng),
            Pattern::TrianglesColored => triangles(size, VIOLET, rng),
            Pattern::Daisy => daisy(size),
            Pattern::AbstractCircles => abstract_circles(size, rng),
            Pattern::Snowflakes => snowflakes(size, rng),
        }
    }
}

/// Curved tip over the last 30% of the nail, dipping to 50% in the middle.
fn french_tip(size: Vec2, fill: Color32) -> Primitive {
    let (w, h) = (size.x, size.y);
    let start = pos2(0.0, h * 0.7);
    let control = pos2(w / 2.0, h * 0.5);
    let end = pos2(w, h * 0.7);

    let mut points: Vec<Pos2> = (0..=TIP_CURVE_STEPS)
        .map(|step| quad_point(start, control, end, step as f32 / TIP_CURVE_STEPS as f32))
        .collect();
    points.push(pos2(w, h));
    points.push(pos2(0.0, h));

    Primitive::Polygon(PolygonPrimitive {
        points,
        fill,
        opacity: 1.0,
    })
}

fn triangles(size: Vec2, fill: Color32, rng: &mut impl Rng) -> Vec<Primitive> {
    let side = size.x * 0.2;
    (0..5)
        .map(|_| {
            let center = pos2(
                rng.gen_range(0.0..=size.x * 0.8) + side / 2.0,
                rng.gen_range(0.0..=size.y * 0.8) + side / 2.0,
            );
            let angle = rng.gen_range(0.0..TAU);
            let corners = [vec2(0.0, -0.5), vec2(0.5, 0.5), vec2(-0.5, 0.5)];
            Primitive::Polygon(PolygonPrimitive {
                points: corners
                    .iter()
                    .map(|corner| center + egui::emath::Rot2::from_angle(angle) * (*corner * side))
                    .collect(),
                fill,
                opacity: 0.7,
            })
        })
        .collect()
}

fn ellipse(center: Pos2, radii: Vec2, angle: f32) -> Vec<Pos2> {
    let rotation = egui::emath::Rot2::from_angle(angle);
    (0..ELLIPSE_STEPS)
        .map(|step| {
            let t = TAU * step as f32 / ELLIPSE_STEPS as f32;
            center + rotation * vec2(radii.x * t.cos(), radii.y * t.sin())
        })
        .collect()
}

fn daisy(size: Vec2) -> Vec<Primitive> {
    let w = size.x;
    let center = pos2(w / 2.0, size.y / 2.0);

    let mut primitives = vec![Primitive::Circle(CirclePrimitive {
        center,
        radius: w * 0.1,
        fill: DAISY_HEART,
        opacity: 1.0,
        kind: CircleKind::Dot,
    })];
    for i in 0..8 {
        let angle = i as f32 * FRAC_PI_4;
        let offset = vec2(angle.cos(), angle.sin()) * w * 0.2;
        primitives.push(Primitive::Polygon(PolygonPrimitive {
            points: ellipse(center + offset, vec2(w * 0.15, w * 0.08), angle),
            fill: PETAL_COLORS[i % PETAL_COLORS.len()],
            opacity: 0.8,
        }));
    }
    primitives
}

fn abstract_circles(size: Vec2, rng: &mut impl Rng) -> Vec<Primitive> {
    let center = pos2(size.x / 2.0, size.y / 2.0);
    let rings = (1..=5).rev().map(|i| {
        Primitive::Circle(CirclePrimitive {
            center,
            radius: size.x * 0.1 * i as f32,
            fill: ABSTRACT_COLORS[i - 1],
            opacity: 0.6,
            kind: CircleKind::Dot,
        })
    });

    let mut lines = Vec::with_capacity(5);
    for _ in 0..5 {
        let from = pos2(rng_range(rng, size.x), rng_range(rng, size.y));
        let to = pos2(rng_range(rng, size.x), rng_range(rng, size.y));
        lines.push(Primitive::Line(LinePrimitive {
            from,
            to,
            color: ABSTRACT_COLORS[rng.gen_range(0..ABSTRACT_COLORS.len())],
            width: 3.0,
            dashed: false,
        }));
    }

    rings.chain(lines).collect()
}

fn rng_range(rng: &mut impl Rng, max: f32) -> f32 {
    rng.gen_range(0.0..=max)
}

fn snowflakes(size: Vec2, rng: &mut impl Rng) -> Vec<Primitive> {
    const ARMS: [Vec2; 8] = [
        vec2(10.0, 0.0),
        vec2(-10.0, 0.0),
        vec2(0.0, 10.0),
        vec2(0.0, -10.0),
        vec2(7.0, 7.0),
        vec2(-7.0, -7.0),
        vec2(7.0, -7.0),
        vec2(-7.0, 7.0),
    ];
    let color = color::with_opacity(Color32::WHITE, 0.8);

    let mut primitives = Vec::with_capacity(8 * ARMS.len());
    for _ in 0..8 {
        let center = pos2(rng_range(rng, size.x), rng_range(rng, size.y));
        let scale = vec2(rng.gen_range(0.5..=1.5), rng.gen_range(0.5..=1.5));
        primitives.extend(ARMS.iter().map(|arm| {
            Primitive::Line(LinePrimitive {
                from: center,
                to: center + *arm * scale,
                color,
                width: 2.0,
                dashed: false,
            })
        }));
    }
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SURFACE_SIZE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn every_pattern_draws_something() {
        let mut rng = StdRng::seed_from_u64(3);
        for pattern in Pattern::ALL {
            assert!(!pattern.primitives(SURFACE_SIZE, &mut rng).is_empty(), "{pattern:?}");
        }
    }

    #[test]
    fn daisy_has_a_heart_and_eight_petals() {
        let primitives = Pattern::Daisy.primitives(SURFACE_SIZE, &mut StdRng::seed_from_u64(0));
        assert_eq!(primitives.len(), 9);
        assert!(matches!(primitives[0], Primitive::Circle(_)));
    }

    #[test]
    fn french_tip_covers_the_free_edge() {
        let primitives =
            Pattern::FrenchClassic.primitives(SURFACE_SIZE, &mut StdRng::seed_from_u64(0));
        let Primitive::Polygon(tip) = &primitives[0] else {
            panic!("expected a polygon");
        };
        assert_eq!(tip.fill, Color32::WHITE);
        let highest = tip.points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        assert!(highest >= SURFACE_SIZE.y * 0.5 - 0.01);
        assert!(tip.points.iter().all(|p| p.y <= SURFACE_SIZE.y));
    }

    #[test]
    fn random_patterns_are_reproducible() {
        let a = Pattern::Snowflakes.primitives(SURFACE_SIZE, &mut StdRng::seed_from_u64(9));
        let b = Pattern::Snowflakes.primitives(SURFACE_SIZE, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }
}
