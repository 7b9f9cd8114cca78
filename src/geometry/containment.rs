//! Approximate "is this point on the nail" test used by the placement tools.
//!
//! This is deliberately not polygon containment: a point counts as inside if
//! it is near the middle of the nail, or if it sits in the upper 80% of the
//! outline's bounding box. Glitter and dots rely on this looser rule.

use egui::{Pos2, Rect, pos2};
use rand::Rng;

/// Radius of the central disk, relative to the shorter side of the bounds.
pub const RADIUS_FACTOR: f32 = 0.45;

/// Height fraction of the bounds (from the top) accepted by the box test.
pub const BAND_FRACTION: f32 = 0.8;

pub fn is_inside(bounds: Rect, point: Pos2) -> bool {
    let max_distance = bounds.width().min(bounds.height()) * RADIUS_FACTOR;
    if point.distance(bounds.center()) <= max_distance {
        return true;
    }
    bounds.left() <= point.x
        && point.x <= bounds.right()
        && bounds.top() <= point.y
        && point.y <= bounds.top() + bounds.height() * BAND_FRACTION
}

/// Uniform random point in the disk of `radius` around `center`.
pub fn sample_disk(center: Pos2, radius: f32, rng: &mut impl Rng) -> Pos2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = radius * rng.gen_range(0.0f32..=1.0).sqrt();
    pos2(
        center.x + angle.cos() * distance,
        center.y + angle.sin() * distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bounds() -> Rect {
        Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 200.0))
    }

    #[test]
    fn center_is_inside() {
        assert!(is_inside(bounds(), pos2(60.0, 100.0)));
    }

    #[test]
    fn lower_corners_are_outside() {
        assert!(!is_inside(bounds(), pos2(2.0, 198.0)));
        assert!(!is_inside(bounds(), pos2(118.0, 190.0)));
    }

    #[test]
    fn upper_corners_pass_the_box_test() {
        assert!(is_inside(bounds(), pos2(1.0, 1.0)));
        assert!(is_inside(bounds(), pos2(120.0, 160.0)));
        assert!(!is_inside(bounds(), pos2(121.0, 10.0)));
    }

    #[test]
    fn disk_samples_stay_in_radius() {
        let mut rng = StdRng::seed_from_u64(3);
        let center = pos2(10.0, 20.0);
        for _ in 0..500 {
            assert!(sample_disk(center, 7.5, &mut rng).distance(center) <= 7.5 + 1e-4);
        }
    }
}
