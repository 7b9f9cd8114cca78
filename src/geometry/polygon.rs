use egui::{Pos2, pos2};

/// Part of a closed polygon lying at or below the horizontal line `y`
/// (screen coordinates, y grows downward).
pub fn clip_below(points: &[Pos2], y: f32) -> Vec<Pos2> {
    let mut clipped = Vec::with_capacity(points.len() + 2);
    let Some(&last) = points.last() else {
        return clipped;
    };

    let mut previous = last;
    for &current in points {
        let previous_in = previous.y >= y;
        let current_in = current.y >= y;
        if current_in != previous_in {
            let t = (y - previous.y) / (current.y - previous.y);
            clipped.push(pos2(previous.x + (current.x - previous.x) * t, y));
        }
        if current_in {
            clipped.push(current);
        }
        previous = current;
    }
    clipped
}

/// Even-odd point in polygon.
pub fn contains_point(points: &[Pos2], point: Pos2) -> bool {
    let mut inside = false;
    let mut j = points.len().wrapping_sub(1);
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > point.y) != (b.y > point.y)
            && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Pos2> {
        vec![
            pos2(0.0, 0.0),
            pos2(10.0, 0.0),
            pos2(10.0, 10.0),
            pos2(0.0, 10.0),
        ]
    }

    #[test]
    fn clipping_keeps_the_lower_band() {
        let band = clip_below(&square(), 7.5);
        assert_eq!(band.len(), 4);
        assert!(band.iter().all(|p| p.y >= 7.5));
    }

    #[test]
    fn clipping_above_everything_is_empty() {
        assert!(clip_below(&square(), 11.0).is_empty());
        assert_eq!(clip_below(&square(), -1.0), square());
    }

    #[test]
    fn even_odd_containment() {
        assert!(contains_point(&square(), pos2(5.0, 5.0)));
        assert!(!contains_point(&square(), pos2(15.0, 5.0)));
        assert!(!contains_point(&[], pos2(0.0, 0.0)));
    }
}
