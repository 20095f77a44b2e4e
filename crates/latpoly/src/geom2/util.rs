//! Small point-set utilities (exact equality throughout).

use super::types::Point;

/// Remove one occurrence of each point of `to_remove` from `points`.
pub fn remove_all(points: &mut Vec<Point>, to_remove: &[Point]) {
    for r in to_remove {
        if let Some(i) = points.iter().position(|p| p == r) {
            points.remove(i);
        }
    }
}

#[inline]
pub fn is_member(points: &[Point], p: Point) -> bool {
    points.contains(&p)
}

/// All points at minimal Euclidean distance from `p` (input order kept).
pub fn closest_points(points: &[Point], p: Point) -> Vec<Point> {
    let mut best = f64::INFINITY;
    let mut out = Vec::new();
    for &q in points {
        let d = (q - p).norm_squared();
        if d < best {
            best = d;
            out.clear();
            out.push(q);
        } else if d == best {
            out.push(q);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_all_drops_single_occurrences() {
        let mut pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        remove_all(&mut pts, &[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert_eq!(pts, vec![Point::new(1.0, 0.0), Point::new(0.0, 0.0)]);
        assert!(is_member(&pts, Point::new(1.0, 0.0)));
        assert!(!is_member(&pts, Point::new(1.0, 1.0)));
    }

    #[test]
    fn closest_points_keeps_ties() {
        let pts = [
            Point::new(2.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(-1.0, 0.0),
            Point::new(3.0, 3.0),
        ];
        let c = closest_points(&pts, Point::origin());
        assert_eq!(c, vec![Point::new(0.0, 1.0), Point::new(-1.0, 0.0)]);
        assert!(closest_points(&[], Point::origin()).is_empty());
    }
}
