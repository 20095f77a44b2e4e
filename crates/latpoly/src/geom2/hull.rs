//! Gift-wrapping convex hull on exact coordinates (rational inputs allowed).
//!
//! Output order: counter-clockwise, starting at the lowest point (ties: leftmost).
//! Collinear boundary points are skipped because exact ties prefer the farther
//! candidate, so only extreme vertices survive.

use super::types::Point;
use crate::parallelogram_area;

/// Lowest point, ties broken by smallest x.
pub(crate) fn base_point(points: &[Point]) -> Option<Point> {
    points.iter().copied().reduce(|best, p| {
        if p.y < best.y || (p.y == best.y && p.x < best.x) {
            p
        } else {
            best
        }
    })
}

/// Next hull vertex after `from`: the candidate with no point strictly to its right.
fn next_vertex(points: &[Point], from: Point) -> Point {
    let mut best: Option<Point> = None;
    for &p in points {
        if p == from {
            continue;
        }
        best = match best {
            None => Some(p),
            Some(b) => {
                let db = b - from;
                let dp = p - from;
                let turn = parallelogram_area(db, dp);
                if turn < 0.0 || (turn == 0.0 && dp.norm_squared() > db.norm_squared()) {
                    Some(p)
                } else {
                    Some(b)
                }
            }
        };
    }
    best.unwrap_or(from)
}

/// Convex hull vertices in hull order. Empty input gives an empty hull.
///
/// Duplicates are removed by exact equality before wrapping, so one distinct
/// point yields a single vertex and two yield `[base, other]`.
pub fn gift_wrap(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = Vec::with_capacity(points.len());
    for p in points {
        if !pts.contains(p) {
            pts.push(*p);
        }
    }
    let Some(base) = base_point(&pts) else {
        return Vec::new();
    };
    let mut hull = vec![base];
    let mut cur = base;
    loop {
        let next = next_vertex(&pts, cur);
        if next == base {
            break;
        }
        if hull.contains(&next) {
            // Only reachable if rounding made the turn tests inconsistent.
            tracing::warn!(
                n_points = pts.len(),
                n_hull = hull.len(),
                "gift wrap revisited a vertex; walk cut short"
            );
            break;
        }
        hull.push(next);
        cur = next;
    }
    hull
}
