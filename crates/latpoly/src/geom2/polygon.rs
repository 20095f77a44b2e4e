//! Lattice polygon engine: hull-ordered vertices, inequality form, containment,
//! lattice point enumeration and the single-vertex edit (`renovate`).
//!
//! Invariants
//! - `verts` is the gift-wrap hull of the last supplied point set: counter-clockwise,
//!   starting at the lowest (then leftmost) vertex, no redundant collinear vertex.
//! - `verts` is never empty. Rebuilding from zero points is an error and leaves
//!   the polygon untouched.
//! - One vertex (a point) and two vertices (a segment) are valid degenerate states
//!   with their own four-inequality representation.
//!
//! Code cross-refs: `hull::gift_wrap`, `types::Hs2`, `vector::LatticeVector`

use serde::{Deserialize, Serialize};

use super::hull::gift_wrap;
use super::types::{BoundingBox, Hs2, Point, PolygonEvent, PositionType, Vector};
use super::util::remove_all;
use super::vector::{LatticePoint, LatticeVector};
use crate::error::{GeomError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "PolygonData", try_from = "PolygonData")]
pub struct Polygon {
    verts: Vec<Point>,
}

/// Persistence shape `{ "vertices": [[x, y], ...] }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolygonData {
    pub vertices: Vec<[f64; 2]>,
}

impl From<Polygon> for PolygonData {
    fn from(p: Polygon) -> Self {
        PolygonData {
            vertices: p.to_array(),
        }
    }
}

impl TryFrom<PolygonData> for Polygon {
    type Error = GeomError;
    fn try_from(d: PolygonData) -> Result<Self> {
        Polygon::from_coords(&d.vertices)
    }
}

impl Default for Polygon {
    /// The terminal triangle `[[1,0],[0,1],[-1,-1]]`.
    fn default() -> Self {
        Self {
            verts: vec![
                Point::new(-1.0, -1.0),
                Point::new(1.0, 0.0),
                Point::new(0.0, 1.0),
            ],
        }
    }
}

impl Polygon {
    /// Hull of `points`; `DegenerateGeometry` for an empty slice.
    pub fn new(points: &[Point]) -> Result<Self> {
        let mut p = Polygon { verts: Vec::new() };
        p.rebuild(points)?;
        Ok(p)
    }

    pub fn from_coords(coords: &[[f64; 2]]) -> Result<Self> {
        let pts: Vec<Point> = coords.iter().map(|&c| Point::from(c)).collect();
        Self::new(&pts)
    }

    /// Replace the vertex list by the hull of `points`.
    pub fn rebuild(&mut self, points: &[Point]) -> Result<()> {
        let hull = gift_wrap(points);
        if hull.is_empty() {
            return Err(GeomError::degenerate("rebuild from an empty point set"));
        }
        tracing::debug!(n_in = points.len(), n_hull = hull.len(), "rebuild");
        self.verts = hull;
        Ok(())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    /// Never true for a constructed polygon.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    pub fn to_array(&self) -> Vec<[f64; 2]> {
        self.verts.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Map every vertex in place. Callers decide whether hull order must be re-derived.
    pub(crate) fn map_vertices(&mut self, f: impl Fn(Point) -> Point) {
        for v in &mut self.verts {
            *v = f(*v);
        }
    }

    /// Re-derive hull order after an in-place vertex map; never empties the list.
    pub(crate) fn rewrap(&mut self) {
        self.verts = gift_wrap(&self.verts);
    }

    /// Round every vertex to the nearest lattice point and re-derive the hull.
    pub fn round(&mut self) {
        self.map_vertices(|p| p.rounded());
        self.rewrap();
    }

    /// Minimal half-space set: `p` lies in the polygon iff `n·p <= c` for all entries.
    pub fn inequalities(&self) -> Vec<Hs2> {
        let v = &self.verts;
        match v.len() {
            0 => Vec::new(),
            1 => {
                let p = v[0];
                vec![
                    Hs2::new(Vector::new(1.0, 0.0), p.x),
                    Hs2::new(Vector::new(-1.0, 0.0), -p.x),
                    Hs2::new(Vector::new(0.0, 1.0), p.y),
                    Hs2::new(Vector::new(0.0, -1.0), -p.y),
                ]
            }
            2 => {
                let d = v[1] - v[0];
                let n = d.right_orthogonal();
                let u = d.reduced();
                vec![
                    // collapse onto the supporting line
                    Hs2::new(n, n.dot(&v[0].coords)),
                    Hs2::new(-n, -n.dot(&v[0].coords)),
                    // finite extent
                    Hs2::new(u, u.dot(&v[1].coords)),
                    Hs2::new(-u, -u.dot(&v[0].coords)),
                ]
            }
            k => (0..k)
                .map(|i| {
                    let p = v[i];
                    let q = v[(i + 1) % k];
                    // CCW order: clockwise rotation of the edge points outward
                    let n = (q - p).right_orthogonal();
                    Hs2::new(n, n.dot(&p.coords))
                })
                .collect(),
        }
    }

    /// Inside or on the boundary.
    pub fn valid(&self, p: Point) -> bool {
        self.inequalities().iter().all(|h| h.satisfies(p))
    }

    /// Strictly interior. Always false for point and segment polygons.
    pub fn strict_valid(&self, p: Point) -> bool {
        self.inequalities().iter().all(|h| h.satisfies_strict(p))
    }

    pub fn position_type(&self, p: Point) -> PositionType {
        if self.verts.contains(&p) {
            return PositionType::Vertex;
        }
        let hs = self.inequalities();
        if hs.iter().all(|h| h.satisfies_strict(p)) {
            PositionType::Internal
        } else if hs.iter().all(|h| h.satisfies(p)) {
            PositionType::OnEdge
        } else {
            PositionType::Other
        }
    }

    /// `p` is a vertex or lies outside: the cheap pre-check before `renovate`.
    pub fn is_renovatable(&self, p: Point) -> bool {
        matches!(
            self.position_type(p),
            PositionType::Vertex | PositionType::Other
        )
    }

    /// Add or remove one vertex.
    ///
    /// - vertex (and more than one vertex): re-hull the remaining lattice points of
    ///   the polygon → `Reduction`. The result is therefore a lattice polygon.
    /// - outside: re-hull the vertices plus `p` → `Expansion`.
    /// - interior, on an edge, or the sole vertex: `NoChange`.
    pub fn renovate(&mut self, p: Point) -> Result<PolygonEvent> {
        let event = match self.position_type(p) {
            PositionType::Vertex if self.verts.len() > 1 => {
                let rest: Vec<Point> = self
                    .valid_points()
                    .into_iter()
                    .filter(|q| *q != p)
                    .collect();
                self.rebuild(&rest)?;
                PolygonEvent::Reduction
            }
            PositionType::Other => {
                let mut pts = self.verts.clone();
                pts.push(p);
                self.rebuild(&pts)?;
                PolygonEvent::Expansion
            }
            _ => PolygonEvent::NoChange,
        };
        tracing::debug!(x = p.x, y = p.y, ?event, n_verts = self.verts.len(), "renovate");
        Ok(event)
    }

    /// Smallest axis-aligned box containing the vertices.
    pub fn rect_range(&self) -> BoundingBox {
        BoundingBox::of(&self.verts).unwrap_or(BoundingBox {
            x_min: 0.0,
            x_max: 0.0,
            y_min: 0.0,
            y_max: 0.0,
        })
    }

    /// Lattice points in the polygon (boundary included), x-major order.
    pub fn valid_points(&self) -> Vec<Point> {
        let b = self.rect_range();
        let hs = self.inequalities();
        let mut out = Vec::new();
        for x in (b.x_min.ceil() as i64)..=(b.x_max.floor() as i64) {
            for y in (b.y_min.ceil() as i64)..=(b.y_max.floor() as i64) {
                let p = Point::new(x as f64, y as f64);
                if hs.iter().all(|h| h.satisfies(p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Lattice points strictly inside. The scan is half-open at the top
    /// (`x < x_max`), which only skips points the strict test rejects anyway.
    pub fn internal_points(&self) -> Vec<Point> {
        let b = self.rect_range();
        let hs = self.inequalities();
        let mut out = Vec::new();
        for x in (b.x_min.ceil() as i64)..(b.x_max.ceil() as i64) {
            for y in (b.y_min.ceil() as i64)..(b.y_max.ceil() as i64) {
                let p = Point::new(x as f64, y as f64);
                if hs.iter().all(|h| h.satisfies_strict(p)) {
                    out.push(p);
                }
            }
        }
        out
    }

    /// Lattice points on the relative interior of edges.
    pub fn edge_points(&self) -> Vec<Point> {
        let mut pts = self.valid_points();
        remove_all(&mut pts, &self.verts);
        remove_all(&mut pts, &self.internal_points());
        pts
    }

    pub fn is_lattice_polygon(&self) -> bool {
        self.verts.iter().all(|p| p.is_lattice_point())
    }

    /// Lattice polygon with at least one interior lattice point.
    pub fn is_ip_lattice_polygon(&self) -> bool {
        self.is_lattice_polygon() && !self.internal_points().is_empty()
    }

    /// Lattice polygon with exactly one interior lattice point.
    pub fn is_canonical_polygon(&self) -> bool {
        self.is_lattice_polygon() && self.internal_points().len() == 1
    }

    /// Synonym of [`Polygon::is_canonical_polygon`].
    #[inline]
    pub fn is_reflexive_polygon(&self) -> bool {
        self.is_canonical_polygon()
    }

    /// Canonical, and the only lattice points are the vertices and the interior point.
    pub fn is_terminal_polygon(&self) -> bool {
        self.is_canonical_polygon() && self.valid_points().len() == self.verts.len() + 1
    }

    /// Replace the polygon by its polar dual `{ -n_i / c_i }`.
    ///
    /// Requires the origin strictly inside, i.e. every offset `c_i > 0`; otherwise
    /// `DegenerateGeometry` and the polygon is unchanged.
    pub fn dualize(&mut self) -> Result<()> {
        let hs = self.inequalities();
        let mut pts = Vec::with_capacity(hs.len());
        for h in &hs {
            if h.c <= 0.0 || !h.c.is_finite() {
                return Err(GeomError::degenerate(
                    "dual requires the origin strictly inside",
                ));
            }
            pts.push(Point::from(-h.n / h.c));
        }
        self.rebuild(&pts)
    }

    /// Every vertex of `other` lies in `self` (boundary included).
    pub fn includes(&self, other: &Polygon) -> bool {
        let hs = self.inequalities();
        other
            .verts
            .iter()
            .all(|&p| hs.iter().all(|h| h.satisfies(p)))
    }

    /// One of the two polygons contains the other. Symmetric.
    pub fn exists_inclusion(a: &Polygon, b: &Polygon) -> bool {
        a.includes(b) || b.includes(a)
    }
}
