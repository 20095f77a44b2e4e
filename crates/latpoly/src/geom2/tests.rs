use super::*;
use crate::error::GeomError;
use proptest::prelude::*;

fn poly(coords: &[[f64; 2]]) -> Polygon {
    Polygon::from_coords(coords).unwrap()
}

fn pts(coords: &[[f64; 2]]) -> Vec<Point> {
    coords.iter().map(|&c| Point::from(c)).collect()
}

fn cross3(a: Point, b: Point, c: Point) -> f64 {
    crate::parallelogram_area(b - a, c - b)
}

#[test]
fn diamond_is_reflexive_with_origin_inside() {
    let p = poly(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]);
    assert!(p.is_canonical_polygon());
    assert!(p.is_reflexive_polygon());
    assert_eq!(p.internal_points(), vec![Point::origin()]);
    assert!(p.is_terminal_polygon());
    assert_eq!(
        p.vertices(),
        pts(&[[0.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 0.0]]).as_slice()
    );
}

#[test]
fn triangle_is_terminal() {
    let p = poly(&[[1.0, 0.0], [0.0, 1.0], [-1.0, -1.0]]);
    assert!(p.is_canonical_polygon());
    assert!(p.is_terminal_polygon());
    assert_eq!(p.valid_points().len(), 4);
    assert_eq!(p.valid_points().len(), p.len() + 1);
    assert!(p.edge_points().is_empty());
    assert_eq!(p, Polygon::default());
}

#[test]
fn reflexive_but_not_terminal() {
    // square [-1,1]^2 has lattice points in the middle of each edge
    let p = poly(&[[1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]);
    assert!(p.is_reflexive_polygon());
    assert!(!p.is_terminal_polygon());
    assert_eq!(
        p.edge_points(),
        pts(&[[-1.0, 0.0], [0.0, -1.0], [0.0, 1.0], [1.0, 0.0]])
    );
}

#[test]
fn inequalities_of_triangle_point_outward() {
    let p = Polygon::default();
    let hs = p.inequalities();
    assert_eq!(
        hs,
        vec![
            Hs2::new(Vector::new(1.0, -2.0), 1.0),
            Hs2::new(Vector::new(1.0, 1.0), 1.0),
            Hs2::new(Vector::new(-2.0, 1.0), 1.0),
        ]
    );
    // the origin is interior, so every offset is positive
    assert!(hs.iter().all(|h| h.satisfies_strict(Point::origin())));
}

#[test]
fn position_types() {
    let p = poly(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]]);
    assert_eq!(p.position_type(Point::new(2.0, 0.0)), PositionType::Vertex);
    assert_eq!(p.position_type(Point::new(0.5, 0.5)), PositionType::Internal);
    assert_eq!(p.position_type(Point::new(1.0, 1.0)), PositionType::OnEdge);
    assert_eq!(p.position_type(Point::new(2.0, 2.0)), PositionType::Other);
    assert!(p.is_renovatable(Point::new(2.0, 0.0)));
    assert!(p.is_renovatable(Point::new(-1.0, 0.0)));
    assert!(!p.is_renovatable(Point::new(1.0, 0.0)));
    assert_eq!(p.edge_points(), pts(&[[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]));
    assert!(p.internal_points().is_empty());
    assert!(!p.is_ip_lattice_polygon());
}

#[test]
fn segment_polygon_semantics() {
    let s = poly(&[[2.0, 2.0], [0.0, 0.0]]);
    assert_eq!(s.vertices(), pts(&[[0.0, 0.0], [2.0, 2.0]]).as_slice());
    assert_eq!(s.inequalities().len(), 4);
    assert!(s.valid(Point::new(1.0, 1.0)));
    assert!(!s.valid(Point::new(3.0, 3.0)));
    assert!(!s.valid(Point::new(1.0, 0.0)));
    assert!(!s.strict_valid(Point::new(1.0, 1.0)));
    assert_eq!(s.position_type(Point::new(1.0, 1.0)), PositionType::OnEdge);
    assert_eq!(s.edge_points(), pts(&[[1.0, 1.0]]));
}

#[test]
fn point_polygon_semantics() {
    let mut p = poly(&[[3.0, -1.0]]);
    assert_eq!(p.len(), 1);
    assert!(p.valid(Point::new(3.0, -1.0)));
    assert!(!p.valid(Point::new(3.0, 0.0)));
    assert_eq!(p.renovate(Point::new(3.0, -1.0)).unwrap(), PolygonEvent::NoChange);
    assert_eq!(p.renovate(Point::new(4.0, 1.0)).unwrap(), PolygonEvent::Expansion);
    assert_eq!(p.vertices(), pts(&[[3.0, -1.0], [4.0, 1.0]]).as_slice());
}

#[test]
fn renovate_scenario() {
    let mut p = poly(&[[1.0, 0.0], [0.0, 1.0], [-1.0, -1.0]]);
    assert_eq!(p.position_type(Point::origin()), PositionType::Internal);
    assert_eq!(p.renovate(Point::origin()).unwrap(), PolygonEvent::NoChange);
    let ev = p.renovate(Point::new(1.0, 1.0)).unwrap();
    assert_eq!(ev, PolygonEvent::Expansion);
    assert!(ev.changed());
    assert_eq!(
        p.vertices(),
        pts(&[[-1.0, -1.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]).as_slice()
    );
    assert_eq!(p.renovate(Point::new(1.0, 1.0)).unwrap(), PolygonEvent::Reduction);
    assert_eq!(p, Polygon::default());
}

#[test]
fn reduction_rehulls_remaining_lattice_points() {
    let mut p = poly(&[[1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]);
    assert_eq!(p.renovate(Point::new(1.0, 1.0)).unwrap(), PolygonEvent::Reduction);
    assert_eq!(
        p.vertices(),
        pts(&[[-1.0, -1.0], [1.0, -1.0], [1.0, 0.0], [0.0, 1.0], [-1.0, 1.0]]).as_slice()
    );
}

#[test]
fn failed_reduction_leaves_polygon_unchanged() {
    let mut s = poly(&[[0.0, 0.0], [0.5, 0.5]]);
    let before = s.clone();
    assert!(matches!(
        s.renovate(Point::origin()),
        Err(GeomError::DegenerateGeometry { .. })
    ));
    assert_eq!(s, before);
}

#[test]
fn rebuild_rejects_empty_input() {
    let mut p = Polygon::default();
    assert!(matches!(
        p.rebuild(&[]),
        Err(GeomError::DegenerateGeometry { .. })
    ));
    assert_eq!(p, Polygon::default());
    assert!(Polygon::new(&[]).is_err());
}

#[test]
fn dual_of_reflexive_is_reflexive_and_involutive() {
    let diamond = poly(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]);
    let mut d = diamond.clone();
    d.dualize().unwrap();
    assert_eq!(
        d,
        poly(&[[1.0, 1.0], [-1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]])
    );
    assert!(d.is_reflexive_polygon());
    d.dualize().unwrap();
    assert_eq!(d, diamond);

    let mut t = Polygon::default();
    t.dualize().unwrap();
    assert_eq!(t, poly(&[[-1.0, 2.0], [-1.0, -1.0], [2.0, -1.0]]));
    assert!(t.is_reflexive_polygon());
    assert!(!t.is_terminal_polygon());
}

#[test]
fn dual_requires_origin_inside() {
    let mut off = poly(&[[1.0, 1.0], [3.0, 1.0], [1.0, 3.0]]);
    let before = off.clone();
    assert!(matches!(
        off.dualize(),
        Err(GeomError::DegenerateGeometry { .. })
    ));
    assert_eq!(off, before);
    let mut seg = poly(&[[-1.0, 0.0], [1.0, 0.0]]);
    assert!(seg.dualize().is_err());
}

#[test]
fn inclusion_relations() {
    let big = poly(&[[2.0, 0.0], [0.0, 2.0], [-2.0, 0.0], [0.0, -2.0]]);
    let small = Polygon::from_coords(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]).unwrap();
    let far = poly(&[[10.0, 10.0], [11.0, 10.0], [10.0, 11.0]]);
    assert!(big.includes(&small));
    assert!(!small.includes(&big));
    assert!(Polygon::exists_inclusion(&big, &small));
    assert!(Polygon::exists_inclusion(&small, &big));
    assert!(!Polygon::exists_inclusion(&big, &far));
    assert!(big.includes(&big));
}

#[test]
fn bounding_box_and_rounding() {
    let mut p = poly(&[[0.4, 0.2], [2.6, 0.1], [1.2, 1.9]]);
    let b = p.rect_range();
    assert_eq!((b.x_min, b.x_max), (0.4, 2.6));
    assert_eq!((b.y_min, b.y_max), (0.1, 1.9));
    assert!(!p.is_lattice_polygon());
    assert!(!p.is_canonical_polygon());
    p.round();
    assert_eq!(p, poly(&[[0.0, 0.0], [3.0, 0.0], [1.0, 2.0]]));
    assert!(p.is_ip_lattice_polygon());
}

#[test]
fn lattice_scan_with_rational_bounds() {
    let t = poly(&[[-0.5, -0.5], [2.5, -0.5], [-0.5, 2.5]]);
    assert_eq!(t.internal_points(), pts(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]));
    assert_eq!(
        t.valid_points(),
        pts(&[[0.0, 0.0], [0.0, 1.0], [0.0, 2.0], [1.0, 0.0], [1.0, 1.0], [2.0, 0.0]])
    );
    assert_eq!(t.edge_points(), pts(&[[0.0, 2.0], [1.0, 1.0], [2.0, 0.0]]));
    assert!(!t.is_lattice_polygon());

    // dual of a non-reflexive square is a diamond with half-integer vertices
    let mut d = poly(&[[2.0, 2.0], [-2.0, 2.0], [-2.0, -2.0], [2.0, -2.0]]);
    d.dualize().unwrap();
    assert_eq!(d, poly(&[[0.5, 0.0], [0.0, 0.5], [-0.5, 0.0], [0.0, -0.5]]));
    assert_eq!(d.internal_points(), vec![Point::origin()]);
    assert_eq!(d.valid_points(), vec![Point::origin()]);
}

#[test]
fn serde_shape_and_rebuild_on_load() {
    let p = Polygon::default();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, r#"{"vertices":[[-1.0,-1.0],[1.0,0.0],[0.0,1.0]]}"#);
    let back: Polygon = serde_json::from_str(r#"{"vertices":[[1,0],[0,1],[-1,-1],[0,0]]}"#).unwrap();
    assert_eq!(back, p);
    assert!(serde_json::from_str::<Polygon>(r#"{"vertices":[]}"#).is_err());
    let data = PolygonData::from(p.clone());
    assert_eq!(Polygon::try_from(data).unwrap(), p);
}

fn lattice_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-6i32..=6, -6i32..=6), 1..14).prop_map(|v| {
        v.into_iter()
            .map(|(x, y)| Point::new(x as f64, y as f64))
            .collect()
    })
}

proptest! {
    #[test]
    fn hull_is_idempotent(ps in lattice_points()) {
        let p = Polygon::new(&ps).unwrap();
        let q = Polygon::new(p.vertices()).unwrap();
        prop_assert_eq!(p, q);
    }

    #[test]
    fn hull_order_is_canonical(ps in lattice_points()) {
        let p = Polygon::new(&ps).unwrap();
        let v = p.vertices();
        let lowest = ps
            .iter()
            .copied()
            .min_by(|a, b| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
            .unwrap();
        prop_assert_eq!(v[0], lowest);
        if v.len() >= 3 {
            for i in 0..v.len() {
                let (a, b, c) = (v[i], v[(i + 1) % v.len()], v[(i + 2) % v.len()]);
                prop_assert!(cross3(a, b, c) > 0.0);
            }
        }
        for q in &ps {
            prop_assert!(p.valid(*q));
        }
    }

    #[test]
    fn vertices_are_on_the_boundary(ps in lattice_points()) {
        let p = Polygon::new(&ps).unwrap();
        for v in p.vertices() {
            prop_assert!(p.valid(*v));
            prop_assert!(!p.strict_valid(*v));
            prop_assert_eq!(p.position_type(*v), PositionType::Vertex);
        }
    }

    #[test]
    fn renovate_round_trip(ps in lattice_points(), ox in -9i32..=9, oy in -9i32..=9) {
        let mut p = Polygon::new(&ps).unwrap();
        let o = Point::new(ox as f64, oy as f64);
        if p.position_type(o) == PositionType::Other {
            prop_assert_eq!(p.renovate(o).unwrap(), PolygonEvent::Expansion);
            prop_assert!(p.valid(o));
            prop_assert!(p.vertices().contains(&o));
            prop_assert_eq!(p.renovate(o).unwrap(), PolygonEvent::Reduction);
            prop_assert!(!p.vertices().contains(&o));
        }
    }

    #[test]
    fn inclusion_is_symmetric(a in lattice_points(), b in lattice_points()) {
        let pa = Polygon::new(&a).unwrap();
        let pb = Polygon::new(&b).unwrap();
        prop_assert_eq!(
            Polygon::exists_inclusion(&pa, &pb),
            Polygon::exists_inclusion(&pb, &pa)
        );
    }

    #[test]
    fn lattice_partition(ps in lattice_points()) {
        let p = Polygon::new(&ps).unwrap();
        let valid = p.valid_points().len();
        let parts = p.len() + p.internal_points().len() + p.edge_points().len();
        prop_assert_eq!(valid, parts);
    }

    #[test]
    fn unimodular_det_is_exactly_one(seed in any::<u64>(), max_comp in 1i64..=8) {
        let mut rng = ReplayToken { seed, index: 0 }.to_std_rng();
        let m = super::rand::random_unimodular(&mut rng, max_comp, 100_000).unwrap();
        prop_assert_eq!(m.determinant(), 1.0);
    }

    #[test]
    fn unimodular_maps_preserve_lattice_counts(ps in lattice_points(), seed in any::<u64>()) {
        let mut rng = ReplayToken { seed, index: 1 }.to_std_rng();
        let m = super::rand::random_unimodular(&mut rng, 3, 100_000).unwrap();
        let p = Polygon::new(&ps).unwrap();
        let mut q = p.clone();
        manager::transform(&m, &mut q);
        prop_assert_eq!(p.len(), q.len());
        prop_assert_eq!(p.valid_points().len(), q.valid_points().len());
        prop_assert_eq!(p.internal_points().len(), q.internal_points().len());
    }
}
