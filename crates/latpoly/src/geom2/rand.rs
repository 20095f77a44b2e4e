//! Random reflexive/terminal polygons under unimodular transforms (+ replay tokens).
//!
//! Purpose
//! - Produce lattice polygons with a prescribed combinatorial class: a base shape
//!   from a fixed library, pushed through a random unimodular map. Unimodular maps
//!   preserve the lattice, so reflexive stays reflexive and terminal stays terminal.
//!
//! Model
//! - Unimodular maps are found by rejection sampling four integers in
//!   `[-max_comp, max_comp]` until the determinant is 1. Every retry loop in this
//!   module is capped by a budget from `GenCfg` and fails with
//!   `RetryBudgetExceeded` instead of spinning.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `Polygon`, `manager::{translate, transform}`, `LinearMap`

use super::manager::{transform, translate};
use super::matrix::LinearMap;
use super::polygon::Polygon;
use super::types::{Point, Vector};
use crate::error::{GeomError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Vertices of the reflexive base shapes (one per combinatorial type, up to unimodular maps).
pub const REFLEXIVE_DATA: &[&[[i64; 2]]] = &[
    &[[1, 0], [0, 1], [-1, -1]],
    &[[1, 0], [0, 1], [-1, 0], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [0, -1]],
    &[[1, 1], [0, 1], [-1, 1], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [-1, 0], [0, -1]],
    &[[1, 1], [-1, 1], [-1, 0], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [-1, 0], [0, -1], [1, -1]],
    &[[1, 0], [1, 1], [-1, 1], [-1, 0], [0, -1]],
    &[[1, 1], [-1, 1], [-1, -1], [0, -1]],
    &[[1, 1], [-1, 1], [-1, -2]],
    &[[1, 0], [1, 1], [-1, 1], [-1, -1], [0, -1]],
    &[[1, 1], [-1, 1], [-1, -2], [0, -1]],
    &[[1, -1], [1, 1], [-1, 1], [-1, -1]],
    &[[1, 0], [1, 1], [-1, 1], [-1, -2]],
    &[[1, 1], [-1, 1], [-1, -3]],
    &[[2, 1], [-1, 1], [-1, -2]],
];

/// Vertices of the terminal base shapes.
pub const TERMINAL_DATA: &[&[[i64; 2]]] = &[
    &[[1, 0], [0, 1], [-1, -1]],
    &[[1, 0], [0, 1], [-1, 0], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [-1, 0], [0, -1]],
    &[[1, 0], [0, 1], [-1, 1], [-1, 0], [0, -1], [1, -1]],
];

/// Which base-shape library to draw from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeLibrary {
    Reflexive,
    Terminal,
}

impl ShapeLibrary {
    pub fn shapes(self) -> &'static [&'static [[i64; 2]]] {
        match self {
            ShapeLibrary::Reflexive => REFLEXIVE_DATA,
            ShapeLibrary::Terminal => TERMINAL_DATA,
        }
    }
}

/// Generator configuration (explicit, no ambient globals).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenCfg {
    /// Bound on the absolute value of unimodular map entries. Must be >= 1.
    pub max_comp: i64,
    /// Cap on determinant-1 rejection sampling.
    pub unimodular_attempts: usize,
    /// Cap on the "place without inclusion" retry loop.
    pub placement_attempts: usize,
}

impl Default for GenCfg {
    fn default() -> Self {
        Self {
            max_comp: 1,
            unimodular_attempts: 100_000,
            placement_attempts: 1_000,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Largest accepted `max_comp`: entries and their pairwise products stay exact in f64.
pub const MAX_EXACT_COMP: i64 = 1 << 26;
/// Largest accepted `distance_max` for primitive vectors (one weight per distance).
pub const MAX_DISTANCE: i64 = 1 << 16;

/// Random integer 2×2 map with entries in `[-max_comp, max_comp]` and determinant 1.
pub fn random_unimodular<R: Rng>(rng: &mut R, max_comp: i64, attempts: usize) -> Result<LinearMap> {
    if !(1..=MAX_EXACT_COMP).contains(&max_comp) {
        return Err(GeomError::invalid(format!(
            "max_comp must be in 1..={MAX_EXACT_COMP} (got {max_comp})"
        )));
    }
    for _ in 0..attempts {
        let a = rng.gen_range(-max_comp..=max_comp);
        let b = rng.gen_range(-max_comp..=max_comp);
        let c = rng.gen_range(-max_comp..=max_comp);
        let d = rng.gen_range(-max_comp..=max_comp);
        if i128::from(a) * i128::from(d) - i128::from(b) * i128::from(c) == 1 {
            return Ok(LinearMap::new(a as f64, b as f64, c as f64, d as f64));
        }
    }
    tracing::warn!(max_comp, attempts, "unimodular sampling budget exhausted");
    Err(GeomError::budget("unimodular matrix sampling", attempts))
}

/// Draws per candidate point in `spawn_point_outside`.
const PRIMITIVE_ATTEMPTS: usize = 1_000;

/// Random primitive lattice vector (gcd of components = 1).
///
/// Each component is `±k` with `k` in `1..=distance_max` drawn with weight `1/k`,
/// so neither component is ever zero and short vectors are favoured.
pub fn random_primitive_vector<R: Rng>(
    rng: &mut R,
    distance_max: i64,
    attempts: usize,
) -> Result<Vector> {
    if !(1..=MAX_DISTANCE).contains(&distance_max) {
        return Err(GeomError::invalid(format!(
            "distance_max must be in 1..={MAX_DISTANCE} (got {distance_max})"
        )));
    }
    let weights = (1..=distance_max).map(|k| 1.0 / k as f64);
    let magnitude = WeightedIndex::new(weights)
        .map_err(|e| GeomError::invalid(format!("distance weights: {e}")))?;
    let component = |rng: &mut R| {
        let k = magnitude.sample(rng) as i64 + 1;
        if rng.gen_bool(0.5) {
            k
        } else {
            -k
        }
    };
    for _ in 0..attempts {
        let x = component(&mut *rng);
        let y = component(&mut *rng);
        if gcd(x, y) == 1 {
            return Ok(Vector::new(x as f64, y as f64));
        }
    }
    Err(GeomError::budget("primitive vector sampling", attempts))
}

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// `anchor` plus a random primitive vector, retried until no polygon contains it.
pub fn spawn_point_outside<R: Rng>(
    rng: &mut R,
    anchor: Point,
    distance_max: i64,
    polygons: &[Polygon],
    attempts: usize,
) -> Result<Point> {
    for _ in 0..attempts {
        let p = anchor + random_primitive_vector(rng, distance_max, PRIMITIVE_ATTEMPTS)?;
        if !polygons.iter().any(|poly| poly.valid(p)) {
            return Ok(p);
        }
    }
    tracing::warn!(attempts, n_polygons = polygons.len(), "no free point found");
    Err(GeomError::budget("point placement", attempts))
}

/// Draws polygons from one shape library.
#[derive(Clone, Copy, Debug)]
pub struct Generator {
    pub library: ShapeLibrary,
    pub cfg: GenCfg,
}

impl Generator {
    pub fn new(library: ShapeLibrary, cfg: GenCfg) -> Self {
        Self { library, cfg }
    }

    /// Uniform library entry pushed through a random unimodular map.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Polygon> {
        let shapes = self.library.shapes();
        let idx = rng.gen_range(0..shapes.len());
        let map = random_unimodular(rng, self.cfg.max_comp, self.cfg.unimodular_attempts)?;
        let coords: Vec<[f64; 2]> = shapes[idx]
            .iter()
            .map(|&[x, y]| [x as f64, y as f64])
            .collect();
        let mut poly = Polygon::from_coords(&coords)?;
        transform(&map, &mut poly);
        tracing::debug!(library = ?self.library, shape = idx, map = ?map.to_array(), "generate");
        Ok(poly)
    }

    /// Generate, translate to `anchor`, and retry while the result contains or is
    /// contained in any of `existing`.
    pub fn spawn<R: Rng>(&self, rng: &mut R, anchor: Point, existing: &[Polygon]) -> Result<Polygon> {
        for attempt in 0..self.cfg.placement_attempts {
            let mut poly = self.generate(rng)?;
            translate(anchor.coords, &mut poly);
            if !existing.iter().any(|q| Polygon::exists_inclusion(&poly, q)) {
                tracing::debug!(attempt, "spawn placed");
                return Ok(poly);
            }
        }
        tracing::warn!(
            attempts = self.cfg.placement_attempts,
            n_existing = existing.len(),
            "spawn budget exhausted"
        );
        Err(GeomError::budget(
            "placement without inclusion",
            self.cfg.placement_attempts,
        ))
    }
}

/// Random reflexive polygon with map entries bounded by `max_comp`.
pub fn generate_reflexive<R: Rng>(rng: &mut R, max_comp: i64) -> Result<Polygon> {
    let cfg = GenCfg {
        max_comp,
        ..GenCfg::default()
    };
    Generator::new(ShapeLibrary::Reflexive, cfg).generate(rng)
}

/// Random terminal polygon with map entries bounded by `max_comp`.
pub fn generate_terminal<R: Rng>(rng: &mut R, max_comp: i64) -> Result<Polygon> {
    let cfg = GenCfg {
        max_comp,
        ..GenCfg::default()
    };
    Generator::new(ShapeLibrary::Terminal, cfg).generate(rng)
}
