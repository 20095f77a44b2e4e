use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use latpoly::api::{GenCfg, Generator, Point, Polygon, PolygonData, ReplayToken, ShapeLibrary};
use latpoly::geom2::LatticePoint;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Lattice polygon generation and inspection")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Library {
    Reflexive,
    Terminal,
}

impl From<Library> for ShapeLibrary {
    fn from(l: Library) -> Self {
        match l {
            Library::Reflexive => ShapeLibrary::Reflexive,
            Library::Terminal => ShapeLibrary::Terminal,
        }
    }
}

#[derive(clap::Args, Clone)]
struct GenArgs {
    #[arg(long, value_enum, default_value = "reflexive")]
    library: Library,
    #[arg(long, default_value_t = 1)]
    max_comp: i64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 0)]
    index: u64,
    #[arg(long, default_value_t = 100_000)]
    unimodular_attempts: usize,
    #[arg(long, default_value_t = 1_000)]
    placement_attempts: usize,
}

impl GenArgs {
    fn generator(&self) -> Generator {
        Generator::new(
            self.library.into(),
            GenCfg {
                max_comp: self.max_comp,
                unimodular_attempts: self.unimodular_attempts,
                placement_attempts: self.placement_attempts,
            },
        )
    }

    fn params(&self) -> Value {
        json!({
            "library": ShapeLibrary::from(self.library),
            "max_comp": self.max_comp,
            "seed": self.seed,
            "index": self.index,
            "unimodular_attempts": self.unimodular_attempts,
            "placement_attempts": self.placement_attempts,
        })
    }
}

#[derive(Subcommand)]
enum Action {
    /// Draw one polygon from a shape library under a random unimodular map
    Generate {
        #[command(flatten)]
        gen: GenArgs,
        /// Translate the result so the origin lands here
        #[arg(long, value_parser = parse_point)]
        anchor: Option<Point>,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Lattice classification and point sets of a polygon
    Classify {
        /// `[[x,y],...]` or `{"vertices": [[x,y],...]}`
        #[arg(long)]
        vertices: String,
    },
    /// Add or remove one vertex
    Renovate {
        #[arg(long)]
        vertices: String,
        #[arg(long, value_parser = parse_point)]
        point: Point,
    },
    /// Polar dual of a polygon with the origin strictly inside
    Dual {
        #[arg(long)]
        vertices: String,
    },
    /// Place a generated polygon at an anchor without inclusion against a board file
    Spawn {
        #[command(flatten)]
        gen: GenArgs,
        /// JSON file holding `[{"vertices": ...}, ...]`
        #[arg(long)]
        board: PathBuf,
        #[arg(long, value_parser = parse_point)]
        anchor: Point,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate { gen, anchor, out } => generate(gen, anchor, out),
        Action::Classify { vertices } => classify(&vertices),
        Action::Renovate { vertices, point } => renovate(&vertices, point),
        Action::Dual { vertices } => dual(&vertices),
        Action::Spawn {
            gen,
            board,
            anchor,
            out,
        } => spawn(gen, &board, anchor, out),
        Action::Report => report(),
    }
}

fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y (got {s:?})"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn parse_polygon(s: &str) -> Result<Polygon> {
    let data = match serde_json::from_str::<Vec<[f64; 2]>>(s) {
        Ok(vertices) => PolygonData { vertices },
        Err(_) => serde_json::from_str::<PolygonData>(s).context("parsing --vertices")?,
    };
    Ok(Polygon::try_from(data)?)
}

fn emit(command: &'static str, value: &Value, out: Option<&Path>, params: Value) -> Result<()> {
    match out {
        None => println!("{}", serde_json::to_string_pretty(value)?),
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, serde_json::to_vec_pretty(value)?)
                .with_context(|| format!("writing {}", path.display()))?;
            let prov = provenance::write_sidecar(path, provenance::Payload::new(command, params))?;
            tracing::info!(out = %path.display(), provenance = %prov.display(), "wrote");
        }
    }
    Ok(())
}

fn generate(gen: GenArgs, anchor: Option<Point>, out: Option<PathBuf>) -> Result<()> {
    tracing::info!(seed = gen.seed, index = gen.index, max_comp = gen.max_comp, "generate");
    let mut rng = ReplayToken {
        seed: gen.seed,
        index: gen.index,
    }
    .to_std_rng();
    let mut poly = gen.generator().generate(&mut rng)?;
    if let Some(a) = anchor {
        latpoly::api::translate(a.coords, &mut poly);
    }
    let mut params = gen.params();
    params["anchor"] = json!(anchor.map(|a| [a.x, a.y]));
    emit("generate", &serde_json::to_value(&poly)?, out.as_deref(), params)
}

fn points_json(points: &[Point]) -> Value {
    json!(points.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>())
}

fn classify(vertices: &str) -> Result<()> {
    let poly = parse_polygon(vertices)?;
    tracing::info!(n = poly.len(), "classify");
    let obj = json!({
        "polygon": poly,
        "lattice": poly.is_lattice_polygon(),
        "ip_lattice": poly.is_ip_lattice_polygon(),
        "canonical": poly.is_canonical_polygon(),
        "reflexive": poly.is_reflexive_polygon(),
        "terminal": poly.is_terminal_polygon(),
        "valid_points": points_json(&poly.valid_points()),
        "internal_points": points_json(&poly.internal_points()),
        "edge_points": points_json(&poly.edge_points()),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn renovate(vertices: &str, point: Point) -> Result<()> {
    let mut poly = parse_polygon(vertices)?;
    if !point.is_lattice_point() {
        tracing::warn!(x = point.x, y = point.y, "renovating with a non-lattice point");
    }
    let event = poly.renovate(point)?;
    tracing::info!(?event, n = poly.len(), "renovate");
    let obj = json!({ "event": event, "polygon": poly });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn dual(vertices: &str) -> Result<()> {
    let mut poly = parse_polygon(vertices)?;
    poly.dualize()?;
    println!("{}", serde_json::to_string_pretty(&poly)?);
    Ok(())
}

fn spawn(gen: GenArgs, board: &Path, anchor: Point, out: Option<PathBuf>) -> Result<()> {
    let raw = std::fs::read(board).with_context(|| format!("reading {}", board.display()))?;
    let existing: Vec<Polygon> =
        serde_json::from_slice(&raw).with_context(|| format!("parsing {}", board.display()))?;
    tracing::info!(board = %board.display(), n_existing = existing.len(), "spawn");
    let mut rng = ReplayToken {
        seed: gen.seed,
        index: gen.index,
    }
    .to_std_rng();
    let poly = gen
        .generator()
        .spawn(&mut rng, anchor, &existing)
        .map_err(|e| anyhow!("spawn at ({}, {}): {e}", anchor.x, anchor.y))?;
    let mut params = gen.params();
    params["anchor"] = json!([anchor.x, anchor.y]);
    params["board"] = json!(board.to_string_lossy());
    emit("spawn", &serde_json::to_value(&poly)?, out.as_deref(), params)
}

fn report() -> Result<()> {
    let obj = json!({
        "version": latpoly::VERSION,
        "code_rev": provenance::current_git_rev(),
        "params": {},
        "outputs": []
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points_and_polygons() {
        assert_eq!(parse_point("3, -2").unwrap(), Point::new(3.0, -2.0));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());

        let bare = parse_polygon("[[0,0],[2,0],[0,2]]").unwrap();
        let wrapped = parse_polygon(r#"{"vertices": [[0,2],[0,0],[2,0]]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert!(parse_polygon("[]").is_err());
    }

    #[test]
    fn generate_writes_output_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("gen/poly.json");
        let gen = GenArgs {
            library: Library::Terminal,
            max_comp: 1,
            seed: 3,
            index: 1,
            unimodular_attempts: 100_000,
            placement_attempts: 10,
        };
        generate(gen, None, Some(out.clone())).unwrap();
        let poly: Polygon = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert!(poly.is_terminal_polygon());
        let prov: Value = serde_json::from_slice(
            &std::fs::read(dir.path().join("gen/poly.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["command"], "generate");
        assert_eq!(prov["params"]["seed"], 3);
    }
}
