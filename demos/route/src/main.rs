//! route: plan a bike route and print its elevation summary.
//!
//! ```text
//! route                              # synthetic grid, corner to corner
//! route GRAPH_DIR E N E N [E N ...]  # graph files on disk, waypoints in CH1903+
//! route --help
//! ```
//!
//! Set `RUST_LOG=debug` to see graph loading and search progress.

mod network;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use velo_core::PointCh;
use velo_graph::Graph;
use velo_routing::{CityBikeCost, PlannerConfig, RouteComputer, RoutePlanner, Waypoint};

use network::build_network;

// ── Constants ─────────────────────────────────────────────────────────────────

const SYNTHETIC_DIR: &str = "output/route";

// ── Arguments ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "route")]
#[command(about = "Plan a bike route and print its elevation summary", long_about = None)]
struct Cli {
    /// Directory holding the graph files; a synthetic grid is used when omitted
    #[arg(requires = "coordinates")]
    graph_dir: Option<PathBuf>,

    /// Waypoints as CH1903+ easting/northing pairs, at least two
    #[arg(value_name = "COORD", num_args = 4..)]
    coordinates: Vec<f64>,
}

struct Args {
    graph_dir: PathBuf,
    points:    Vec<PointCh>,
}

impl Cli {
    /// Pair up the coordinates, or `None` when no graph directory was given.
    fn into_args(self) -> Result<Option<Args>, clap::Error> {
        let Some(graph_dir) = self.graph_dir else {
            return Ok(None);
        };
        if self.coordinates.len() % 2 != 0 {
            return Err(Cli::command().error(
                ErrorKind::WrongNumberOfValues,
                format!("expected E N pairs, got {} coordinates", self.coordinates.len()),
            ));
        }
        let points = self.coordinates.chunks_exact(2).map(|p| PointCh::new(p[0], p[1])).collect();
        Ok(Some(Args { graph_dir, points }))
    }
}

/// Write the synthetic grid to disk and return its directory with the
/// south-west and north-east corners as waypoints.
fn synthetic() -> Result<Args> {
    let (builder, nodes) = build_network()?;
    let dir = Path::new(SYNTHETIC_DIR);
    std::fs::create_dir_all(dir)?;
    builder.write_to(dir)?;

    let graph = builder.build()?;
    let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
        bail!("synthetic network has no nodes");
    };
    Ok(Args {
        graph_dir: dir.to_path_buf(),
        points:    vec![graph.node_point(first), graph.node_point(last)],
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match Cli::parse().into_args().unwrap_or_else(|e| e.exit()) {
        Some(args) => args,
        None => synthetic()?,
    };

    let t0 = Instant::now();
    let graph = Graph::load_from(&args.graph_dir)
        .with_context(|| format!("loading graph from {}", args.graph_dir.display()))?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "graph loaded"
    );

    let config = PlannerConfig::default();
    let computer = RouteComputer::new(&graph, CityBikeCost::new(&graph));
    let mut planner = RoutePlanner::new(computer, config);

    let mut waypoints: Vec<Waypoint> = Vec::with_capacity(args.points.len());
    for point in &args.points {
        match planner.snap(*point) {
            Some(waypoint) => waypoints.push(waypoint),
            None => bail!("no node within {} m of ({}, {})", planner.config().search_distance, point.e, point.n),
        }
    }

    let t1 = Instant::now();
    let Some(plan) = planner.plan(&waypoints)? else {
        println!("No route between the given waypoints.");
        return Ok(());
    };
    let elapsed = t1.elapsed();

    // Summary.
    let route = &plan.route;
    let profile = &plan.profile;
    println!("Route planned in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    println!("  length        : {:>9.1} m", route.length());
    println!("  edges         : {:>9}", route.edges().len());
    println!("  ascent        : {:>9.1} m", profile.total_ascent());
    println!("  descent       : {:>9.1} m", profile.total_descent());
    println!("  min elevation : {:>9.1} m", profile.min_elevation());
    println!("  max elevation : {:>9.1} m", profile.max_elevation());
    println!();

    println!("{:<6} {:<12} {:<14} {:<14}", "#", "Node", "E", "N");
    println!("{}", "-".repeat(48));
    let edges = route.edges();
    let nodes = edges
        .iter()
        .map(|e| (e.from_node_id, e.from_point))
        .chain(edges.last().map(|e| (e.to_node_id, e.to_point)));
    for (i, (node, point)) in nodes.enumerate() {
        println!("{:<6} {:<12} {:<14.1} {:<14.1}", i, node.0, point.e, point.n);
    }

    Ok(())
}
