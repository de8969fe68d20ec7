//! Synthetic 4 × 4 street grid around a small hill.
//!
//! All nodes lie in one sector of the Swiss grid, so they can be added in
//! any order.

use velo_core::{NodeId, PointCh};
use velo_graph::{Attribute, AttributeSet, GraphBuilder, GraphResult, profile_sample_count};

use Attribute::*;

const SIDE:      usize = 4;
const SPACING:   f64   = 200.0;
const ORIGIN_E:  f64   = 2_600_000.0;
const ORIGIN_N:  f64   = 1_200_000.0;
const HILL_BASE: f64   = 500.0;
const HILL_TOP:  f64   = 40.0;

/// Tags of the east-west street on each row, south to north.
const ROWS: [&[Attribute]; SIDE] = [
    &[HighwayPrimary, SurfaceAsphalt],
    &[HighwayResidential],
    &[HighwayTrack, TracktypeGrade4, SurfaceGravel],
    &[HighwayCycleway, SurfacePaved],
];

/// Tags of the north-south street on each column, west to east.
const COLUMNS: [&[Attribute]; SIDE] = [
    &[HighwayResidential],
    &[HighwayFootway],
    &[HighwayMotorway],
    &[HighwayResidential, OnewayYes],
];

/// Altitude of the terrain, a Gaussian bump centred on the grid.
fn altitude(point: PointCh) -> f64 {
    let centre = SPACING * (SIDE - 1) as f64 / 2.0;
    let de = point.e - ORIGIN_E - centre;
    let dn = point.n - ORIGIN_N - centre;
    HILL_BASE + HILL_TOP * (-(de * de + dn * dn) / (2.0 * SPACING * SPACING)).exp()
}

fn profile(from: PointCh, to: PointCh, length: f64) -> Vec<f32> {
    let count = profile_sample_count(length);
    (0..count)
        .map(|i| {
            let t = i as f64 / (count - 1) as f64;
            let e = from.e + (to.e - from.e) * t;
            let n = from.n + (to.n - from.n) * t;
            altitude(PointCh::new(e, n)) as f32
        })
        .collect()
}

/// Build the grid.  Returns the builder and the nodes, row-major from the
/// south-west corner.
pub fn build_network() -> GraphResult<(GraphBuilder, Vec<NodeId>)> {
    let mut b = GraphBuilder::new();
    let mut points = Vec::with_capacity(SIDE * SIDE);
    let mut nodes = Vec::with_capacity(SIDE * SIDE);
    for row in 0..SIDE {
        for col in 0..SIDE {
            let point = PointCh::new(ORIGIN_E + col as f64 * SPACING, ORIGIN_N + row as f64 * SPACING);
            points.push(point);
            nodes.push(b.add_node(point));
        }
    }

    let mut road = |from: usize, to: usize, tags: &[Attribute]| -> GraphResult<()> {
        let (a, z) = (points[from], points[to]);
        let samples = profile(a, z, SPACING);
        b.add_road(nodes[from], nodes[to], SPACING, AttributeSet::of(tags), Some(samples.as_slice()))
    };
    for row in 0..SIDE {
        for col in 0..SIDE - 1 {
            road(row * SIDE + col, row * SIDE + col + 1, ROWS[row])?;
        }
    }
    for col in 0..SIDE {
        for row in 0..SIDE - 1 {
            road(row * SIDE + col, (row + 1) * SIDE + col, COLUMNS[col])?;
        }
    }

    Ok((b, nodes))
}
