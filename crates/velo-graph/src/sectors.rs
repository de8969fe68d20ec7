//! `sectors.bin` view: the spatial index used for nearest-node search.
//!
//! [`SwissBounds`] is divided into a fixed 128 × 128 grid.  Sector records are
//! stored row-major (south to north, west to east), 6 bytes each:
//!
//! ```text
//! offset 0  i32  id of the first node in the sector
//! offset 4  u16  number of nodes in the sector
//! ```
//!
//! The nodes of a sector have contiguous ids; the graph build process
//! buckets them before writing.

use velo_core::{math, NodeId, PointCh, SwissBounds};

use crate::{Buffer, GraphError, GraphResult};

/// Sectors per side of the grid.
pub const GRID_SIDE: usize = 128;
pub const SECTOR_COUNT: usize = GRID_SIDE * GRID_SIDE;

const OFFSET_FIRST_NODE: usize = 0;
const OFFSET_NODE_COUNT: usize = OFFSET_FIRST_NODE + 4;
pub const SECTOR_BYTES: usize = OFFSET_NODE_COUNT + 2;

/// A grid cell: the half-open node id range `start_node_id .. end_node_id`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Sector {
    pub start_node_id: NodeId,
    pub end_node_id:   NodeId,
}

impl Sector {
    pub fn node_count(&self) -> usize {
        (self.end_node_id.0 - self.start_node_id.0) as usize
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
        (self.start_node_id.0..self.end_node_id.0).map(NodeId)
    }
}

/// Grid column (or row) containing coordinate `v` of an axis starting at
/// `min` with the given `extent`, clamped to the grid.
#[inline]
pub(crate) fn grid_cell(v: f64, min: f64, extent: f64) -> usize {
    let cell = ((v - min) / (extent / GRID_SIDE as f64)).floor();
    math::clamp(0.0, cell, (GRID_SIDE - 1) as f64) as usize
}

/// Row-major index of the sector containing `point`.
#[inline]
pub fn sector_index_of(point: PointCh) -> usize {
    let x = grid_cell(point.e, SwissBounds::MIN_E, SwissBounds::WIDTH);
    let y = grid_cell(point.n, SwissBounds::MIN_N, SwissBounds::HEIGHT);
    y * GRID_SIDE + x
}

#[derive(Debug)]
pub struct GraphSectors {
    buffer: Buffer,
}

impl GraphSectors {
    pub fn new(buffer: Buffer) -> GraphResult<Self> {
        let count = buffer.record_count(SECTOR_BYTES, "sectors")?;
        if count != SECTOR_COUNT {
            return Err(GraphError::InvalidFormat(format!(
                "expected {SECTOR_COUNT} sectors, found {count}"
            )));
        }
        Ok(Self { buffer })
    }

    /// The sector at row-major `index`.
    pub fn sector(&self, index: usize) -> Sector {
        let base = index * SECTOR_BYTES;
        let start = self.buffer.i32_at(base + OFFSET_FIRST_NODE) as u32;
        let count = self.buffer.u16_at(base + OFFSET_NODE_COUNT) as u32;
        Sector { start_node_id: NodeId(start), end_node_id: NodeId(start.saturating_add(count)) }
    }

    /// Every sector intersecting the axis-aligned square of half-side
    /// `half_side` centred on `center`.
    ///
    /// Only the rectangular range of cells covered by the square is visited.
    /// A negative or NaN `half_side` describes no square and yields nothing.
    pub fn sectors_in_area(&self, center: PointCh, half_side: f64) -> Vec<Sector> {
        if !(half_side >= 0.0) {
            return Vec::new();
        }
        let x_min = grid_cell(center.e - half_side, SwissBounds::MIN_E, SwissBounds::WIDTH);
        let x_max = grid_cell(center.e + half_side, SwissBounds::MIN_E, SwissBounds::WIDTH);
        let y_min = grid_cell(center.n - half_side, SwissBounds::MIN_N, SwissBounds::HEIGHT);
        let y_max = grid_cell(center.n + half_side, SwissBounds::MIN_N, SwissBounds::HEIGHT);

        let mut sectors = Vec::with_capacity((x_max - x_min + 1) * (y_max - y_min + 1));
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                sectors.push(self.sector(y * GRID_SIDE + x));
            }
        }
        sectors
    }
}
