//! `nodes.bin` view.
//!
//! # Record layout (12 bytes, big-endian)
//!
//! ```text
//! offset 0  i32  E coordinate, Q28.4
//! offset 4  i32  N coordinate, Q28.4
//! offset 8  u32  out-degree (bits 28..32) | first out-edge id (bits 0..28)
//! ```
//!
//! The out-edges of node `n` are the contiguous ids
//! `first .. first + out_degree`.

use velo_core::{bits, q28_4, EdgeId, NodeId, PointCh};

use crate::{Buffer, GraphResult};

const OFFSET_E: usize = 0;
const OFFSET_N: usize = OFFSET_E + 4;
const OFFSET_OUT_EDGES: usize = OFFSET_N + 4;
pub const NODE_BYTES: usize = OFFSET_OUT_EDGES + 4;

const EDGE_INDEX_BITS: u32 = 28;
const DEGREE_BITS: u32 = 4;

/// Largest out-degree the packed node word can hold.
pub const MAX_OUT_DEGREE: usize = (1 << DEGREE_BITS) - 1;
/// Largest first-edge id the packed node word can hold.
pub const MAX_FIRST_EDGE: u32 = (1 << EDGE_INDEX_BITS) - 1;

#[derive(Debug)]
pub struct GraphNodes {
    buffer: Buffer,
    count:  usize,
}

impl GraphNodes {
    pub fn new(buffer: Buffer) -> GraphResult<Self> {
        let count = buffer.record_count(NODE_BYTES, "nodes")?;
        Ok(Self { buffer, count })
    }

    #[inline]
    fn offset(node: NodeId, field: usize) -> usize {
        node.index() * NODE_BYTES + field
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn node_e(&self, node: NodeId) -> f64 {
        q28_4::as_f64(self.buffer.i32_at(Self::offset(node, OFFSET_E)))
    }

    #[inline]
    pub fn node_n(&self, node: NodeId) -> f64 {
        q28_4::as_f64(self.buffer.i32_at(Self::offset(node, OFFSET_N)))
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> PointCh {
        PointCh::new(self.node_e(node), self.node_n(node))
    }

    #[inline]
    fn out_edges_word(&self, node: NodeId) -> i32 {
        self.buffer.i32_at(Self::offset(node, OFFSET_OUT_EDGES))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        bits::extract_unsigned(self.out_edges_word(node), EDGE_INDEX_BITS, DEGREE_BITS) as usize
    }

    #[inline]
    pub(crate) fn first_edge(&self, node: NodeId) -> u32 {
        bits::extract_unsigned(self.out_edges_word(node), 0, EDGE_INDEX_BITS)
    }

    /// Id of the `index`-th outgoing edge of `node`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= out_degree(node)`.
    pub fn edge_id(&self, node: NodeId, index: usize) -> EdgeId {
        let degree = self.out_degree(node);
        assert!(index < degree, "edge index {index} out of range for {node} (out-degree {degree})");
        EdgeId(self.first_edge(node) + index as u32)
    }

    /// Ids of all outgoing edges of `node`, a contiguous range.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + use<> {
        let first = self.first_edge(node);
        (first..first + self.out_degree(node) as u32).map(EdgeId)
    }
}
