//! In-memory construction of graph files.
//!
//! [`GraphBuilder`] accepts nodes and directed edges, then encodes them into
//! exactly the byte layout [`Graph::load_from`] reads.  It is used by tests,
//! by the demo, and by any tool that derives a graph from other sources.
//!
//! # Example
//!
//! ```
//! use velo_core::PointCh;
//! use velo_graph::{AttributeSet, GraphBuilder};
//!
//! let mut b = GraphBuilder::new();
//! let a = b.add_node(PointCh::new(2_600_000.0, 1_200_000.0));
//! let c = b.add_node(PointCh::new(2_600_100.0, 1_200_000.0));
//! b.add_road(a, c, 100.0, AttributeSet::EMPTY, None).unwrap();
//! let graph = b.build().unwrap();
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 2); // one per direction
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::debug;

use velo_core::{q28_4, NodeId, PointCh};

use crate::edges::{sample_count, ProfileKind, MAX_FIRST_SAMPLE};
use crate::graph::{
    ATTRIBUTES_FILE, EDGES_FILE, ELEVATIONS_FILE, NODES_FILE, PROFILE_IDS_FILE, SECTORS_FILE,
};
use crate::nodes::{MAX_FIRST_EDGE, MAX_OUT_DEGREE};
use crate::sectors::{sector_index_of, SECTOR_COUNT};
use crate::{AttributeSet, Buffer, Graph, GraphEdges, GraphError, GraphNodes, GraphResult, GraphSectors};

/// Number of altitude samples an edge of `length` metres must be given.
pub fn profile_sample_count(length: f64) -> usize {
    let raw = q28_4::of_f64(length).clamp(0, u16::MAX as i32) as u16;
    sample_count(raw)
}

/// Raw contents of the six graph files.
#[derive(Clone, Debug, Default)]
pub struct GraphBuffers {
    pub nodes:       Vec<u8>,
    pub edges:       Vec<u8>,
    pub profile_ids: Vec<u8>,
    pub elevations:  Vec<u8>,
    pub sectors:     Vec<u8>,
    pub attributes:  Vec<u8>,
}

/// An encoded profile, shared by the two directions of a road.
struct StoredProfile {
    kind:  ProfileKind,
    slots: Vec<u16>,
}

struct RawEdge {
    from:           NodeId,
    to:             NodeId,
    inverted:       bool,
    length:         u16,
    elevation_gain: u16,
    attributes:     AttributeSet,
    profile:        Option<usize>,
}

/// Construct a graph incrementally, then call [`build`](Self::build) or
/// [`write_to`](Self::write_to).
///
/// Nodes must be added grouped by sector (in increasing
/// [`sector_index_of`] order) since each sector owns a contiguous id range.
/// Edges may be added in any order; they are stably sorted by source node.
#[derive(Default)]
pub struct GraphBuilder {
    nodes:     Vec<PointCh>,
    raw_edges: Vec<RawEdge>,
    profiles:  Vec<StoredProfile>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, point: PointCh) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(point);
        id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.raw_edges.len()
    }

    /// Add a directed edge without altitude data.
    pub fn add_directed_edge(
        &mut self,
        from:       NodeId,
        to:         NodeId,
        length:     f64,
        attributes: AttributeSet,
    ) -> GraphResult<()> {
        self.check_nodes(from, to)?;
        let length = encode_q12_4(length)?;
        self.raw_edges.push(RawEdge {
            from,
            to,
            inverted: false,
            length,
            elevation_gain: 0,
            attributes,
            profile: None,
        });
        Ok(())
    }

    /// Add a directed edge with altitude `samples` given in its direction of
    /// travel, one every two metres.
    ///
    /// # Errors
    ///
    /// [`GraphError::ProfileLength`] if the number of samples does not match
    /// [`profile_sample_count`]; [`GraphError::AltitudeOverflow`] if a sample
    /// is negative or too large.
    pub fn add_directed_edge_with_profile(
        &mut self,
        from:       NodeId,
        to:         NodeId,
        length:     f64,
        attributes: AttributeSet,
        samples:    &[f32],
    ) -> GraphResult<()> {
        self.check_nodes(from, to)?;
        let length = encode_q12_4(length)?;
        let quantized = quantize_profile(length, samples)?;
        let elevation_gain = encode_q12_4(gain(quantized.iter().copied()))?;
        let profile = self.store_profile(&quantized);
        self.raw_edges.push(RawEdge {
            from,
            to,
            inverted: false,
            length,
            elevation_gain,
            attributes,
            profile: Some(profile),
        });
        Ok(())
    }

    /// Add both directions of a road between `a` and `b`.
    ///
    /// The `b → a` edge is stored inverted and shares the profile of the
    /// `a → b` edge; `profile` is given in the `a → b` direction.
    pub fn add_road(
        &mut self,
        a:          NodeId,
        b:          NodeId,
        length:     f64,
        attributes: AttributeSet,
        profile:    Option<&[f32]>,
    ) -> GraphResult<()> {
        self.check_nodes(a, b)?;
        let length = encode_q12_4(length)?;

        let (forward_gain, backward_gain, profile) = match profile {
            Some(samples) => {
                let quantized = quantize_profile(length, samples)?;
                let forward = encode_q12_4(gain(quantized.iter().copied()))?;
                let backward = encode_q12_4(gain(quantized.iter().rev().copied()))?;
                (forward, backward, Some(self.store_profile(&quantized)))
            }
            None => (0, 0, None),
        };

        self.raw_edges.push(RawEdge {
            from: a,
            to: b,
            inverted: false,
            length,
            elevation_gain: forward_gain,
            attributes,
            profile,
        });
        self.raw_edges.push(RawEdge {
            from: b,
            to: a,
            inverted: true,
            length,
            elevation_gain: backward_gain,
            attributes,
            profile,
        });
        Ok(())
    }

    fn check_nodes(&self, from: NodeId, to: NodeId) -> GraphResult<()> {
        for node in [from, to] {
            if node.index() >= self.nodes.len() {
                return Err(GraphError::InvalidFormat(format!("{node} was never added")));
            }
        }
        Ok(())
    }

    fn store_profile(&mut self, quantized: &[i32]) -> usize {
        self.profiles.push(encode_profile(quantized));
        self.profiles.len() - 1
    }

    // ── Encoding ──────────────────────────────────────────────────────────

    /// Encode everything added so far into file contents.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodesNotBucketed`] if nodes are not grouped by sector,
    /// [`GraphError::DegreeOverflow`] if a node has more than 15 out-edges,
    /// [`GraphError::InvalidFormat`] if a count exceeds its field width.
    pub fn build_buffers(&self) -> GraphResult<GraphBuffers> {
        let mut buffers = GraphBuffers::default();
        self.encode_sectors(&mut buffers.sectors)?;

        let mut raw: Vec<&RawEdge> = self.raw_edges.iter().collect();
        raw.sort_by_key(|e| e.from.0);

        // Node records: position plus the packed (degree, first edge) word.
        let mut degree = vec![0usize; self.nodes.len()];
        for e in &raw {
            degree[e.from.index()] += 1;
        }
        let mut first_edge = 0usize;
        buffers.nodes.reserve(self.nodes.len() * crate::nodes::NODE_BYTES);
        for (i, (point, &degree)) in self.nodes.iter().zip(&degree).enumerate() {
            if degree > MAX_OUT_DEGREE {
                return Err(GraphError::DegreeOverflow { node: NodeId(i as u32), degree });
            }
            if first_edge > MAX_FIRST_EDGE as usize {
                return Err(GraphError::InvalidFormat(format!("edge id {first_edge} too large")));
            }
            let word = (degree as u32) << 28 | first_edge as u32;
            buffers.nodes.extend_from_slice(&q28_4::of_f64(point.e).to_be_bytes());
            buffers.nodes.extend_from_slice(&q28_4::of_f64(point.n).to_be_bytes());
            buffers.nodes.extend_from_slice(&word.to_be_bytes());
            first_edge += degree;
        }

        // Profiles: each stored profile is written once, in insertion order.
        let mut profile_ids = Vec::with_capacity(self.profiles.len());
        let mut slot_count = 0usize;
        for profile in &self.profiles {
            if slot_count > MAX_FIRST_SAMPLE as usize {
                return Err(GraphError::InvalidFormat(format!("profile slot {slot_count} too large")));
            }
            profile_ids.push((profile.kind as u32) << 30 | slot_count as u32);
            for slot in &profile.slots {
                buffers.elevations.extend_from_slice(&slot.to_be_bytes());
            }
            slot_count += profile.slots.len();
        }

        // Edge records and the deduplicated attribute-set table.
        let mut attribute_index: FxHashMap<AttributeSet, u16> = FxHashMap::default();
        for e in &raw {
            let next = attribute_index.len();
            let index = *attribute_index.entry(e.attributes).or_insert_with(|| {
                buffers.attributes.extend_from_slice(&e.attributes.bits().to_be_bytes());
                next as u16
            });
            if next > u16::MAX as usize {
                return Err(GraphError::InvalidFormat("too many distinct attribute sets".into()));
            }

            let target = e.to.0 as i32;
            let target = if e.inverted { !target } else { target };
            buffers.edges.extend_from_slice(&target.to_be_bytes());
            buffers.edges.extend_from_slice(&e.length.to_be_bytes());
            buffers.edges.extend_from_slice(&e.elevation_gain.to_be_bytes());
            buffers.edges.extend_from_slice(&index.to_be_bytes());

            let profile_id = e.profile.map_or(0, |p| profile_ids[p]);
            buffers.profile_ids.extend_from_slice(&profile_id.to_be_bytes());
        }

        debug!(
            nodes = self.nodes.len(),
            edges = raw.len(),
            profiles = self.profiles.len(),
            attribute_sets = attribute_index.len(),
            "graph encoded"
        );
        Ok(buffers)
    }

    fn encode_sectors(&self, out: &mut Vec<u8>) -> GraphResult<()> {
        let mut start = vec![0usize; SECTOR_COUNT + 1];
        let mut previous = 0;
        for (i, &point) in self.nodes.iter().enumerate() {
            let sector = sector_index_of(point);
            if sector < previous {
                return Err(GraphError::NodesNotBucketed { node: NodeId(i as u32) });
            }
            previous = sector;
            start[sector + 1] += 1;
        }
        for i in 1..=SECTOR_COUNT {
            start[i] += start[i - 1];
        }

        out.reserve(SECTOR_COUNT * crate::sectors::SECTOR_BYTES);
        for sector in 0..SECTOR_COUNT {
            let count = start[sector + 1] - start[sector];
            let count = u16::try_from(count).map_err(|_| {
                GraphError::InvalidFormat(format!("sector {sector} holds {count} nodes"))
            })?;
            out.extend_from_slice(&(start[sector] as i32).to_be_bytes());
            out.extend_from_slice(&count.to_be_bytes());
        }
        Ok(())
    }

    /// Encode and decode into a [`Graph`] backed by owned buffers.
    pub fn build(&self) -> GraphResult<Graph> {
        let b = self.build_buffers()?;
        let attribute_sets = b
            .attributes
            .chunks_exact(8)
            .map(|chunk| {
                let mut bytes = [0u8; 8];
                bytes.copy_from_slice(chunk);
                AttributeSet::new(u64::from_be_bytes(bytes))
            })
            .collect::<GraphResult<Vec<_>>>()?;
        Graph::new(
            GraphNodes::new(Buffer::from(b.nodes))?,
            GraphSectors::new(Buffer::from(b.sectors))?,
            GraphEdges::new(
                Buffer::from(b.edges),
                Buffer::from(b.profile_ids),
                Buffer::from(b.elevations),
            )?,
            attribute_sets,
        )
    }

    /// Write the six graph files into `dir`, which must exist.
    pub fn write_to(&self, dir: &Path) -> GraphResult<()> {
        let b = self.build_buffers()?;
        for (name, bytes) in [
            (NODES_FILE, &b.nodes),
            (EDGES_FILE, &b.edges),
            (PROFILE_IDS_FILE, &b.profile_ids),
            (ELEVATIONS_FILE, &b.elevations),
            (SECTORS_FILE, &b.sectors),
            (ATTRIBUTES_FILE, &b.attributes),
        ] {
            let path = dir.join(name);
            std::fs::write(&path, bytes).map_err(|e| GraphError::io(&path, e))?;
        }
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Round `value` to Q12.4.
fn encode_q12_4(value: f64) -> GraphResult<u16> {
    let q = q28_4::of_f64(value);
    if !value.is_finite() || !(0..=u16::MAX as i32).contains(&q) {
        return Err(GraphError::ValueOverflow(value));
    }
    Ok(q as u16)
}

fn quantize_profile(length: u16, samples: &[f32]) -> GraphResult<Vec<i32>> {
    let expected = sample_count(length);
    if samples.len() != expected {
        return Err(GraphError::ProfileLength { expected, got: samples.len() });
    }
    samples
        .iter()
        .map(|&s| {
            let q = q28_4::of_f64(s as f64);
            if !s.is_finite() || !(0..=u16::MAX as i32).contains(&q) {
                return Err(GraphError::AltitudeOverflow(s));
            }
            Ok(q)
        })
        .collect()
}

/// Sum of positive altitude steps, metres.
fn gain(quantized: impl Iterator<Item = i32>) -> f64 {
    let mut total = 0i32;
    let mut previous: Option<i32> = None;
    for q in quantized {
        if let Some(p) = previous {
            total += (q - p).max(0);
        }
        previous = Some(q);
    }
    q28_4::as_f64(total)
}

/// Pick the most compact encoding whose delta range fits every step.
fn encode_profile(quantized: &[i32]) -> StoredProfile {
    let deltas: Vec<i32> = quantized.windows(2).map(|w| w[1] - w[0]).collect();
    let fits = |bits: u32| {
        let half = 1 << (bits - 1);
        deltas.iter().all(|d| (-half..half).contains(d))
    };
    let kind = if fits(4) {
        ProfileKind::Delta4
    } else if fits(8) {
        ProfileKind::Delta8
    } else {
        ProfileKind::Raw
    };

    if kind == ProfileKind::Raw {
        return StoredProfile { kind, slots: quantized.iter().map(|&q| q as u16).collect() };
    }

    let width = kind.delta_bits();
    let per_slot = kind.per_slot();
    let mask = (1u32 << width) - 1;
    let mut slots = Vec::with_capacity(1 + deltas.len().div_ceil(per_slot));
    slots.push(quantized[0] as u16);
    for chunk in deltas.chunks(per_slot) {
        let mut word = 0u32;
        for (j, &d) in chunk.iter().enumerate() {
            word |= (d as u32 & mask) << ((per_slot - 1 - j) as u32 * width);
        }
        slots.push(word as u16);
    }
    StoredProfile { kind, slots }
}
