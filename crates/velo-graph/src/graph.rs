//! The [`Graph`] facade: nodes, edges, sectors, and the attribute table
//! composed into one immutable, queryable network.
//!
//! # Files
//!
//! [`Graph::load_from`] maps six files from one directory:
//!
//! | File               | View                      |
//! |--------------------|---------------------------|
//! | `nodes.bin`        | [`GraphNodes`]            |
//! | `edges.bin`        | [`GraphEdges`]            |
//! | `profile_ids.bin`  | [`GraphEdges`] (profiles) |
//! | `elevations.bin`   | [`GraphEdges`] (samples)  |
//! | `sectors.bin`      | [`GraphSectors`]          |
//! | `attributes.bin`   | `Vec<AttributeSet>`       |
//!
//! A loaded graph is never mutated, so it can be shared freely between
//! threads (`Graph: Send + Sync`).

use std::path::Path;

use tracing::{debug, info};

use velo_core::{EdgeId, Function, NodeId, PointCh};

use crate::{
    AttributeSet, Buffer, GraphEdges, GraphError, GraphNodes, GraphResult, GraphSectors,
};

pub const NODES_FILE: &str = "nodes.bin";
pub const EDGES_FILE: &str = "edges.bin";
pub const PROFILE_IDS_FILE: &str = "profile_ids.bin";
pub const ELEVATIONS_FILE: &str = "elevations.bin";
pub const SECTORS_FILE: &str = "sectors.bin";
pub const ATTRIBUTES_FILE: &str = "attributes.bin";

const ATTRIBUTE_SET_BYTES: usize = 8;

#[derive(Debug)]
pub struct Graph {
    nodes:          GraphNodes,
    sectors:        GraphSectors,
    edges:          GraphEdges,
    attribute_sets: Vec<AttributeSet>,
}

impl Graph {
    /// Compose already decoded views.
    ///
    /// Cross-references are checked once here (edge ranges, edge targets,
    /// attribute indices, profile slots, sector ranges) so that queries on
    /// a constructed graph never index out of bounds.
    ///
    /// # Errors
    ///
    /// [`GraphError::InvalidFormat`] if any cross-reference is dangling.
    pub fn new(
        nodes:          GraphNodes,
        sectors:        GraphSectors,
        edges:          GraphEdges,
        attribute_sets: Vec<AttributeSet>,
    ) -> GraphResult<Self> {
        let graph = Self { nodes, sectors, edges, attribute_sets };
        graph.validate()?;
        Ok(graph)
    }

    /// Map the six graph files found in `dir`.
    ///
    /// # Errors
    ///
    /// [`GraphError::Io`] if a file is missing or unreadable,
    /// [`GraphError::InvalidFormat`] if the files are inconsistent.  No
    /// partially loaded graph is ever returned.
    pub fn load_from(dir: &Path) -> GraphResult<Self> {
        let map = |name: &str| {
            let path = dir.join(name);
            let buffer = Buffer::map(&path)?;
            debug!(path = %path.display(), bytes = buffer.len(), "mapped graph file");
            Ok::<_, GraphError>(buffer)
        };

        let nodes = GraphNodes::new(map(NODES_FILE)?)?;
        let sectors = GraphSectors::new(map(SECTORS_FILE)?)?;
        let edges = GraphEdges::new(map(EDGES_FILE)?, map(PROFILE_IDS_FILE)?, map(ELEVATIONS_FILE)?)?;
        let attribute_sets = decode_attribute_sets(&map(ATTRIBUTES_FILE)?)?;

        let graph = Self::new(nodes, sectors, edges, attribute_sets)?;
        info!(
            dir = %dir.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            attribute_sets = graph.attribute_sets.len(),
            "graph loaded"
        );
        Ok(graph)
    }

    fn validate(&self) -> GraphResult<()> {
        let node_count = self.nodes.count();
        let edge_count = self.edges.count();
        let slot_count = self.edges.slot_count();

        for i in 0..node_count {
            let node = NodeId(i as u32);
            let end = self.nodes.first_edge(node) as usize + self.nodes.out_degree(node);
            if end > edge_count {
                return Err(GraphError::InvalidFormat(format!(
                    "{node} references edges up to {end}, only {edge_count} exist"
                )));
            }
        }

        for i in 0..edge_count {
            let edge = EdgeId(i as u32);
            if self.edges.target_node_id(edge).index() >= node_count {
                return Err(GraphError::InvalidFormat(format!("{edge} targets a missing node")));
            }
            if self.edges.attributes_index(edge) >= self.attribute_sets.len() {
                return Err(GraphError::InvalidFormat(format!(
                    "{edge} references a missing attribute set"
                )));
            }
            if let Some(slots) = self.edges.profile_slots(edge) {
                if slots.end > slot_count {
                    return Err(GraphError::InvalidFormat(format!(
                        "{edge} reads elevation slots up to {}, only {slot_count} exist",
                        slots.end
                    )));
                }
            }
        }

        for index in 0..crate::sectors::SECTOR_COUNT {
            let sector = self.sectors.sector(index);
            if sector.end_node_id.index() > node_count {
                return Err(GraphError::InvalidFormat(format!(
                    "sector {index} covers nodes up to {}, only {node_count} exist",
                    sector.end_node_id.0
                )));
            }
        }
        Ok(())
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.count()
    }

    #[inline]
    pub fn node_point(&self, node: NodeId) -> PointCh {
        self.nodes.position(node)
    }

    #[inline]
    pub fn node_out_degree(&self, node: NodeId) -> usize {
        self.nodes.out_degree(node)
    }

    /// # Panics
    ///
    /// Panics if `index >= node_out_degree(node)`.
    #[inline]
    pub fn node_out_edge_id(&self, node: NodeId, index: usize) -> EdgeId {
        self.nodes.edge_id(node, index)
    }

    #[inline]
    pub fn node_out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + use<> {
        self.nodes.out_edges(node)
    }

    /// The node nearest to `point` whose distance is strictly less than
    /// `max_distance`, or `None`.
    ///
    /// Candidates come from the sectors overlapping the square of half-side
    /// `max_distance` around `point`; the square contains the search circle,
    /// so no qualifying node is missed.  Among equidistant nodes the one
    /// scanned first wins.
    pub fn node_closest_to(&self, point: PointCh, max_distance: f64) -> Option<NodeId> {
        let mut best = None;
        let mut best_squared = max_distance * max_distance;
        for sector in self.sectors.sectors_in_area(point, max_distance) {
            for node in sector.nodes() {
                let squared = point.squared_distance_to(self.nodes.position(node));
                if squared < best_squared {
                    best_squared = squared;
                    best = Some(node);
                }
            }
        }
        best
    }

    // ── Edges ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.count()
    }

    #[inline]
    pub fn edge_target_node_id(&self, edge: EdgeId) -> NodeId {
        self.edges.target_node_id(edge)
    }

    #[inline]
    pub fn edge_is_inverted(&self, edge: EdgeId) -> bool {
        self.edges.is_inverted(edge)
    }

    #[inline]
    pub fn edge_attributes(&self, edge: EdgeId) -> AttributeSet {
        self.attribute_sets[self.edges.attributes_index(edge)]
    }

    #[inline]
    pub fn edge_length(&self, edge: EdgeId) -> f64 {
        self.edges.length(edge)
    }

    #[inline]
    pub fn edge_elevation_gain(&self, edge: EdgeId) -> f64 {
        self.edges.elevation_gain(edge)
    }

    /// Altitude along the edge as a function of the distance from its start:
    /// `Constant(NaN)` when the edge has no profile.
    ///
    /// A zero-length edge stores a single sample, so its profile is that
    /// altitude everywhere.
    pub fn edge_profile(&self, edge: EdgeId) -> Function {
        let samples = self.edges.profile_samples(edge);
        let length = self.edges.length(edge);
        match samples.as_slice() {
            [] => Function::constant(f64::NAN),
            [only] => Function::constant(*only as f64),
            // At least two samples only when `length > 0`.
            _ => Function::Sampled { samples: samples.into(), x_max: length },
        }
    }

    // ── Raw views ─────────────────────────────────────────────────────────

    pub fn nodes(&self) -> &GraphNodes {
        &self.nodes
    }

    pub fn edges(&self) -> &GraphEdges {
        &self.edges
    }

    pub fn sectors(&self) -> &GraphSectors {
        &self.sectors
    }

    pub fn attribute_sets(&self) -> &[AttributeSet] {
        &self.attribute_sets
    }
}

fn decode_attribute_sets(buffer: &Buffer) -> GraphResult<Vec<AttributeSet>> {
    let count = buffer.record_count(ATTRIBUTE_SET_BYTES, "attributes")?;
    (0..count)
        .map(|i| {
            AttributeSet::new(buffer.u64_at(i * ATTRIBUTE_SET_BYTES)).map_err(|e| {
                GraphError::InvalidFormat(format!("attribute set {i}: {e}"))
            })
        })
        .collect()
}
