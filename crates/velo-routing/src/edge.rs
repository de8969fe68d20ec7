//! Route edges: self-contained copies of graph edges.
//!
//! A route edge carries everything needed to answer position queries
//! without going back to the graph: both endpoints, the length, and the
//! altitude profile.

use velo_core::{math, EdgeId, Function, NodeId, PointCh};
use velo_graph::Graph;

#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from_node_id: NodeId,
    pub to_node_id:   NodeId,
    pub from_point:   PointCh,
    pub to_point:     PointCh,
    /// Metres.
    pub length:       f64,
    /// Altitude as a function of the distance from `from_point`.
    pub profile:      Function,
}

impl Edge {
    /// Copy graph edge `edge_id`, traversed from `from` to `to`.
    pub fn of(graph: &Graph, edge_id: EdgeId, from: NodeId, to: NodeId) -> Self {
        Self {
            from_node_id: from,
            to_node_id:   to,
            from_point:   graph.node_point(from),
            to_point:     graph.node_point(to),
            length:       graph.edge_length(edge_id),
            profile:      graph.edge_profile(edge_id),
        }
    }

    /// Signed position along the edge of the orthogonal projection of
    /// `point`.  Not clamped: negative before the start, beyond `length`
    /// past the end.
    pub fn position_closest_to(&self, point: PointCh) -> f64 {
        if self.from_point == self.to_point {
            return 0.0;
        }
        math::projection_length(
            self.from_point.e,
            self.from_point.n,
            self.to_point.e,
            self.to_point.n,
            point.e,
            point.n,
        )
    }

    /// Point at `position` metres from the start, on the straight segment.
    pub fn point_at(&self, position: f64) -> PointCh {
        if self.length == 0.0 {
            return self.from_point;
        }
        let x = position / self.length;
        PointCh::new(
            math::interpolate(self.from_point.e, self.to_point.e, x),
            math::interpolate(self.from_point.n, self.to_point.n, x),
        )
    }

    #[inline]
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.profile.apply(position)
    }
}
