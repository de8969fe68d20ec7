use std::sync::Arc;

use velo_core::{math, NodeId, PointCh};

use super::clamp_position;
use crate::{Edge, RoutePoint, RoutingError, RoutingResult};

/// Where a clamped position falls on a single route.
enum Location {
    /// Exactly on the `i`-th node (`0 ..= edge count`).
    Node(usize),
    /// Strictly inside edge `i`, `offset` metres from its start.
    Inside(usize, f64),
}

/// A route without intermediate waypoints, backed by a flat edge list.
#[derive(Clone, Debug)]
pub struct SingleRoute {
    edges:     Arc<[Edge]>,
    /// `positions[i]` is the distance from the start to node `i`.
    positions: Arc<[f64]>,
}

impl SingleRoute {
    /// # Errors
    ///
    /// [`RoutingError::EmptyRoute`] if `edges` is empty.
    pub fn new(edges: Vec<Edge>) -> RoutingResult<Self> {
        if edges.is_empty() {
            return Err(RoutingError::EmptyRoute);
        }
        let mut positions = Vec::with_capacity(edges.len() + 1);
        let mut position = 0.0;
        positions.push(position);
        for edge in &edges {
            position += edge.length;
            positions.push(position);
        }
        Ok(Self { edges: edges.into(), positions: positions.into() })
    }

    /// A single route has one segment.
    pub fn index_of_segment_at(&self, _position: f64) -> usize {
        0
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.positions[self.edges.len()]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn points(&self) -> Vec<PointCh> {
        let mut points: Vec<PointCh> = self.edges.iter().map(|e| e.from_point).collect();
        points.push(self.last_edge().to_point);
        points
    }

    fn last_edge(&self) -> &Edge {
        &self.edges[self.edges.len() - 1]
    }

    fn locate(&self, position: f64) -> Location {
        let position = clamp_position(position, self.length());
        match self.positions.binary_search_by(|p| p.total_cmp(&position)) {
            Ok(node) => Location::Node(node),
            // Err(0) is impossible: positions[0] == 0 <= position.
            Err(i) => Location::Inside(i - 1, position - self.positions[i - 1]),
        }
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        match self.locate(position) {
            Location::Node(i) if i == self.edges.len() => self.last_edge().to_point,
            Location::Node(i) => self.edges[i].from_point,
            Location::Inside(i, offset) => self.edges[i].point_at(offset),
        }
    }

    /// Altitude at `position`.  On an interior node the start of the
    /// following edge is used, or the end of the preceding one when the
    /// following edge has no profile.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self.locate(position) {
            Location::Node(0) => self.edges[0].elevation_at(0.0),
            Location::Node(i) if i == self.edges.len() => {
                let last = self.last_edge();
                last.elevation_at(last.length)
            }
            Location::Node(i) => {
                let next = self.edges[i].elevation_at(0.0);
                if next.is_nan() {
                    let previous = &self.edges[i - 1];
                    previous.elevation_at(previous.length)
                } else {
                    next
                }
            }
            Location::Inside(i, offset) => self.edges[i].elevation_at(offset),
        }
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self.locate(position) {
            Location::Node(i) if i == self.edges.len() => self.last_edge().to_node_id,
            Location::Node(i) => self.edges[i].from_node_id,
            Location::Inside(i, offset) => {
                let edge = &self.edges[i];
                if offset <= edge.length / 2.0 { edge.from_node_id } else { edge.to_node_id }
            }
        }
    }

    /// Closest point over all edges; the earliest edge wins ties.
    pub fn point_closest_to(&self, point: PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        for (edge, &start) in self.edges.iter().zip(self.positions.iter()) {
            let offset = math::clamp(0.0, edge.position_closest_to(point), edge.length);
            let on_edge = edge.point_at(offset);
            closest = closest.min_with(on_edge, start + offset, point.distance_to(on_edge));
        }
        closest
    }
}
