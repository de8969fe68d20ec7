//! Least-cost route search.
//!
//! [`RouteComputer`] runs Dijkstra's algorithm over the graph, weighting
//! every edge by `cost_factor * length`.
//!
//! # Search state
//!
//! Each call allocates its own arrays indexed by `NodeId`:
//!
//! - `distance[v]`: best known weighted distance (`f32`), `+∞` until reached
//!   and `-∞` once settled.  Heap entries for settled nodes are skipped when
//!   popped instead of being removed.
//! - `predecessor[v]` and `via_edge[v]`: the node and edge `v` was reached
//!   from, used to rebuild the path.
//!
//! Nothing is shared between calls, so one computer can serve concurrent
//! searches from several threads.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use velo_core::{EdgeId, NodeId};
use velo_graph::Graph;

use crate::{CostFunction, Edge, Route, RoutingError, RoutingResult, SingleRoute};

/// A frontier entry, ordered by distance then node id.
#[derive(Copy, Clone, Debug)]
struct WeightedNode {
    distance: f32,
    node:     NodeId,
}

impl PartialEq for WeightedNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WeightedNode {}

impl PartialOrd for WeightedNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for WeightedNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance).then(self.node.cmp(&other.node))
    }
}

pub struct RouteComputer<'g, C> {
    graph:         &'g Graph,
    cost_function: C,
}

impl<'g, C: CostFunction> RouteComputer<'g, C> {
    pub fn new(graph: &'g Graph, cost_function: C) -> Self {
        Self { graph, cost_function }
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn cost_function(&self) -> &C {
        &self.cost_function
    }

    /// The least-cost route from `start` to `end`, or `None` if `end` cannot
    /// be reached.
    ///
    /// # Errors
    ///
    /// [`RoutingError::SameEndpoints`] if `start == end`,
    /// [`RoutingError::UnknownNode`] if either id is not a graph node.
    pub fn best_route_between(&self, start: NodeId, end: NodeId) -> RoutingResult<Option<Route>> {
        if start == end {
            return Err(RoutingError::SameEndpoints(start));
        }
        let node_count = self.graph.node_count();
        for node in [start, end] {
            if node.index() >= node_count {
                return Err(RoutingError::UnknownNode { node, node_count });
            }
        }

        let mut distance    = vec![f32::INFINITY; node_count];
        let mut predecessor = vec![NodeId::INVALID; node_count];
        let mut via_edge    = vec![EdgeId::INVALID; node_count];

        distance[start.index()] = 0.0;

        // Reverse makes BinaryHeap (max) behave as a min-heap.
        let mut heap: BinaryHeap<Reverse<WeightedNode>> = BinaryHeap::new();
        heap.push(Reverse(WeightedNode { distance: 0.0, node: start }));

        let mut settled = 0usize;
        while let Some(Reverse(WeightedNode { distance: node_distance, node })) = heap.pop() {
            if distance[node.index()] == f32::NEG_INFINITY {
                continue;
            }
            if node == end {
                let route = self.reconstruct(start, end, &predecessor, &via_edge)?;
                debug!(%start, %end, settled, cost = node_distance, length = route.length(), "route found");
                return Ok(Some(route));
            }

            for edge in self.graph.node_out_edges(node) {
                let factor = self.cost_function.cost_factor(node, edge);
                if !factor.is_finite() {
                    continue;
                }
                let target = self.graph.edge_target_node_id(edge);
                let candidate = node_distance + (factor * self.graph.edge_length(edge)) as f32;
                if candidate < distance[target.index()] {
                    distance[target.index()]    = candidate;
                    predecessor[target.index()] = node;
                    via_edge[target.index()]    = edge;
                    heap.push(Reverse(WeightedNode { distance: candidate, node: target }));
                }
            }

            distance[node.index()] = f32::NEG_INFINITY;
            settled += 1;
        }

        trace!(%start, %end, settled, "frontier exhausted, no route");
        Ok(None)
    }

    fn reconstruct(
        &self,
        start:       NodeId,
        end:         NodeId,
        predecessor: &[NodeId],
        via_edge:    &[EdgeId],
    ) -> RoutingResult<Route> {
        let mut edges = Vec::new();
        let mut current = end;
        while current != start {
            let from = predecessor[current.index()];
            edges.push(Edge::of(self.graph, via_edge[current.index()], from, current));
            current = from;
        }
        edges.reverse();
        Ok(SingleRoute::new(edges)?.into())
    }
}
