//! Multi-waypoint route planning.
//!
//! [`RoutePlanner`] turns an ordered list of [`Waypoint`]s into a
//! [`MultiRoute`] with one [`SingleRoute`](crate::SingleRoute) per pair of
//! consecutive waypoints, plus its elevation profile.  Single routes are
//! memoised in a [`RouteCache`] owned by the planner.

use tracing::{debug, trace};

use velo_core::{NodeId, PointCh};

use crate::{
    elevation_profile, CostFunction, ElevationProfile, MultiRoute, Route, RouteCache,
    RouteComputer, RoutingResult,
};

// ── Configuration ─────────────────────────────────────────────────────────────

/// Tunables for [`RoutePlanner`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct PlannerConfig {
    /// Largest distance between two elevation-profile samples, metres.
    pub max_step_length: f64,
    /// Maximum number of single routes kept in the cache.
    pub cache_capacity:  usize,
    /// Radius used to snap a point to its nearest graph node, metres.
    pub search_distance: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_step_length: 5.0, cache_capacity: 100, search_distance: 500.0 }
    }
}

// ── Waypoints ─────────────────────────────────────────────────────────────────

/// A point chosen by the user and the graph node it was snapped to.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub point:   PointCh,
    pub node_id: NodeId,
}

/// A planned route and its elevation profile.
#[derive(Clone, Debug)]
pub struct Plan {
    pub route:   Route,
    pub profile: ElevationProfile,
}

// ── Planner ───────────────────────────────────────────────────────────────────

pub struct RoutePlanner<'g, C> {
    computer: RouteComputer<'g, C>,
    cache:    RouteCache,
    config:   PlannerConfig,
}

impl<'g, C: CostFunction> RoutePlanner<'g, C> {
    /// A planner with a fresh cache sized by `config.cache_capacity`.
    pub fn new(computer: RouteComputer<'g, C>, config: PlannerConfig) -> Self {
        let cache = RouteCache::new(config.cache_capacity);
        Self::with_cache(computer, cache, config)
    }

    /// A planner using an existing cache.
    pub fn with_cache(computer: RouteComputer<'g, C>, cache: RouteCache, config: PlannerConfig) -> Self {
        Self { computer, cache, config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn cache(&self) -> &RouteCache {
        &self.cache
    }

    pub fn computer(&self) -> &RouteComputer<'g, C> {
        &self.computer
    }

    /// Snap `point` to the nearest node within `search_distance`.
    pub fn snap(&self, point: PointCh) -> Option<Waypoint> {
        self.computer
            .graph()
            .node_closest_to(point, self.config.search_distance)
            .map(|node_id| Waypoint { point, node_id })
    }

    /// Plan a route through `waypoints` in order.
    ///
    /// Consecutive waypoints snapped to the same node contribute no segment.
    /// Returns `Ok(None)` if fewer than two waypoints are given, if no
    /// segment remains, or if any segment is unreachable.
    ///
    /// # Errors
    ///
    /// Propagates invalid waypoint nodes and an invalid
    /// `max_step_length`.
    pub fn plan(&mut self, waypoints: &[Waypoint]) -> RoutingResult<Option<Plan>> {
        let mut segments = Vec::with_capacity(waypoints.len().saturating_sub(1));
        for pair in waypoints.windows(2) {
            let (start, end) = (pair[0].node_id, pair[1].node_id);
            if start == end {
                continue;
            }
            match self.single_route(start, end)? {
                Some(route) => segments.push(route),
                None => {
                    debug!(%start, %end, "waypoints are not connected");
                    return Ok(None);
                }
            }
        }
        if segments.is_empty() {
            return Ok(None);
        }

        let route = Route::from(MultiRoute::new(segments)?);
        let profile = elevation_profile(&route, self.config.max_step_length)?;
        Ok(Some(Plan { route, profile }))
    }

    fn single_route(&mut self, start: NodeId, end: NodeId) -> RoutingResult<Option<Route>> {
        if let Some(route) = self.cache.get(start, end) {
            trace!(%start, %end, "route cache hit");
            return Ok(Some(route));
        }
        trace!(%start, %end, "route cache miss");
        let route = self.computer.best_route_between(start, end)?;
        if let Some(route) = &route {
            self.cache.insert(start, end, route.clone());
        }
        Ok(route)
    }
}

/// Index of the waypoint pair whose segment contains `position` on a route
/// planned from `waypoints`.
///
/// Pairs snapped to the same node have no segment in the route but still
/// occupy an index here.
pub fn index_of_non_empty_segment_at(waypoints: &[Waypoint], route: &Route, position: f64) -> usize {
    let mut index = route.index_of_segment_at(position);
    let mut i = 0;
    while i <= index && i + 1 < waypoints.len() {
        if waypoints[i].node_id == waypoints[i + 1].node_id {
            index += 1;
        }
        i += 1;
    }
    index
}
