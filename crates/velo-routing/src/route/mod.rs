//! Routes: [`SingleRoute`] (a flat edge list) and [`MultiRoute`] (a list of
//! contiguous child routes, nested to any depth), unified by [`Route`].
//!
//! Every position query clamps its argument to `[0, length]`, so all
//! methods are defined for every real position.

mod multi;
mod single;

pub use multi::MultiRoute;
pub use single::SingleRoute;

use velo_core::{math, NodeId, PointCh};

use crate::{Edge, RoutePoint};

/// An immutable route.  Cloning is cheap: edges and children are shared.
#[derive(Clone, Debug)]
pub enum Route {
    Single(SingleRoute),
    Multi(MultiRoute),
}

impl Route {
    /// Index of the waypoint-to-waypoint segment containing `position`.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        match self {
            Route::Single(r) => r.index_of_segment_at(position),
            Route::Multi(r) => r.index_of_segment_at(position),
        }
    }

    /// Total length, metres.
    pub fn length(&self) -> f64 {
        match self {
            Route::Single(r) => r.length(),
            Route::Multi(r) => r.length(),
        }
    }

    /// All edges, in order.
    pub fn edges(&self) -> Vec<Edge> {
        match self {
            Route::Single(r) => r.edges().to_vec(),
            Route::Multi(r) => r.edges(),
        }
    }

    /// Edge endpoints in order, without duplicates at joins:
    /// `points().len() == edges().len() + 1`.
    pub fn points(&self) -> Vec<PointCh> {
        match self {
            Route::Single(r) => r.points(),
            Route::Multi(r) => r.points(),
        }
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        match self {
            Route::Single(r) => r.point_at(position),
            Route::Multi(r) => r.point_at(position),
        }
    }

    /// Altitude at `position`; NaN where the route has no altitude data.
    pub fn elevation_at(&self, position: f64) -> f64 {
        match self {
            Route::Single(r) => r.elevation_at(position),
            Route::Multi(r) => r.elevation_at(position),
        }
    }

    /// The endpoint of the edge containing `position` nearest to it; the
    /// edge's start on ties.
    pub fn node_closest_to(&self, position: f64) -> NodeId {
        match self {
            Route::Single(r) => r.node_closest_to(position),
            Route::Multi(r) => r.node_closest_to(position),
        }
    }

    /// The point of the route closest to `point`.
    pub fn point_closest_to(&self, point: PointCh) -> RoutePoint {
        match self {
            Route::Single(r) => r.point_closest_to(point),
            Route::Multi(r) => r.point_closest_to(point),
        }
    }
}

impl From<SingleRoute> for Route {
    fn from(route: SingleRoute) -> Self {
        Route::Single(route)
    }
}

impl From<MultiRoute> for Route {
    fn from(route: MultiRoute) -> Self {
        Route::Multi(route)
    }
}

/// Clamp `position` into `[0, length]`, mapping NaN and -0 to 0.
#[inline]
fn clamp_position(position: f64, length: f64) -> f64 {
    let position = math::clamp(0.0, position, length);
    if position > 0.0 { position } else { 0.0 }
}
