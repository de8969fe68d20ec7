//! [`RoutePoint`]: the result of a closest-point-on-route query.

use velo_core::PointCh;

/// A point on a route, its position along the route, and its distance to
/// the reference point the query was made for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoutePoint {
    pub point:                 Option<PointCh>,
    /// Metres from the start of the route.
    pub position:              f64,
    pub distance_to_reference: f64,
}

impl RoutePoint {
    /// No point: loses every [`min`](Self::min) against a real candidate.
    pub const NONE: RoutePoint = RoutePoint {
        point:                 None,
        position:              f64::NAN,
        distance_to_reference: f64::INFINITY,
    };

    pub fn new(point: PointCh, position: f64, distance_to_reference: f64) -> Self {
        Self { point: Some(point), position, distance_to_reference }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        self.point.is_none()
    }

    /// The same point, `delta` metres further along the route.
    pub fn with_position_shifted_by(self, delta: f64) -> Self {
        Self { position: self.position + delta, ..self }
    }

    /// The closer of `self` and `that`; `self` on ties.
    #[inline]
    pub fn min(self, that: RoutePoint) -> Self {
        if self.distance_to_reference <= that.distance_to_reference { self } else { that }
    }

    /// Like [`min`](Self::min), building the candidate only when it wins.
    #[inline]
    pub fn min_with(self, point: PointCh, position: f64, distance_to_reference: f64) -> Self {
        if self.distance_to_reference <= distance_to_reference {
            self
        } else {
            RoutePoint::new(point, position, distance_to_reference)
        }
    }
}
