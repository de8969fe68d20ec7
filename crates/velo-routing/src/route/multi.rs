use std::sync::Arc;

use velo_core::{NodeId, PointCh};

use super::{clamp_position, Route};
use crate::{Edge, RoutePoint, RoutingError, RoutingResult};

/// A route made of contiguous child routes (segments), each of which may
/// itself be a `MultiRoute`.
#[derive(Clone, Debug)]
pub struct MultiRoute {
    segments: Arc<[Route]>,
    length:   f64,
}

impl MultiRoute {
    /// # Errors
    ///
    /// [`RoutingError::EmptyRoute`] if `segments` is empty.
    pub fn new(segments: Vec<Route>) -> RoutingResult<Self> {
        if segments.is_empty() {
            return Err(RoutingError::EmptyRoute);
        }
        let length: f64 = segments.iter().map(Route::length).sum();
        Ok(Self { segments: segments.into(), length })
    }

    pub fn segments(&self) -> &[Route] {
        &self.segments
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// The child containing `position` and the position local to it.  A
    /// position on a join belongs to the earlier child.
    fn locate(&self, position: f64) -> (&Route, f64) {
        let mut position = clamp_position(position, self.length);
        for segment in self.segments.iter() {
            if position <= segment.length() {
                return (segment, position);
            }
            position -= segment.length();
        }
        // Rounding left a remainder past the last child.
        let last = &self.segments[self.segments.len() - 1];
        (last, last.length())
    }

    /// Index of the segment containing `position`, counting the segments
    /// of nested children individually.
    pub fn index_of_segment_at(&self, position: f64) -> usize {
        let mut position = clamp_position(position, self.length);
        let mut index = 0;
        for segment in self.segments.iter() {
            if position <= segment.length() {
                return index + segment.index_of_segment_at(position);
            }
            index += segment.index_of_segment_at(segment.length()) + 1;
            position -= segment.length();
        }
        index - 1
    }

    pub fn edges(&self) -> Vec<Edge> {
        self.segments.iter().flat_map(Route::edges).collect()
    }

    pub fn points(&self) -> Vec<PointCh> {
        let last = self.segments.len() - 1;
        let mut points = Vec::new();
        for (i, segment) in self.segments.iter().enumerate() {
            points.extend(segment.points());
            // The end of a child is the start of the next one.
            if i < last {
                points.pop();
            }
        }
        points
    }

    pub fn point_at(&self, position: f64) -> PointCh {
        let (segment, local) = self.locate(position);
        segment.point_at(local)
    }

    pub fn elevation_at(&self, position: f64) -> f64 {
        let (segment, local) = self.locate(position);
        segment.elevation_at(local)
    }

    pub fn node_closest_to(&self, position: f64) -> NodeId {
        let (segment, local) = self.locate(position);
        segment.node_closest_to(local)
    }

    /// Closest point over all children, with child positions shifted by
    /// the length of the children before them.
    pub fn point_closest_to(&self, point: PointCh) -> RoutePoint {
        let mut closest = RoutePoint::NONE;
        let mut offset = 0.0;
        for segment in self.segments.iter() {
            closest = closest.min(segment.point_closest_to(point).with_position_shifted_by(offset));
            offset += segment.length();
        }
        closest
    }
}
