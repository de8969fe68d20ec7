//! Edge cost factors.
//!
//! The route computer multiplies the length of every edge it relaxes by the
//! factor returned here.  Factors are at least 1; `f64::INFINITY` marks an
//! edge as impassable and the edge is never relaxed.

use velo_core::{EdgeId, NodeId};
use velo_graph::Attribute::*;
use velo_graph::{AttributeSet, Graph};

/// Cost contract used by [`RouteComputer`](crate::RouteComputer).
///
/// Implementations must be `Send + Sync` so one computer can be shared by
/// several threads searching independent node pairs.
pub trait CostFunction: Send + Sync {
    /// Factor applied to the length of `edge` when leaving `node` through it.
    fn cost_factor(&self, node: NodeId, edge: EdgeId) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(NodeId, EdgeId) -> f64 + Send + Sync,
{
    #[inline]
    fn cost_factor(&self, node: NodeId, edge: EdgeId) -> f64 {
        self(node, edge)
    }
}

/// Shortest physical distance: every edge costs its length.
#[derive(Copy, Clone, Debug, Default)]
pub struct UniformCost;

impl CostFunction for UniformCost {
    #[inline]
    fn cost_factor(&self, _node: NodeId, _edge: EdgeId) -> f64 {
        1.0
    }
}

// ── City bike ─────────────────────────────────────────────────────────────────

const NO_BICYCLES: AttributeSet = AttributeSet::of(&[
    HighwayMotorway,
    HighwayMotorwayLink,
    HighwayTrunk,
    HighwayTrunkLink,
    HighwaySteps,
    MotorroadYes,
    BicycleNo,
    BicyclePrivate,
    BicycleUseSidepath,
    VehicleNo,
    VehiclePrivate,
    AccessNo,
    AccessPrivate,
]);

const EXPLICITLY_ALLOWED: AttributeSet =
    AttributeSet::of(&[BicycleYes, BicycleDesignated, BicyclePermissive]);

const CYCLE_INFRASTRUCTURE: AttributeSet =
    AttributeSet::of(&[HighwayCycleway, BicycleDesignated, LcnYes, RcnYes, NcnYes]);

const CONTRAFLOW_ALLOWED: AttributeSet = AttributeSet::of(&[
    OnewayBicycleNo,
    CyclewayOpposite,
    CyclewayOppositeLane,
    CyclewayOppositeTrack,
]);

const SHARED_WITH_PEDESTRIANS: AttributeSet =
    AttributeSet::of(&[HighwayFootway, HighwayPath, HighwayPedestrian, BicycleDismount]);

const ROUGH_TRACKS: AttributeSet =
    AttributeSet::of(&[TracktypeGrade3, TracktypeGrade4, TracktypeGrade5]);

const UNPAVED: AttributeSet = AttributeSet::of(&[
    SurfaceUnpaved,
    SurfaceGravel,
    SurfaceGround,
    SurfaceDirt,
    SurfaceGrass,
    SurfaceSand,
    SurfaceCobblestone,
    SurfaceSett,
]);

const MAJOR_ROADS: AttributeSet = AttributeSet::of(&[
    HighwayPrimary,
    HighwayPrimaryLink,
    HighwaySecondary,
    HighwaySecondaryLink,
]);

/// Attribute-driven preferences of an urban cyclist.
///
/// | Edge                                              | Factor |
/// |---------------------------------------------------|--------|
/// | motorway, trunk, steps, `bicycle=no`, `access=no`  | ∞      |
/// | against a one-way street without contraflow       | ∞      |
/// | cycleway, `bicycle=designated`, cycle network     | 1      |
/// | footway, path, pedestrian zone                    | × 2    |
/// | track (× 2 more for grades 3 to 5)                | × 1.5  |
/// | unpaved surface                                   | × 2    |
/// | primary or secondary road                         | × 1.5  |
#[derive(Copy, Clone, Debug)]
pub struct CityBikeCost<'g> {
    graph: &'g Graph,
}

impl<'g> CityBikeCost<'g> {
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    fn is_wrong_way(&self, edge: EdgeId, attributes: AttributeSet) -> bool {
        if attributes.contains(OnewayBicycleYes) {
            return self.graph.edge_is_inverted(edge);
        }
        if attributes.intersects(CONTRAFLOW_ALLOWED) {
            return false;
        }
        // `oneway=-1` ways are open against their digitised direction only.
        (attributes.contains(OnewayYes) && self.graph.edge_is_inverted(edge))
            || (attributes.contains(OnewayM1) && !self.graph.edge_is_inverted(edge))
    }
}

impl CostFunction for CityBikeCost<'_> {
    fn cost_factor(&self, _node: NodeId, edge: EdgeId) -> f64 {
        let attributes = self.graph.edge_attributes(edge);

        if attributes.intersects(NO_BICYCLES) && !attributes.intersects(EXPLICITLY_ALLOWED) {
            return f64::INFINITY;
        }
        if self.is_wrong_way(edge, attributes) {
            return f64::INFINITY;
        }
        if attributes.intersects(CYCLE_INFRASTRUCTURE) {
            return 1.0;
        }

        let mut factor = 1.0;
        if attributes.intersects(SHARED_WITH_PEDESTRIANS) {
            factor *= 2.0;
        }
        if attributes.contains(HighwayTrack) {
            factor *= 1.5;
            if attributes.intersects(ROUGH_TRACKS) {
                factor *= 2.0;
            }
        }
        if attributes.intersects(UNPAVED) {
            factor *= 2.0;
        }
        if attributes.intersects(MAJOR_ROADS) {
            factor *= 1.5;
        }
        factor
    }
}
