//! Unit tests for velo-routing.
//!
//! Route-abstraction tests use hand-made edges along an east-west line;
//! search and planning tests use small graphs built with `GraphBuilder`.

#[cfg(test)]
mod helpers {
    use velo_core::{Function, NodeId, PointCh};
    use velo_graph::{Attribute, AttributeSet, Graph, GraphBuilder};

    use crate::{Edge, Route, SingleRoute};

    /// A point `e` metres east of the fixture origin.
    pub fn p(e: f64) -> PointCh {
        PointCh::new(2_600_000.0 + e, 1_200_000.0)
    }

    /// An eastward edge between the points at `from_e` and `to_e`, with a
    /// constant altitude.
    pub fn edge(from: u32, to: u32, from_e: f64, to_e: f64, elevation: f64) -> Edge {
        Edge {
            from_node_id: NodeId(from),
            to_node_id:   NodeId(to),
            from_point:   p(from_e),
            to_point:     p(to_e),
            length:       to_e - from_e,
            profile:      Function::constant(elevation),
        }
    }

    pub fn single(edges: Vec<Edge>) -> Route {
        SingleRoute::new(edges).unwrap().into()
    }

    pub fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
    }

    /// ```text
    ///   0 ── 500 m ── 1 ── 300 m ── 2          3 (isolated)
    /// ```
    ///
    /// Road 0-1 climbs linearly from 400 m to 462.5 m; road 1-2 has no
    /// altitude data.
    pub fn line_graph() -> Graph {
        let mut b = GraphBuilder::new();
        let n0 = b.add_node(p(0.0));
        let n1 = b.add_node(p(500.0));
        let n2 = b.add_node(p(800.0));
        b.add_node(p(1_500.0));
        let residential = AttributeSet::of(&[Attribute::HighwayResidential]);
        let climb: Vec<f32> = (0..251).map(|i| 400.0 + i as f32 * 0.25).collect();
        b.add_road(n0, n1, 500.0, residential, Some(climb.as_slice())).unwrap();
        b.add_road(n1, n2, 300.0, residential, None).unwrap();
        b.build().unwrap()
    }

    /// ```text
    ///            b
    ///   500 m  /   \  500 m
    ///         a ─── c
    ///          600 m
    /// ```
    pub fn triangle_graph(direct: AttributeSet) -> Graph {
        let mut b = GraphBuilder::new();
        let a = b.add_node(PointCh::new(2_600_000.0, 1_200_000.0));
        let m = b.add_node(PointCh::new(2_600_300.0, 1_200_400.0));
        let c = b.add_node(PointCh::new(2_600_600.0, 1_200_000.0));
        let residential = AttributeSet::of(&[Attribute::HighwayResidential]);
        b.add_road(a, c, 600.0, direct, None).unwrap();
        b.add_road(a, m, 500.0, residential, None).unwrap();
        b.add_road(m, c, 500.0, residential, None).unwrap();
        b.build().unwrap()
    }
}

// ── Route points ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod route_point {
    use super::helpers::p;
    use crate::RoutePoint;

    #[test]
    fn none_never_wins() {
        let finite = RoutePoint::new(p(10.0), 10.0, 1_000_000.0);
        assert_eq!(RoutePoint::NONE.min(finite), finite);
        assert_eq!(finite.min(RoutePoint::NONE), finite);
        assert!(RoutePoint::NONE.min(RoutePoint::NONE).is_none());
    }

    #[test]
    fn ties_keep_self() {
        let a = RoutePoint::new(p(0.0), 1.0, 5.0);
        let b = RoutePoint::new(p(10.0), 2.0, 5.0);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), b);
        assert_eq!(a.min_with(p(20.0), 3.0, 5.0), a);
    }

    #[test]
    fn min_is_associative_and_idempotent() {
        let a = RoutePoint::new(p(0.0), 0.0, 3.0);
        let b = RoutePoint::new(p(1.0), 1.0, 1.0);
        let c = RoutePoint::new(p(2.0), 2.0, 2.0);
        assert_eq!(a.min(b).min(c), a.min(b.min(c)));
        assert_eq!(a.min(b).min(c), b);
        assert_eq!(c.min(c), c);
    }

    #[test]
    fn min_with_builds_winner() {
        let won = RoutePoint::NONE.min_with(p(3.0), 3.0, 4.0);
        assert_eq!(won, RoutePoint::new(p(3.0), 3.0, 4.0));
    }

    #[test]
    fn shift_moves_position_only() {
        let a = RoutePoint::new(p(0.0), 1.0, 5.0);
        let shifted = a.with_position_shifted_by(-0.5);
        assert_eq!(shifted.position, 0.5);
        assert_eq!(shifted.point, a.point);
        assert_eq!(shifted.distance_to_reference, 5.0);
    }
}

// ── Route edges ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod edge {
    use velo_core::PointCh;

    use super::helpers::{assert_close, edge, p};

    #[test]
    fn point_at_interpolates() {
        let e = edge(0, 1, 100.0, 300.0, 0.0);
        assert_eq!(e.point_at(0.0), p(100.0));
        assert_eq!(e.point_at(200.0), p(300.0));
        assert_close(e.point_at(50.0).e, 2_600_150.0);
    }

    #[test]
    fn position_closest_to_is_unclamped() {
        let e = edge(0, 1, 100.0, 300.0, 0.0);
        assert_close(e.position_closest_to(PointCh::new(2_600_150.0, 1_200_040.0)), 50.0);
        assert_close(e.position_closest_to(p(0.0)), -100.0);
        assert_close(e.position_closest_to(p(500.0)), 400.0);
    }
}

// ── Single routes ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod single_route {
    use velo_core::{NodeId, PointCh};

    use super::helpers::{assert_close, edge, p, single};
    use crate::{Route, RoutingError, SingleRoute};

    fn three_edges() -> Route {
        single(vec![
            edge(0, 1, 0.0, 100.0, 10.0),
            edge(1, 2, 100.0, 300.0, 20.0),
            edge(2, 3, 300.0, 400.0, 30.0),
        ])
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(SingleRoute::new(vec![]), Err(RoutingError::EmptyRoute)));
    }

    #[test]
    fn length_edges_points() {
        let r = three_edges();
        assert_eq!(r.length(), 400.0);
        assert_eq!(r.edges().len(), 3);
        assert_eq!(r.points(), vec![p(0.0), p(100.0), p(300.0), p(400.0)]);
        assert_eq!(r.index_of_segment_at(250.0), 0);
    }

    #[test]
    fn point_at_ends_and_clamping() {
        let r = three_edges();
        assert_eq!(r.point_at(0.0), p(0.0));
        assert_eq!(r.point_at(400.0), p(400.0));
        assert_eq!(r.point_at(-5.0), p(0.0));
        assert_eq!(r.point_at(1e9), p(400.0));
        assert_eq!(r.point_at(f64::NAN), p(0.0));
        assert_eq!(r.point_at(100.0), p(100.0));
        assert_close(r.point_at(150.0).e, 2_600_150.0);
    }

    #[test]
    fn elevation_at_nodes_and_inside() {
        let r = three_edges();
        assert_eq!(r.elevation_at(0.0), 10.0);
        assert_eq!(r.elevation_at(50.0), 10.0);
        // Interior node: start of the following edge.
        assert_eq!(r.elevation_at(100.0), 20.0);
        assert_eq!(r.elevation_at(400.0), 30.0);
        assert_eq!(r.elevation_at(500.0), 30.0);
    }

    #[test]
    fn elevation_at_node_before_missing_profile() {
        let r = single(vec![edge(0, 1, 0.0, 100.0, 10.0), edge(1, 2, 100.0, 200.0, f64::NAN)]);
        assert_eq!(r.elevation_at(100.0), 10.0);
        assert!(r.elevation_at(150.0).is_nan());
    }

    #[test]
    fn node_closest_to_ties_toward_start() {
        let r = three_edges();
        assert_eq!(r.node_closest_to(50.0), NodeId(0));
        assert_eq!(r.node_closest_to(51.0), NodeId(1));
        assert_eq!(r.node_closest_to(100.0), NodeId(1));
        assert_eq!(r.node_closest_to(199.0), NodeId(1));
        assert_eq!(r.node_closest_to(400.0), NodeId(3));
        assert_eq!(r.node_closest_to(-1.0), NodeId(0));
    }

    #[test]
    fn point_closest_to_projects_onto_best_edge() {
        let r = three_edges();
        let found = r.point_closest_to(PointCh::new(2_600_150.0, 1_200_030.0));
        assert_close(found.position, 150.0);
        assert_close(found.distance_to_reference, 30.0);
        assert_eq!(found.point, Some(r.point_at(150.0)));
    }

    #[test]
    fn point_closest_to_clamps_to_route_ends() {
        let r = three_edges();
        let before = r.point_closest_to(p(-100.0));
        assert_eq!(before.point, Some(p(0.0)));
        assert_eq!(before.position, 0.0);
        assert_close(before.distance_to_reference, 100.0);

        let after = r.point_closest_to(p(600.0));
        assert_eq!(after.point, Some(p(400.0)));
        assert_eq!(after.position, 400.0);
        assert_close(after.distance_to_reference, 200.0);
    }
}

// ── Multi routes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod multi_route {
    use velo_core::{NodeId, PointCh};

    use super::helpers::{assert_close, edge, p, single};
    use crate::{MultiRoute, Route, RoutingError};

    /// Two children: [0 → 100] and [100 → 300 → 400].
    fn two_segments() -> Route {
        let a = single(vec![edge(0, 1, 0.0, 100.0, 10.0)]);
        let b = single(vec![edge(1, 2, 100.0, 300.0, 20.0), edge(2, 3, 300.0, 400.0, 30.0)]);
        MultiRoute::new(vec![a, b]).unwrap().into()
    }

    /// `two_segments` nested inside another multi route, followed by
    /// [400 → 450].
    fn nested() -> Route {
        let tail = single(vec![edge(3, 4, 400.0, 450.0, 40.0)]);
        MultiRoute::new(vec![two_segments(), tail]).unwrap().into()
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(MultiRoute::new(vec![]), Err(RoutingError::EmptyRoute)));
    }

    #[test]
    fn length_is_sum_of_children() {
        assert_eq!(two_segments().length(), 400.0);
        assert_eq!(nested().length(), 450.0);
        assert_eq!(nested().edges().len(), 4);
    }

    #[test]
    fn points_drop_duplicate_joins() {
        let r = nested();
        assert_eq!(r.points(), vec![p(0.0), p(100.0), p(300.0), p(400.0), p(450.0)]);
        assert_eq!(r.points().len(), r.edges().len() + 1);
    }

    #[test]
    fn point_at_boundaries() {
        let r = nested();
        for boundary in [0.0, 100.0, 400.0, 450.0] {
            assert_eq!(r.point_at(boundary), p(boundary));
        }
        assert_eq!(r.point_at(-10.0), p(0.0));
        assert_eq!(r.point_at(10_000.0), p(450.0));
        assert_close(r.point_at(200.0).e, 2_600_200.0);
    }

    #[test]
    fn elevation_at_delegates_to_child() {
        let r = two_segments();
        assert_eq!(r.elevation_at(50.0), 10.0);
        // A join belongs to the earlier child.
        assert_eq!(r.elevation_at(100.0), 10.0);
        assert_eq!(r.elevation_at(150.0), 20.0);
        assert_eq!(r.elevation_at(350.0), 30.0);
    }

    #[test]
    fn node_closest_to_delegates_to_child() {
        let r = nested();
        assert_eq!(r.node_closest_to(40.0), NodeId(0));
        assert_eq!(r.node_closest_to(260.0), NodeId(2));
        assert_eq!(r.node_closest_to(430.0), NodeId(4));
    }

    #[test]
    fn index_of_segment_counts_nested_children() {
        let r = two_segments();
        assert_eq!(r.index_of_segment_at(-1.0), 0);
        assert_eq!(r.index_of_segment_at(50.0), 0);
        assert_eq!(r.index_of_segment_at(100.0), 0);
        assert_eq!(r.index_of_segment_at(150.0), 1);
        assert_eq!(r.index_of_segment_at(1_000.0), 1);

        let n = nested();
        assert_eq!(n.index_of_segment_at(0.0), 0);
        assert_eq!(n.index_of_segment_at(400.0), 1);
        assert_eq!(n.index_of_segment_at(420.0), 2);
    }

    #[test]
    fn point_closest_to_uses_global_positions() {
        let r = two_segments();
        let found = r.point_closest_to(PointCh::new(2_600_200.0, 1_200_030.0));
        assert_close(found.position, 200.0);
        assert_close(found.distance_to_reference, 30.0);

        let tail = nested().point_closest_to(PointCh::new(2_600_440.0, 1_199_990.0));
        assert_close(tail.position, 440.0);
        assert_close(tail.distance_to_reference, 10.0);
    }
}

// ── Elevation profiles ────────────────────────────────────────────────────────

#[cfg(test)]
mod profile {
    use super::helpers::{assert_close, edge, single};
    use crate::{elevation_profile, ElevationProfile, RoutingError};

    #[test]
    fn invalid_profiles_rejected() {
        assert!(matches!(
            ElevationProfile::new(0.0, vec![1.0_f32, 2.0]),
            Err(RoutingError::InvalidProfile { .. })
        ));
        assert!(matches!(
            ElevationProfile::new(10.0, vec![1.0_f32]),
            Err(RoutingError::InvalidProfile { samples: 1, .. })
        ));
    }

    #[test]
    fn statistics() {
        let profile = ElevationProfile::new(3.0, vec![1.0_f32, 3.0, 2.0, 5.0]).unwrap();
        assert_eq!(profile.length(), 3.0);
        assert_eq!(profile.min_elevation(), 1.0);
        assert_eq!(profile.max_elevation(), 5.0);
        assert_eq!(profile.total_ascent(), 5.0);
        assert_eq!(profile.total_descent(), 1.0);
        assert_eq!(profile.elevation_at(1.5), 2.5);
        assert_eq!(profile.elevation_at(-1.0), 1.0);
        assert_eq!(profile.elevation_at(10.0), 5.0);
    }

    #[test]
    fn invalid_step_rejected() {
        let r = single(vec![edge(0, 1, 0.0, 100.0, 10.0)]);
        assert!(matches!(elevation_profile(&r, 0.0), Err(RoutingError::InvalidStep(_))));
        assert!(matches!(elevation_profile(&r, -1.0), Err(RoutingError::InvalidStep(_))));
    }

    #[test]
    fn unrepresentable_step_count_rejected() {
        let r = single(vec![edge(0, 1, 0.0, 100.0, 10.0)]);
        assert!(matches!(elevation_profile(&r, 1e-300), Err(RoutingError::InvalidStep(_))));
        assert!(matches!(
            elevation_profile(&r, f64::MIN_POSITIVE),
            Err(RoutingError::InvalidStep(_))
        ));
    }

    #[test]
    fn sample_count_and_spacing() {
        let r = single(vec![edge(0, 1, 0.0, 100.0, 10.0)]);
        let profile = elevation_profile(&r, 30.0).unwrap();
        // ceil(100 / 30) + 1 samples, 25 m apart.
        assert_eq!(profile.samples().len(), 5);
        assert_eq!(profile.length(), 100.0);
    }

    #[test]
    fn route_without_altitude_is_flat_zero() {
        let r = single(vec![edge(0, 1, 0.0, 100.0, f64::NAN)]);
        let profile = elevation_profile(&r, 10.0).unwrap();
        assert_eq!(profile.samples(), &[0.0; 11][..]);
    }

    #[test]
    fn gaps_are_filled() {
        // No data on [0, 10] and [20, 40].
        let r = single(vec![
            edge(0, 1, 0.0, 10.0, f64::NAN),
            edge(1, 2, 10.0, 20.0, 100.0),
            edge(2, 3, 20.0, 40.0, f64::NAN),
            edge(3, 4, 40.0, 50.0, 200.0),
        ]);
        let profile = elevation_profile(&r, 5.0).unwrap();
        assert_eq!(
            profile.samples(),
            &[100.0, 100.0, 100.0, 100.0, 100.0, 125.0, 150.0, 175.0, 200.0, 200.0, 200.0][..]
        );
        assert_close(profile.total_ascent(), 100.0);
    }

    #[test]
    fn trailing_gap_repeats_last_sample() {
        let r = single(vec![edge(0, 1, 0.0, 10.0, 100.0), edge(1, 2, 10.0, 20.0, f64::NAN)]);
        let profile = elevation_profile(&r, 5.0).unwrap();
        assert_eq!(profile.samples(), &[100.0; 5][..]);
        assert!(profile.samples().iter().all(|s| !s.is_nan()));
    }
}

// ── Route computer ────────────────────────────────────────────────────────────

#[cfg(test)]
mod computer {
    use velo_core::{EdgeId, NodeId};
    use velo_graph::{Attribute, AttributeSet};

    use super::helpers::{line_graph, triangle_graph};
    use crate::{Route, RouteComputer, RoutingError, UniformCost};

    #[test]
    fn three_node_line() {
        let graph = line_graph();
        let computer = RouteComputer::new(&graph, UniformCost);
        let route = computer.best_route_between(NodeId(0), NodeId(2)).unwrap().unwrap();

        assert!(matches!(route, Route::Single(_)));
        assert_eq!(route.length(), 800.0);
        assert_eq!(route.edges().len(), 2);
        assert_eq!(route.point_at(500.0), graph.node_point(NodeId(1)));
        assert_eq!(route.node_closest_to(799.0), NodeId(2));
        assert_eq!(route.point_at(0.0), route.edges()[0].from_point);
        assert_eq!(route.point_at(800.0), route.edges()[1].to_point);
    }

    #[test]
    fn route_carries_edge_profiles() {
        let graph = line_graph();
        let computer = RouteComputer::new(&graph, UniformCost);
        let route = computer.best_route_between(NodeId(0), NodeId(2)).unwrap().unwrap();
        assert_eq!(route.elevation_at(0.0), 400.0);
        assert_eq!(route.elevation_at(250.0), 431.25);
        // The following edge has no profile, so the node takes the end of the previous one.
        assert_eq!(route.elevation_at(500.0), 462.5);
        assert!(route.elevation_at(600.0).is_nan());

        let back = computer.best_route_between(NodeId(1), NodeId(0)).unwrap().unwrap();
        assert_eq!(back.elevation_at(0.0), 462.5);
        assert_eq!(back.elevation_at(500.0), 400.0);
    }

    #[test]
    fn same_endpoints_rejected() {
        let graph = line_graph();
        let computer = RouteComputer::new(&graph, UniformCost);
        assert_eq!(
            computer.best_route_between(NodeId(1), NodeId(1)).unwrap_err(),
            RoutingError::SameEndpoints(NodeId(1))
        );
    }

    #[test]
    fn unknown_node_rejected() {
        let graph = line_graph();
        let computer = RouteComputer::new(&graph, UniformCost);
        assert!(matches!(
            computer.best_route_between(NodeId(0), NodeId(99)),
            Err(RoutingError::UnknownNode { .. })
        ));
    }

    #[test]
    fn unreachable_is_none() {
        let graph = line_graph();
        let computer = RouteComputer::new(&graph, UniformCost);
        assert!(computer.best_route_between(NodeId(0), NodeId(3)).unwrap().is_none());
    }

    #[test]
    fn shortest_by_length() {
        let graph = triangle_graph(AttributeSet::EMPTY);
        let computer = RouteComputer::new(&graph, UniformCost);
        let route = computer.best_route_between(NodeId(0), NodeId(2)).unwrap().unwrap();
        assert_eq!(route.length(), 600.0);
        assert_eq!(route.edges().len(), 1);
    }

    #[test]
    fn cost_factor_changes_route() {
        let graph = triangle_graph(AttributeSet::EMPTY);
        let g = &graph;
        let avoid_direct =
            move |_: NodeId, e: EdgeId| if g.edge_length(e) == 600.0 { 2.0 } else { 1.0 };
        let computer = RouteComputer::new(&graph, avoid_direct);
        let route = computer.best_route_between(NodeId(0), NodeId(2)).unwrap().unwrap();
        assert_eq!(route.length(), 1_000.0);
        assert_eq!(
            route.points(),
            vec![graph.node_point(NodeId(0)), graph.node_point(NodeId(1)), graph.node_point(NodeId(2))]
        );
    }

    #[test]
    fn impassable_edges_are_skipped() {
        let graph = triangle_graph(AttributeSet::EMPTY);
        let computer = RouteComputer::new(&graph, |_: NodeId, _: EdgeId| f64::INFINITY);
        assert!(computer.best_route_between(NodeId(0), NodeId(2)).unwrap().is_none());
    }

    #[test]
    fn shared_between_threads() {
        let graph = triangle_graph(AttributeSet::of(&[Attribute::HighwayResidential]));
        let computer = RouteComputer::new(&graph, UniformCost);
        let computer = &computer;
        let lengths: Vec<f64> = std::thread::scope(|s| {
            let handles: Vec<_> = [(0, 2), (2, 0), (0, 1)]
                .into_iter()
                .map(|(a, b)| {
                    s.spawn(move || {
                        computer
                            .best_route_between(NodeId(a), NodeId(b))
                            .unwrap()
                            .map_or(f64::NAN, |r| r.length())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(lengths, vec![600.0, 600.0, 500.0]);
    }
}

// ── Cost models ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use velo_core::{NodeId, PointCh};
    use velo_graph::{Attribute, AttributeSet, Graph, GraphBuilder};

    use super::helpers::triangle_graph;
    use crate::{CityBikeCost, CostFunction, RouteComputer};

    use Attribute::*;

    /// Factors of the `0 → 1` and `1 → 0` edges of one road tagged `attributes`.
    fn factors(attributes: &[Attribute]) -> (f64, f64) {
        let mut b = GraphBuilder::new();
        let a = b.add_node(PointCh::new(2_600_000.0, 1_200_000.0));
        let c = b.add_node(PointCh::new(2_600_100.0, 1_200_000.0));
        b.add_road(a, c, 100.0, AttributeSet::of(attributes), None).unwrap();
        let graph: Graph = b.build().unwrap();
        let cost = CityBikeCost::new(&graph);
        let forward = graph.node_out_edge_id(a, 0);
        let backward = graph.node_out_edge_id(c, 0);
        (cost.cost_factor(a, forward), cost.cost_factor(c, backward))
    }

    #[test]
    fn cycle_infrastructure_is_neutral() {
        assert_eq!(factors(&[HighwayCycleway, SurfaceGravel]), (1.0, 1.0));
        assert_eq!(factors(&[HighwayResidential, LcnYes]), (1.0, 1.0));
        assert_eq!(factors(&[HighwayResidential]), (1.0, 1.0));
    }

    #[test]
    fn forbidden_ways_are_impassable() {
        assert_eq!(factors(&[HighwayMotorway]), (f64::INFINITY, f64::INFINITY));
        assert_eq!(factors(&[HighwaySteps]), (f64::INFINITY, f64::INFINITY));
        assert_eq!(factors(&[HighwayResidential, BicycleNo]), (f64::INFINITY, f64::INFINITY));
        assert_eq!(factors(&[HighwayService, AccessPrivate]), (f64::INFINITY, f64::INFINITY));
        // An explicit permission overrides the general restriction.
        assert_eq!(factors(&[HighwayService, AccessNo, BicycleYes]), (1.0, 1.0));
    }

    #[test]
    fn one_way_streets() {
        assert_eq!(factors(&[HighwayResidential, OnewayYes]), (1.0, f64::INFINITY));
        assert_eq!(factors(&[HighwayResidential, OnewayM1]), (f64::INFINITY, 1.0));
        assert_eq!(factors(&[HighwayResidential, OnewayYes, OnewayBicycleNo]), (1.0, 1.0));
        assert_eq!(factors(&[HighwayResidential, OnewayYes, CyclewayOppositeLane]), (1.0, 1.0));
        assert_eq!(factors(&[HighwayCycleway, OnewayBicycleYes]), (1.0, f64::INFINITY));
    }

    #[test]
    fn penalties_multiply() {
        assert_eq!(factors(&[HighwayFootway]).0, 2.0);
        assert_eq!(factors(&[HighwayTrack, TracktypeGrade4]).0, 3.0);
        assert_eq!(factors(&[HighwaySecondary, SurfaceGravel]).0, 3.0);
        assert_eq!(factors(&[HighwayPrimary]).0, 1.5);
    }

    #[test]
    fn avoids_motorway() {
        let graph = triangle_graph(AttributeSet::of(&[HighwayMotorway]));
        let computer = RouteComputer::new(&graph, CityBikeCost::new(&graph));
        let route = computer.best_route_between(NodeId(0), NodeId(2)).unwrap().unwrap();
        assert_eq!(route.length(), 1_000.0);
    }
}

// ── Route cache ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use velo_core::NodeId;

    use super::helpers::{edge, single};
    use crate::RouteCache;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = RouteCache::new(2);
        cache.insert(NodeId(0), NodeId(1), single(vec![edge(0, 1, 0.0, 10.0, 0.0)]));
        cache.insert(NodeId(1), NodeId(2), single(vec![edge(1, 2, 10.0, 30.0, 0.0)]));
        assert!(cache.get(NodeId(0), NodeId(1)).is_some());

        cache.insert(NodeId(2), NodeId(3), single(vec![edge(2, 3, 30.0, 60.0, 0.0)]));
        assert_eq!(cache.len(), 2);
        assert!(cache.contains(NodeId(0), NodeId(1)));
        assert!(!cache.contains(NodeId(1), NodeId(2)));
        assert_eq!(cache.get(NodeId(2), NodeId(3)).map(|r| r.length()), Some(30.0));
    }

    #[test]
    fn replacing_a_key_does_not_evict() {
        let mut cache = RouteCache::new(2);
        cache.insert(NodeId(0), NodeId(1), single(vec![edge(0, 1, 0.0, 10.0, 0.0)]));
        cache.insert(NodeId(1), NodeId(2), single(vec![edge(1, 2, 10.0, 30.0, 0.0)]));
        cache.insert(NodeId(0), NodeId(1), single(vec![edge(0, 1, 0.0, 20.0, 0.0)]));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(NodeId(0), NodeId(1)).map(|r| r.length()), Some(20.0));
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = RouteCache::new(0);
        cache.insert(NodeId(0), NodeId(1), single(vec![edge(0, 1, 0.0, 10.0, 0.0)]));
        assert!(cache.is_empty());
        assert!(cache.get(NodeId(0), NodeId(1)).is_none());
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner {
    use velo_core::{NodeId, PointCh};
    use velo_graph::Graph;

    use super::helpers::{assert_close, line_graph, p};
    use crate::{
        index_of_non_empty_segment_at, PlannerConfig, Route, RouteComputer, RoutePlanner,
        UniformCost, Waypoint,
    };

    fn waypoint(graph: &Graph, node: u32) -> Waypoint {
        Waypoint { point: graph.node_point(NodeId(node)), node_id: NodeId(node) }
    }

    fn planner(graph: &Graph, config: PlannerConfig) -> RoutePlanner<'_, UniformCost> {
        RoutePlanner::new(RouteComputer::new(graph, UniformCost), config)
    }

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.max_step_length, 5.0);
        assert_eq!(config.cache_capacity, 100);
        assert_eq!(config.search_distance, 500.0);
    }

    #[test]
    fn snap_to_nearest_node() {
        let graph = line_graph();
        let planner = planner(&graph, PlannerConfig::default());
        assert_eq!(
            planner.snap(p(20.0)),
            Some(Waypoint { point: p(20.0), node_id: NodeId(0) })
        );
        assert_eq!(planner.snap(PointCh::new(2_600_000.0, 1_201_000.0)), None);
    }

    #[test]
    fn plan_through_three_waypoints() {
        let graph = line_graph();
        let mut planner = planner(&graph, PlannerConfig::default());
        let waypoints = [waypoint(&graph, 0), waypoint(&graph, 1), waypoint(&graph, 2)];
        let plan = planner.plan(&waypoints).unwrap().unwrap();

        assert!(matches!(&plan.route, Route::Multi(m) if m.segments().len() == 2));
        assert_eq!(plan.route.length(), 800.0);
        assert_eq!(plan.route.index_of_segment_at(600.0), 1);

        let profile = &plan.profile;
        assert_eq!(profile.length(), 800.0);
        assert_eq!(profile.samples().len(), 161);
        assert!(profile.samples().iter().all(|s| !s.is_nan()));
        assert_eq!(profile.min_elevation(), 400.0);
        assert_eq!(profile.max_elevation(), 462.5);
        assert_close(profile.total_ascent(), 62.5);
        assert_close(profile.total_descent(), 0.0);

        assert_eq!(planner.cache().len(), 2);
        planner.plan(&waypoints).unwrap().unwrap();
        assert_eq!(planner.cache().len(), 2);
    }

    #[test]
    fn repeated_waypoints_are_skipped() {
        let graph = line_graph();
        let mut planner = planner(&graph, PlannerConfig::default());
        let w = |n| waypoint(&graph, n);

        let waypoints = [w(0), w(0), w(2)];
        let plan = planner.plan(&waypoints).unwrap().unwrap();
        assert!(matches!(&plan.route, Route::Multi(m) if m.segments().len() == 1));
        assert_eq!(plan.route.length(), 800.0);
        assert_eq!(index_of_non_empty_segment_at(&waypoints, &plan.route, 100.0), 1);
        assert_eq!(index_of_non_empty_segment_at(&waypoints, &plan.route, 700.0), 1);

        let waypoints = [w(0), w(1), w(1), w(2)];
        let plan = planner.plan(&waypoints).unwrap().unwrap();
        assert_eq!(index_of_non_empty_segment_at(&waypoints, &plan.route, 100.0), 0);
        assert_eq!(index_of_non_empty_segment_at(&waypoints, &plan.route, 600.0), 2);
    }

    #[test]
    fn no_plan_without_segments() {
        let graph = line_graph();
        let mut planner = planner(&graph, PlannerConfig::default());
        let w0 = waypoint(&graph, 0);
        assert!(planner.plan(&[]).unwrap().is_none());
        assert!(planner.plan(&[w0]).unwrap().is_none());
        assert!(planner.plan(&[w0, w0]).unwrap().is_none());
    }

    #[test]
    fn no_plan_when_unreachable() {
        let graph = line_graph();
        let mut planner = planner(&graph, PlannerConfig::default());
        let waypoints = [waypoint(&graph, 0), waypoint(&graph, 1), waypoint(&graph, 3)];
        assert!(planner.plan(&waypoints).unwrap().is_none());
    }

    #[test]
    fn cache_capacity_bounds_memo() {
        let graph = line_graph();
        let config = PlannerConfig { cache_capacity: 1, ..PlannerConfig::default() };
        let mut planner = planner(&graph, config);
        let waypoints = [waypoint(&graph, 0), waypoint(&graph, 1), waypoint(&graph, 2)];
        planner.plan(&waypoints).unwrap().unwrap();
        assert_eq!(planner.cache().len(), 1);
        assert!(planner.cache().contains(NodeId(1), NodeId(2)));
        assert!(!planner.cache().contains(NodeId(0), NodeId(1)));
    }
}
