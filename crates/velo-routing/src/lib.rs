//! `velo-routing`: route search and route queries over a `velo-graph`
//! [`Graph`](velo_graph::Graph).
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`cost`]     | `CostFunction` trait, `UniformCost`, `CityBikeCost`           |
//! | [`computer`] | `RouteComputer`: Dijkstra over weighted edge lengths         |
//! | [`edge`]     | `Edge`: a graph edge copied into a route                     |
//! | [`point`]    | `RoutePoint`: closest point on a route                       |
//! | [`route`]    | `Route`, `SingleRoute`, `MultiRoute`                          |
//! | [`profile`]  | `ElevationProfile`, `elevation_profile`                       |
//! | [`cache`]    | `RouteCache`: bounded LRU of computed routes                 |
//! | [`planner`]  | `RoutePlanner`, `Waypoint`, `PlannerConfig`                   |
//! | [`error`]    | `RoutingError`, `RoutingResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                        |
//! |---------|---------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `PlannerConfig`, `Waypoint`. |

pub mod cache;
pub mod computer;
pub mod cost;
pub mod edge;
pub mod error;
pub mod planner;
pub mod point;
pub mod profile;
pub mod route;

#[cfg(test)]
mod tests;

pub use cache::RouteCache;
pub use computer::RouteComputer;
pub use cost::{CityBikeCost, CostFunction, UniformCost};
pub use edge::Edge;
pub use error::{RoutingError, RoutingResult};
pub use planner::{index_of_non_empty_segment_at, Plan, PlannerConfig, RoutePlanner, Waypoint};
pub use point::RoutePoint;
pub use profile::{elevation_profile, ElevationProfile};
pub use route::{MultiRoute, Route, SingleRoute};
