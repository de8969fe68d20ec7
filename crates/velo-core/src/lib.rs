//! `velo-core`: foundational types for the `velo` bicycle route planner.
//!
//! This crate is a dependency of every other `velo-*` crate.  It has no
//! `velo-*` dependencies and a single external one (`thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`                                       |
//! | [`bits`]        | signed / unsigned bit-field extraction                   |
//! | [`q28_4`]       | Q28.4 fixed-point conversions                            |
//! | [`math`]        | clamp, interpolation, ceil-div, planar vector helpers    |
//! | [`functions`]   | `Function`: constant and uniformly sampled `f(x)`       |
//! | [`geo`]         | `PointCh`, `SwissBounds`                                 |
//! | [`projection`]  | CH1903+ / Web Mercator conversions, `PointWebMercator`   |
//! | [`error`]       | `CoreError`, `CoreResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and points.          |

pub mod bits;
pub mod error;
pub mod functions;
pub mod geo;
pub mod ids;
pub mod math;
pub mod projection;
pub mod q28_4;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use functions::Function;
pub use geo::{PointCh, SwissBounds};
pub use ids::{EdgeId, NodeId};
pub use projection::PointWebMercator;
