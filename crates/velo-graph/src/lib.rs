//! `velo-graph`: the binary road graph of Switzerland.
//!
//! The graph is stored as six flat big-endian files that are memory mapped
//! and decoded on access; nothing is parsed eagerly.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`buffer`]     | `Buffer`: mmap or owned bytes, big-endian accessors     |
//! | [`nodes`]      | `GraphNodes`: positions and out-edge ranges             |
//! | [`edges`]      | `GraphEdges`, `ProfileKind`: edges and altitude profiles|
//! | [`sectors`]    | `GraphSectors`, `Sector`: 128 × 128 spatial grid        |
//! | [`attributes`] | `Attribute`, `AttributeSet`: OSM tag bit sets           |
//! | [`graph`]      | `Graph`: the facade, `load_from`, nearest-node search   |
//! | [`builder`]    | `GraphBuilder`: encodes graphs in the same layout       |
//! | [`error`]      | `GraphError`, `GraphResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on attributes.             |

pub mod attributes;
pub mod buffer;
pub mod builder;
pub mod edges;
pub mod error;
pub mod graph;
pub mod nodes;
pub mod sectors;


pub use attributes::{Attribute, AttributeSet};
pub use buffer::Buffer;
pub use builder::{profile_sample_count, GraphBuffers, GraphBuilder};
pub use edges::{GraphEdges, ProfileKind};
pub use error::{GraphError, GraphResult};
pub use graph::Graph;
pub use nodes::GraphNodes;
pub use sectors::{GraphSectors, Sector};
