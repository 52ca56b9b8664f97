//! reelgraph - node-graph operators for driving a video editing host
//!
//! This crate provides:
//! - Capability traits over the host's scripting interface, plus an
//!   in-memory host for tests and demos
//! - A plug/operator model and the built-in operator catalog (folders,
//!   clips, metadata, projects, timelines, takes)
//! - Path-based folder lookup over the media pool
pub mod error;
pub mod graph;
pub mod host;
pub mod ops;
pub mod pool;
pub mod util;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use graph::{
    Catalog, Direction, Instance, InstanceKind, Operator, OperatorInfo, Plug, PlugSet, PlugSpec,
    PlugValue, ValueKind,
};
pub use host::HostContext;
pub use pool::{resolve_folder, FolderPath};
pub use util::to_valid_index;
