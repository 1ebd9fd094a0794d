//! Shared model types for the GED bounds workspace.
//!
//! This crate provides the labeled graph representation, the edit cost
//! interface, node maps, option-string parsing, and the error type used
//! across the workspace. The algorithms live in `ged_lsape`.

mod collection;
mod costs;
mod error;
mod graph;
mod node_map;
mod options;
mod types;

pub use crate::collection::*;
pub use crate::costs::*;
pub use crate::error::*;
pub use crate::graph::*;
pub use crate::node_map::*;
pub use crate::options::*;
pub use crate::types::*;
