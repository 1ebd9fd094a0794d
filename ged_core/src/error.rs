//! Error types for distance computations.
//!
//! Design principle: configuration and cache errors surface during the
//! **preparation phase** (option parsing, graph registration, cache
//! construction) rather than during the parallel bound computation. This
//! keeps the hot path simple and avoids complex error handling in parallel
//! code.

use crate::types::{EdgeId, GraphId, NodeId};
use thiserror::Error;

/// Errors that can occur during method configuration or bound computation.
#[derive(Debug, Error)]
pub enum GedError {
    // === Preparation phase errors (before any pair runs) ===
    /// An option key was not recognized, or its value is out of domain.
    #[error("Invalid option: {key}")]
    InvalidOption {
        /// The offending option key.
        key: String,
    },

    /// A pair run referenced a graph whose per-graph cache was never built.
    #[error("Graph {0} was not initialized before use")]
    UninitializedGraph(GraphId),

    /// A graph id is not registered in the collection.
    #[error("Unknown graph: {0}")]
    UnknownGraph(GraphId),

    // === Lookup errors (indicate a mismatched graph/cache pairing) ===
    /// A node id is absent from the graph or cache it was looked up in.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// An edge id is absent from the graph it was looked up in.
    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),

    // === Collaborator contract violations (indicate bugs, fail fast) ===
    /// An external collaborator broke its contract, e.g. a negative cost.
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl GedError {
    /// Create an invalid-option error naming the offending key.
    pub fn invalid_option(key: impl Into<String>) -> Self {
        Self::InvalidOption { key: key.into() }
    }

    /// Create a contract-violation error.
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        Self::ContractViolation(msg.into())
    }
}
