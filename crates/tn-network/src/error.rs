//! Network construction and validation errors.
//!
//! Everything here is a configuration fault: the description handed to the
//! builder cannot be materialized into a valid network. These are fatal and
//! surfaced immediately, never retried internally.

use thiserror::Error;
use tn_core::{BranchId, NodeId};

pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// A branch endpoint refers to a node that doesn't exist.
    #[error("Branch {branch} refers to non-existent node {node}")]
    InvalidNodeRef { branch: BranchId, node: NodeId },

    /// A branch with no real resistive path must not exist; conductance has
    /// to be strictly positive and finite.
    #[error("Branch {branch} has invalid conductance {value} W/K (must be > 0 and finite)")]
    InvalidConductance { branch: BranchId, value: f64 },

    /// Node capacities are nonnegative; zero marks an algebraic node.
    #[error("Node {node} has invalid capacity {value} J/K (must be >= 0 and finite)")]
    InvalidCapacity { node: NodeId, value: f64 },

    /// A branch needs at least one node endpoint; boundary-to-boundary
    /// carries no unknown.
    #[error("Branch {branch} connects boundary to boundary")]
    FloatingBranch { branch: BranchId },

    /// A branch connects a node to itself, which contributes nothing to the
    /// Laplacian and hides a modelling mistake.
    #[error("Branch {branch} is a self-loop on node {node}")]
    SelfLoop { branch: BranchId, node: NodeId },

    /// Conductance folding was given an empty or non-positive set.
    #[error("Conductance folding failed: {what}")]
    Combine { what: &'static str },
}
