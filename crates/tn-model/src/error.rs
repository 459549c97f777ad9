//! Error types for assembly, reduction, and steady solves.

use thiserror::Error;
use tn_core::{BranchId, NodeId};

pub type ModelResult<T> = Result<T, ModelError>;

#[derive(Error, Debug)]
pub enum ModelError {
    /// A node with no incident branch leaves an all-zero Laplacian row,
    /// so any solve against AᵀGA is ill-posed.
    #[error("Node {node} has no incident branch; the Laplacian is singular")]
    DisconnectedNode { node: NodeId },

    /// A required linear solve against the Laplacian failed.
    #[error("Singular topology: {what}")]
    SingularSystem { what: &'static str },

    /// The algebraic block of the reduction is not invertible, or there is
    /// nothing to reduce to.
    #[error("State-space reduction failed: {what}")]
    Reduction { what: &'static str },

    /// A source or output selection refers to an object outside the network.
    #[error("Source layout refers to non-existent node {node}")]
    UnknownNode { node: NodeId },

    #[error("Source layout refers to non-existent branch {branch}")]
    UnknownBranch { branch: BranchId },

    /// Vector/matrix dimensions disagree with the network or layout.
    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
