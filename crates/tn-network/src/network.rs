//! Core network data structures.

use nalgebra::{DMatrix, DVector};
use tn_core::{BranchId, NodeId};

/// One side of a branch: either an internal temperature node or the
/// external boundary (an ambient/source side with no unknown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// An internal node carrying a temperature unknown.
    Node(NodeId),
    /// The reference/ambient side; contributes no incidence entry.
    Boundary,
}

impl Endpoint {
    /// The node behind this endpoint, if any.
    pub fn node(self) -> Option<NodeId> {
        match self {
            Endpoint::Node(id) => Some(id),
            Endpoint::Boundary => None,
        }
    }
}

/// A temperature unknown in the thermal network.
///
/// Capacity is in J/K; zero capacity marks an algebraic node that will be
/// eliminated during state-space reduction.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub capacity: f64,
}

impl Node {
    /// Whether this node carries thermal storage (a state variable).
    pub fn is_capacitive(&self) -> bool {
        self.capacity > 0.0
    }
}

/// A heat-flow unknown connecting two endpoints.
///
/// Positive flow direction runs from `from` to `to`; conductance is in W/K
/// and is always a single valid resistor (series/parallel folding happens
/// before the branch is created, see [`crate::combine`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub from: Endpoint,
    pub to: Endpoint,
    pub conductance: f64,
}

/// The network: a validated, immutable collection of nodes and branches.
///
/// Construction goes through [`crate::NetworkBuilder`]; once built, the
/// topology and coefficients never change, so the derived matrices are a
/// deterministic function of the definition.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) branches: Vec<Branch>,
}

impl Network {
    /// Return all nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Return all branches.
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Get a node by ID (returns None if ID out of bounds).
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index() as usize)
    }

    /// Get a branch by ID (returns None if ID out of bounds).
    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id.index() as usize)
    }

    /// Number of temperature nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of heat-flow branches.
    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    /// Number of branches incident to a node (0 means the node is
    /// disconnected and the Laplacian row is all-zero).
    pub fn incident_branch_count(&self, node: NodeId) -> usize {
        self.branches
            .iter()
            .filter(|b| b.from.node() == Some(node) || b.to.node() == Some(node))
            .count()
    }

    /// Incidence matrix A (branches x nodes).
    ///
    /// +1 where the branch's positive direction enters a node, -1 where it
    /// exits; a boundary endpoint contributes nothing, so a source branch
    /// produces a single-nonzero row.
    pub fn incidence(&self) -> DMatrix<f64> {
        let mut a = DMatrix::zeros(self.branches.len(), self.nodes.len());
        for branch in &self.branches {
            let row = branch.id.index() as usize;
            if let Some(n) = branch.to.node() {
                a[(row, n.index() as usize)] = 1.0;
            }
            if let Some(n) = branch.from.node() {
                a[(row, n.index() as usize)] = -1.0;
            }
        }
        a
    }

    /// Branch conductances as a vector (the diagonal of G), in branch order.
    pub fn conductances(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.branches.len(),
            self.branches.iter().map(|b| b.conductance),
        )
    }

    /// Conductance matrix G (diagonal, branches x branches).
    pub fn conductance_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.conductances())
    }

    /// Node capacities as a vector (the diagonal of C), in node order.
    pub fn capacities(&self) -> DVector<f64> {
        DVector::from_iterator(self.nodes.len(), self.nodes.iter().map(|n| n.capacity))
    }

    /// Capacity matrix C (diagonal, nodes x nodes).
    pub fn capacity_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.capacities())
    }

    /// Node IDs with nonzero capacity, ascending. This is the state order
    /// of the reduced model and must stay stable across calls.
    pub fn capacitive_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.is_capacitive())
            .map(|n| n.id)
            .collect()
    }
}
