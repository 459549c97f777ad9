//! Incremental network builder.

use tn_core::units::{HeatCapacity, ThermalConductance};
use tn_core::{BranchId, NodeId};

use crate::error::NetworkResult;
use crate::network::{Branch, Endpoint, Network, Node};
use crate::validate;

/// Builder for constructing a thermal network incrementally.
///
/// Use `add_node`/`add_capacitive_node` and the `add_branch*` methods to
/// accumulate the definition, then call `build()` to validate and freeze it
/// into an immutable [`Network`]. The builder separates "network
/// specification" from the derived linear-algebra artifacts, which only
/// exist on the built network.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: Vec<Node>,
    branches: Vec<Branch>,
    next_node_id: u32,
    next_branch_id: u32,
}

impl NetworkBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an algebraic (zero-capacity) node and return its ID.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.push_node(name.into(), 0.0)
    }

    /// Add a node with thermal storage and return its ID.
    pub fn add_capacitive_node(
        &mut self,
        name: impl Into<String>,
        capacity: HeatCapacity,
    ) -> NodeId {
        self.push_node(name.into(), capacity.value)
    }

    fn push_node(&mut self, name: String, capacity: f64) -> NodeId {
        let id = NodeId::from_index(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node { id, name, capacity });
        id
    }

    /// Add a branch between two explicit endpoints.
    pub fn add_branch(
        &mut self,
        name: impl Into<String>,
        from: Endpoint,
        to: Endpoint,
        conductance: ThermalConductance,
    ) -> BranchId {
        let id = BranchId::from_index(self.next_branch_id);
        self.next_branch_id += 1;
        self.branches.push(Branch {
            id,
            name: name.into(),
            from,
            to,
            conductance: conductance.value,
        });
        id
    }

    /// Add an internal branch: positive flow from `from` to `to`.
    pub fn add_branch_between(
        &mut self,
        name: impl Into<String>,
        from: NodeId,
        to: NodeId,
        conductance: ThermalConductance,
    ) -> BranchId {
        self.add_branch(name, Endpoint::Node(from), Endpoint::Node(to), conductance)
    }

    /// Add a boundary branch: positive flow from the boundary into `to`.
    ///
    /// This is the branch shape that carries a temperature source (outdoor
    /// air, a set point) into the network.
    pub fn add_boundary_branch(
        &mut self,
        name: impl Into<String>,
        to: NodeId,
        conductance: ThermalConductance,
    ) -> BranchId {
        self.add_branch(name, Endpoint::Boundary, Endpoint::Node(to), conductance)
    }

    /// Build and validate the network, returning an immutable [`Network`].
    pub fn build(self) -> NetworkResult<Network> {
        validate::validate_structure(&self.nodes, &self.branches)?;
        Ok(Network {
            nodes: self.nodes,
            branches: self.branches,
        })
    }
}
