//! Source and output selection, and the input ordering contract.
//!
//! The reduced model's input vector u stacks temperature-source values
//! (flagged branches, ascending branch index) before flow-source values
//! (flagged nodes, ascending node index). Every consumer of a `StateSpace`
//! relies on this order; it is fixed here and nowhere else.

use nalgebra::DVector;
use tn_core::{BranchId, NodeId};
use tn_network::Network;

use crate::error::{ModelError, ModelResult};

/// Which branches carry temperature sources, which nodes carry heat-flow
/// sources, and which node temperatures are observable outputs.
///
/// Immutable once built; selections are kept sorted ascending so the input
/// and output orderings are independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLayout {
    temp_sources: Vec<BranchId>,
    flow_sources: Vec<NodeId>,
    outputs: Vec<NodeId>,
    node_count: usize,
    branch_count: usize,
}

impl SourceLayout {
    /// Start building a layout against a network.
    pub fn builder(network: &Network) -> SourceLayoutBuilder {
        SourceLayoutBuilder {
            temp_sources: Vec::new(),
            flow_sources: Vec::new(),
            outputs: Vec::new(),
            node_count: network.node_count(),
            branch_count: network.branch_count(),
        }
    }

    /// Flagged temperature-source branches, ascending.
    pub fn temp_sources(&self) -> &[BranchId] {
        &self.temp_sources
    }

    /// Flagged heat-flow-source nodes, ascending.
    pub fn flow_sources(&self) -> &[NodeId] {
        &self.flow_sources
    }

    /// Output nodes, ascending.
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Input dimension n_u = temperature sources + flow sources.
    pub fn input_count(&self) -> usize {
        self.temp_sources.len() + self.flow_sources.len()
    }

    /// Output dimension n_y.
    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub(crate) fn node_count(&self) -> usize {
        self.node_count
    }

    pub(crate) fn branch_count(&self) -> usize {
        self.branch_count
    }

    /// Gather full-length per-branch values b and per-node values f into an
    /// input vector u following the layout's ordering.
    pub fn pack(&self, b: &DVector<f64>, f: &DVector<f64>) -> ModelResult<DVector<f64>> {
        if b.len() != self.branch_count {
            return Err(ModelError::DimensionMismatch {
                what: "temperature source vector b",
                expected: self.branch_count,
                actual: b.len(),
            });
        }
        if f.len() != self.node_count {
            return Err(ModelError::DimensionMismatch {
                what: "flow source vector f",
                expected: self.node_count,
                actual: f.len(),
            });
        }
        let mut u = DVector::zeros(self.input_count());
        let mut slot = 0;
        for &branch in &self.temp_sources {
            u[slot] = b[branch.index() as usize];
            slot += 1;
        }
        for &node in &self.flow_sources {
            u[slot] = f[node.index() as usize];
            slot += 1;
        }
        Ok(u)
    }
}

/// Incremental builder for [`SourceLayout`].
#[derive(Debug)]
pub struct SourceLayoutBuilder {
    temp_sources: Vec<BranchId>,
    flow_sources: Vec<NodeId>,
    outputs: Vec<NodeId>,
    node_count: usize,
    branch_count: usize,
}

impl SourceLayoutBuilder {
    /// Flag a branch as carrying a temperature source.
    pub fn temperature_source(mut self, branch: BranchId) -> Self {
        self.temp_sources.push(branch);
        self
    }

    /// Flag a node as carrying a heat-flow source.
    pub fn flow_source(mut self, node: NodeId) -> Self {
        self.flow_sources.push(node);
        self
    }

    /// Mark a node temperature as an observable output.
    pub fn output(mut self, node: NodeId) -> Self {
        self.outputs.push(node);
        self
    }

    /// Validate references and freeze the layout.
    pub fn build(mut self) -> ModelResult<SourceLayout> {
        for &branch in &self.temp_sources {
            if branch.index() as usize >= self.branch_count {
                return Err(ModelError::UnknownBranch { branch });
            }
        }
        for &node in self.flow_sources.iter().chain(self.outputs.iter()) {
            if node.index() as usize >= self.node_count {
                return Err(ModelError::UnknownNode { node });
            }
        }

        self.temp_sources.sort();
        self.temp_sources.dedup();
        self.flow_sources.sort();
        self.flow_sources.dedup();
        self.outputs.sort();
        self.outputs.dedup();

        Ok(SourceLayout {
            temp_sources: self.temp_sources,
            flow_sources: self.flow_sources,
            outputs: self.outputs,
            node_count: self.node_count,
            branch_count: self.branch_count,
        })
    }
}
