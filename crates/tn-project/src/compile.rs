//! Translation from the on-disk schema to runtime objects.

use std::collections::HashMap;

use tn_core::units::{jpk, wpk};
use tn_core::{BranchId, NodeId};
use tn_model::SourceLayout;
use tn_network::{Endpoint, Network, NetworkBuilder};
use tn_sim::{InitialState, Scheme, SimOptions};

use crate::schema::{InitialStateDef, Project, SchemeDef};
use crate::{ProjectError, ProjectResult};

/// A project resolved into runtime objects, with the string-ID to
/// numeric-ID correspondence preserved for input packing and reporting.
#[derive(Debug)]
pub struct Compiled {
    pub network: Network,
    pub layout: SourceLayout,
    pub options: SimOptions,
    node_ids: HashMap<String, NodeId>,
    branch_ids: HashMap<String, BranchId>,
}

impl Compiled {
    /// Numeric ID for a node declared in the project file.
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.node_ids.get(id).copied()
    }

    /// Numeric ID for a branch declared in the project file.
    pub fn branch_id(&self, id: &str) -> Option<BranchId> {
        self.branch_ids.get(id).copied()
    }
}

/// Resolve a validated project into a built network, source layout, and
/// simulation options. Node and branch indices follow declaration order.
pub fn compile(project: &Project) -> ProjectResult<Compiled> {
    crate::validate_project(project)?;

    let mut builder = NetworkBuilder::new();
    let mut node_ids = HashMap::new();
    for node in &project.network.nodes {
        let id = if node.capacity_j_per_k > 0.0 {
            builder.add_capacitive_node(node.id.clone(), jpk(node.capacity_j_per_k))
        } else {
            builder.add_node(node.id.clone())
        };
        node_ids.insert(node.id.clone(), id);
    }

    let mut branch_ids = HashMap::new();
    for branch in &project.network.branches {
        // Validation has already checked every endpoint reference.
        let endpoint = |node: &Option<String>| match node {
            Some(id) => Endpoint::Node(node_ids[id]),
            None => Endpoint::Boundary,
        };
        let id = builder.add_branch(
            branch.id.clone(),
            endpoint(&branch.from),
            endpoint(&branch.to),
            wpk(branch.conductance_w_per_k),
        );
        branch_ids.insert(branch.id.clone(), id);
    }

    let network = builder.build()?;

    let mut layout = SourceLayout::builder(&network);
    for id in &project.sources.temperature_sources {
        layout = layout.temperature_source(branch_ids[id]);
    }
    for id in &project.sources.flow_sources {
        layout = layout.flow_source(node_ids[id]);
    }
    for id in &project.sources.outputs {
        layout = layout.output(node_ids[id]);
    }
    let layout = layout.build()?;

    let sim = &project.simulation;
    let options = SimOptions {
        scheme: match sim.scheme {
            SchemeDef::Explicit => Scheme::Explicit,
            SchemeDef::Implicit => Scheme::Implicit,
        },
        dt: sim.time_step_s,
        duration: sim.duration_s,
        initial_state: match &sim.initial_state {
            InitialStateDef::Zero => InitialState::Zero,
            InitialStateDef::Uniform { value } => InitialState::Uniform(*value),
            InitialStateDef::SteadyState => InitialState::SteadyState,
        },
    };

    Ok(Compiled {
        network,
        layout,
        options,
        node_ids,
        branch_ids,
    })
}

impl From<tn_network::NetworkError> for ProjectError {
    fn from(e: tn_network::NetworkError) -> Self {
        ProjectError::Compile(e.to_string())
    }
}

impl From<tn_model::ModelError> for ProjectError {
    fn from(e: tn_model::ModelError) -> Self {
        ProjectError::Compile(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn wall_project() -> Project {
        Project {
            version: 1,
            name: "wall".to_string(),
            network: NetworkDef {
                nodes: vec![
                    NodeDef {
                        id: "surface".to_string(),
                        capacity_j_per_k: 0.0,
                    },
                    NodeDef {
                        id: "mass".to_string(),
                        capacity_j_per_k: 4000.0,
                    },
                ],
                branches: vec![
                    BranchDef {
                        id: "outdoor".to_string(),
                        from: None,
                        to: Some("surface".to_string()),
                        conductance_w_per_k: 25.0,
                    },
                    BranchDef {
                        id: "conduction".to_string(),
                        from: Some("surface".to_string()),
                        to: Some("mass".to_string()),
                        conductance_w_per_k: 5.0,
                    },
                ],
            },
            sources: SourcesDef {
                temperature_sources: vec!["outdoor".to_string()],
                flow_sources: vec!["mass".to_string()],
                outputs: vec!["mass".to_string()],
            },
            simulation: SimulationDef {
                scheme: SchemeDef::Implicit,
                time_step_s: 30.0,
                duration_s: 3600.0,
                initial_state: InitialStateDef::Uniform { value: 20.0 },
            },
        }
    }

    #[test]
    fn compile_resolves_ids_in_declaration_order() {
        let compiled = compile(&wall_project()).unwrap();
        assert_eq!(compiled.network.node_count(), 2);
        assert_eq!(compiled.network.branch_count(), 2);
        assert_eq!(compiled.node_id("surface").unwrap().index(), 0);
        assert_eq!(compiled.node_id("mass").unwrap().index(), 1);
        assert_eq!(compiled.branch_id("conduction").unwrap().index(), 1);
        assert!(compiled.node_id("missing").is_none());
    }

    #[test]
    fn compile_carries_layout_and_options() {
        let compiled = compile(&wall_project()).unwrap();
        assert_eq!(compiled.layout.input_count(), 2);
        assert_eq!(compiled.layout.output_count(), 1);
        assert_eq!(compiled.options.scheme, Scheme::Implicit);
        assert_eq!(compiled.options.dt, 30.0);
        assert_eq!(
            compiled.options.initial_state,
            InitialState::Uniform(20.0)
        );
    }

    #[test]
    fn compile_rejects_invalid_project() {
        let mut project = wall_project();
        project.network.branches[0].conductance_w_per_k = -1.0;
        assert!(matches!(
            compile(&project),
            Err(ProjectError::Validation(_))
        ));
    }
}
