//! Project validation logic.

use std::collections::HashSet;

use crate::schema::{BranchDef, NodeDef, Project, SourcesDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let node_ids = validate_nodes(&project.network.nodes)?;
    let branch_ids = validate_branches(&project.network.branches, &node_ids)?;
    validate_sources(&project.sources, &node_ids, &branch_ids)?;

    let sim = &project.simulation;
    if !(sim.time_step_s > 0.0 && sim.time_step_s.is_finite()) {
        return Err(ValidationError::InvalidValue {
            field: "simulation.time_step_s".to_string(),
            value: sim.time_step_s.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }
    if !(sim.duration_s > 0.0 && sim.duration_s.is_finite()) {
        return Err(ValidationError::InvalidValue {
            field: "simulation.duration_s".to_string(),
            value: sim.duration_s.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    Ok(())
}

fn validate_nodes(nodes: &[NodeDef]) -> Result<HashSet<&String>, ValidationError> {
    let mut ids = HashSet::new();
    for node in nodes {
        if !ids.insert(&node.id) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "network nodes".to_string(),
            });
        }
        if !(node.capacity_j_per_k >= 0.0 && node.capacity_j_per_k.is_finite()) {
            return Err(ValidationError::InvalidValue {
                field: format!("node '{}' capacity_j_per_k", node.id),
                value: node.capacity_j_per_k.to_string(),
                reason: "must be finite and non-negative".to_string(),
            });
        }
    }
    Ok(ids)
}

fn validate_branches<'a>(
    branches: &'a [BranchDef],
    node_ids: &HashSet<&String>,
) -> Result<HashSet<&'a String>, ValidationError> {
    let mut ids = HashSet::new();
    for branch in branches {
        if !ids.insert(&branch.id) {
            return Err(ValidationError::DuplicateId {
                id: branch.id.clone(),
                context: "network branches".to_string(),
            });
        }
        if !(branch.conductance_w_per_k > 0.0 && branch.conductance_w_per_k.is_finite()) {
            return Err(ValidationError::InvalidValue {
                field: format!("branch '{}' conductance_w_per_k", branch.id),
                value: branch.conductance_w_per_k.to_string(),
                reason: "must be finite and positive".to_string(),
            });
        }
        if branch.from.is_none() && branch.to.is_none() {
            return Err(ValidationError::InvalidValue {
                field: format!("branch '{}'", branch.id),
                value: "from: ~, to: ~".to_string(),
                reason: "at least one endpoint must be a node".to_string(),
            });
        }
        for endpoint in [&branch.from, &branch.to].into_iter().flatten() {
            if !node_ids.contains(endpoint) {
                return Err(ValidationError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("branch '{}' endpoint", branch.id),
                });
            }
        }
    }
    Ok(ids)
}

fn validate_sources(
    sources: &SourcesDef,
    node_ids: &HashSet<&String>,
    branch_ids: &HashSet<&String>,
) -> Result<(), ValidationError> {
    for id in &sources.temperature_sources {
        if !branch_ids.contains(id) {
            return Err(ValidationError::MissingReference {
                id: id.clone(),
                context: "sources.temperature_sources".to_string(),
            });
        }
    }
    for (list, context) in [
        (&sources.flow_sources, "sources.flow_sources"),
        (&sources.outputs, "sources.outputs"),
    ] {
        for id in list {
            if !node_ids.contains(id) {
                return Err(ValidationError::MissingReference {
                    id: id.clone(),
                    context: context.to_string(),
                });
            }
        }
    }
    Ok(())
}
