//! Project schema definitions.
//!
//! The on-disk format uses string IDs and explicit SI-suffixed field names
//! so files stay legible and diffable; numeric node/branch indices are
//! assigned at compile time from declaration order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    pub network: NetworkDef,
    #[serde(default)]
    pub sources: SourcesDef,
    #[serde(default)]
    pub simulation: SimulationDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NetworkDef {
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub branches: Vec<BranchDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    /// Thermal capacity; 0 declares a steady (algebraic) node.
    #[serde(default)]
    pub capacity_j_per_k: f64,
}

/// A conductive path. An absent endpoint is the network boundary, which is
/// where a temperature source enters; at most one endpoint may be absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BranchDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    pub conductance_w_per_k: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SourcesDef {
    /// Branch IDs carrying a temperature source.
    #[serde(default)]
    pub temperature_sources: Vec<String>,
    /// Node IDs carrying a heat-flow source.
    #[serde(default)]
    pub flow_sources: Vec<String>,
    /// Node IDs whose temperatures are recorded as outputs.
    #[serde(default)]
    pub outputs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationDef {
    #[serde(default)]
    pub scheme: SchemeDef,
    pub time_step_s: f64,
    pub duration_s: f64,
    #[serde(default)]
    pub initial_state: InitialStateDef,
}

impl Default for SimulationDef {
    fn default() -> Self {
        Self {
            scheme: SchemeDef::default(),
            time_step_s: 60.0,
            duration_s: 86_400.0,
            initial_state: InitialStateDef::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SchemeDef {
    #[default]
    Explicit,
    Implicit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "type")]
pub enum InitialStateDef {
    #[default]
    Zero,
    Uniform {
        value: f64,
    },
    SteadyState,
}
