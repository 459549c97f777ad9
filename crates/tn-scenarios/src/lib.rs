//! tn-scenarios: worked physical scenario builders.
//!
//! Each scenario assembles a concrete thermal network with real material
//! properties, returning the built network, its source layout, and named
//! handles to the nodes and branches of interest. Scenarios double as test
//! fixtures with hand-checkable physics and as starting points for users
//! wiring their own buildings.

pub mod cube;

pub use cube::{CubeBuilding, CubeModel};

pub type ScenarioResult<T> = Result<T, ScenarioError>;

#[derive(thiserror::Error, Debug)]
pub enum ScenarioError {
    #[error("Network error: {0}")]
    Network(#[from] tn_network::NetworkError),

    #[error("Model error: {0}")]
    Model(#[from] tn_model::ModelError),

    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },
}
