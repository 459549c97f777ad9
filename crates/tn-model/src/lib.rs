//! tn-model: DAE assembly and state-space reduction for thermal networks.
//!
//! Provides:
//! - `ThermalDae`: the differential-algebraic system
//!   C·dθ/dt = −(AᵀGA)·θ + AᵀG·b + f assembled from a `tn_network::Network`
//! - `SourceLayout`: which branches carry temperature sources, which nodes
//!   carry flow sources, which node temperatures are outputs, and the
//!   resulting input ordering
//! - `reduce`: block elimination of zero-capacity nodes into a linear
//!   time-invariant state-space system (As, Bs, Cs, Ds)
//! - direct steady-state solution and the reduced-model steady formula
//! - eigen-spectrum analysis bounding the explicit-Euler step

pub mod dae;
pub mod error;
pub mod reduce;
pub mod sources;
pub mod stability;
pub mod steady;

// Re-exports for public API
pub use dae::ThermalDae;
pub use error::{ModelError, ModelResult};
pub use reduce::{reduce, InputSlot, StateSpace};
pub use sources::{SourceLayout, SourceLayoutBuilder};
pub use stability::Spectrum;
pub use steady::{steady_output, steady_state};
