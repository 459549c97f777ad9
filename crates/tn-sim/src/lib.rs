//! tn-sim: fixed-step time integration of reduced thermal models.
//!
//! Provides:
//! - Explicit (forward) and implicit (backward) Euler steppers over a
//!   `tn_model::StateSpace`, with per-run precomputed step matrices
//! - A simulation runner consuming an input trajectory u[k] and recording
//!   states and outputs
//! - Parallel fan-out over independent scenario runs
//!
//! Stability is a modeling concern: the explicit stepper accepts any
//! positive step and never clamps it. Query `tn_model::Spectrum` for the
//! admissible explicit step.

pub mod error;
pub mod integrator;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ExplicitEuler, ImplicitEuler, Scheme, Stepper};
pub use sim::{run_scenarios, run_sim, InitialState, SimOptions, SimRecord};
