//! Direct steady-state solution of the DAE, and the reduced-model steady
//! formula used to cross-check it.
//!
//! With all derivatives zero the DAE collapses to Kθ = AᵀG·b + f, solved
//! directly. The reduced model must agree on the output rows:
//! y_ss = (−Cs·As⁻¹·Bs + Ds)·u. Both paths use LU solves, never explicit
//! inverses.

use nalgebra::DVector;
use crate::dae::ThermalDae;
use crate::error::{ModelError, ModelResult};
use crate::reduce::StateSpace;

/// Solve θ_ss = (AᵀGA)⁻¹·(AᵀG·b + f) for full-length source value vectors
/// b (per branch) and f (per node).
pub fn steady_state(
    dae: &ThermalDae,
    b: &DVector<f64>,
    f: &DVector<f64>,
) -> ModelResult<DVector<f64>> {
    if b.len() != dae.branch_count() {
        return Err(ModelError::DimensionMismatch {
            what: "temperature source vector b",
            expected: dae.branch_count(),
            actual: b.len(),
        });
    }
    if f.len() != dae.node_count() {
        return Err(ModelError::DimensionMismatch {
            what: "flow source vector f",
            expected: dae.node_count(),
            actual: f.len(),
        });
    }

    let rhs = dae.injection() * b + f;
    dae.laplacian()
        .clone()
        .lu()
        .solve(&rhs)
        .ok_or(ModelError::SingularSystem {
            what: "Laplacian solve failed in steady state",
        })
}

/// Steady output of the reduced model for a constant input u:
/// y_ss = (−Cs·As⁻¹·Bs + Ds)·u.
pub fn steady_output(ss: &StateSpace, u: &DVector<f64>) -> ModelResult<DVector<f64>> {
    if u.len() != ss.input_count() {
        return Err(ModelError::DimensionMismatch {
            what: "input vector u",
            expected: ss.input_count(),
            actual: u.len(),
        });
    }

    // x_ss solves As·x = −Bs·u.
    let rhs = -(&ss.b * u);
    let x_ss = ss
        .a
        .clone()
        .lu()
        .solve(&rhs)
        .ok_or(ModelError::SingularSystem {
            what: "state matrix solve failed in steady output",
        })?;
    Ok(&ss.c * x_ss + &ss.d * u)
}
