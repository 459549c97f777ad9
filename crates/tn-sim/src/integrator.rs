//! Fixed-step Euler steppers.
//!
//! Both schemes advance the reduced system dθ/dt = As·θ + Bs·u with a
//! constant step, so the per-step matrices are computed once per run:
//!
//! - forward Euler: θ[k+1] = (I + Δt·As)·θ[k] + Δt·Bs·u[k]
//! - backward Euler: θ[k+1] = (I − Δt·As)⁻¹·(θ[k] + Δt·Bs·u[k])
//!
//! The backward variant factors (I − Δt·As) once (LU) and solves per step.

use nalgebra::{DMatrix, DVector, Dyn, LU};
use tn_model::StateSpace;

use crate::error::{SimError, SimResult};

/// Update-rule selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
    /// Forward Euler: one matrix-vector product per step, stable only for
    /// steps below the spectral bound.
    #[default]
    Explicit,
    /// Backward Euler: one triangular solve per step, unconditionally
    /// stable for dissipative systems.
    Implicit,
}

/// Trait for fixed-step steppers over a reduced model.
pub trait Stepper {
    /// Advance the state by one step under input u[k].
    fn step(&self, x: &DVector<f64>, u: &DVector<f64>) -> SimResult<DVector<f64>>;

    /// State dimension, for caller-side validation.
    fn state_count(&self) -> usize;
}

fn check_dims(
    x: &DVector<f64>,
    u: &DVector<f64>,
    n_state: usize,
    n_input: usize,
) -> SimResult<()> {
    if x.len() != n_state {
        return Err(SimError::DimensionMismatch {
            what: "state vector",
            expected: n_state,
            actual: x.len(),
        });
    }
    if u.len() != n_input {
        return Err(SimError::DimensionMismatch {
            what: "input vector",
            expected: n_input,
            actual: u.len(),
        });
    }
    Ok(())
}

/// Forward (explicit) Euler with precomputed transition matrices.
///
/// Accepts any positive step without clamping; divergence above the
/// spectral bound is a modeling outcome, not an engine fault.
pub struct ExplicitEuler {
    /// I + Δt·As
    phi: DMatrix<f64>,
    /// Δt·Bs
    gamma: DMatrix<f64>,
}

impl ExplicitEuler {
    pub fn new(ss: &StateSpace, dt: f64) -> SimResult<Self> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "time step must be positive and finite",
            });
        }
        let n = ss.state_count();
        let phi = DMatrix::identity(n, n) + &ss.a * dt;
        let gamma = &ss.b * dt;
        Ok(Self { phi, gamma })
    }
}

impl Stepper for ExplicitEuler {
    fn step(&self, x: &DVector<f64>, u: &DVector<f64>) -> SimResult<DVector<f64>> {
        check_dims(x, u, self.phi.nrows(), self.gamma.ncols())?;
        Ok(&self.phi * x + &self.gamma * u)
    }

    fn state_count(&self) -> usize {
        self.phi.nrows()
    }
}

/// Backward (implicit) Euler with a per-run LU factorization of (I − Δt·As).
#[derive(Debug)]
pub struct ImplicitEuler {
    lu: LU<f64, Dyn, Dyn>,
    /// Δt·Bs
    gamma: DMatrix<f64>,
    n_state: usize,
}

impl ImplicitEuler {
    pub fn new(ss: &StateSpace, dt: f64) -> SimResult<Self> {
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(SimError::InvalidArg {
                what: "time step must be positive and finite",
            });
        }
        let n = ss.state_count();
        let m = DMatrix::identity(n, n) - &ss.a * dt;
        let lu = m.lu();
        if !lu.is_invertible() {
            return Err(SimError::Integration {
                what: "implicit step matrix (I - dt*As) is singular",
            });
        }
        let gamma = &ss.b * dt;
        Ok(Self {
            lu,
            gamma,
            n_state: n,
        })
    }
}

impl Stepper for ImplicitEuler {
    fn step(&self, x: &DVector<f64>, u: &DVector<f64>) -> SimResult<DVector<f64>> {
        check_dims(x, u, self.n_state, self.gamma.ncols())?;
        let rhs = x + &self.gamma * u;
        self.lu.solve(&rhs).ok_or(SimError::Integration {
            what: "implicit step solve failed",
        })
    }

    fn state_count(&self) -> usize {
        self.n_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    fn scalar_system(a: f64, b: f64) -> StateSpace {
        // dθ/dt = a·θ + b·u, observed directly.
        let dae_a = DMatrix::from_element(1, 1, a);
        let dae_b = DMatrix::from_element(1, 1, b);
        let c = DMatrix::from_element(1, 1, 1.0);
        let d = DMatrix::zeros(1, 1);
        StateSpace::from_parts(dae_a, dae_b, c, d).unwrap()
    }

    #[test]
    fn explicit_matches_closed_form_step() {
        let ss = scalar_system(-0.01, 0.01);
        let stepper = ExplicitEuler::new(&ss, 1.0).unwrap();
        let x = DVector::from_element(1, 0.0);
        let u = DVector::from_element(1, 10.0);
        let x1 = stepper.step(&x, &u).unwrap();
        assert!((x1[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn implicit_matches_closed_form_step() {
        let ss = scalar_system(-0.01, 0.01);
        let stepper = ImplicitEuler::new(&ss, 1.0).unwrap();
        let x = DVector::from_element(1, 0.0);
        let u = DVector::from_element(1, 10.0);
        // (1 + 0.01)⁻¹ · (0 + 0.1)
        let x1 = stepper.step(&x, &u).unwrap();
        assert!((x1[0] - 0.1 / 1.01).abs() < 1e-12);
    }

    #[test]
    fn rejects_nonpositive_step() {
        let ss = scalar_system(-1.0, 1.0);
        assert!(ExplicitEuler::new(&ss, 0.0).is_err());
        assert!(ImplicitEuler::new(&ss, -1.0).is_err());
        assert!(ExplicitEuler::new(&ss, f64::NAN).is_err());
    }

    #[test]
    fn implicit_detects_singular_step_matrix() {
        // a = 1/dt makes (I - dt*a) exactly zero.
        let ss = scalar_system(0.5, 1.0);
        let err = ImplicitEuler::new(&ss, 2.0).unwrap_err();
        assert!(matches!(err, SimError::Integration { .. }));
    }

    #[test]
    fn steppers_check_dimensions() {
        let ss = scalar_system(-1.0, 1.0);
        let stepper = ExplicitEuler::new(&ss, 0.1).unwrap();
        let err = stepper
            .step(&DVector::zeros(3), &DVector::zeros(1))
            .unwrap_err();
        assert!(matches!(err, SimError::DimensionMismatch { .. }));
    }
}
