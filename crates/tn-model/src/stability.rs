//! Eigen-spectrum of the state matrix and the explicit-Euler step bound.
//!
//! For a well-formed dissipative network every eigenvalue of As is real and
//! negative; the forward-Euler scheme is stable for Δt ≤ min(−2/λ). A
//! non-negative real part signals a malformed or non-dissipative network —
//! reported, never fatal: the caller decides what to do with it.

use nalgebra::Complex;
use tracing::warn;

use crate::reduce::StateSpace;

/// The eigen-spectrum of a reduced state matrix.
#[derive(Debug, Clone)]
pub struct Spectrum {
    eigenvalues: Vec<Complex<f64>>,
}

impl Spectrum {
    /// Compute the spectrum of As.
    pub fn of(ss: &StateSpace) -> Self {
        let mut eigenvalues: Vec<Complex<f64>> =
            ss.a.clone().complex_eigenvalues().iter().copied().collect();
        // Deterministic order: slowest (closest to zero) mode last.
        eigenvalues.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap_or(std::cmp::Ordering::Equal));
        if let Some(bad) = eigenvalues.iter().find(|l| l.re >= 0.0) {
            warn!(
                re = bad.re,
                im = bad.im,
                "state matrix has a non-negative eigenvalue; network is not dissipative"
            );
        }
        Self { eigenvalues }
    }

    /// Eigenvalues sorted by ascending real part.
    pub fn eigenvalues(&self) -> &[Complex<f64>] {
        &self.eigenvalues
    }

    /// True when every eigenvalue has a strictly negative real part.
    pub fn is_dissipative(&self) -> bool {
        !self.eigenvalues.is_empty() && self.eigenvalues.iter().all(|l| l.re < 0.0)
    }

    /// Maximum stable explicit-Euler step Δt_max = min(−2/Re λ), or `None`
    /// for a non-dissipative spectrum.
    pub fn max_explicit_step(&self) -> Option<f64> {
        if !self.is_dissipative() {
            return None;
        }
        self.eigenvalues
            .iter()
            .map(|l| -2.0 / l.re)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Time constants T = −1/Re λ of the dissipative modes, ascending.
    pub fn time_constants(&self) -> Vec<f64> {
        let mut t: Vec<f64> = self
            .eigenvalues
            .iter()
            .filter(|l| l.re < 0.0)
            .map(|l| -1.0 / l.re)
            .collect();
        t.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dae::ThermalDae;
    use crate::reduce::reduce;
    use crate::sources::SourceLayout;
    use tn_core::units::{jpk, wpk};
    use tn_network::NetworkBuilder;

    fn single_mode_system() -> StateSpace {
        // Equivalent 5 W/K into 1000 J/K: one eigenvalue at -0.005.
        let mut builder = NetworkBuilder::new();
        let film = builder.add_node("film");
        let mass = builder.add_capacitive_node("mass", jpk(1000.0));
        let src = builder.add_boundary_branch("source", film, wpk(10.0));
        builder.add_branch_between("link", film, mass, wpk(10.0));
        let net = builder.build().unwrap();
        let dae = ThermalDae::assemble(&net).unwrap();
        let layout = SourceLayout::builder(&net)
            .temperature_source(src)
            .output(mass)
            .build()
            .unwrap();
        reduce(&dae, &layout).unwrap()
    }

    #[test]
    fn single_mode_spectrum() {
        let ss = single_mode_system();
        let spectrum = Spectrum::of(&ss);
        assert!(spectrum.is_dissipative());
        assert_eq!(spectrum.eigenvalues().len(), 1);
        assert!((spectrum.eigenvalues()[0].re + 0.005).abs() < 1e-12);

        // dt_max = -2/λ = 400 s, time constant 200 s.
        let dt_max = spectrum.max_explicit_step().unwrap();
        assert!((dt_max - 400.0).abs() < 1e-9);
        let tc = spectrum.time_constants();
        assert_eq!(tc.len(), 1);
        assert!((tc[0] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn non_dissipative_reports_none() {
        let mut ss = single_mode_system();
        // Flip the sign by hand to emulate a malformed network.
        ss.a[(0, 0)] = 0.005;
        let spectrum = Spectrum::of(&ss);
        assert!(!spectrum.is_dissipative());
        assert!(spectrum.max_explicit_step().is_none());
        assert!(spectrum.time_constants().is_empty());
    }
}
