use crate::TnError;

/// Floating point type used throughout the engine. Double precision is a
/// requirement of the reduction and integration math, not a preference.
pub type Real = f64;

/// One tolerance pair for everything that compares floats.
///
/// The steady-state/reduced-model equivalence checks use the relative part;
/// it is a parameter here rather than a constant buried in the solver.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
            rel: 1e-6,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TnError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TnError::NonFinite { what, value: v })
    }
}

/// Conductances and time steps must be strictly positive and finite.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, TnError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(TnError::NonPositive { what, value: v })
    }
}

/// Capacities may be zero (algebraic node) but never negative.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, TnError> {
    let v = ensure_finite(v, what)?;
    if v >= 0.0 {
        Ok(v)
    } else {
        Err(TnError::Negative { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "conductance").is_err());
        assert!(ensure_positive(-1.0, "conductance").is_err());
        assert!(ensure_positive(Real::INFINITY, "conductance").is_err());
        assert_eq!(ensure_positive(2.5, "conductance").unwrap(), 2.5);
    }

    #[test]
    fn ensure_non_negative_allows_zero() {
        assert_eq!(ensure_non_negative(0.0, "capacity").unwrap(), 0.0);
        assert!(ensure_non_negative(-0.1, "capacity").is_err());
    }

    proptest! {
        #[test]
        fn nearly_equal_is_reflexive(v in -1e12_f64..1e12) {
            prop_assert!(nearly_equal(v, v, Tolerances::default()));
        }

        #[test]
        fn positive_values_pass(v in 1e-30_f64..1e30) {
            prop_assert!(ensure_positive(v, "v").is_ok());
        }
    }
}
