//! Series/parallel conductance folding.
//!
//! A kept branch must be a single valid resistor, so chains through nodes
//! with no capacity and no source are folded before assembly: an outdoor
//! convection film in series with half a slab of conduction becomes one
//! conductance, and the three-resistor linearized radiation chain becomes
//! one equivalent branch.

use crate::error::{NetworkError, NetworkResult};

/// Equivalent conductance of resistances in series: 1 / sum(1/g).
pub fn series(conductances: &[f64]) -> NetworkResult<f64> {
    if conductances.is_empty() {
        return Err(NetworkError::Combine {
            what: "series of zero conductances",
        });
    }
    let mut inv_sum = 0.0;
    for &g in conductances {
        if !g.is_finite() || g <= 0.0 {
            return Err(NetworkError::Combine {
                what: "series requires strictly positive finite conductances",
            });
        }
        inv_sum += 1.0 / g;
    }
    Ok(1.0 / inv_sum)
}

/// Equivalent conductance of resistances in parallel: sum(g).
pub fn parallel(conductances: &[f64]) -> NetworkResult<f64> {
    if conductances.is_empty() {
        return Err(NetworkError::Combine {
            what: "parallel of zero conductances",
        });
    }
    let mut sum = 0.0;
    for &g in conductances {
        if !g.is_finite() || g <= 0.0 {
            return Err(NetworkError::Combine {
                what: "parallel requires strictly positive finite conductances",
            });
        }
        sum += g;
    }
    Ok(sum)
}
