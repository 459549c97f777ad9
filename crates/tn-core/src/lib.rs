//! tn-core: stable foundation for thermnet.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact IDs for network objects)
//! - error (shared error types)
//! - timing (opt-in performance timers)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{TnError, TnResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
