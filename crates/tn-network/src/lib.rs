//! tn-network: thermal-network topology layer for thermnet.
//!
//! Provides:
//! - Core network data structures (Node, Branch, Endpoint, Network)
//! - Incremental network builder with validation
//! - Derived linear-algebra artifacts: incidence matrix A, conductance
//!   diagonal G, capacity diagonal C
//! - Series/parallel conductance folding for pre-assembly reduction
//!
//! # Example
//!
//! ```
//! use tn_core::units::{jpk, wpk};
//! use tn_network::{Endpoint, NetworkBuilder};
//!
//! let mut builder = NetworkBuilder::new();
//! let wall = builder.add_capacitive_node("wall", jpk(1.0e6));
//! let air = builder.add_capacitive_node("air", jpk(3.0e4));
//! builder.add_boundary_branch("outdoor convection", wall, wpk(250.0));
//! builder.add_branch_between("indoor convection", wall, air, wpk(120.0));
//! let network = builder.build().unwrap();
//!
//! assert_eq!(network.node_count(), 2);
//! assert_eq!(network.branch_count(), 2);
//! ```

pub mod builder;
pub mod combine;
pub mod error;
pub mod network;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::NetworkBuilder;
pub use combine::{parallel, series};
pub use error::NetworkError;
pub use network::{Branch, Endpoint, Network, Node};
