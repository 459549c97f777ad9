//! Assembly of the differential-algebraic system from a network.
//!
//! The thermal circuit yields
//!
//! ```text
//! C·dθ/dt = −(AᵀGA)·θ + AᵀG·b + f
//!       q = G·(−A·θ + b)
//! ```
//!
//! with θ the node temperatures and q the branch heat flows. Assembly is a
//! pure function of the network: identical networks give bit-identical
//! matrices.

use nalgebra::{DMatrix, DVector};
use tracing::debug;
use tn_network::Network;

use crate::error::{ModelError, ModelResult};

/// The assembled DAE: the conductance-weighted Laplacian K = AᵀGA, the
/// source injection map AᵀG, and the capacity diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalDae {
    laplacian: DMatrix<f64>,
    injection: DMatrix<f64>,
    capacities: DVector<f64>,
    incidence: DMatrix<f64>,
    conductances: DVector<f64>,
}

impl ThermalDae {
    /// Assemble the DAE matrices from a validated network.
    ///
    /// Fails with [`ModelError::DisconnectedNode`] if any node has no
    /// incident branch: its Laplacian row would be all-zero and every solve
    /// against K ill-posed.
    pub fn assemble(network: &Network) -> ModelResult<Self> {
        for node in network.nodes() {
            if network.incident_branch_count(node.id) == 0 {
                return Err(ModelError::DisconnectedNode { node: node.id });
            }
        }

        let a = network.incidence();
        let g = network.conductances();

        // AᵀG with G diagonal: scale each column of Aᵀ by the branch
        // conductance instead of forming the dense product.
        let mut injection = a.transpose();
        for (j, &gj) in g.iter().enumerate() {
            for i in 0..injection.nrows() {
                injection[(i, j)] *= gj;
            }
        }
        let laplacian = &injection * &a;

        debug!(
            nodes = network.node_count(),
            branches = network.branch_count(),
            "assembled thermal DAE"
        );

        Ok(Self {
            laplacian,
            injection,
            capacities: network.capacities(),
            incidence: a,
            conductances: g,
        })
    }

    /// The conductance-weighted Laplacian K = AᵀGA (symmetric PSD for any
    /// fully connected network).
    pub fn laplacian(&self) -> &DMatrix<f64> {
        &self.laplacian
    }

    /// The source injection map AᵀG (nodes x branches).
    pub fn injection(&self) -> &DMatrix<f64> {
        &self.injection
    }

    /// Capacity diagonal, node order; zeros mark algebraic nodes.
    pub fn capacities(&self) -> &DVector<f64> {
        &self.capacities
    }

    /// Number of temperature nodes.
    pub fn node_count(&self) -> usize {
        self.laplacian.nrows()
    }

    /// Number of heat-flow branches.
    pub fn branch_count(&self) -> usize {
        self.incidence.nrows()
    }

    /// Branch heat flows q = G(−Aθ + b) for given node temperatures and
    /// temperature-source values.
    pub fn branch_flows(&self, theta: &DVector<f64>, b: &DVector<f64>) -> ModelResult<DVector<f64>> {
        if theta.len() != self.node_count() {
            return Err(ModelError::DimensionMismatch {
                what: "temperature vector theta",
                expected: self.node_count(),
                actual: theta.len(),
            });
        }
        if b.len() != self.branch_count() {
            return Err(ModelError::DimensionMismatch {
                what: "temperature source vector b",
                expected: self.branch_count(),
                actual: b.len(),
            });
        }
        let mut q = b - &self.incidence * theta;
        for (i, &gi) in self.conductances.iter().enumerate() {
            q[i] *= gi;
        }
        Ok(q)
    }
}
