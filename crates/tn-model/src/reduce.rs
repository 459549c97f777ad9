//! DAE to state-space reduction by block elimination.
//!
//! Nodes with capacity keep their differential equation and become states;
//! zero-capacity nodes are algebraic and get eliminated by substitution.
//! With K = AᵀGA partitioned over the algebraic set Ka and capacitive set
//! Kc, the algebraic rows
//!
//! ```text
//! 0 = −K_aa·θ_a − K_ac·θ_c + (AᵀG)_a·b_T + f_a
//! ```
//!
//! are solved for θ_a and substituted into the Kc rows, then each state row
//! is normalized by its node capacity. All eliminations go through one LU
//! factorization of K_aa; no matrix is ever explicitly inverted.

use nalgebra::{DMatrix, DVector};
use tracing::debug;
use tn_core::timing::Timer;
use tn_core::{BranchId, NodeId};

use crate::dae::ThermalDae;
use crate::error::{ModelError, ModelResult};
use crate::sources::SourceLayout;

/// One position of the input vector u.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSlot {
    /// Temperature-source value on a branch.
    TemperatureSource(BranchId),
    /// Heat-flow-source value on a node.
    FlowSource(NodeId),
}

/// Reduced linear time-invariant system:
///
/// ```text
/// dθ_c/dt = As·θ_c + Bs·u
///       y = Cs·θ_c + Ds·u
/// ```
///
/// A fresh immutable value per reduction; re-reduce after any change to the
/// network or layout (e.g. a controller gain update).
#[derive(Debug, Clone, PartialEq)]
pub struct StateSpace {
    /// State matrix As (n_C x n_C).
    pub a: DMatrix<f64>,
    /// Input matrix Bs (n_C x n_u).
    pub b: DMatrix<f64>,
    /// Output matrix Cs (n_y x n_C).
    pub c: DMatrix<f64>,
    /// Feedthrough matrix Ds (n_y x n_u).
    pub d: DMatrix<f64>,
    state_nodes: Vec<NodeId>,
    inputs: Vec<InputSlot>,
}

impl StateSpace {
    /// Assemble a system directly from its matrices.
    ///
    /// Intended for synthetic systems (controller design, tests); the node
    /// and input metadata are empty since no network is behind them.
    pub fn from_parts(
        a: DMatrix<f64>,
        b: DMatrix<f64>,
        c: DMatrix<f64>,
        d: DMatrix<f64>,
    ) -> ModelResult<Self> {
        let n = a.nrows();
        if a.ncols() != n {
            return Err(ModelError::DimensionMismatch {
                what: "state matrix columns",
                expected: n,
                actual: a.ncols(),
            });
        }
        if b.nrows() != n {
            return Err(ModelError::DimensionMismatch {
                what: "input matrix rows",
                expected: n,
                actual: b.nrows(),
            });
        }
        if c.ncols() != n {
            return Err(ModelError::DimensionMismatch {
                what: "output matrix columns",
                expected: n,
                actual: c.ncols(),
            });
        }
        if d.nrows() != c.nrows() || d.ncols() != b.ncols() {
            return Err(ModelError::DimensionMismatch {
                what: "feedthrough matrix",
                expected: c.nrows() * b.ncols(),
                actual: d.nrows() * d.ncols(),
            });
        }
        Ok(Self {
            a,
            b,
            c,
            d,
            state_nodes: Vec::new(),
            inputs: Vec::new(),
        })
    }

    /// Number of states n_C.
    pub fn state_count(&self) -> usize {
        self.a.nrows()
    }

    /// Number of inputs n_u.
    pub fn input_count(&self) -> usize {
        self.b.ncols()
    }

    /// Number of outputs n_y.
    pub fn output_count(&self) -> usize {
        self.c.nrows()
    }

    /// Node behind each state, ascending node index.
    pub fn state_nodes(&self) -> &[NodeId] {
        &self.state_nodes
    }

    /// Meaning of each input position, in u order.
    pub fn inputs(&self) -> &[InputSlot] {
        &self.inputs
    }

    /// Evaluate the output equation y = Cs·x + Ds·u.
    pub fn output(&self, x: &DVector<f64>, u: &DVector<f64>) -> ModelResult<DVector<f64>> {
        if x.len() != self.state_count() {
            return Err(ModelError::DimensionMismatch {
                what: "state vector",
                expected: self.state_count(),
                actual: x.len(),
            });
        }
        if u.len() != self.input_count() {
            return Err(ModelError::DimensionMismatch {
                what: "input vector",
                expected: self.input_count(),
                actual: u.len(),
            });
        }
        Ok(&self.c * x + &self.d * u)
    }
}

/// Reduce the DAE to state-space form for the given source/output layout.
///
/// Fails with [`ModelError::Reduction`] when no node carries capacity or
/// when the algebraic block K_aa is singular (a redundant or
/// underdetermined algebraic subsystem).
pub fn reduce(dae: &ThermalDae, layout: &SourceLayout) -> ModelResult<StateSpace> {
    let timer = Timer::start("reduce");

    if layout.node_count() != dae.node_count() {
        return Err(ModelError::DimensionMismatch {
            what: "layout node count",
            expected: dae.node_count(),
            actual: layout.node_count(),
        });
    }
    if layout.branch_count() != dae.branch_count() {
        return Err(ModelError::DimensionMismatch {
            what: "layout branch count",
            expected: dae.branch_count(),
            actual: layout.branch_count(),
        });
    }

    let caps = dae.capacities();
    let kc: Vec<usize> = (0..caps.len()).filter(|&i| caps[i] > 0.0).collect();
    let ka: Vec<usize> = (0..caps.len()).filter(|&i| caps[i] == 0.0).collect();
    let n_c = kc.len();
    if n_c == 0 {
        return Err(ModelError::Reduction {
            what: "network has no capacitive node, nothing to reduce to",
        });
    }

    let tb: Vec<usize> = layout.temp_sources().iter().map(|b| b.index() as usize).collect();
    let fs: Vec<usize> = layout.flow_sources().iter().map(|n| n.index() as usize).collect();
    let n_u = tb.len() + fs.len();

    let k = dae.laplacian();
    let k_cc = k.select_rows(kc.iter()).select_columns(kc.iter());
    let k_ca = k.select_rows(kc.iter()).select_columns(ka.iter());

    // Injection restricted to flagged source branches, and the identity
    // restricted to flagged source nodes, split over the partition.
    let kb = dae.injection().select_columns(tb.iter());
    let kb_c = kb.select_rows(kc.iter());
    let if_c = selection_matrix(&kc, &fs);

    // Eliminate the algebraic partition: θ_a expressed in θ_c and sources.
    // elim_* hold K_aa⁻¹·K_ac, K_aa⁻¹·(AᵀG)_a, K_aa⁻¹·I_a via LU solves.
    let (elim_theta, elim_b, elim_f) = if ka.is_empty() {
        (
            DMatrix::zeros(0, n_c),
            DMatrix::zeros(0, tb.len()),
            DMatrix::zeros(0, fs.len()),
        )
    } else {
        let k_aa = k.select_rows(ka.iter()).select_columns(ka.iter());
        let k_ac = k.select_rows(ka.iter()).select_columns(kc.iter());
        let kb_a = kb.select_rows(ka.iter());
        let if_a = selection_matrix(&ka, &fs);

        let lu = k_aa.lu();
        let singular = || ModelError::Reduction {
            what: "algebraic block K_aa is singular",
        };
        let elim_theta = lu.solve(&k_ac).ok_or_else(singular)?;
        let elim_b = lu.solve(&kb_a).ok_or_else(singular)?;
        let elim_f = lu.solve(&if_a).ok_or_else(singular)?;
        (elim_theta, elim_b, elim_f)
    };

    // Substitute into the capacitive rows and normalize by capacity.
    let mut a_s = -(&k_cc - &k_ca * &elim_theta);
    let b_t = &kb_c - &k_ca * &elim_b;
    let b_f = &if_c - &k_ca * &elim_f;

    let mut b_s = DMatrix::zeros(n_c, n_u);
    b_s.view_mut((0, 0), (n_c, tb.len())).copy_from(&b_t);
    b_s.view_mut((0, tb.len()), (n_c, fs.len())).copy_from(&b_f);

    for (row, &node) in kc.iter().enumerate() {
        let inv_cap = 1.0 / caps[node];
        for j in 0..n_c {
            a_s[(row, j)] *= inv_cap;
        }
        for j in 0..n_u {
            b_s[(row, j)] *= inv_cap;
        }
    }

    // Output selection: a state node reads straight from θ_c; an algebraic
    // node reads through the elimination, with feedthrough from sources.
    let n_y = layout.output_count();
    let mut c_s = DMatrix::zeros(n_y, n_c);
    let mut d_s = DMatrix::zeros(n_y, n_u);
    for (row, &out) in layout.outputs().iter().enumerate() {
        let idx = out.index() as usize;
        if let Some(p) = kc.iter().position(|&i| i == idx) {
            c_s[(row, p)] = 1.0;
        } else {
            let p = ka
                .iter()
                .position(|&i| i == idx)
                .expect("node is either capacitive or algebraic");
            for j in 0..n_c {
                c_s[(row, j)] = -elim_theta[(p, j)];
            }
            for j in 0..tb.len() {
                d_s[(row, j)] = elim_b[(p, j)];
            }
            for j in 0..fs.len() {
                d_s[(row, tb.len() + j)] = elim_f[(p, j)];
            }
        }
    }

    let state_nodes: Vec<NodeId> = kc.iter().map(|&i| NodeId::from_index(i as u32)).collect();
    let inputs: Vec<InputSlot> = layout
        .temp_sources()
        .iter()
        .map(|&b| InputSlot::TemperatureSource(b))
        .chain(layout.flow_sources().iter().map(|&n| InputSlot::FlowSource(n)))
        .collect();

    debug!(
        states = n_c,
        algebraic = ka.len(),
        inputs = n_u,
        outputs = n_y,
        "reduced DAE to state space"
    );
    timer.stop_and_print();

    Ok(StateSpace {
        a: a_s,
        b: b_s,
        c: c_s,
        d: d_s,
        state_nodes,
        inputs,
    })
}

/// Rows restricted to `rows` of the node-space identity restricted to the
/// columns `cols`: entry (i, j) is 1 iff rows[i] == cols[j].
fn selection_matrix(rows: &[usize], cols: &[usize]) -> DMatrix<f64> {
    let mut m = DMatrix::zeros(rows.len(), cols.len());
    for (i, &r) in rows.iter().enumerate() {
        for (j, &c) in cols.iter().enumerate() {
            if r == c {
                m[(i, j)] = 1.0;
            }
        }
    }
    m
}
