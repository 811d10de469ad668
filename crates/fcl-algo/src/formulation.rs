//! Capacitated facility location MILP
//!
//! ```text
//! minimize    Σ_i Σ_j c_ij · x_ij  +  Σ_j f_j · y_j
//!             └──────────────────┘    └──────────┘
//!              transport cost          opening cost
//!
//! subject to:
//!   Σ_j y_j = k                          exact facility count
//!   Σ_j x_ij = 1            ∀ i          single sourcing
//!   x_ij - y_j ≤ 0          ∀ i, j       serve only from open facilities
//!   Σ_i d_i · x_ij ≤ ½ · D  ∀ j          shared capacity bound, D = Σ_i d_i
//!   x_ij, y_j ∈ {0, 1}
//! ```
//!
//! The capacity bound is one global threshold, identical for every facility
//! and independent of `k`. With `k = 1` it can never hold, because the single
//! open facility must carry all of `D`; such requests come back infeasible.
//!
//! Column layout: `y_j` occupies columns `0..n_fc`, then `x_ij` follows
//! row-major by customer.

use crate::program::{MilpProgram, RowSense};
use fcl_core::{CostMatrix, FclError, FclResult, ProblemInstance};
use tracing::debug;

/// A formulated model plus the column index map needed to read it back.
#[derive(Debug, Clone)]
pub struct CflpModel {
    pub program: MilpProgram,
    num_customers: usize,
    num_facilities: usize,
    k: usize,
}

impl CflpModel {
    /// Column of `open[j]`.
    pub fn open_col(&self, facility: usize) -> usize {
        facility
    }

    /// Column of `assign[i][j]`.
    pub fn assign_col(&self, customer: usize, facility: usize) -> usize {
        self.num_facilities + customer * self.num_facilities + facility
    }

    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    pub fn num_facilities(&self) -> usize {
        self.num_facilities
    }

    pub fn k(&self) -> usize {
        self.k
    }
}

/// Build the MILP for `instance` with transport costs `costs`.
pub fn formulate(instance: &ProblemInstance, costs: &CostMatrix) -> FclResult<CflpModel> {
    let n_cust = instance.num_customers();
    let n_fac = instance.num_facilities();
    if costs.rows() != n_cust || costs.cols() != n_fac {
        return Err(FclError::InvalidParameter(format!(
            "cost matrix is {}x{}, instance is {n_cust}x{n_fac}",
            costs.rows(),
            costs.cols()
        )));
    }

    let mut program = MilpProgram::new("FC_Optimization");

    let open: Vec<usize> = instance
        .facilities
        .iter()
        .map(|f| program.add_binary(format!("open_{}", f.index), f64::from(f.opening_cost)))
        .collect();

    let assign: Vec<Vec<usize>> = (0..n_cust)
        .map(|i| {
            (0..n_fac)
                .map(|j| program.add_binary(format!("assign_{i}_{j}"), costs.get(i, j)))
                .collect()
        })
        .collect();

    program.add_row(
        "facility_count",
        open.iter().map(|&col| (col, 1.0)).collect(),
        RowSense::Eq,
        instance.k as f64,
    );

    for (i, row) in assign.iter().enumerate() {
        program.add_row(
            format!("serve_{i}"),
            row.iter().map(|&col| (col, 1.0)).collect(),
            RowSense::Eq,
            1.0,
        );
    }

    for (i, row) in assign.iter().enumerate() {
        for (j, &col) in row.iter().enumerate() {
            program.add_row(
                format!("link_{i}_{j}"),
                vec![(col, 1.0), (open[j], -1.0)],
                RowSense::Le,
                0.0,
            );
        }
    }

    let max_load = instance.capacity_limit();
    for j in 0..n_fac {
        let terms = instance
            .customers
            .iter()
            .enumerate()
            .map(|(i, c)| (assign[i][j], f64::from(c.demand)))
            .collect();
        program.add_row(format!("capacity_{j}"), terms, RowSense::Le, max_load);
    }

    debug!(
        "formulated {} columns ({} integer), {} rows (k = {}, max load {:.1})",
        program.num_columns(),
        program.num_integer_columns(),
        program.num_rows(),
        instance.k,
        max_load
    );

    Ok(CflpModel {
        program,
        num_customers: n_cust,
        num_facilities: n_fac,
        k: instance.k,
    })
}
