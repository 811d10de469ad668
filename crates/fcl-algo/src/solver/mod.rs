//! MILP solver backends
//!
//! The solver is a capability, not a dependency: anything that can solve a
//! binary MILP with linear constraints implements [`MilpBackend`] and can be
//! swapped in without touching formulation or extraction.
//!
//! | Backend | Kind | Availability |
//! |---------|------|--------------|
//! | [`GoodLpBackend`] + [`LpEngine::Microlp`] | in-process, pure Rust | always |
//! | [`GoodLpBackend`] + [`LpEngine::Highs`] | in-process, HiGHS | `solver-highs` feature |
//! | [`GoodLpBackend`] + [`LpEngine::Cbc`] | in-process, COIN-OR CBC | `solver-cbc` feature |
//!
//! Only the objective value is guaranteed optimal. When several assignments
//! tie, different backends (or versions) may return different ones.
//!
//! Solves are blocking and carry no internal timeout. Callers that need a
//! deadline wrap the call and report [`FclError::SolverTimeout`] themselves.

mod lp;
mod registry;

pub use lp::{GoodLpBackend, LpEngine};
pub use registry::SolverKind;

use crate::program::MilpProgram;
use fcl_core::{FclError, FclResult};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Row slack beyond which a returned point is reported as suspect.
const ROW_TOLERANCE: f64 = 1e-6;

/// Raw solver output: one value per program column and the objective.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSolution {
    pub values: Vec<f64>,
    pub objective: f64,
}

/// A MILP solver that can be invoked on a [`MilpProgram`].
pub trait MilpBackend: Send + Sync {
    /// Unique identifier (e.g., "microlp", "highs", "cbc")
    fn id(&self) -> &str;

    /// Check if this backend can be invoked at runtime
    fn is_available(&self) -> bool;

    /// Solve to optimality.
    ///
    /// Must return [`FclError::InfeasibleModel`] when the solver proves
    /// infeasibility and [`FclError::SolverUnavailable`] when it cannot run.
    fn solve(&self, program: &MilpProgram) -> FclResult<RawSolution>;
}

/// Invoke `backend` on `program` and sanity-check what comes back.
pub fn solve_program(backend: &dyn MilpBackend, program: &MilpProgram) -> FclResult<RawSolution> {
    if !backend.is_available() {
        return Err(FclError::SolverUnavailable(format!(
            "solver backend '{}' is not available",
            backend.id()
        )));
    }

    debug!(
        "solving '{}' with {} ({} columns, {} rows)",
        program.name(),
        backend.id(),
        program.num_columns(),
        program.num_rows()
    );
    let start = Instant::now();
    let raw = backend.solve(program)?;

    if raw.values.len() != program.num_columns() {
        return Err(FclError::Solver(format!(
            "{} returned {} values for {} columns",
            backend.id(),
            raw.values.len(),
            program.num_columns()
        )));
    }
    if !raw.objective.is_finite() {
        return Err(FclError::Solver(format!(
            "{} reported no objective value",
            backend.id()
        )));
    }

    let violation = program.max_violation(&raw.values);
    if violation > ROW_TOLERANCE {
        warn!(
            "{} returned a point violating a row by {:.3e}",
            backend.id(),
            violation
        );
    }

    info!(
        "{} solved in {:.1?}, objective {:.4}",
        backend.id(),
        start.elapsed(),
        raw.objective
    );
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::RowSense;

    struct Fixed(RawSolution);

    impl MilpBackend for Fixed {
        fn id(&self) -> &str {
            "fixed"
        }

        fn is_available(&self) -> bool {
            true
        }

        fn solve(&self, _program: &MilpProgram) -> FclResult<RawSolution> {
            Ok(self.0.clone())
        }
    }

    struct Missing;

    impl MilpBackend for Missing {
        fn id(&self) -> &str {
            "missing"
        }

        fn is_available(&self) -> bool {
            false
        }

        fn solve(&self, _program: &MilpProgram) -> FclResult<RawSolution> {
            unreachable!("unavailable backends are never invoked")
        }
    }

    fn one_column() -> MilpProgram {
        let mut program = MilpProgram::new("one");
        let x = program.add_binary("x", 1.0);
        program.add_row("fix", vec![(x, 1.0)], RowSense::Eq, 1.0);
        program
    }

    #[test]
    fn test_traits_are_object_safe() {
        fn _accepts_backend(_b: &dyn MilpBackend) {}
    }

    #[test]
    fn test_unavailable_backend() {
        let err = solve_program(&Missing, &one_column()).unwrap_err();
        assert!(matches!(err, FclError::SolverUnavailable(_)));
    }

    #[test]
    fn test_rejects_wrong_value_count() {
        let backend = Fixed(RawSolution {
            values: vec![1.0, 0.0],
            objective: 1.0,
        });
        let err = solve_program(&backend, &one_column()).unwrap_err();
        assert!(matches!(err, FclError::Solver(_)));
    }

    #[test]
    fn test_rejects_missing_objective() {
        let backend = Fixed(RawSolution {
            values: vec![1.0],
            objective: f64::NAN,
        });
        let err = solve_program(&backend, &one_column()).unwrap_err();
        assert!(err.to_string().contains("no objective"));
    }

    #[test]
    fn test_row_slack_is_left_to_extraction() {
        // x = 0 breaks the fix row; only extraction and verification reject it
        let program = one_column();
        assert_eq!(program.max_violation(&[0.0]), 1.0);
        let backend = Fixed(RawSolution {
            values: vec![0.0],
            objective: 0.0,
        });
        let raw = solve_program(&backend, &program).unwrap();
        assert_eq!(raw.values, vec![0.0]);
    }
}
