//! In-process backends driven through `good_lp`.

use super::{MilpBackend, RawSolution};
use crate::program::{MilpProgram, RowSense};
use fcl_core::{FclError, FclResult};
use good_lp::solvers::microlp::microlp;
use good_lp::solvers::{ResolutionError, Solution, Solver, SolverModel};
use good_lp::{constraint, variable, Expression, ProblemVariables, Variable};

/// Which `good_lp` solver to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpEngine {
    /// Pure-Rust branch and bound; always compiled in
    Microlp,
    /// HiGHS; requires the `solver-highs` feature
    Highs,
    /// COIN-OR CBC linked through `coin_cbc`; requires the `solver-cbc` feature
    Cbc,
}

impl LpEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            LpEngine::Microlp => "microlp",
            LpEngine::Highs => "highs",
            LpEngine::Cbc => "cbc",
        }
    }

    pub fn is_compiled(&self) -> bool {
        match self {
            LpEngine::Microlp => true,
            LpEngine::Highs => cfg!(feature = "solver-highs"),
            LpEngine::Cbc => cfg!(feature = "solver-cbc"),
        }
    }
}

/// Solves a [`MilpProgram`] in-process with one of the `good_lp` engines.
#[derive(Debug, Clone, Copy)]
pub struct GoodLpBackend {
    engine: LpEngine,
}

impl GoodLpBackend {
    pub fn new(engine: LpEngine) -> Self {
        Self { engine }
    }

    pub fn microlp() -> Self {
        Self::new(LpEngine::Microlp)
    }

    pub fn engine(&self) -> LpEngine {
        self.engine
    }
}

impl Default for GoodLpBackend {
    fn default() -> Self {
        Self::microlp()
    }
}

impl MilpBackend for GoodLpBackend {
    fn id(&self) -> &str {
        self.engine.as_str()
    }

    fn is_available(&self) -> bool {
        self.engine.is_compiled()
    }

    fn solve(&self, program: &MilpProgram) -> FclResult<RawSolution> {
        match self.engine {
            LpEngine::Microlp => run(program, microlp, |_| {}),
            LpEngine::Highs => solve_highs(program),
            LpEngine::Cbc => solve_cbc(program),
        }
    }
}

#[cfg(feature = "solver-highs")]
fn solve_highs(program: &MilpProgram) -> FclResult<RawSolution> {
    run(program, good_lp::solvers::highs::highs, |_| {})
}

#[cfg(not(feature = "solver-highs"))]
fn solve_highs(_program: &MilpProgram) -> FclResult<RawSolution> {
    Err(FclError::SolverUnavailable(
        "HiGHS support not compiled in (enable the solver-highs feature)".into(),
    ))
}

#[cfg(feature = "solver-cbc")]
fn solve_cbc(program: &MilpProgram) -> FclResult<RawSolution> {
    // stdout belongs to the CLI's JSON
    run(program, good_lp::solvers::coin_cbc::coin_cbc, |model| {
        model.set_parameter("log", "0");
    })
}

#[cfg(not(feature = "solver-cbc"))]
fn solve_cbc(_program: &MilpProgram) -> FclResult<RawSolution> {
    Err(FclError::SolverUnavailable(
        "CBC support not compiled in (enable the solver-cbc feature)".into(),
    ))
}

/// Translate `program` into `good_lp` terms, let `configure` tune the
/// solver-specific model, then solve.
fn run<S, F>(program: &MilpProgram, solver: S, configure: F) -> FclResult<RawSolution>
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
    F: FnOnce(&mut S::Model),
{
    let mut vars = ProblemVariables::new();
    let cols: Vec<Variable> = program
        .columns()
        .iter()
        .map(|col| {
            let mut def = variable()
                .min(col.lower)
                .max(col.upper)
                .name(col.name.clone());
            if col.integer {
                def = def.integer();
            }
            vars.add(def)
        })
        .collect();

    let mut objective = Expression::from(0.0);
    for (col, var) in program.columns().iter().zip(&cols) {
        if col.objective != 0.0 {
            objective += col.objective * *var;
        }
    }

    let mut model = vars.minimise(objective).using(solver);
    for row in program.rows() {
        let mut lhs = Expression::from(0.0);
        for &(col, coef) in &row.terms {
            lhs += coef * cols[col];
        }
        let rhs = row.rhs;
        model = model.with(match row.sense {
            RowSense::Le => constraint!(lhs <= rhs),
            RowSense::Eq => constraint!(lhs == rhs),
            RowSense::Ge => constraint!(lhs >= rhs),
        });
    }

    configure(&mut model);
    let solution = model.solve().map_err(map_resolution_error)?;
    let values: Vec<f64> = cols.iter().map(|&v| solution.value(v)).collect();
    let objective = program.objective_value(&values);
    Ok(RawSolution { values, objective })
}

fn map_resolution_error(err: ResolutionError) -> FclError {
    match err {
        ResolutionError::Infeasible => FclError::InfeasibleModel(
            "no assignment serves every customer with exactly k open facilities \
             under the shared capacity bound"
                .into(),
        ),
        other => FclError::Solver(other.to_string()),
    }
}
