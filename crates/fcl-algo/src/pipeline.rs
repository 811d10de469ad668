//! End-to-end request handling: sample, cost, formulate, solve, extract,
//! verify.

use crate::cost::build_cost_matrix;
use crate::extract::extract_solution;
use crate::formulation::formulate;
use crate::sampler::{sample_instance, SamplerConfig};
use crate::solver::{solve_program, MilpBackend};
use crate::validation::verify_solution;
use fcl_core::{CostMatrix, FclError, FclResult, LocationTable, ProblemInstance, ProblemSize, Solution};
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Everything a caller needs to present one solved request.
#[derive(Debug, Clone)]
pub struct OptimizationOutcome {
    pub instance: ProblemInstance,
    pub costs: CostMatrix,
    pub solution: Solution,
    /// Id of the backend that produced `solution`
    pub backend: String,
    pub solve_time: Duration,
}

impl OptimizationOutcome {
    /// Total cost as reported to clients.
    pub fn total_cost(&self) -> f64 {
        self.solution.objective_value
    }
}

/// Run one request against `table`.
pub fn optimize<R: Rng + ?Sized>(
    table: &LocationTable,
    size: ProblemSize,
    config: &SamplerConfig,
    backend: &dyn MilpBackend,
    rng: &mut R,
) -> FclResult<OptimizationOutcome> {
    if table.is_empty() {
        return Err(FclError::TableUnavailable(
            "location table has no usable rows".into(),
        ));
    }
    info!(
        "optimizing {} customers, {} candidates, k = {} over {} locations",
        size.num_customers,
        size.num_fc,
        size.k,
        table.len()
    );

    let instance = sample_instance(table, size, config, rng)?;
    debug!(
        "sampled instance: total demand {}, capacity limit {:.1}",
        instance.total_demand(),
        instance.capacity_limit()
    );
    solve_instance(instance, backend)
}

/// Solve an already sampled instance.
pub fn solve_instance(
    instance: ProblemInstance,
    backend: &dyn MilpBackend,
) -> FclResult<OptimizationOutcome> {
    let costs = build_cost_matrix(&instance)?;
    let model = formulate(&instance, &costs)?;

    let start = Instant::now();
    let raw = solve_program(backend, &model.program)?;
    let solve_time = start.elapsed();

    let solution = extract_solution(&model, &raw)?;
    verify_solution(&instance, &costs, &solution)?;

    info!(
        "opened facilities {:?}, total cost {:.2}",
        solution.chosen_facilities, solution.objective_value
    );
    Ok(OptimizationOutcome {
        instance,
        costs,
        solution,
        backend: backend.id().to_string(),
        solve_time,
    })
}
