//! Turning raw solver values into a [`Solution`].
//!
//! Binary variables come back as floats. A value above [`CHOSEN_THRESHOLD`]
//! counts as 1. When rounding leaves a customer without any facility, it is
//! assigned to the single chosen facility that still carries a value above
//! [`NONZERO_THRESHOLD`]; any other ambiguity is an error.

use crate::formulation::CflpModel;
use crate::solver::RawSolution;
use fcl_core::{Assignment, FclError, FclResult, Solution};
use tracing::warn;

pub const CHOSEN_THRESHOLD: f64 = 0.5;
pub const NONZERO_THRESHOLD: f64 = 1e-6;

/// Read chosen facilities and the customer assignment out of `raw`.
pub fn extract_solution(model: &CflpModel, raw: &RawSolution) -> FclResult<Solution> {
    let expected = model.program.num_columns();
    if raw.values.len() != expected {
        return Err(FclError::SolutionInconsistent(format!(
            "{} solver values for {expected} columns",
            raw.values.len()
        )));
    }
    let value = |col: usize| raw.values[col];

    let chosen: Vec<usize> = (0..model.num_facilities())
        .filter(|&j| value(model.open_col(j)) > CHOSEN_THRESHOLD)
        .collect();
    if chosen.len() != model.k() {
        return Err(FclError::SolutionInconsistent(format!(
            "solver opened {} facilities, expected {}",
            chosen.len(),
            model.k()
        )));
    }

    let mut facility_of = Vec::with_capacity(model.num_customers());
    for i in 0..model.num_customers() {
        let above: Vec<usize> = chosen
            .iter()
            .copied()
            .filter(|&j| value(model.assign_col(i, j)) > CHOSEN_THRESHOLD)
            .collect();

        let facility = match above.as_slice() {
            [j] => *j,
            [] => repair(model, raw, &chosen, i)?,
            many => {
                return Err(FclError::SolutionInconsistent(format!(
                    "customer {i} is assigned to {} facilities {many:?}",
                    many.len()
                )))
            }
        };
        facility_of.push(facility);
    }

    Ok(Solution {
        chosen_facilities: chosen,
        assignment: Assignment::new(facility_of),
        objective_value: raw.objective,
    })
}

fn repair(model: &CflpModel, raw: &RawSolution, chosen: &[usize], customer: usize) -> FclResult<usize> {
    let nonzero: Vec<usize> = chosen
        .iter()
        .copied()
        .filter(|&j| raw.values[model.assign_col(customer, j)] > NONZERO_THRESHOLD)
        .collect();

    match nonzero.as_slice() {
        [j] => {
            warn!(
                "customer {customer} has no assignment above {CHOSEN_THRESHOLD}; \
                 using facility {j} (value {:.6})",
                raw.values[model.assign_col(customer, *j)]
            );
            Ok(*j)
        }
        [] => Err(FclError::SolutionInconsistent(format!(
            "customer {customer} is not assigned to any chosen facility"
        ))),
        many => Err(FclError::SolutionInconsistent(format!(
            "customer {customer} has fractional assignments to {many:?}"
        ))),
    }
}
