//! Post-solve checks of an extracted solution against its instance.

use fcl_core::{CostMatrix, FclError, FclResult, ProblemInstance, Solution};

/// Slack allowed on the per-facility capacity bound
pub const CAPACITY_TOLERANCE: f64 = 1e-6;

/// Relative slack between the reported and the recomputed objective
pub const OBJECTIVE_TOLERANCE: f64 = 1e-3;

/// A single broken property of a solution.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// Wrong number of chosen facilities
    FacilityCount { chosen: usize, k: usize },
    /// Assignment length differs from the customer count
    AssignmentLength { assigned: usize, customers: usize },
    /// A customer is served by a facility that is not open
    ClosedFacility { customer: usize, facility: usize },
    /// A facility serves more than its share of total demand
    OverCapacity { facility: usize, load: u64, limit: f64 },
    /// Reported objective disagrees with the recomputed cost
    ObjectiveMismatch { reported: f64, recomputed: f64 },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::FacilityCount { chosen, k } => {
                write!(f, "{chosen} facilities chosen, expected {k}")
            }
            Violation::AssignmentLength {
                assigned,
                customers,
            } => write!(f, "{assigned} assignments for {customers} customers"),
            Violation::ClosedFacility { customer, facility } => {
                write!(f, "customer {customer} assigned to closed facility {facility}")
            }
            Violation::OverCapacity {
                facility,
                load,
                limit,
            } => write!(f, "facility {facility} load {load} exceeds {limit:.1}"),
            Violation::ObjectiveMismatch {
                reported,
                recomputed,
            } => write!(f, "objective {reported:.4} but recomputed cost is {recomputed:.4}"),
        }
    }
}

/// Collect every violation instead of stopping at the first.
pub fn find_violations(
    instance: &ProblemInstance,
    costs: &CostMatrix,
    solution: &Solution,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    if solution.chosen_facilities.len() != instance.k {
        violations.push(Violation::FacilityCount {
            chosen: solution.chosen_facilities.len(),
            k: instance.k,
        });
    }

    if solution.assignment.len() != instance.num_customers() {
        violations.push(Violation::AssignmentLength {
            assigned: solution.assignment.len(),
            customers: instance.num_customers(),
        });
        // loads and costs are meaningless without a total assignment
        return violations;
    }

    for (customer, facility) in solution.assignment.iter() {
        if facility >= instance.num_facilities() || !solution.is_chosen(facility) {
            violations.push(Violation::ClosedFacility { customer, facility });
        }
    }
    if !violations.is_empty() {
        return violations;
    }

    let limit = instance.capacity_limit();
    for (facility, load) in solution.facility_loads(instance) {
        if load as f64 > limit + CAPACITY_TOLERANCE {
            violations.push(Violation::OverCapacity {
                facility,
                load,
                limit,
            });
        }
    }

    let recomputed = solution.recomputed_cost(instance, costs);
    let reported = solution.objective_value;
    if (reported - recomputed).abs() > OBJECTIVE_TOLERANCE * reported.abs().max(1.0) {
        violations.push(Violation::ObjectiveMismatch {
            reported,
            recomputed,
        });
    }

    violations
}

/// Fail with [`FclError::SolutionInconsistent`] listing all violations.
pub fn verify_solution(
    instance: &ProblemInstance,
    costs: &CostMatrix,
    solution: &Solution,
) -> FclResult<()> {
    let violations = find_violations(instance, costs, solution);
    if violations.is_empty() {
        return Ok(());
    }
    let detail: Vec<String> = violations.iter().map(ToString::to_string).collect();
    Err(FclError::SolutionInconsistent(detail.join("; ")))
}
