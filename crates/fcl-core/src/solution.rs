//! Solution data structures
//!
//! Defines the output of a solved facility-location model.

use crate::instance::{CostMatrix, ProblemInstance};
use serde::{Deserialize, Serialize};

/// Total mapping from customer index to the facility serving it.
///
/// Position `i` holds the facility index assigned to customer `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment(Vec<usize>);

impl Assignment {
    pub fn new(facility_of: Vec<usize>) -> Self {
        Self(facility_of)
    }

    pub fn facility_of(&self, customer: usize) -> Option<usize> {
        self.0.get(customer).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `(customer, facility)` pairs in customer order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.0.iter().copied().enumerate()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Complete solution of one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Solution {
    /// Opened facility indices, ascending
    pub chosen_facilities: Vec<usize>,
    pub assignment: Assignment,
    /// Objective reported by the solver
    pub objective_value: f64,
}

impl Solution {
    pub fn is_chosen(&self, facility: usize) -> bool {
        self.chosen_facilities.binary_search(&facility).is_ok()
    }

    /// Demand served by each chosen facility, in `chosen_facilities` order.
    pub fn facility_loads(&self, instance: &ProblemInstance) -> Vec<(usize, u64)> {
        self.chosen_facilities
            .iter()
            .map(|&j| {
                let load = self
                    .assignment
                    .iter()
                    .filter(|&(_, f)| f == j)
                    .map(|(i, _)| u64::from(instance.customers[i].demand))
                    .sum();
                (j, load)
            })
            .collect()
    }

    /// Transport part of the objective under this assignment.
    pub fn transport_cost(&self, costs: &CostMatrix) -> f64 {
        self.assignment.iter().map(|(i, j)| costs.get(i, j)).sum()
    }

    /// Opening-cost part of the objective.
    pub fn opening_cost(&self, instance: &ProblemInstance) -> f64 {
        self.chosen_facilities
            .iter()
            .map(|&j| f64::from(instance.facilities[j].opening_cost))
            .sum()
    }

    /// Objective recomputed from the inputs rather than taken from the solver.
    pub fn recomputed_cost(&self, instance: &ProblemInstance, costs: &CostMatrix) -> f64 {
        self.transport_cost(costs) + self.opening_cost(instance)
    }

    /// Format a human-readable summary
    pub fn summary(&self, instance: &ProblemInstance) -> String {
        let mut s = String::new();
        s.push_str(&format!("Facility Location Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Total Cost: {:.2}\n", self.objective_value));
        s.push_str(&format!(
            "Opened: {} of {} candidates\n",
            self.chosen_facilities.len(),
            instance.num_facilities()
        ));
        let limit = instance.capacity_limit();
        for (j, load) in self.facility_loads(instance) {
            s.push_str(&format!(
                "  FC {j}: load {load} / {limit:.1}, opening cost {}\n",
                instance.facilities[j].opening_cost
            ));
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coordinate, Customer, FacilityCandidate};

    fn instance() -> ProblemInstance {
        let customers = [10, 20, 30]
            .iter()
            .enumerate()
            .map(|(i, &d)| Customer {
                index: i,
                record: i,
                coordinate: Coordinate::new(0.0, i as f64),
                demand: d,
            })
            .collect();
        let facilities = [100, 200]
            .iter()
            .enumerate()
            .map(|(j, &c)| FacilityCandidate {
                index: j,
                record: j,
                coordinate: Coordinate::new(1.0, j as f64),
                opening_cost: c,
            })
            .collect();
        ProblemInstance::new(customers, facilities, 2).unwrap()
    }

    #[test]
    fn test_loads_and_costs() {
        let inst = instance();
        let costs = CostMatrix::from_row_major(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let solution = Solution {
            chosen_facilities: vec![0, 1],
            assignment: Assignment::new(vec![0, 1, 1]),
            objective_value: 311.0,
        };

        assert_eq!(solution.facility_loads(&inst), vec![(0, 10), (1, 50)]);
        assert_eq!(solution.transport_cost(&costs), 1.0 + 4.0 + 6.0);
        assert_eq!(solution.opening_cost(&inst), 300.0);
        assert_eq!(solution.recomputed_cost(&inst, &costs), 311.0);
        assert!(solution.is_chosen(1));
        assert!(!solution.is_chosen(2));
        assert!(solution.summary(&inst).contains("Opened: 2 of 2"));
    }
}
