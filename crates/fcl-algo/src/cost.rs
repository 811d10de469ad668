//! Distance and cost matrices.

use fcl_core::{Coordinate, CostMatrix, FclResult, ProblemInstance};

/// Planar Euclidean distances, row-major `customers × facilities`.
pub fn distance_matrix(customers: &[Coordinate], facilities: &[Coordinate]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(customers.len() * facilities.len());
    for c in customers {
        for f in facilities {
            distances.push(c.planar_distance(f));
        }
    }
    distances
}

/// Transport cost: distance scaled by the customer's demand.
///
/// Coupling cost to demand makes distant assignments of large customers
/// expensive, which is what pulls facilities toward demand clusters.
pub fn build_cost_matrix(instance: &ProblemInstance) -> FclResult<CostMatrix> {
    let rows = instance.num_customers();
    let cols = instance.num_facilities();
    let mut data = distance_matrix(
        &instance.customer_coordinates(),
        &instance.facility_coordinates(),
    );
    for (i, customer) in instance.customers.iter().enumerate() {
        let demand = f64::from(customer.demand);
        for value in &mut data[i * cols..(i + 1) * cols] {
            *value *= demand;
        }
    }
    CostMatrix::from_row_major(rows, cols, data)
}
