//! Problem inputs: validated request size, sampled customers and candidates,
//! and the derived cost matrix.

use crate::error::{FclError, FclResult};
use crate::location::Coordinate;
use serde::{Deserialize, Serialize};

/// Share of total demand any single facility may serve.
///
/// The bound is the same for every facility and does not scale with `k`, so a
/// small `k` can make the model infeasible on its own (with `k = 1` it always
/// is). Infeasibility is reported, never corrected.
pub const CAPACITY_SHARE: f64 = 0.5;

/// Validated request dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSize {
    pub num_customers: usize,
    pub num_fc: usize,
    pub k: usize,
}

impl ProblemSize {
    /// Validate raw request values.
    ///
    /// Counts arrive as signed integers so that negative input is reported as
    /// an invalid parameter rather than a decoding failure.
    pub fn new(num_customers: i64, num_fc: i64, k: i64) -> FclResult<Self> {
        if num_customers <= 0 || num_fc <= 0 || k <= 0 {
            return Err(FclError::InvalidParameter(
                "num_customers, num_fc and k must be positive integers".into(),
            ));
        }
        if k > num_fc {
            return Err(FclError::InvalidParameter(
                "k (FCs to open) cannot be greater than num_fc_candidates".into(),
            ));
        }
        Ok(Self {
            num_customers: to_usize(num_customers)?,
            num_fc: to_usize(num_fc)?,
            k: to_usize(k)?,
        })
    }

    /// Largest number of table rows either sample needs.
    pub fn max_sample(&self) -> usize {
        self.num_customers.max(self.num_fc)
    }
}

fn to_usize(value: i64) -> FclResult<usize> {
    usize::try_from(value)
        .map_err(|_| FclError::InvalidParameter(format!("value {value} is out of range")))
}

/// A sampled customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub index: usize,
    /// Row of the backing table this customer was drawn from
    pub record: usize,
    pub coordinate: Coordinate,
    /// Strictly positive demand
    pub demand: u32,
}

/// A sampled facility candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityCandidate {
    pub index: usize,
    /// Row of the backing table this candidate was drawn from
    pub record: usize,
    pub coordinate: Coordinate,
    /// Strictly positive opening cost
    pub opening_cost: u32,
}

/// Everything the formulator needs for one request.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub customers: Vec<Customer>,
    pub facilities: Vec<FacilityCandidate>,
    /// Exact number of facilities to open
    pub k: usize,
}

impl ProblemInstance {
    /// Assemble an instance, re-checking the invariants the sampler guarantees.
    pub fn new(
        customers: Vec<Customer>,
        facilities: Vec<FacilityCandidate>,
        k: usize,
    ) -> FclResult<Self> {
        if customers.is_empty() || facilities.is_empty() || k == 0 {
            return Err(FclError::InvalidParameter(
                "an instance needs customers, candidates and k > 0".into(),
            ));
        }
        if k > facilities.len() {
            return Err(FclError::InvalidParameter(format!(
                "k = {k} exceeds the {} facility candidates",
                facilities.len()
            )));
        }
        if let Some(c) = customers.iter().find(|c| c.demand == 0) {
            return Err(FclError::InvalidParameter(format!(
                "customer {} has zero demand",
                c.index
            )));
        }
        if let Some(f) = facilities.iter().find(|f| f.opening_cost == 0) {
            return Err(FclError::InvalidParameter(format!(
                "facility {} has zero opening cost",
                f.index
            )));
        }
        Ok(Self {
            customers,
            facilities,
            k,
        })
    }

    pub fn num_customers(&self) -> usize {
        self.customers.len()
    }

    pub fn num_facilities(&self) -> usize {
        self.facilities.len()
    }

    pub fn total_demand(&self) -> u64 {
        self.customers.iter().map(|c| u64::from(c.demand)).sum()
    }

    /// Maximum demand a single open facility may serve.
    pub fn capacity_limit(&self) -> f64 {
        CAPACITY_SHARE * self.total_demand() as f64
    }

    pub fn customer_coordinates(&self) -> Vec<Coordinate> {
        self.customers.iter().map(|c| c.coordinate).collect()
    }

    pub fn facility_coordinates(&self) -> Vec<Coordinate> {
        self.facilities.iter().map(|f| f.coordinate).collect()
    }
}

/// Dense `num_customers × num_fc` cost matrix, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build from a row-major buffer. Entries must be finite and non-negative.
    pub fn from_row_major(rows: usize, cols: usize, data: Vec<f64>) -> FclResult<Self> {
        if data.len() != rows * cols {
            return Err(FclError::Parse(format!(
                "cost matrix buffer has {} entries, expected {rows}x{cols}",
                data.len()
            )));
        }
        if let Some(bad) = data.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(FclError::Parse(format!("invalid cost entry {bad}")));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, customer: usize, facility: usize) -> f64 {
        self.data[customer * self.cols + facility]
    }

    pub fn row(&self, customer: usize) -> &[f64] {
        let start = customer * self.cols;
        &self.data[start..start + self.cols]
    }
}
