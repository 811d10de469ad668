use crate::VizError;
use fcl_core::{Coordinate, ProblemInstance, Solution};
use std::ops::Range;

/// What a map shows: every point plus the chosen facilities and assignment
/// lines.
#[derive(Debug, Clone, Default)]
pub struct MapScene {
    pub customers: Vec<Coordinate>,
    pub candidates: Vec<Coordinate>,
    /// Indices into `candidates`
    pub chosen: Vec<usize>,
    /// `assignment[i]` is the candidate serving customer `i`
    pub assignment: Vec<usize>,
}

impl MapScene {
    pub fn from_solution(instance: &ProblemInstance, solution: &Solution) -> Self {
        Self {
            customers: instance.customer_coordinates(),
            candidates: instance.facility_coordinates(),
            chosen: solution.chosen_facilities.clone(),
            assignment: solution.assignment.as_slice().to_vec(),
        }
    }

    /// Reject scenes whose indices do not line up.
    pub fn validate(&self) -> Result<(), VizError> {
        if self.customers.is_empty() && self.candidates.is_empty() {
            return Err(VizError::InvalidScene("nothing to draw".into()));
        }
        if self.assignment.len() != self.customers.len() {
            return Err(VizError::InvalidScene(format!(
                "{} assignments for {} customers",
                self.assignment.len(),
                self.customers.len()
            )));
        }
        let n = self.candidates.len();
        if let Some(bad) = self.chosen.iter().chain(&self.assignment).find(|&&j| j >= n) {
            return Err(VizError::InvalidScene(format!(
                "candidate index {bad} out of range ({n} candidates)"
            )));
        }
        Ok(())
    }

    /// Assignment lines as `(customer, facility)` coordinate pairs.
    pub fn links(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.assignment
            .iter()
            .zip(&self.customers)
            .map(|(&j, &c)| (c, self.candidates[j]))
    }

    /// Longitude and latitude ranges covering every point, padded by 5%.
    pub fn extent(&self) -> (Range<f64>, Range<f64>) {
        let points = self.customers.iter().chain(&self.candidates);
        let (mut lng_min, mut lng_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut lat_min, mut lat_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            lng_min = lng_min.min(p.longitude);
            lng_max = lng_max.max(p.longitude);
            lat_min = lat_min.min(p.latitude);
            lat_max = lat_max.max(p.latitude);
        }
        (pad(lng_min, lng_max), pad(lat_min, lat_max))
    }
}

fn pad(min: f64, max: f64) -> Range<f64> {
    if !min.is_finite() || !max.is_finite() {
        return -1.0..1.0;
    }
    let span = max - min;
    let margin = if span > 0.0 { span * 0.05 } else { 0.5 };
    (min - margin)..(max + margin)
}
