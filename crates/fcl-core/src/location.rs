//! Geographic points and the read-only backing table they are sampled from.

use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Planar distance in degree space.
    ///
    /// No great-circle correction is applied; the sampled points span a
    /// continental extent where the flat approximation is accepted.
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let dlat = self.latitude - other.latitude;
        let dlng = self.longitude - other.longitude;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// One row of the backing location table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationRecord {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Immutable table of location records.
///
/// Loaded once at process start and shared read-only (typically behind an
/// `Arc`) by every optimisation request.
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    records: Vec<LocationRecord>,
}

impl LocationTable {
    pub fn new(records: Vec<LocationRecord>) -> Self {
        Self { records }
    }

    /// Build a table from bare coordinates, numbering ids from zero.
    pub fn from_coordinates(points: &[(f64, f64)]) -> Self {
        let records = points
            .iter()
            .enumerate()
            .map(|(i, &(lat, lng))| LocationRecord::new(i.to_string(), lat, lng))
            .collect();
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LocationRecord> {
        self.records.get(index)
    }
}

impl Index<usize> for LocationTable {
    type Output = LocationRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}
