//! Request sampling
//!
//! Customer and candidate locations are drawn from the backing table with two
//! fixed seeds, so a given table and request size always yields the same
//! points. Opening costs and demands come from the caller's random source,
//! which production code leaves unseeded.

use fcl_core::{
    Customer, FacilityCandidate, FclError, FclResult, LocationTable, ProblemInstance, ProblemSize,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Sampling parameters.
///
/// Value ranges are half-open (`min..max`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Seed for picking customer rows
    pub customer_seed: u64,
    /// Seed for picking facility-candidate rows
    pub facility_seed: u64,
    pub opening_cost_min: u32,
    pub opening_cost_max: u32,
    pub demand_min: u32,
    pub demand_max: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            customer_seed: 23,
            facility_seed: 99,
            opening_cost_min: 50_000,
            opening_cost_max: 150_000,
            demand_min: 10,
            demand_max: 100,
        }
    }
}

impl SamplerConfig {
    /// Reject ranges that could produce zero or be empty.
    pub fn validate(&self) -> FclResult<()> {
        if self.opening_cost_min == 0 || self.opening_cost_min >= self.opening_cost_max {
            return Err(FclError::Config(format!(
                "opening cost range {}..{} must be non-empty and positive",
                self.opening_cost_min, self.opening_cost_max
            )));
        }
        if self.demand_min == 0 || self.demand_min >= self.demand_max {
            return Err(FclError::Config(format!(
                "demand range {}..{} must be non-empty and positive",
                self.demand_min, self.demand_max
            )));
        }
        Ok(())
    }
}

/// Pick `amount` distinct table rows with a fixed seed.
pub fn sample_indices(table_len: usize, amount: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    rand::seq::index::sample(&mut rng, table_len, amount).into_vec()
}

/// Draw a problem instance for `size` from `table`.
///
/// `rng` supplies opening costs and demands only; locations always come from
/// the seeds in `config`.
pub fn sample_instance<R: Rng + ?Sized>(
    table: &LocationTable,
    size: ProblemSize,
    config: &SamplerConfig,
    rng: &mut R,
) -> FclResult<ProblemInstance> {
    config.validate()?;
    if size.num_customers > table.len() || size.num_fc > table.len() {
        return Err(FclError::InsufficientData {
            requested: size.max_sample(),
            available: table.len(),
        });
    }

    let customer_rows = sample_indices(table.len(), size.num_customers, config.customer_seed);
    let facility_rows = sample_indices(table.len(), size.num_fc, config.facility_seed);

    let facilities: Vec<FacilityCandidate> = facility_rows
        .into_iter()
        .enumerate()
        .map(|(index, record)| FacilityCandidate {
            index,
            record,
            coordinate: table[record].coordinate(),
            opening_cost: rng.gen_range(config.opening_cost_min..config.opening_cost_max),
        })
        .collect();

    let customers: Vec<Customer> = customer_rows
        .into_iter()
        .enumerate()
        .map(|(index, record)| Customer {
            index,
            record,
            coordinate: table[record].coordinate(),
            demand: rng.gen_range(config.demand_min..config.demand_max),
        })
        .collect();

    ProblemInstance::new(customers, facilities, size.k)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_table(n: usize) -> LocationTable {
        let points: Vec<(f64, f64)> = (0..n)
            .map(|i| (30.0 + (i % 7) as f64, -100.0 + (i / 7) as f64))
            .collect();
        LocationTable::from_coordinates(&points)
    }

    #[test]
    fn test_sampled_values_within_ranges() {
        let table = grid_table(50);
        let size = ProblemSize::new(40, 20, 3).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let instance = sample_instance(&table, size, &SamplerConfig::default(), &mut rng).unwrap();

        assert_eq!(instance.num_customers(), 40);
        assert_eq!(instance.num_facilities(), 20);
        assert!(instance
            .customers
            .iter()
            .all(|c| (10..100).contains(&c.demand)));
        assert!(instance
            .facilities
            .iter()
            .all(|f| (50_000..150_000).contains(&f.opening_cost)));
    }

    #[test]
    fn test_indices_are_distinct_and_stable() {
        let a = sample_indices(100, 30, 23);
        let b = sample_indices(100, 30, 23);
        assert_eq!(a, b);

        let mut sorted = a.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 30);
        assert!(sorted.iter().all(|&i| i < 100));
    }

    #[test]
    fn test_customer_and_facility_seeds_differ() {
        let config = SamplerConfig::default();
        let customers = sample_indices(1000, 20, config.customer_seed);
        let facilities = sample_indices(1000, 20, config.facility_seed);
        assert_ne!(customers, facilities);
    }

    #[test]
    fn test_insufficient_data() {
        let table = grid_table(10);
        let mut rng = StdRng::seed_from_u64(1);
        let size = ProblemSize::new(11, 2, 1).unwrap();
        let err = sample_instance(&table, size, &SamplerConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            FclError::InsufficientData {
                requested: 11,
                available: 10
            }
        ));

        let size = ProblemSize::new(2, 12, 1).unwrap();
        let err = sample_instance(&table, size, &SamplerConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, FclError::InsufficientData { .. }));
    }

    #[test]
    fn test_invalid_config_ranges() {
        let config = SamplerConfig {
            demand_min: 0,
            ..SamplerConfig::default()
        };
        assert!(matches!(config.validate(), Err(FclError::Config(_))));

        let config = SamplerConfig {
            opening_cost_min: 10,
            opening_cost_max: 10,
            ..SamplerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_partial_toml_style_defaults() {
        let config: SamplerConfig = serde_json::from_str(r#"{"customer_seed": 5}"#).unwrap();
        assert_eq!(config.customer_seed, 5);
        assert_eq!(config.facility_seed, 99);
        assert_eq!(config.demand_max, 100);
    }
}
