//! # fcl-core: Capacitated Facility Location Core Types
//!
//! Shared data model for the facility-location workspace:
//!
//! - [`LocationTable`] / [`LocationRecord`] - the read-only backing table of points
//! - [`Customer`] / [`FacilityCandidate`] - per-request samples drawn from it
//! - [`ProblemInstance`] / [`CostMatrix`] - solver inputs
//! - [`Solution`] / [`Assignment`] - solver outputs
//! - [`FclError`] - the error taxonomy shared by every crate
//!
//! Sampling, formulation and solving live in `fcl-algo`.

pub mod error;
pub mod instance;
pub mod location;
pub mod solution;

pub use error::{FclError, FclResult};
pub use instance::{
    CostMatrix, Customer, FacilityCandidate, ProblemInstance, ProblemSize, CAPACITY_SHARE,
};
pub use location::{Coordinate, LocationRecord, LocationTable};
pub use solution::{Assignment, Solution};
