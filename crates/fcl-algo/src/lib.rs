//! # fcl-algo: Capacitated Facility Location Optimisation
//!
//! Turns a request size and a location table into an optimal set of opened
//! facilities and a single-sourcing customer assignment.
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Sample locations and values | [`sampler`] | [`fcl_core::ProblemInstance`] |
//! | Demand-weighted distances | [`cost`] | [`fcl_core::CostMatrix`] |
//! | Build the MILP | [`formulation`] | [`CflpModel`] |
//! | Solve | [`solver`] | [`RawSolution`] |
//! | Round and repair | [`extract`] | [`fcl_core::Solution`] |
//! | Re-check invariants | [`validation`] | violations |
//!
//! [`optimize`] runs all of them in order.
//!
//! ### Architecture
//!
//! The formulation produces a solver-neutral [`MilpProgram`]. Backends
//! implement [`MilpBackend`] and are picked by name through [`SolverKind`], so
//! adding a solver never touches formulation or extraction.
//!
//! ## Example
//!
//! ```ignore
//! use fcl_algo::{optimize, SamplerConfig, SolverKind};
//! use fcl_core::ProblemSize;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let table = fcl_io::load_locations("Zip_codes.csv".as_ref())?;
//! let size = ProblemSize::new(50, 10, 3)?;
//! let backend = SolverKind::Microlp.build_backend();
//! let outcome = optimize(
//!     &table,
//!     size,
//!     &SamplerConfig::default(),
//!     backend.as_ref(),
//!     &mut StdRng::from_entropy(),
//! )?;
//! println!("{}", outcome.solution.summary(&outcome.instance));
//! ```

pub mod cost;
pub mod extract;
pub mod formulation;
pub mod pipeline;
pub mod program;
pub mod sampler;
pub mod solver;
pub mod validation;

pub use cost::build_cost_matrix;
pub use extract::extract_solution;
pub use formulation::{formulate, CflpModel};
pub use pipeline::{optimize, solve_instance, OptimizationOutcome};
pub use program::{MilpProgram, RowSense};
pub use sampler::{sample_indices, sample_instance, SamplerConfig};
pub use solver::{
    solve_program, GoodLpBackend, LpEngine, MilpBackend, RawSolution, SolverKind,
};
pub use validation::{find_violations, verify_solution, Violation};
