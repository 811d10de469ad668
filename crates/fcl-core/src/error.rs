//! Unified error type for facility-location operations
//!
//! [`FclError`] covers every failure the optimisation core can report, from
//! request validation through solver invocation to solution extraction. The
//! HTTP and CLI layers translate it into status codes and exit messages.
//!
//! # Example
//!
//! ```ignore
//! use fcl_core::{FclError, FclResult};
//!
//! fn check(k: i64) -> FclResult<usize> {
//!     if k <= 0 {
//!         return Err(FclError::InvalidParameter("k must be positive".into()));
//!     }
//!     Ok(k as usize)
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Error type for all facility-location operations.
#[derive(Error, Debug)]
pub enum FclError {
    /// Non-positive counts or `k` out of range. A client error.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested sample is larger than the backing location table.
    #[error("Not enough location records: requested {requested}, available {available}")]
    InsufficientData { requested: usize, available: usize },

    /// The backing location table is missing or failed to load.
    #[error("Location table unavailable: {0}")]
    TableUnavailable(String),

    /// The MILP solver could not be invoked at all.
    #[error("Solver unavailable: {0}")]
    SolverUnavailable(String),

    /// The caller-imposed deadline expired before the solver returned.
    #[error("Solver timed out after {limit:?}")]
    SolverTimeout { limit: Duration },

    /// The solver proved that no feasible assignment exists.
    #[error("Model infeasible: {0}")]
    InfeasibleModel(String),

    /// Any other solver-side failure (unexpected status, numerical trouble).
    #[error("Solver error: {0}")]
    Solver(String),

    /// Solver output could not be turned into a consistent solution.
    #[error("Solution inconsistent: {0}")]
    SolutionInconsistent(String),

    /// I/O errors (file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results using FclError.
pub type FclResult<T> = Result<T, FclError>;

impl FclError {
    /// True when the caller sent bad input and should not retry unchanged.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FclError::InvalidParameter(_))
    }

    /// True when a caller-driven retry may succeed.
    ///
    /// Infeasibility is included because demand and opening costs are redrawn
    /// on every request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FclError::SolverUnavailable(_)
                | FclError::SolverTimeout { .. }
                | FclError::InfeasibleModel(_)
        )
    }
}
