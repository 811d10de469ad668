//! # fcl-server: Facility Location HTTP Service
//!
//! | Route | Method | Response |
//! |-------|--------|----------|
//! | `/health` | GET | `200 {"status":"ok"}`, or `503` while no table is loaded |
//! | `/optimize` | POST | solution JSON, `400`/`422`/`500` with `{"detail": ...}` |
//!
//! The location table is read once at start-up and shared read-only by all
//! requests. A missing or empty table does not stop the server; it reports
//! itself unavailable and rejects optimisation requests with 500.
//!
//! Each solve runs on the blocking thread pool. With a configured timeout the
//! request fails with `SolverTimeout` when the deadline passes; the abandoned
//! solve finishes in the background and its result is dropped.

pub mod api;
pub mod config;

pub use api::{
    health, optimize_handler, run_request, ApiError, CustomerAssignment, OptimizeRequest,
    OptimizeResponse, SelectedFc,
};
pub use config::{DataConfig, FclConfig, MapConfig, SamplingConfig, ServerConfig, SolverConfig};

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    routing::{get, post},
    serve, Router,
};
use fcl_algo::{MilpBackend, SamplerConfig};
use fcl_core::LocationTable;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Shared, read-only service state.
pub struct AppState {
    /// `None` when the table failed to load or had no usable rows
    pub table: Option<Arc<LocationTable>>,
    pub backend: Arc<dyn MilpBackend>,
    pub sampler: SamplerConfig,
    pub value_seed: Option<u64>,
    pub timeout: Option<Duration>,
    pub map: MapConfig,
}

impl AppState {
    pub fn from_config(config: &FclConfig, table: Option<LocationTable>) -> Self {
        Self {
            table: table.map(Arc::new),
            backend: config.solver.backend.build_backend(),
            sampler: config.sampling.params.clone(),
            value_seed: config.sampling.value_seed,
            timeout: config.solver.timeout(),
            map: config.map.clone(),
        }
    }
}

/// Load the table, logging instead of failing.
pub fn load_table_or_log(path: &Path) -> Option<LocationTable> {
    match fcl_io::load_locations(path) {
        Ok(table) if table.is_empty() => {
            error!("{} is empty or has no valid coordinates", path.display());
            None
        }
        Ok(table) => {
            info!("loaded {} locations from {}", table.len(), path.display());
            Some(table)
        }
        Err(err) => {
            error!("failed to load {}: {err}", path.display());
            None
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/optimize", post(optimize_handler))
        .layer(Extension(state))
}

/// Load data per `config` and serve until the process is stopped.
pub async fn serve_with_config(config: FclConfig) -> Result<()> {
    let table = load_table_or_log(&config.data.locations);
    let state = Arc::new(AppState::from_config(&config, table));
    if !state.backend.is_available() {
        warn!(
            "solver backend '{}' is not available; optimize requests will fail",
            state.backend.id()
        );
    }

    let listener = TcpListener::bind(config.server.addr)
        .await
        .with_context(|| format!("binding {}", config.server.addr))?;
    info!(
        "serving facility location API at {} (solver {})",
        config.server.addr,
        state.backend.id()
    );
    serve(listener, app(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_table_or_log() {
        assert!(load_table_or_log(Path::new("/nonexistent/Zip_codes.csv")).is_none());

        let mut empty = NamedTempFile::new().unwrap();
        writeln!(empty, "ZIP,LAT,LNG\n1,,\n").unwrap();
        assert!(load_table_or_log(empty.path()).is_none());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ZIP,LAT,LNG\n1,40.0,-75.0\n2,41.0,-76.0").unwrap();
        assert_eq!(load_table_or_log(file.path()).map(|t| t.len()), Some(2));
    }

    #[test]
    fn test_state_from_config() {
        let mut config = FclConfig::default();
        config.solver.timeout_seconds = 5;
        config.sampling.value_seed = Some(3);
        let state = AppState::from_config(&config, None);
        assert!(state.table.is_none());
        assert_eq!(state.backend.id(), "microlp");
        assert_eq!(state.timeout, Some(Duration::from_secs(5)));
        assert_eq!(state.value_seed, Some(3));
    }
}
