//! HTTP handlers and wire types.

use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fcl_algo::{optimize, OptimizationOutcome};
use fcl_core::{FclError, FclResult, LocationTable, ProblemSize};
use fcl_viz::{render_map_base64, MapScene, PlottersMapRenderer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Body of `POST /optimize`.
///
/// Counts are signed so that negative values reach validation and come back
/// as 400 rather than a decoding error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub num_customers: i64,
    pub num_fc_candidates: i64,
    pub k: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedFc {
    pub fc_id: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub opening_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAssignment {
    pub cust_id: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub assigned_fc: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub total_cost: f64,
    pub selected_fcs: Vec<SelectedFc>,
    pub customers: Vec<CustomerAssignment>,
    /// Base64 PNG; `null` when maps are disabled or even the placeholder failed
    pub map_base64: Option<String>,
}

impl OptimizeResponse {
    pub fn from_outcome(outcome: &OptimizationOutcome, map_base64: Option<String>) -> Self {
        let instance = &outcome.instance;
        let solution = &outcome.solution;
        let selected_fcs = solution
            .chosen_facilities
            .iter()
            .map(|&j| {
                let fc = &instance.facilities[j];
                SelectedFc {
                    fc_id: j,
                    latitude: fc.coordinate.latitude,
                    longitude: fc.coordinate.longitude,
                    opening_cost: fc.opening_cost,
                }
            })
            .collect();
        let customers = solution
            .assignment
            .iter()
            .map(|(i, j)| {
                let c = &instance.customers[i];
                CustomerAssignment {
                    cust_id: i,
                    latitude: c.coordinate.latitude,
                    longitude: c.coordinate.longitude,
                    assigned_fc: j,
                }
            })
            .collect();
        Self {
            total_cost: outcome.total_cost(),
            selected_fcs,
            customers,
            map_base64,
        }
    }
}

/// Error body `{"detail": ...}` with a status derived from the error kind.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<FclError> for ApiError {
    fn from(err: FclError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let detail = match err {
            FclError::InvalidParameter(msg) | FclError::TableUnavailable(msg) => msg,
            FclError::InsufficientData {
                requested,
                available,
            } => format!(
                "Not enough rows in the location table. Requested {requested}, available {available}"
            ),
            other => other.to_string(),
        };
        Self { status, detail }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// `GET /health`
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Response {
    if state.table.is_some() {
        (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response()
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "unavailable" })),
        )
            .into_response()
    }
}

/// `POST /optimize`
pub async fn optimize_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let Json(request) = body?;
    let table = state.table.clone().ok_or_else(|| {
        FclError::TableUnavailable(
            "Server Configuration Error: location data is missing or failed to load.".into(),
        )
    })?;
    let size = ProblemSize::new(request.num_customers, request.num_fc_candidates, request.k)?;
    info!(
        "optimize request: {} customers, {} candidates, k = {}",
        size.num_customers, size.num_fc, size.k
    );

    let worker = Arc::clone(&state);
    let task = tokio::task::spawn_blocking(move || run_request(&worker, &table, size));
    let joined = match state.timeout {
        Some(limit) => tokio::time::timeout(limit, task).await.map_err(|_| {
            warn!("optimize request exceeded {limit:?}; abandoning solve");
            FclError::SolverTimeout { limit }
        })?,
        None => task.await,
    };
    let response = joined.map_err(|e| {
        error!("optimization task failed: {e}");
        FclError::Solver(format!("optimization task failed: {e}"))
    })?;

    match response {
        Ok(body) => Ok(Json(body)),
        Err(err) => {
            if err.is_client_error() {
                warn!("rejected request: {err}");
            } else {
                error!("optimization error: {err}");
            }
            Err(err.into())
        }
    }
}

/// Blocking part of a request: solve, then draw the map.
pub fn run_request(
    state: &AppState,
    table: &LocationTable,
    size: ProblemSize,
) -> FclResult<OptimizeResponse> {
    let mut rng = match state.value_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let outcome = optimize(table, size, &state.sampler, state.backend.as_ref(), &mut rng)?;

    let map_base64 = if state.map.enabled {
        let renderer = PlottersMapRenderer::new(state.map.width, state.map.height);
        let scene = MapScene::from_solution(&outcome.instance, &outcome.solution);
        render_map_base64(&renderer, &scene)
    } else {
        None
    };
    Ok(OptimizeResponse::from_outcome(&outcome, map_base64))
}
