//! Handler-level tests for the HTTP API

use axum::{
    body::to_bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fcl_algo::{GoodLpBackend, MilpBackend, MilpProgram, RawSolution, SamplerConfig};
use fcl_core::{FclResult, LocationTable};
use fcl_server::{
    health, optimize_handler, ApiError, AppState, MapConfig, OptimizeRequest, OptimizeResponse,
};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

fn table(n: usize) -> LocationTable {
    let points: Vec<(f64, f64)> = (0..n)
        .map(|i| (33.0 + (i % 3) as f64 * 2.0, -110.0 + (i / 3) as f64 * 4.0))
        .collect();
    LocationTable::from_coordinates(&points)
}

fn state(table: Option<LocationTable>, value_seed: Option<u64>) -> Arc<AppState> {
    Arc::new(AppState {
        table: table.map(Arc::new),
        backend: Arc::new(GoodLpBackend::microlp()),
        sampler: SamplerConfig::default(),
        value_seed,
        timeout: None,
        map: MapConfig {
            enabled: true,
            width: 160,
            height: 120,
        },
    })
}

fn request(num_customers: i64, num_fc_candidates: i64, k: i64) -> OptimizeRequest {
    OptimizeRequest {
        num_customers,
        num_fc_candidates,
        k,
    }
}

async fn call(state: &Arc<AppState>, req: OptimizeRequest) -> Result<OptimizeResponse, ApiError> {
    optimize_handler(Extension(Arc::clone(state)), Ok(Json(req)))
        .await
        .map(|Json(body)| body)
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_reports_table_state() {
    let ready = health(Extension(state(Some(table(10)), None))).await;
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(body_json(ready).await["status"], "ok");

    let missing = health(Extension(state(None, None))).await;
    assert_eq!(missing.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(missing).await["status"], "unavailable");
}

#[tokio::test]
async fn test_missing_table_is_server_error() {
    let err = call(&state(None, None), request(5, 3, 2)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail().starts_with("Server Configuration Error"));
}

#[tokio::test]
async fn test_validation_errors_are_bad_requests() {
    let state = state(Some(table(10)), None);

    let err = call(&state, request(5, 3, 4)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.detail(),
        "k (FCs to open) cannot be greater than num_fc_candidates"
    );

    for req in [request(0, 3, 1), request(-5, 3, 1), request(5, 3, 0)] {
        let err = call(&state, req).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.detail(),
            "num_customers, num_fc and k must be positive integers"
        );
    }
}

#[tokio::test]
async fn test_oversized_request_is_server_error() {
    let err = call(&state(Some(table(10)), None), request(11, 2, 1))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail().contains("Requested 11, available 10"), "{}", err.detail());
}

#[tokio::test]
async fn test_infeasible_request_is_server_error() {
    let err = call(&state(Some(table(10)), Some(1)), request(10, 2, 1))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(err.detail().contains("infeasible"), "{}", err.detail());
}

#[tokio::test]
async fn test_error_body_shape() {
    let err = call(&state(Some(table(10)), None), request(5, 3, 4))
        .await
        .unwrap_err();
    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_successful_response_shape() {
    let table = table(5);
    let mut found = None;
    for seed in 0..300 {
        match call(&state(Some(table.clone()), Some(seed)), request(5, 3, 2)).await {
            Ok(body) => {
                found = Some(body);
                break;
            }
            Err(err) => assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
    let body = found.expect("no feasible draw in 300 seeds");

    assert_eq!(body.selected_fcs.len(), 2);
    assert_eq!(body.customers.len(), 5);
    assert!(body.total_cost > 0.0);

    let opened: HashSet<usize> = body.selected_fcs.iter().map(|fc| fc.fc_id).collect();
    for (i, customer) in body.customers.iter().enumerate() {
        assert_eq!(customer.cust_id, i);
        assert!(opened.contains(&customer.assigned_fc));
    }
    for fc in &body.selected_fcs {
        assert!((50_000..150_000).contains(&fc.opening_cost));
    }
    assert!(body.map_base64.as_deref().is_some_and(|m| !m.is_empty()));

    let json = serde_json::to_value(&body).unwrap();
    for key in ["total_cost", "selected_fcs", "customers", "map_base64"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

struct Slow;

impl MilpBackend for Slow {
    fn id(&self) -> &str {
        "slow"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(&self, _program: &MilpProgram) -> FclResult<RawSolution> {
        std::thread::sleep(Duration::from_millis(500));
        Err(fcl_core::FclError::Solver("too late".into()))
    }
}

#[tokio::test]
async fn test_timeout_maps_to_server_error() {
    let state = Arc::new(AppState {
        table: Some(Arc::new(table(10))),
        backend: Arc::new(Slow),
        sampler: SamplerConfig::default(),
        value_seed: Some(0),
        timeout: Some(Duration::from_millis(50)),
        map: MapConfig::default(),
    });
    let err = call(&state, request(4, 2, 2)).await.unwrap_err();
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.detail(), "Solver timed out after 50ms");
}
