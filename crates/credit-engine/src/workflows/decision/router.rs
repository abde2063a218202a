use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::bureau::BureauClient;
use super::domain::{ApplicantInput, DecisionId, DeviceSignals};
use super::intake::IntakeError;
use super::repository::{DecisionRepository, RepositoryError};
use super::service::{DecisionService, DecisionServiceError};

/// Router builder exposing HTTP endpoints for decisioning and retrieval.
pub fn decision_router<B, R>(service: Arc<DecisionService<B, R>>) -> Router
where
    B: BureauClient + 'static,
    R: DecisionRepository + 'static,
{
    Router::new()
        .route("/api/v1/credit/decisions", post(decide_handler::<B, R>))
        .route(
            "/api/v1/credit/decisions/:decision_id",
            get(fetch_handler::<B, R>),
        )
        .with_state(service)
}

pub(crate) async fn decide_handler<B, R>(
    State(service): State<Arc<DecisionService<B, R>>>,
    headers: HeaderMap,
    axum::Json(mut input): axum::Json<ApplicantInput>,
) -> Response
where
    B: BureauClient + 'static,
    R: DecisionRepository + 'static,
{
    merge_device_signals(&mut input.device, &headers);

    match service.decide(input) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(DecisionServiceError::Intake(IntakeError::Validation(violations))) => {
            let payload = json!({
                "error": "applicant input failed validation",
                "violations": violations,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(DecisionServiceError::Intake(error @ IntakeError::NonPositiveIncome { .. })) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(DecisionServiceError::Bureau { decision_id, .. }) => {
            let payload = json!({
                "error": "could not complete credit check",
                "correlation_id": decision_id.0,
            });
            (StatusCode::BAD_GATEWAY, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn fetch_handler<B, R>(
    State(service): State<Arc<DecisionService<B, R>>>,
    Path(decision_id): Path<String>,
) -> Response
where
    B: BureauClient + 'static,
    R: DecisionRepository + 'static,
{
    let id = DecisionId(decision_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(DecisionServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "decision_id": id.0,
                "error": "decision not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

/// Fill device metadata from request headers when the payload did not carry
/// it explicitly. Only the first hop of `x-forwarded-for` is trusted.
fn merge_device_signals(device: &mut DeviceSignals, headers: &HeaderMap) {
    if device.ip.is_none() {
        device.ip = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
    }

    if device.user_agent.is_none() {
        device.user_agent = headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
    }
}
