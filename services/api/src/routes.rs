use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use credit_engine::workflows::decision::{
    decision_router, BureauClient, DecisionRepository, DecisionService,
};

pub(crate) fn with_decision_routes<B, R>(service: Arc<DecisionService<B, R>>) -> axum::Router
where
    B: BureauClient + 'static,
    R: DecisionRepository + 'static,
{
    decision_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        default_scoring_config, fixture_bureau_report, FixtureBureauClient,
        InMemoryDecisionRepository,
    };
    use axum::body::Body;
    use axum::http::Request;
    use credit_engine::workflows::directory::EmployerDirectory;
    use std::io::Cursor;
    use tower::ServiceExt;

    fn router() -> axum::Router {
        let directory = Arc::new(
            EmployerDirectory::from_reader(Cursor::new(
                "name;tel;email;website\nAcme & Co.;;;\n",
            ))
            .expect("directory loads"),
        );
        let service = Arc::new(
            DecisionService::new(
                directory,
                Arc::new(FixtureBureauClient::new(fixture_bureau_report())),
                Arc::new(InMemoryDecisionRepository::default()),
                default_scoring_config(),
            )
            .expect("service builds"),
        );
        with_decision_routes(service)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let response = router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn decision_endpoint_is_mounted() {
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/credit/decisions")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
