use crate::cli::ServeArgs;
use crate::infra::{
    default_scoring_config, fixture_bureau_report, AppState, FixtureBureauClient,
    InMemoryDecisionRepository,
};
use crate::routes::with_decision_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use credit_engine::config::AppConfig;
use credit_engine::error::AppError;
use credit_engine::telemetry;
use credit_engine::workflows::decision::DecisionService;
use credit_engine::workflows::directory::EmployerDirectory;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // Scoring requires the directory; refuse to start without it.
    let directory = Arc::new(EmployerDirectory::from_path(&config.engine.directory_path)?);
    info!(
        path = %config.engine.directory_path.display(),
        entries = directory.len(),
        "employer directory loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryDecisionRepository::default());
    let bureau = Arc::new(FixtureBureauClient::new(fixture_bureau_report()));
    let decision_service = Arc::new(DecisionService::new(
        directory,
        bureau,
        repository,
        default_scoring_config(),
    )?);

    let app = with_decision_routes(decision_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "credit decision engine ready");

    axum::serve(listener, app).await?;
    Ok(())
}
