use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAnalysisRepository};
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use theme_metrics::analyses::ThemeAnalysisService;
use theme_metrics::config::AppConfig;
use theme_metrics::error::AppError;
use theme_metrics::scoring::ThemeScoreEngine;
use theme_metrics::telemetry;
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

    let engine = ThemeScoreEngine::default();
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        engine: Arc::new(engine.clone()),
        limits: config.analysis,
    };

    let repository = Arc::new(InMemoryAnalysisRepository::default());
    let analysis_service = Arc::new(ThemeAnalysisService::with_engine(
        repository,
        engine,
        config.analysis,
    ));

    let app = with_analysis_routes(analysis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_sections = config.analysis.max_sections,
        "theme metrics service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
