use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use theme_metrics::analyses::{
    analysis_router, AnalysisRepository, AnalysisServiceError, ThemeAnalysisService,
};
use theme_metrics::error::AppError;
use theme_metrics::scoring::{ScoreBreakdown, ThemeScoreInput};

pub(crate) fn with_analysis_routes<R>(service: Arc<ThemeAnalysisService<R>>) -> axum::Router
where
    R: AnalysisRepository + 'static,
{
    analysis_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/score", axum::routing::post(score_endpoint))
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

/// Stateless scoring; nothing is stored and no plan quota applies.
pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(input): Json<ThemeScoreInput>,
) -> Result<Json<ScoreBreakdown>, AppError> {
    let limit = state.limits.max_sections;
    if input.sections.len() > limit {
        return Err(AnalysisServiceError::TooManySections {
            limit,
            actual: input.sections.len(),
        }
        .into());
    }
    Ok(Json(state.engine.score(&input)))
}
