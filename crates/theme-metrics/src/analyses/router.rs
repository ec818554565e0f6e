use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{AnalysisId, AnalysisSubmission};
use super::repository::{AnalysisRepository, RepositoryError};
use super::service::{AnalysisServiceError, ThemeAnalysisService};

const DEFAULT_HISTORY_LIMIT: usize = 20;
const MAX_HISTORY_LIMIT: usize = 100;

/// Router builder exposing analysis submission and lookup endpoints.
pub fn analysis_router<R>(service: Arc<ThemeAnalysisService<R>>) -> Router
where
    R: AnalysisRepository + 'static,
{
    Router::new()
        .route("/api/v1/analyses", post(submit_handler::<R>))
        .route("/api/v1/analyses/:analysis_id", get(fetch_handler::<R>))
        .route("/api/v1/shops/:shop/analyses", get(history_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct HistoryQuery {
    pub limit: Option<usize>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ThemeAnalysisService<R>>>,
    axum::Json(submission): axum::Json<AnalysisSubmission>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    match service.submit(submission, Utc::now()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<ThemeAnalysisService<R>>>,
    Path(analysis_id): Path<String>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let id = AnalysisId(analysis_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(AnalysisServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "error": "analysis not found",
                "analysis_id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

pub(crate) async fn history_handler<R>(
    State(service): State<Arc<ThemeAnalysisService<R>>>,
    Path(shop): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response
where
    R: AnalysisRepository + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    match service.history(&shop, limit) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: AnalysisServiceError) -> Response {
    let status = match &error {
        AnalysisServiceError::InvalidShop(_)
        | AnalysisServiceError::InvalidThemeName
        | AnalysisServiceError::TooManySections { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisServiceError::QuotaExceeded { .. }
        | AnalysisServiceError::Repository(RepositoryError::QuotaExhausted { .. }) => {
            StatusCode::TOO_MANY_REQUESTS
        }
        AnalysisServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AnalysisServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AnalysisServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
