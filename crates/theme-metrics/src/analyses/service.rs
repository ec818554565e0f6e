use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::{info, warn};

use super::domain::{AnalysisId, AnalysisRecord, AnalysisSubmission, PlanTier, ShopDomain};
use super::repository::{AnalysisRepository, RepositoryError};
use crate::config::AnalysisConfig;
use crate::scoring::ThemeScoreEngine;

const MAX_THEME_NAME_LEN: usize = 120;

/// Service composing plan limits, the scoring engine, and analysis storage.
pub struct ThemeAnalysisService<R> {
    repository: Arc<R>,
    engine: Arc<ThemeScoreEngine>,
    limits: AnalysisConfig,
}

static ANALYSIS_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_analysis_id() -> AnalysisId {
    let id = ANALYSIS_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AnalysisId(format!("analysis-{id:06}"))
}

/// First instant of the UTC calendar month containing `now`.
pub fn usage_period_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

impl<R> ThemeAnalysisService<R>
where
    R: AnalysisRepository + 'static,
{
    pub fn new(repository: Arc<R>, limits: AnalysisConfig) -> Self {
        Self::with_engine(repository, ThemeScoreEngine::default(), limits)
    }

    pub fn with_engine(repository: Arc<R>, engine: ThemeScoreEngine, limits: AnalysisConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(engine),
            limits,
        }
    }

    /// Validate, enforce the plan quota, score, and persist a new analysis.
    pub fn submit(
        &self,
        submission: AnalysisSubmission,
        now: DateTime<Utc>,
    ) -> Result<AnalysisRecord, AnalysisServiceError> {
        let AnalysisSubmission {
            shop,
            theme_name,
            plan,
            input,
        } = submission;

        let shop = ShopDomain::parse(&shop).ok_or(AnalysisServiceError::InvalidShop(shop))?;
        let theme_name = theme_name.trim().to_string();
        if theme_name.is_empty() || theme_name.len() > MAX_THEME_NAME_LEN {
            return Err(AnalysisServiceError::InvalidThemeName);
        }
        if input.sections.len() > self.limits.max_sections {
            return Err(AnalysisServiceError::TooManySections {
                limit: self.limits.max_sections,
                actual: input.sections.len(),
            });
        }

        let period_start = usage_period_start(now);
        if let Some(limit) = plan.monthly_analysis_limit() {
            let used = self.repository.count_since(&shop, period_start)?;
            if used >= limit {
                warn!(shop = shop.as_str(), plan = plan.label(), used, limit, "analysis quota reached");
                return Err(AnalysisServiceError::QuotaExceeded { plan, limit });
            }
        }

        let previous_overall = self
            .repository
            .latest_for_theme(&shop, &theme_name)?
            .map(|record| record.breakdown.overall);

        let breakdown = self.engine.score(&input);
        let record = AnalysisRecord {
            id: next_analysis_id(),
            shop,
            theme_name,
            plan,
            analyzed_at: now,
            breakdown,
            previous_overall,
        };

        // the early count only avoids scoring doomed requests; the insert enforces the quota
        let stored = match plan.monthly_analysis_limit() {
            Some(limit) => self
                .repository
                .insert_within_quota(record, period_start, limit)
                .map_err(|err| match err {
                    RepositoryError::QuotaExhausted { used } => {
                        warn!(plan = plan.label(), used, limit, "analysis quota reached");
                        AnalysisServiceError::QuotaExceeded { plan, limit }
                    }
                    other => AnalysisServiceError::Repository(other),
                })?,
            None => self.repository.insert(record)?,
        };
        info!(
            analysis_id = %stored.id.0,
            shop = stored.shop.as_str(),
            overall = stored.breakdown.overall,
            status = stored.breakdown.status.label(),
            "theme analysis recorded"
        );
        Ok(stored)
    }

    /// Fetch a stored analysis for API responses.
    pub fn get(&self, id: &AnalysisId) -> Result<AnalysisRecord, AnalysisServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Newest-first history for a shop's dashboard.
    pub fn history(
        &self,
        shop: &str,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, AnalysisServiceError> {
        let shop = ShopDomain::parse(shop)
            .ok_or_else(|| AnalysisServiceError::InvalidShop(shop.to_string()))?;
        let records = self.repository.history_for_shop(&shop, limit)?;
        Ok(records)
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error("'{0}' is not a valid shop domain")]
    InvalidShop(String),
    #[error("theme name must be between 1 and 120 characters")]
    InvalidThemeName,
    #[error("analysis includes {actual} sections; the limit is {limit}")]
    TooManySections { limit: usize, actual: usize },
    #[error("the {} plan allows {limit} analyses per month", .plan.label())]
    QuotaExceeded { plan: PlanTier, limit: usize },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
