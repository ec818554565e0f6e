use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use theme_metrics::analyses::{
    AnalysisId, AnalysisRecord, AnalysisRepository, RepositoryError, ShopDomain,
};
use theme_metrics::config::AnalysisConfig;
use theme_metrics::scoring::ThemeScoreEngine;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<ThemeScoreEngine>,
    pub(crate) limits: AnalysisConfig,
}

/// Process-local analysis storage; records are kept in insertion order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAnalysisRepository {
    records: Arc<Mutex<Vec<AnalysisRecord>>>,
}

impl InMemoryAnalysisRepository {
    fn records(&self) -> Result<MutexGuard<'_, Vec<AnalysisRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AnalysisRepository for InMemoryAnalysisRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn latest_for_theme(
        &self,
        shop: &ShopDomain,
        theme_name: &str,
    ) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records()?;
        Ok(guard
            .iter()
            .filter(|record| &record.shop == shop && record.theme_name == theme_name)
            .max_by_key(|record| record.analyzed_at)
            .cloned())
    }

    fn history_for_shop(
        &self,
        shop: &ShopDomain,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.records()?;
        let mut records: Vec<_> = guard
            .iter()
            .rev()
            .filter(|record| &record.shop == shop)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at));
        records.truncate(limit);
        Ok(records)
    }

    fn insert_within_quota(
        &self,
        record: AnalysisRecord,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records()?;
        let used = guard
            .iter()
            .filter(|existing| existing.shop == record.shop && existing.analyzed_at >= since)
            .count();
        if used >= limit {
            return Err(RepositoryError::QuotaExhausted { used });
        }
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn count_since(
        &self,
        shop: &ShopDomain,
        since: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let guard = self.records()?;
        Ok(guard
            .iter()
            .filter(|record| &record.shop == shop && record.analyzed_at >= since)
            .count())
    }
}
