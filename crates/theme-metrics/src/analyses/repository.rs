use chrono::{DateTime, Utc};

use super::domain::{AnalysisId, AnalysisRecord, ShopDomain};

/// Storage abstraction so the service can be exercised without a database.
pub trait AnalysisRepository: Send + Sync {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError>;
    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError>;
    /// Most recent analysis of `theme_name` for the shop, if any.
    fn latest_for_theme(
        &self,
        shop: &ShopDomain,
        theme_name: &str,
    ) -> Result<Option<AnalysisRecord>, RepositoryError>;
    /// Newest first.
    fn history_for_shop(
        &self,
        shop: &ShopDomain,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, RepositoryError>;
    /// Stores `record` only if the shop has fewer than `limit` analyses at or
    /// after `since`. The count and the write must happen atomically.
    fn insert_within_quota(
        &self,
        record: AnalysisRecord,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<AnalysisRecord, RepositoryError>;
    /// Number of analyses recorded for the shop at or after `since`.
    fn count_since(&self, shop: &ShopDomain, since: DateTime<Utc>)
        -> Result<usize, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("usage quota exhausted ({used} recorded)")]
    QuotaExhausted { used: usize },
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
