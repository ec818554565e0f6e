use std::sync::{Arc, Mutex};

use axum::response::Response;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::analyses::domain::{
    AnalysisId, AnalysisRecord, AnalysisSubmission, PlanTier, ShopDomain,
};
use crate::analyses::repository::{AnalysisRepository, RepositoryError};
use crate::analyses::{analysis_router, ThemeAnalysisService};
use crate::config::AnalysisConfig;
use crate::scoring::{CoreWebVitals, SectionAnalysisData, ThemeData, ThemeScoreInput};

pub(super) const SHOP: &str = "demo-store.myshopify.com";

pub(super) fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn storefront_input() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(CoreWebVitals {
            lcp: 1400.0,
            cls: 0.03,
            tbt: 80.0,
            fcp: 900.0,
        }),
        sections: vec![
            SectionAnalysisData {
                lines_of_code: 140,
                complexity_score: 10,
                has_lazy_loading: true,
                has_responsive_images: true,
                ..SectionAnalysisData::named("Featured collection", "featured-collection")
            },
            SectionAnalysisData {
                lines_of_code: 60,
                complexity_score: 5,
                ..SectionAnalysisData::named("Newsletter", "newsletter")
            },
        ],
        theme: ThemeData {
            total_sections: 6,
            snippets_count: 4,
            has_translations: true,
            sections_above_fold: Some(1),
        },
        context: None,
    }
}

pub(super) fn sluggish_input() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(CoreWebVitals {
            lcp: 5200.0,
            cls: 0.3,
            tbt: 700.0,
            fcp: 3400.0,
        }),
        sections: vec![SectionAnalysisData {
            lines_of_code: 500,
            complexity_score: 85,
            has_video: true,
            liquid_loops: 8,
            ..SectionAnalysisData::named("Hero video", "video-hero")
        }],
        theme: ThemeData {
            total_sections: 2,
            snippets_count: 0,
            has_translations: false,
            sections_above_fold: Some(1),
        },
        context: None,
    }
}

pub(super) fn submission(plan: PlanTier) -> AnalysisSubmission {
    AnalysisSubmission {
        shop: SHOP.to_string(),
        theme_name: "Dawn".to_string(),
        plan,
        input: storefront_input(),
    }
}

pub(super) fn build_service() -> (ThemeAnalysisService<MemoryRepository>, Arc<MemoryRepository>) {
    build_service_with_limits(AnalysisConfig::default())
}

pub(super) fn build_service_with_limits(
    limits: AnalysisConfig,
) -> (ThemeAnalysisService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = ThemeAnalysisService::new(repository.clone(), limits);
    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("lock").len()
    }
}

impl AnalysisRepository for MemoryRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn latest_for_theme(
        &self,
        shop: &ShopDomain,
        theme_name: &str,
    ) -> Result<Option<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .iter()
            .rev()
            .find(|record| &record.shop == shop && record.theme_name == theme_name)
            .cloned())
    }

    fn history_for_shop(
        &self,
        shop: &ShopDomain,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| &record.shop == shop)
            .take(limit)
            .cloned()
            .collect())
    }

    fn insert_within_quota(
        &self,
        record: AnalysisRecord,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<AnalysisRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lock");
        let used = guard
            .iter()
            .filter(|existing| existing.shop == record.shop && existing.analyzed_at >= since)
            .count();
        if used >= limit {
            return Err(RepositoryError::QuotaExhausted { used });
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn count_since(
        &self,
        shop: &ShopDomain,
        since: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let guard = self.records.lock().expect("lock");
        Ok(guard
            .iter()
            .filter(|record| &record.shop == shop && record.analyzed_at >= since)
            .count())
    }
}

/// Storage whose quota reads lag, widening the window between check and write.
#[derive(Default)]
pub(super) struct LaggingRepository {
    pub(super) inner: MemoryRepository,
}

impl AnalysisRepository for LaggingRepository {
    fn insert(&self, record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch(&self, id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn latest_for_theme(
        &self,
        shop: &ShopDomain,
        theme_name: &str,
    ) -> Result<Option<AnalysisRecord>, RepositoryError> {
        self.inner.latest_for_theme(shop, theme_name)
    }

    fn history_for_shop(
        &self,
        shop: &ShopDomain,
        limit: usize,
    ) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        self.inner.history_for_shop(shop, limit)
    }

    fn insert_within_quota(
        &self,
        record: AnalysisRecord,
        since: DateTime<Utc>,
        limit: usize,
    ) -> Result<AnalysisRecord, RepositoryError> {
        self.inner.insert_within_quota(record, since, limit)
    }

    fn count_since(
        &self,
        shop: &ShopDomain,
        since: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        let used = self.inner.count_since(shop, since);
        std::thread::sleep(std::time::Duration::from_millis(20));
        used
    }
}

pub(super) struct UnavailableRepository;

impl AnalysisRepository for UnavailableRepository {
    fn insert(&self, _record: AnalysisRecord) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AnalysisId) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn latest_for_theme(
        &self,
        _shop: &ShopDomain,
        _theme_name: &str,
    ) -> Result<Option<AnalysisRecord>, RepositoryError> {
        Ok(None)
    }

    fn history_for_shop(
        &self,
        _shop: &ShopDomain,
        _limit: usize,
    ) -> Result<Vec<AnalysisRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_within_quota(
        &self,
        _record: AnalysisRecord,
        _since: DateTime<Utc>,
        _limit: usize,
    ) -> Result<AnalysisRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn count_since(
        &self,
        _shop: &ShopDomain,
        _since: DateTime<Utc>,
    ) -> Result<usize, RepositoryError> {
        Ok(0)
    }
}

pub(super) fn router_with_service(service: ThemeAnalysisService<MemoryRepository>) -> Router {
    analysis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
