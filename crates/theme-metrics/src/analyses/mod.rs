//! Stored theme analyses for a shop, gated by subscription plan.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AnalysisId, AnalysisRecord, AnalysisSubmission, AnalysisSummaryView, PlanTier, ShopDomain,
};
pub use repository::{AnalysisRepository, RepositoryError};
pub use router::analysis_router;
pub use service::{usage_period_start, AnalysisServiceError, ThemeAnalysisService};
