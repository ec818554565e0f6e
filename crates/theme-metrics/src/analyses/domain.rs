use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{ScoreBreakdown, ThemeScoreInput};

/// Identifier assigned to a stored analysis.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnalysisId(pub String);

/// Normalized storefront domain (`example.myshopify.com`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Lowercases and trims; returns `None` for values that cannot be a host name.
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim().trim_end_matches('/').to_ascii_lowercase();
        let value = value
            .strip_prefix("https://")
            .or_else(|| value.strip_prefix("http://"))
            .unwrap_or(&value)
            .to_string();

        let valid = !value.is_empty()
            && value.contains('.')
            && value
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
        valid.then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Subscription plan gating how many analyses a shop may run per month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Pro,
    Agency,
}

impl PlanTier {
    /// `None` means unlimited.
    pub const fn monthly_analysis_limit(self) -> Option<usize> {
        match self {
            Self::Free => Some(3),
            Self::Pro => Some(50),
            Self::Agency => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Agency => "Agency",
        }
    }
}

/// Incoming request to analyze a theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSubmission {
    pub shop: String,
    pub theme_name: String,
    pub plan: PlanTier,
    pub input: ThemeScoreInput,
}

/// Stored analysis with its score breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub shop: ShopDomain,
    pub theme_name: String,
    pub plan: PlanTier,
    pub analyzed_at: DateTime<Utc>,
    pub breakdown: ScoreBreakdown,
    /// Overall score of the previous analysis of the same theme.
    pub previous_overall: Option<u8>,
}

impl AnalysisRecord {
    pub fn trend(&self) -> Option<i16> {
        self.previous_overall
            .map(|previous| i16::from(self.breakdown.overall) - i16::from(previous))
    }

    pub fn summary_view(&self) -> AnalysisSummaryView {
        AnalysisSummaryView {
            id: self.id.clone(),
            shop: self.shop.clone(),
            theme_name: self.theme_name.clone(),
            analyzed_at: self.analyzed_at,
            overall: self.breakdown.overall,
            status: self.breakdown.status.label(),
            speed: self.breakdown.speed.score,
            quality: self.breakdown.quality.score,
            conversion: self.breakdown.conversion.score,
            trend: self.trend(),
            estimated_monthly_loss: self.breakdown.conversion.revenue_impact.estimated_monthly_loss,
        }
    }
}

/// Dashboard row for an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummaryView {
    pub id: AnalysisId,
    pub shop: ShopDomain,
    pub theme_name: String,
    pub analyzed_at: DateTime<Utc>,
    pub overall: u8,
    pub status: &'static str,
    pub speed: u8,
    pub quality: u8,
    pub conversion: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<i16>,
    pub estimated_monthly_loss: f32,
}
