use serde::{Deserialize, Serialize};

use super::status::{ScoreStatus, VitalMetric};

/// Composite result handed to the dashboard and report renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub overall: u8,
    pub status: ScoreStatus,
    pub speed: SpeedBreakdown,
    pub quality: QualityBreakdown,
    pub conversion: ConversionBreakdown,
}

impl ScoreBreakdown {
    /// Every issue across the three dimensions, speed first.
    pub fn all_issues(&self) -> impl Iterator<Item = &str> {
        self.speed
            .issues
            .iter()
            .chain(&self.quality.issues)
            .chain(&self.conversion.issues)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeedBreakdown {
    pub score: u8,
    /// Average of the per-metric vitals scores; absent without measurements.
    pub core_web_vitals: Option<u8>,
    pub section_load: u8,
    pub details: Option<VitalsDetails>,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsDetails {
    pub lcp: MetricScore,
    pub cls: MetricScore,
    pub tbt: MetricScore,
    pub fcp: MetricScore,
}

impl VitalsDetails {
    pub fn metrics(&self) -> [&MetricScore; 4] {
        [&self.lcp, &self.cls, &self.tbt, &self.fcp]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricScore {
    pub metric: VitalMetric,
    pub value: f32,
    pub display: String,
    pub score: u8,
    pub rating: VitalRating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VitalRating {
    Good,
    NeedsImprovement,
    Poor,
}

impl VitalRating {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::NeedsImprovement => "needs improvement",
            Self::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityBreakdown {
    pub score: u8,
    pub liquid_quality: u8,
    pub best_practices: u8,
    pub architecture: u8,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionBreakdown {
    pub score: u8,
    pub ecommerce: u8,
    pub mobile: u8,
    pub revenue_health: u8,
    pub revenue_impact: RevenueImpact,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Linear revenue-loss estimate. Indicative only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueImpact {
    pub estimated_monthly_loss: f32,
    pub revenue_per_point: f32,
    pub disclaimer: String,
}
