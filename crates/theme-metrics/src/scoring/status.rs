use serde::{Deserialize, Serialize};

/// Presentation band for a 0-100 score. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreStatus {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl ScoreStatus {
    pub const EXCELLENT_MIN: u8 = 80;
    pub const GOOD_MIN: u8 = 65;
    pub const FAIR_MIN: u8 = 50;

    pub const fn from_score(score: u8) -> Self {
        if score >= Self::EXCELLENT_MIN {
            Self::Excellent
        } else if score >= Self::GOOD_MIN {
            Self::Good
        } else if score >= Self::FAIR_MIN {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::NeedsWork => "needs-work",
        }
    }
}

/// Which vitals metric a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalMetric {
    Lcp,
    Cls,
    Tbt,
    Fcp,
}

impl VitalMetric {
    pub const fn ordered() -> [Self; 4] {
        [Self::Lcp, Self::Cls, Self::Tbt, Self::Fcp]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lcp => "LCP",
            Self::Cls => "CLS",
            Self::Tbt => "TBT",
            Self::Fcp => "FCP",
        }
    }
}

/// Formats a millisecond duration: "850ms" below one second, "2.5s" above.
pub fn format_duration_ms(ms: f32) -> String {
    let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
    if ms < 1000.0 {
        format!("{ms:.0}ms")
    } else {
        format!("{:.1}s", ms / 1000.0)
    }
}

pub fn format_metric(metric: VitalMetric, value: f32) -> String {
    match metric {
        VitalMetric::Cls => {
            let value = if value.is_finite() { value.max(0.0) } else { 0.0 };
            format!("{value:.2}")
        }
        VitalMetric::Lcp | VitalMetric::Tbt | VitalMetric::Fcp => format_duration_ms(value),
    }
}
