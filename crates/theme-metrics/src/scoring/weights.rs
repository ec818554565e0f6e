use serde::{Deserialize, Serialize};

/// Score reported for a component when there is nothing to measure.
pub const NEUTRAL_SCORE: f32 = 50.0;

/// Weighting table for the composite score.
///
/// Each group is a convex combination; [`ScoreWeights::default`] is the
/// calibrated table used in production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub dimensions: DimensionWeights,
    pub speed: SpeedWeights,
    pub quality: QualityWeights,
    pub conversion: ConversionWeights,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionWeights {
    pub speed: f32,
    pub quality: f32,
    pub conversion: f32,
}

/// Speed blend, with the fallback used when no vitals were measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedWeights {
    pub core_web_vitals: f32,
    pub section_load: f32,
    pub fallback_section_load: f32,
    pub fallback_neutral: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityWeights {
    pub liquid: f32,
    pub best_practices: f32,
    pub architecture: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionWeights {
    pub ecommerce: f32,
    pub mobile: f32,
    pub revenue_health: f32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            dimensions: DimensionWeights {
                speed: 0.40,
                quality: 0.35,
                conversion: 0.25,
            },
            speed: SpeedWeights {
                core_web_vitals: 0.70,
                section_load: 0.30,
                fallback_section_load: 0.80,
                fallback_neutral: 0.20,
            },
            quality: QualityWeights {
                liquid: 0.60,
                best_practices: 0.20,
                architecture: 0.20,
            },
            conversion: ConversionWeights {
                ecommerce: 0.45,
                mobile: 0.40,
                revenue_health: 0.15,
            },
        }
    }
}

const WEIGHT_TOLERANCE: f32 = 1e-3;

impl ScoreWeights {
    /// Sums of every weight group, in declaration order.
    pub fn group_sums(&self) -> [f32; 5] {
        [
            self.dimensions.speed + self.dimensions.quality + self.dimensions.conversion,
            self.speed.core_web_vitals + self.speed.section_load,
            self.speed.fallback_section_load + self.speed.fallback_neutral,
            self.quality.liquid + self.quality.best_practices + self.quality.architecture,
            self.conversion.ecommerce + self.conversion.mobile + self.conversion.revenue_health,
        ]
    }

    pub fn is_normalized(&self) -> bool {
        self.group_sums()
            .iter()
            .all(|sum| (sum - 1.0).abs() < WEIGHT_TOLERANCE)
    }
}

/// Published good / poor cutoffs for a vitals metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricThresholds {
    pub good: f32,
    pub poor: f32,
}

pub const LCP_THRESHOLDS: MetricThresholds = MetricThresholds {
    good: 2500.0,
    poor: 4000.0,
};
pub const CLS_THRESHOLDS: MetricThresholds = MetricThresholds {
    good: 0.10,
    poor: 0.25,
};
pub const TBT_THRESHOLDS: MetricThresholds = MetricThresholds {
    good: 200.0,
    poor: 600.0,
};
pub const FCP_THRESHOLDS: MetricThresholds = MetricThresholds {
    good: 1800.0,
    poor: 3000.0,
};
