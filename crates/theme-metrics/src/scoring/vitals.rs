use super::breakdown::{MetricScore, VitalRating, VitalsDetails};
use super::domain::CoreWebVitals;
use super::status::{format_metric, VitalMetric};
use super::weights::{
    MetricThresholds, CLS_THRESHOLDS, FCP_THRESHOLDS, LCP_THRESHOLDS, TBT_THRESHOLDS,
};

/// Outcome of normalizing the optional lab measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum VitalsAssessment {
    Measured {
        details: VitalsDetails,
        /// Unweighted mean of the four raw metric scores.
        average: f32,
    },
    NoData,
}

impl VitalsAssessment {
    pub fn average(&self) -> Option<f32> {
        match self {
            Self::Measured { average, .. } => Some(*average),
            Self::NoData => None,
        }
    }
}

pub(crate) fn assess(vitals: Option<&CoreWebVitals>) -> VitalsAssessment {
    let Some(vitals) = vitals else {
        return VitalsAssessment::NoData;
    };

    let raw = [
        (VitalMetric::Lcp, vitals.lcp, LCP_THRESHOLDS),
        (VitalMetric::Cls, vitals.cls, CLS_THRESHOLDS),
        (VitalMetric::Tbt, vitals.tbt, TBT_THRESHOLDS),
        (VitalMetric::Fcp, vitals.fcp, FCP_THRESHOLDS),
    ]
    .map(|(metric, value, thresholds)| {
        let value = sanitize(value, thresholds);
        (metric, value, band_score(value, thresholds), thresholds)
    });

    let average = raw.iter().map(|(_, _, score, _)| score).sum::<f32>() / raw.len() as f32;
    let [lcp, cls, tbt, fcp] = raw.map(|(metric, value, score, thresholds)| MetricScore {
        metric,
        value,
        display: format_metric(metric, value),
        score: score.round() as u8,
        rating: rating(value, thresholds),
    });

    VitalsAssessment::Measured {
        details: VitalsDetails { lcp, cls, tbt, fcp },
        average,
    }
}

/// Negative readings floor at 0, unreadable ones rate poor, overflowing ones rate worst.
fn sanitize(value: f32, thresholds: MetricThresholds) -> f32 {
    if value.is_nan() {
        thresholds.poor
    } else if value == f32::INFINITY {
        2.0 * thresholds.poor
    } else {
        value.max(0.0)
    }
}

/// Piecewise-linear: 100..90 up to `good`, 90..50 up to `poor`, 50..0 up to `2 * poor`.
pub(crate) fn band_score(value: f32, thresholds: MetricThresholds) -> f32 {
    let MetricThresholds { good, poor } = thresholds;
    let score = if value <= good {
        100.0 - 10.0 * (value / good)
    } else if value <= poor {
        90.0 - 40.0 * ((value - good) / (poor - good))
    } else {
        50.0 - 50.0 * ((value - poor) / poor)
    };
    score.clamp(0.0, 100.0)
}

fn rating(value: f32, thresholds: MetricThresholds) -> VitalRating {
    if value <= thresholds.good {
        VitalRating::Good
    } else if value < thresholds.poor {
        VitalRating::NeedsImprovement
    } else {
        VitalRating::Poor
    }
}

pub(crate) fn issues(details: &VitalsDetails) -> Vec<String> {
    details
        .metrics()
        .into_iter()
        .filter(|metric| metric.rating != VitalRating::Good)
        .map(|metric| {
            let target = match metric.metric {
                VitalMetric::Lcp => LCP_THRESHOLDS.good,
                VitalMetric::Cls => CLS_THRESHOLDS.good,
                VitalMetric::Tbt => TBT_THRESHOLDS.good,
                VitalMetric::Fcp => FCP_THRESHOLDS.good,
            };
            format!(
                "{} {} is {} (target {})",
                metric.metric.label(),
                metric.display,
                metric.rating.label(),
                format_metric(metric.metric, target)
            )
        })
        .collect()
}

pub(crate) fn recommendations(details: &VitalsDetails) -> Vec<String> {
    details
        .metrics()
        .into_iter()
        .filter(|metric| metric.rating != VitalRating::Good)
        .map(|metric| {
            let advice = match metric.metric {
                VitalMetric::Lcp => {
                    "Preload the hero image and defer non-critical sections to speed up LCP"
                }
                VitalMetric::Cls => {
                    "Reserve width and height for images and embeds to stop layout shifts"
                }
                VitalMetric::Tbt => {
                    "Defer or remove third-party scripts that block the main thread"
                }
                VitalMetric::Fcp => "Inline critical CSS and trim render-blocking stylesheets",
            };
            advice.to_string()
        })
        .collect()
}
