use super::breakdown::RevenueImpact;
use super::domain::{BenchmarkContext, SectionAnalysisData};
use super::weights::{ConversionWeights, NEUTRAL_SCORE};

const ECOMMERCE_BASE: f32 = 40.0;
const MOBILE_BASE: f32 = 100.0;
const VIDEO_ABOVE_FOLD_PENALTY: f32 = 20.0;
const ANIMATION_ABOVE_FOLD_PENALTY: f32 = 8.0;
const UNRESPONSIVE_MEDIA_PENALTY: f32 = 10.0;
const MAX_UNRESPONSIVE_MEDIA_PENALTY: f32 = 60.0;
const SCRIPT_HEAVY_THRESHOLD: u32 = 5;
const SCRIPT_HEAVY_PENALTY: f32 = 10.0;
const BENCHMARK_SENSITIVITY: f32 = 1.5;
/// Share of monthly revenue attributed to one conversion point.
const REVENUE_SHARE_PER_POINT: f32 = 0.001;
/// Revenue per point when the store's revenue is unknown.
pub const DEFAULT_REVENUE_PER_POINT: f32 = 25.0;
pub const REVENUE_DISCLAIMER: &str =
    "Rough heuristic based on a linear model; not a forecast or guarantee.";

/// Section archetypes that support conversion, with the points they add.
const CONVERSION_SECTIONS: [(&str, &[&str], f32); 3] = [
    (
        "product grid",
        &["product", "collection", "catalog"],
        25.0,
    ),
    ("testimonials", &["testimonial", "review"], 20.0),
    ("newsletter signup", &["newsletter", "email", "signup"], 15.0),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionReport {
    pub ecommerce: f32,
    pub mobile: f32,
    pub revenue_health: f32,
    pub score: f32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

pub(crate) fn assess(
    sections: &[SectionAnalysisData],
    sections_above_fold: Option<u32>,
    context: Option<&BenchmarkContext>,
    weights: &ConversionWeights,
) -> ConversionReport {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let (ecommerce, mobile) = if sections.is_empty() {
        (NEUTRAL_SCORE, NEUTRAL_SCORE)
    } else {
        (
            ecommerce_score(sections, &mut issues, &mut recommendations),
            mobile_score(
                sections,
                sections_above_fold,
                &mut issues,
                &mut recommendations,
            ),
        )
    };

    let base_weight = weights.ecommerce + weights.mobile;
    let preliminary = if base_weight > 0.0 {
        (weights.ecommerce * ecommerce + weights.mobile * mobile) / base_weight
    } else {
        NEUTRAL_SCORE
    };

    let revenue_health = match context.and_then(|ctx| ctx.industry_average_score) {
        Some(benchmark) => {
            let benchmark = f32::from(benchmark.min(100));
            if preliminary < benchmark {
                issues.push(format!(
                    "Conversion readiness {:.0} trails the industry benchmark of {:.0}",
                    preliminary, benchmark
                ));
            }
            (NEUTRAL_SCORE + BENCHMARK_SENSITIVITY * (preliminary - benchmark)).clamp(0.0, 100.0)
        }
        None => preliminary,
    };

    let score = (weights.ecommerce * ecommerce
        + weights.mobile * mobile
        + weights.revenue_health * revenue_health)
        .clamp(0.0, 100.0);

    ConversionReport {
        ecommerce,
        mobile,
        revenue_health,
        score,
        issues,
        recommendations,
    }
}

fn ecommerce_score(
    sections: &[SectionAnalysisData],
    issues: &mut Vec<String>,
    recommendations: &mut Vec<String>,
) -> f32 {
    let kinds: Vec<String> = sections.iter().map(SectionAnalysisData::kind_text).collect();
    let mut score = ECOMMERCE_BASE;
    for (label, keywords, points) in CONVERSION_SECTIONS {
        let present = kinds
            .iter()
            .any(|kind| keywords.iter().any(|keyword| kind.contains(keyword)));
        if present {
            score += points;
        } else {
            issues.push(format!("No {label} section found"));
            recommendations.push(format!("Add a {label} section to support conversion"));
        }
    }
    score.clamp(0.0, 100.0)
}

fn mobile_score(
    sections: &[SectionAnalysisData],
    sections_above_fold: Option<u32>,
    issues: &mut Vec<String>,
    recommendations: &mut Vec<String>,
) -> f32 {
    let above_fold = sections_above_fold.map(|count| count as usize).unwrap_or(1);
    let mut score = MOBILE_BASE;

    for section in sections.iter().take(above_fold) {
        if section.has_video {
            score -= VIDEO_ABOVE_FOLD_PENALTY;
            issues.push(format!(
                "Section '{}' plays video above the fold on mobile",
                section.name
            ));
        }
        if section.has_animations {
            score -= ANIMATION_ABOVE_FOLD_PENALTY;
        }
    }
    if sections
        .iter()
        .take(above_fold)
        .any(|section| section.has_video || section.has_animations)
    {
        recommendations.push(
            "Swap above-the-fold video and animation for a static image on small screens"
                .to_string(),
        );
    }

    let unresponsive = sections
        .iter()
        .filter(|section| section.renders_media() && !section.has_responsive_images)
        .count();
    if unresponsive > 0 {
        score -= (unresponsive as f32 * UNRESPONSIVE_MEDIA_PENALTY).min(MAX_UNRESPONSIVE_MEDIA_PENALTY);
        issues.push(format!(
            "{unresponsive} media section(s) serve images without responsive sizes"
        ));
        recommendations.push("Serve images with srcset and sizes for mobile screens".to_string());
    }

    let scripts = sections
        .iter()
        .fold(0u32, |total, section| total.saturating_add(section.external_scripts));
    if scripts > SCRIPT_HEAVY_THRESHOLD {
        score -= SCRIPT_HEAVY_PENALTY;
        issues.push(format!(
            "{scripts} external scripts slow interaction on mobile devices"
        ));
    }

    score.clamp(0.0, 100.0)
}

/// `(100 - score) * revenue_per_point`, never negative.
pub fn estimate_revenue_impact(
    conversion_score: u8,
    context: Option<&BenchmarkContext>,
) -> RevenueImpact {
    let revenue_per_point = context
        .and_then(|ctx| ctx.monthly_revenue)
        .filter(|revenue| revenue.is_finite() && *revenue > 0.0)
        .map(|revenue| revenue * REVENUE_SHARE_PER_POINT)
        .unwrap_or(DEFAULT_REVENUE_PER_POINT);

    let missing_points = f32::from(100u8.saturating_sub(conversion_score));
    let estimated_monthly_loss = ((missing_points * revenue_per_point) * 100.0).round() / 100.0;

    RevenueImpact {
        estimated_monthly_loss: estimated_monthly_loss.max(0.0),
        revenue_per_point,
        disclaimer: REVENUE_DISCLAIMER.to_string(),
    }
}
