//! Deterministic theme scoring.
//!
//! Three dimension scorers (speed, quality, conversion) run over the same scan
//! output and are blended by the weights in [`ScoreWeights`]. The engine never
//! fails: missing or out-of-range signals degrade to neutral values.

mod architecture;
pub mod breakdown;
mod conversion;
pub mod domain;
mod quality;
mod sections;
pub mod status;
mod vitals;
pub mod weights;

#[cfg(test)]
mod tests;

pub use breakdown::{
    ConversionBreakdown, MetricScore, QualityBreakdown, RevenueImpact, ScoreBreakdown,
    SpeedBreakdown, VitalRating, VitalsDetails,
};
pub use conversion::{estimate_revenue_impact, DEFAULT_REVENUE_PER_POINT, REVENUE_DISCLAIMER};
pub use domain::{
    BenchmarkContext, CoreWebVitals, SectionAnalysisData, ThemeData, ThemeScoreInput,
};
pub use quality::MAX_REPORTED_ISSUES;
pub use status::{format_duration_ms, format_metric, ScoreStatus, VitalMetric};
pub use vitals::VitalsAssessment;
pub use weights::{ScoreWeights, NEUTRAL_SCORE};

/// Stateless scorer holding the weighting table.
#[derive(Debug, Clone, Default)]
pub struct ThemeScoreEngine {
    weights: ScoreWeights,
}

impl ThemeScoreEngine {
    pub fn new(weights: ScoreWeights) -> Self {
        debug_assert!(
            weights.is_normalized(),
            "score weight groups must each sum to 1.0: {:?}",
            weights.group_sums()
        );
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn score(&self, input: &ThemeScoreInput) -> ScoreBreakdown {
        self.score_parts(
            input.core_web_vitals.as_ref(),
            &input.sections,
            &input.theme,
            input.context.as_ref(),
        )
    }

    pub fn score_parts(
        &self,
        core_web_vitals: Option<&CoreWebVitals>,
        sections: &[SectionAnalysisData],
        theme: &ThemeData,
        context: Option<&BenchmarkContext>,
    ) -> ScoreBreakdown {
        let weights = &self.weights;

        let speed = self.speed(core_web_vitals, sections, theme);
        let quality = self.quality(sections, theme);
        let conversion = self.conversion(sections, theme, context);

        let overall = to_score(
            weights.dimensions.speed * f32::from(speed.score)
                + weights.dimensions.quality * f32::from(quality.score)
                + weights.dimensions.conversion * f32::from(conversion.score),
        );

        ScoreBreakdown {
            overall,
            status: ScoreStatus::from_score(overall),
            speed,
            quality,
            conversion,
        }
    }

    fn speed(
        &self,
        core_web_vitals: Option<&CoreWebVitals>,
        sections: &[SectionAnalysisData],
        theme: &ThemeData,
    ) -> SpeedBreakdown {
        let weights = &self.weights.speed;
        let load = sections::score_sections(sections, theme.sections_above_fold);
        let section_load = to_score(load.score);

        let mut issues = Vec::new();
        let mut recommendations = Vec::new();

        let (score, average, details) = match vitals::assess(core_web_vitals) {
            VitalsAssessment::Measured { details, average } => {
                issues.extend(vitals::issues(&details));
                recommendations.extend(vitals::recommendations(&details));
                let blended = weights.core_web_vitals * average
                    + weights.section_load * f32::from(section_load);
                (blended, Some(to_score(average)), Some(details))
            }
            VitalsAssessment::NoData => {
                issues.push("No Core Web Vitals measurement available yet".to_string());
                let blended = weights.fallback_section_load * f32::from(section_load)
                    + weights.fallback_neutral * NEUTRAL_SCORE;
                (blended, None, None)
            }
        };

        issues.extend(load.issues);
        extend_unique(&mut recommendations, load.recommendations);

        SpeedBreakdown {
            score: to_score(score),
            core_web_vitals: average,
            section_load,
            details,
            issues,
            recommendations,
        }
    }

    fn quality(&self, sections: &[SectionAnalysisData], theme: &ThemeData) -> QualityBreakdown {
        let weights = &self.weights.quality;
        let liquid = quality::analyze(sections);
        let structure = architecture::assess(theme);

        let liquid_quality = to_score(liquid.score);
        let best_practices = to_score(structure.best_practices);
        let architecture = to_score(structure.architecture);

        let score = to_score(
            weights.liquid * f32::from(liquid_quality)
                + weights.best_practices * f32::from(best_practices)
                + weights.architecture * f32::from(architecture),
        );

        let mut issues = liquid.issues;
        issues.extend(structure.issues);
        let mut recommendations = liquid.recommendations;
        extend_unique(&mut recommendations, structure.recommendations);

        QualityBreakdown {
            score,
            liquid_quality,
            best_practices,
            architecture,
            issues,
            recommendations,
        }
    }

    fn conversion(
        &self,
        sections: &[SectionAnalysisData],
        theme: &ThemeData,
        context: Option<&BenchmarkContext>,
    ) -> ConversionBreakdown {
        let report = conversion::assess(
            sections,
            theme.sections_above_fold,
            context,
            &self.weights.conversion,
        );
        let score = to_score(report.score);
        let revenue_impact = estimate_revenue_impact(score, context);

        let mut recommendations = Vec::new();
        extend_unique(&mut recommendations, report.recommendations);

        ConversionBreakdown {
            score,
            ecommerce: to_score(report.ecommerce),
            mobile: to_score(report.mobile),
            revenue_health: to_score(report.revenue_health),
            revenue_impact,
            issues: report.issues,
            recommendations,
        }
    }
}

/// Scores a theme with the default weighting table.
pub fn calculate_theme_score(
    core_web_vitals: Option<&CoreWebVitals>,
    sections: &[SectionAnalysisData],
    theme: &ThemeData,
    context: Option<&BenchmarkContext>,
) -> ScoreBreakdown {
    ThemeScoreEngine::default().score_parts(core_web_vitals, sections, theme, context)
}

/// Rounds and clamps into the closed 0-100 range.
pub(crate) fn to_score(value: f32) -> u8 {
    if value.is_nan() {
        return NEUTRAL_SCORE as u8;
    }
    value.round().clamp(0.0, 100.0) as u8
}

fn extend_unique(target: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !target.contains(&item) {
            target.push(item);
        }
    }
}
