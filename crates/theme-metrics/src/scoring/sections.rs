use super::domain::SectionAnalysisData;
use super::weights::NEUTRAL_SCORE;

const LINES_PER_COST_POINT: f32 = 50.0;
const MAX_SIZE_COST: f32 = 20.0;
const COMPLEXITY_COST_FACTOR: f32 = 0.3;
const VIDEO_COST: f32 = 15.0;
const ANIMATION_COST: f32 = 8.0;
const FREE_LOOPS: u32 = 2;
const LOOP_COST: f32 = 3.0;
const FREE_ASSIGNS: u32 = 10;
const ASSIGN_COST: f32 = 0.5;
const FREE_CONDITIONS: u32 = 8;
const CONDITION_COST: f32 = 1.0;
const LAZY_LOADING_CREDIT: f32 = 6.0;
const RESPONSIVE_IMAGES_CREDIT: f32 = 5.0;
const PRELOAD_CREDIT: f32 = 4.0;
const ABOVE_FOLD_WEIGHT: f32 = 2.0;
const SLOW_SECTION_SCORE: f32 = 70.0;
const MAX_SLOW_SECTIONS: usize = 3;

/// Aggregate load score for a theme's sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLoadReport {
    pub score: f32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Estimated load cost for one section, clamped to 0-100.
pub(crate) fn section_cost(section: &SectionAnalysisData) -> f32 {
    let size = (section.lines_of_code as f32 / LINES_PER_COST_POINT).min(MAX_SIZE_COST);
    let complexity = f32::from(section.complexity_score.min(100)) * COMPLEXITY_COST_FACTOR;

    let mut cost = size + complexity;
    if section.has_video {
        cost += VIDEO_COST;
    }
    if section.has_animations {
        cost += ANIMATION_COST;
    }
    cost += section.liquid_loops.saturating_sub(FREE_LOOPS) as f32 * LOOP_COST;
    cost += section.liquid_assigns.saturating_sub(FREE_ASSIGNS) as f32 * ASSIGN_COST;
    cost += section.liquid_conditions.saturating_sub(FREE_CONDITIONS) as f32 * CONDITION_COST;

    if section.has_lazy_loading {
        cost -= LAZY_LOADING_CREDIT;
    }
    if section.has_responsive_images {
        cost -= RESPONSIVE_IMAGES_CREDIT;
    }
    if section.has_preload {
        cost -= PRELOAD_CREDIT;
    }

    cost.clamp(0.0, 100.0)
}

pub(crate) fn score_sections(
    sections: &[SectionAnalysisData],
    sections_above_fold: Option<u32>,
) -> SectionLoadReport {
    if sections.is_empty() {
        return SectionLoadReport {
            score: NEUTRAL_SCORE,
            issues: Vec::new(),
            recommendations: Vec::new(),
        };
    }

    let above_fold = sections_above_fold.unwrap_or(0) as usize;
    let mut weighted_sum = 0.0f32;
    let mut total_weight = 0.0f32;
    let mut per_section = Vec::with_capacity(sections.len());

    for (index, section) in sections.iter().enumerate() {
        let score = 100.0 - section_cost(section);
        let weight = if index < above_fold {
            ABOVE_FOLD_WEIGHT
        } else {
            1.0
        };
        weighted_sum += score * weight;
        total_weight += weight;
        per_section.push((section, score));
    }

    let score = (weighted_sum / total_weight).clamp(0.0, 100.0);

    per_section.sort_by(|a, b| a.1.total_cmp(&b.1));
    let slow: Vec<_> = per_section
        .iter()
        .filter(|(_, score)| *score < SLOW_SECTION_SCORE)
        .take(MAX_SLOW_SECTIONS)
        .collect();

    let issues = slow
        .iter()
        .map(|(section, score)| {
            format!(
                "Section '{}' has a high load cost (load score {:.0})",
                section.name, score
            )
        })
        .collect();

    let mut recommendations = Vec::new();
    if slow.iter().any(|(section, _)| section.has_video) {
        recommendations.push(
            "Replace autoplay video in heavy sections with a poster image and load on interaction"
                .to_string(),
        );
    }
    if slow
        .iter()
        .any(|(section, _)| section.liquid_loops > FREE_LOOPS)
    {
        recommendations
            .push("Reduce nested Liquid loops in the slowest sections".to_string());
    }
    if sections
        .iter()
        .any(|section| section.renders_media() && !section.has_lazy_loading)
    {
        recommendations.push("Lazy-load images and media below the fold".to_string());
    }

    SectionLoadReport {
        score,
        issues,
        recommendations,
    }
}
