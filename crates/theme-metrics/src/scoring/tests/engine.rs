use super::common::*;
use crate::scoring::domain::{BenchmarkContext, SectionAnalysisData, ThemeData, ThemeScoreInput};
use crate::scoring::weights::ScoreWeights;
use crate::scoring::{calculate_theme_score, ScoreStatus, ThemeScoreEngine, NEUTRAL_SCORE};

#[test]
fn fast_theme_scores_excellent() {
    let breakdown = ThemeScoreEngine::default().score(&fast_input());

    assert_eq!(breakdown.overall, 93);
    assert_eq!(breakdown.status, ScoreStatus::Excellent);
    assert_eq!(breakdown.speed.score, 98);
    assert_eq!(breakdown.speed.section_load, 100);
    assert_eq!(breakdown.quality.score, 95);
    assert_eq!(breakdown.conversion.score, 81);
}

#[test]
fn slow_theme_needs_work() {
    let breakdown = ThemeScoreEngine::default().score(&slow_input());

    assert!(breakdown.overall < 50, "overall {}", breakdown.overall);
    assert_eq!(breakdown.status, ScoreStatus::NeedsWork);
    assert_eq!(breakdown.speed.section_load, 26);
    assert_eq!(breakdown.quality.liquid_quality, 30);
    assert_eq!(breakdown.conversion.mobile, 30);
    assert!(breakdown.all_issues().count() > 5);
}

#[test]
fn missing_vitals_fall_back_to_section_load() {
    let mut input = fast_input();
    input.core_web_vitals = None;

    let breakdown = ThemeScoreEngine::default().score(&input);

    assert!(breakdown.speed.details.is_none());
    assert!(breakdown.speed.core_web_vitals.is_none());
    // 0.8 * 100 + 0.2 * neutral
    assert_eq!(breakdown.speed.score, 90);
    assert!(breakdown
        .speed
        .issues
        .iter()
        .any(|issue| issue.contains("No Core Web Vitals")));
}

#[test]
fn empty_scan_produces_neutral_components() {
    let input = ThemeScoreInput {
        core_web_vitals: None,
        sections: Vec::new(),
        theme: ThemeData::default(),
        context: None,
    };

    let breakdown = ThemeScoreEngine::default().score(&input);

    let neutral = NEUTRAL_SCORE as u8;
    assert_eq!(breakdown.speed.section_load, neutral);
    assert_eq!(breakdown.speed.score, neutral);
    assert_eq!(breakdown.quality.liquid_quality, neutral);
    assert_eq!(breakdown.conversion.ecommerce, neutral);
    assert_eq!(breakdown.conversion.mobile, neutral);
    assert!(breakdown.overall <= 100);
}

#[test]
fn free_function_matches_default_engine() {
    let input = slow_input();

    let direct = calculate_theme_score(
        input.core_web_vitals.as_ref(),
        &input.sections,
        &input.theme,
        input.context.as_ref(),
    );

    assert_eq!(direct, ThemeScoreEngine::default().score(&input));
}

#[test]
fn custom_weights_reshape_the_overall_score() {
    let mut weights = ScoreWeights::default();
    weights.dimensions.speed = 1.0;
    weights.dimensions.quality = 0.0;
    weights.dimensions.conversion = 0.0;
    let engine = ThemeScoreEngine::new(weights);

    let breakdown = engine.score(&slow_input());

    assert_eq!(breakdown.overall, breakdown.speed.score);
    assert_eq!(engine.weights().dimensions.speed, 1.0);
}

#[test]
fn out_of_range_complexity_is_clamped() {
    let mut input = fast_input();
    input.sections[0].complexity_score = 250;
    let mut capped = fast_input();
    capped.sections[0].complexity_score = 100;

    let engine = ThemeScoreEngine::default();

    assert_eq!(engine.score(&input), engine.score(&capped));
}

#[test]
fn store_revenue_drives_the_loss_estimate() {
    let mut input = fast_input();
    input.context = Some(BenchmarkContext {
        monthly_revenue: Some(200_000.0),
        industry_average_score: None,
    });

    let breakdown = ThemeScoreEngine::default().score(&input);
    let impact = &breakdown.conversion.revenue_impact;

    let missing = f32::from(100 - breakdown.conversion.score);
    assert!((impact.revenue_per_point - 200.0).abs() < 0.01);
    assert!((impact.estimated_monthly_loss - missing * 200.0).abs() < 1.0);
}

#[test]
fn recommendations_are_not_repeated() {
    let sections: Vec<SectionAnalysisData> = (0..4)
        .map(|index| heavy_section(&format!("Promo video {index}")))
        .collect();

    let breakdown = calculate_theme_score(None, &sections, &neglected_theme(), None);

    for list in [
        &breakdown.speed.recommendations,
        &breakdown.quality.recommendations,
        &breakdown.conversion.recommendations,
    ] {
        let mut deduped = list.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), list.len(), "{list:?}");
    }
}
