use crate::infra::InMemoryAnalysisRepository;
use chrono::{Duration, Utc};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;
use theme_metrics::analyses::{AnalysisSubmission, PlanTier, ThemeAnalysisService};
use theme_metrics::config::AnalysisConfig;
use theme_metrics::error::AppError;
use theme_metrics::input::load_score_input;
use theme_metrics::scoring::{
    BenchmarkContext, CoreWebVitals, ScoreBreakdown, SectionAnalysisData, ThemeData,
    ThemeScoreEngine, ThemeScoreInput,
};

const DEMO_SHOP: &str = "northwind-outfitters.myshopify.com";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Theme scan export (camelCase JSON) to score
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the full breakdown as JSON instead of a text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the stored-analysis history portion of the demo.
    #[arg(long)]
    pub(crate) skip_history: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let input = load_score_input(&args.input)?;
    let breakdown = ThemeScoreEngine::default().score(&input);
    print!("{}", score_report(&breakdown, args.json)?);
    Ok(())
}

fn score_report(breakdown: &ScoreBreakdown, json: bool) -> Result<String, AppError> {
    if json {
        let mut payload = serde_json::to_string_pretty(breakdown)?;
        payload.push('\n');
        Ok(payload)
    } else {
        Ok(render_breakdown(breakdown))
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let engine = ThemeScoreEngine::default();

    println!("Theme score demo");
    println!("\nWell-tuned storefront");
    print!("{}", render_breakdown(&engine.score(&sample_storefront())));
    println!("\nNeglected storefront");
    print!("{}", render_breakdown(&engine.score(&sample_degraded())));

    if args.skip_history {
        return Ok(());
    }

    println!("\nAnalysis history for {DEMO_SHOP}");
    let repository = Arc::new(InMemoryAnalysisRepository::default());
    let service = ThemeAnalysisService::with_engine(repository, engine, AnalysisConfig::default());

    let started = Utc::now() - Duration::days(2);
    let runs = [
        ("Dawn", sample_degraded()),
        ("Dawn", sample_storefront()),
        ("Refresh", sample_storefront()),
    ];
    for (offset, (theme_name, input)) in runs.into_iter().enumerate() {
        let submission = AnalysisSubmission {
            shop: DEMO_SHOP.to_string(),
            theme_name: theme_name.to_string(),
            plan: PlanTier::Pro,
            input,
        };
        let analyzed_at = started + Duration::hours(offset as i64);
        if let Err(err) = service.submit(submission, analyzed_at) {
            println!("  Submission rejected: {err}");
            return Ok(());
        }
    }

    let history = service.history(DEMO_SHOP, 10)?;
    for record in &history {
        let view = record.summary_view();
        let trend = match view.trend {
            Some(delta) => format!("{delta:+}"),
            None => "new".to_string(),
        };
        println!(
            "- {} {:<8} overall {:>3} ({}) | trend {} | est. ${:.2}/month at risk",
            view.id.0, view.theme_name, view.overall, view.status, trend, view.estimated_monthly_loss
        );
    }

    Ok(())
}

/// Plain-text report for terminals.
pub(crate) fn render_breakdown(breakdown: &ScoreBreakdown) -> String {
    let mut out = String::new();
    let speed = &breakdown.speed;
    let quality = &breakdown.quality;
    let conversion = &breakdown.conversion;

    let _ = writeln!(
        out,
        "Overall score: {}/100 ({})",
        breakdown.overall,
        breakdown.status.label()
    );
    let vitals = speed
        .core_web_vitals
        .map(|score| score.to_string())
        .unwrap_or_else(|| "n/a".to_string());
    let _ = writeln!(
        out,
        "  Speed       {:>3}  (vitals {}, section load {})",
        speed.score, vitals, speed.section_load
    );
    let _ = writeln!(
        out,
        "  Quality     {:>3}  (liquid {}, best practices {}, architecture {})",
        quality.score, quality.liquid_quality, quality.best_practices, quality.architecture
    );
    let _ = writeln!(
        out,
        "  Conversion  {:>3}  (e-commerce {}, mobile {}, revenue health {})",
        conversion.score, conversion.ecommerce, conversion.mobile, conversion.revenue_health
    );

    if let Some(details) = &speed.details {
        let _ = writeln!(out, "Core Web Vitals:");
        for metric in details.metrics() {
            let _ = writeln!(
                out,
                "  - {} {} ({}, score {})",
                metric.metric.label(),
                metric.display,
                metric.rating.label(),
                metric.score
            );
        }
    }

    let issues: Vec<&str> = breakdown.all_issues().collect();
    if !issues.is_empty() {
        let _ = writeln!(out, "Issues:");
        for issue in issues {
            let _ = writeln!(out, "  - {issue}");
        }
    }

    let recommendations: Vec<&String> = speed
        .recommendations
        .iter()
        .chain(&quality.recommendations)
        .chain(&conversion.recommendations)
        .collect();
    if !recommendations.is_empty() {
        let _ = writeln!(out, "Recommendations:");
        for recommendation in recommendations {
            let _ = writeln!(out, "  - {recommendation}");
        }
    }

    let _ = writeln!(
        out,
        "Estimated monthly revenue at risk: ${:.2} ({})",
        conversion.revenue_impact.estimated_monthly_loss, conversion.revenue_impact.disclaimer
    );
    out
}

fn tuned_section(name: &str, section_type: &str) -> SectionAnalysisData {
    SectionAnalysisData {
        lines_of_code: 110,
        complexity_score: 8,
        has_lazy_loading: true,
        has_responsive_images: true,
        liquid_loops: 1,
        liquid_assigns: 5,
        liquid_conditions: 4,
        ..SectionAnalysisData::named(name, section_type)
    }
}

pub(crate) fn sample_storefront() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(CoreWebVitals {
            lcp: 1300.0,
            cls: 0.02,
            tbt: 60.0,
            fcp: 850.0,
        }),
        sections: vec![
            SectionAnalysisData {
                has_preload: true,
                ..tuned_section("Hero", "image-banner")
            },
            tuned_section("Best sellers", "featured-collection"),
            tuned_section("Reviews", "testimonials"),
            tuned_section("Stay in touch", "newsletter"),
            tuned_section("Footer", "footer"),
        ],
        theme: ThemeData {
            total_sections: 5,
            snippets_count: 6,
            has_translations: true,
            sections_above_fold: Some(1),
        },
        context: Some(BenchmarkContext {
            monthly_revenue: Some(60_000.0),
            industry_average_score: Some(70),
        }),
    }
}

pub(crate) fn sample_degraded() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(CoreWebVitals {
            lcp: 7200.0,
            cls: 0.42,
            tbt: 1100.0,
            fcp: 4800.0,
        }),
        sections: (1..=4)
            .map(|index| SectionAnalysisData {
                lines_of_code: 520,
                complexity_score: 88,
                has_video: index == 1,
                has_animations: true,
                liquid_loops: 7,
                liquid_conditions: 14,
                inline_styles: 5,
                external_scripts: 2,
                ..SectionAnalysisData::named(format!("Lookbook slideshow {index}"), "slideshow")
            })
            .collect(),
        theme: ThemeData {
            total_sections: 22,
            snippets_count: 1,
            has_translations: false,
            sections_above_fold: Some(4),
        },
        context: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme_metrics::scoring::ScoreStatus;

    #[test]
    fn samples_land_in_opposite_bands() {
        let engine = ThemeScoreEngine::default();
        let tuned = engine.score(&sample_storefront());
        let degraded = engine.score(&sample_degraded());

        assert_eq!(tuned.status, ScoreStatus::Excellent);
        assert_eq!(degraded.status, ScoreStatus::NeedsWork);
    }

    #[test]
    fn report_lists_dimensions_and_issues() {
        let breakdown = ThemeScoreEngine::default().score(&sample_degraded());
        let report = render_breakdown(&breakdown);

        assert!(report.starts_with(&format!("Overall score: {}/100 (needs-work)", breakdown.overall)));
        assert!(report.contains("Core Web Vitals:"));
        assert!(report.contains("  - LCP 7.2s (poor"));
        assert!(report.contains("Issues:"));
        assert!(report.contains("Estimated monthly revenue at risk: $"));
    }

    #[test]
    fn report_marks_missing_vitals() {
        let mut input = sample_storefront();
        input.core_web_vitals = None;
        let report = render_breakdown(&ThemeScoreEngine::default().score(&input));

        assert!(report.contains("vitals n/a"));
        assert!(!report.contains("Core Web Vitals:"));
    }

    #[test]
    fn score_report_emits_json_or_text() {
        let breakdown = ThemeScoreEngine::default().score(&sample_storefront());

        let json = score_report(&breakdown, true).expect("json report");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(parsed["overall"], breakdown.overall);

        let text = score_report(&breakdown, false).expect("text report");
        assert_eq!(text, render_breakdown(&breakdown));
    }
}
