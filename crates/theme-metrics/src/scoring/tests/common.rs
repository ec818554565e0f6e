use crate::scoring::domain::{CoreWebVitals, SectionAnalysisData, ThemeData, ThemeScoreInput};

pub(super) fn fast_vitals() -> CoreWebVitals {
    CoreWebVitals {
        lcp: 1200.0,
        cls: 0.02,
        tbt: 50.0,
        fcp: 800.0,
    }
}

pub(super) fn slow_vitals() -> CoreWebVitals {
    CoreWebVitals {
        lcp: 6000.0,
        cls: 0.4,
        tbt: 900.0,
        fcp: 4000.0,
    }
}

pub(super) fn lean_section(name: &str) -> SectionAnalysisData {
    SectionAnalysisData {
        lines_of_code: 120,
        complexity_score: 5,
        has_lazy_loading: true,
        has_responsive_images: true,
        ..SectionAnalysisData::named(name, "main-product")
    }
}

pub(super) fn heavy_section(name: &str) -> SectionAnalysisData {
    SectionAnalysisData {
        lines_of_code: 400,
        complexity_score: 90,
        has_video: true,
        liquid_loops: 10,
        ..SectionAnalysisData::named(name, "custom-content")
    }
}

pub(super) fn compact_theme() -> ThemeData {
    ThemeData {
        total_sections: 1,
        snippets_count: 3,
        has_translations: true,
        sections_above_fold: Some(1),
    }
}

pub(super) fn neglected_theme() -> ThemeData {
    ThemeData {
        total_sections: 5,
        snippets_count: 1,
        has_translations: false,
        sections_above_fold: None,
    }
}

pub(super) fn storefront_sections() -> Vec<SectionAnalysisData> {
    vec![
        SectionAnalysisData {
            has_preload: true,
            ..lean_section("Hero banner")
        },
        lean_section("Featured collection"),
        SectionAnalysisData {
            section_type: "testimonials".to_string(),
            ..lean_section("Customer reviews")
        },
        SectionAnalysisData {
            section_type: "newsletter".to_string(),
            ..lean_section("Newsletter")
        },
    ]
}

pub(super) fn fast_input() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(fast_vitals()),
        sections: vec![lean_section("Main product")],
        theme: compact_theme(),
        context: None,
    }
}

pub(super) fn slow_input() -> ThemeScoreInput {
    ThemeScoreInput {
        core_web_vitals: Some(slow_vitals()),
        sections: (1..=5)
            .map(|index| heavy_section(&format!("Promo video {index}")))
            .collect(),
        theme: neglected_theme(),
        context: None,
    }
}
