use super::domain::ThemeData;

const MISSING_TRANSLATIONS_PENALTY: f32 = 30.0;
const MIN_SNIPPETS: u32 = 3;
const MISSING_SNIPPET_PENALTY: f32 = 10.0;
const TARGET_SECTIONS_MIN: u32 = 4;
const TARGET_SECTIONS_MAX: u32 = 15;
const MISSING_SECTION_PENALTY: f32 = 8.0;
const EXTRA_SECTION_PENALTY: f32 = 3.0;
const MAX_SECTION_COUNT_PENALTY: f32 = 60.0;
const FREE_SECTIONS_ABOVE_FOLD: u32 = 3;
const CROWDED_FOLD_PENALTY: f32 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ArchitectureReport {
    pub best_practices: f32,
    pub architecture: f32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

pub(crate) fn assess(theme: &ThemeData) -> ArchitectureReport {
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();

    let mut best_practices = 100.0f32;
    if !theme.has_translations {
        best_practices -= MISSING_TRANSLATIONS_PENALTY;
        issues.push("Theme ships without translation files".to_string());
        recommendations
            .push("Move storefront copy into locale files to support translations".to_string());
    }

    let missing_snippets = MIN_SNIPPETS.saturating_sub(theme.snippets_count);
    if missing_snippets > 0 {
        best_practices -= missing_snippets as f32 * MISSING_SNIPPET_PENALTY;
        issues.push(format!(
            "Only {} snippet(s) in use; markup is likely duplicated across sections",
            theme.snippets_count
        ));
        recommendations
            .push("Extract repeated markup (product cards, icons) into snippets".to_string());
    }

    let mut architecture = 100.0 - section_count_penalty(theme.total_sections);
    if theme.total_sections < TARGET_SECTIONS_MIN {
        issues.push(format!(
            "Theme uses {} section(s); fewer than {} leaves merchandising opportunities unused",
            theme.total_sections, TARGET_SECTIONS_MIN
        ));
        recommendations
            .push("Add sections for featured products, social proof, and email capture".to_string());
    } else if theme.total_sections > TARGET_SECTIONS_MAX {
        issues.push(format!(
            "Theme uses {} sections; more than {} increases page weight",
            theme.total_sections, TARGET_SECTIONS_MAX
        ));
        recommendations.push("Consolidate or remove rarely used sections".to_string());
    }

    let crowded = theme
        .sections_above_fold
        .unwrap_or(0)
        .saturating_sub(FREE_SECTIONS_ABOVE_FOLD);
    if crowded > 0 {
        architecture -= crowded as f32 * CROWDED_FOLD_PENALTY;
        issues.push(format!(
            "{} sections render above the fold",
            theme.sections_above_fold.unwrap_or(0)
        ));
        recommendations.push("Keep the initial viewport to at most three sections".to_string());
    }

    ArchitectureReport {
        best_practices: best_practices.clamp(0.0, 100.0),
        architecture: architecture.clamp(0.0, 100.0),
        issues,
        recommendations,
    }
}

/// U-shaped penalty around the target section band.
pub(crate) fn section_count_penalty(total_sections: u32) -> f32 {
    let penalty = if total_sections < TARGET_SECTIONS_MIN {
        (TARGET_SECTIONS_MIN - total_sections) as f32 * MISSING_SECTION_PENALTY
    } else if total_sections > TARGET_SECTIONS_MAX {
        (total_sections - TARGET_SECTIONS_MAX) as f32 * EXTRA_SECTION_PENALTY
    } else {
        0.0
    };
    penalty.min(MAX_SECTION_COUNT_PENALTY)
}
