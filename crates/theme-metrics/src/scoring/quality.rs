use super::domain::SectionAnalysisData;
use super::weights::NEUTRAL_SCORE;

/// Maximum number of issues surfaced from the code scan.
pub const MAX_REPORTED_ISSUES: usize = 5;

struct Rule {
    free: u32,
    per_unit: f32,
    cap: f32,
}

const LOOPS: Rule = Rule {
    free: 3,
    per_unit: 5.0,
    cap: 40.0,
};
const CONDITIONS: Rule = Rule {
    free: 10,
    per_unit: 2.0,
    cap: 20.0,
};
const ASSIGNS: Rule = Rule {
    free: 15,
    per_unit: 1.0,
    cap: 10.0,
};
const INLINE_STYLES: Rule = Rule {
    free: 0,
    per_unit: 2.0,
    cap: 15.0,
};
const EXTERNAL_SCRIPTS: Rule = Rule {
    free: 2,
    per_unit: 8.0,
    cap: 24.0,
};
const COMPLEXITY: Rule = Rule {
    free: 70,
    per_unit: 1.0,
    cap: 30.0,
};
const MISSING_LAZY_MEDIA_PENALTY: f32 = 15.0;

impl Rule {
    fn penalty(&self, count: u32) -> f32 {
        (count.saturating_sub(self.free) as f32 * self.per_unit).min(self.cap)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiquidQualityReport {
    pub score: f32,
    pub issues: Vec<String>,
    pub recommendations: Vec<String>,
}

struct Finding {
    penalty: f32,
    message: String,
}

fn inspect(section: &SectionAnalysisData) -> Vec<Finding> {
    let mut findings = Vec::new();
    let name = &section.name;

    let mut check = |rule: &Rule, count: u32, describe: &dyn Fn(u32) -> String| {
        let penalty = rule.penalty(count);
        if penalty > 0.0 {
            findings.push(Finding {
                penalty,
                message: describe(count),
            });
        }
    };

    check(&LOOPS, section.liquid_loops, &|count| {
        format!("Section '{name}' runs {count} Liquid loops (limit {})", LOOPS.free)
    });
    check(&CONDITIONS, section.liquid_conditions, &|count| {
        format!(
            "Section '{name}' has {count} Liquid conditions (limit {})",
            CONDITIONS.free
        )
    });
    check(&ASSIGNS, section.liquid_assigns, &|count| {
        format!(
            "Section '{name}' has {count} Liquid assigns (limit {})",
            ASSIGNS.free
        )
    });
    check(&INLINE_STYLES, section.inline_styles, &|count| {
        format!("Section '{name}' uses {count} inline styles")
    });
    check(&EXTERNAL_SCRIPTS, section.external_scripts, &|count| {
        format!(
            "Section '{name}' loads {count} external scripts (limit {})",
            EXTERNAL_SCRIPTS.free
        )
    });
    check(
        &COMPLEXITY,
        u32::from(section.complexity_score.min(100)),
        &|count| format!("Section '{name}' has a complexity score of {count}"),
    );

    if section.renders_media() && !section.has_lazy_loading {
        findings.push(Finding {
            penalty: MISSING_LAZY_MEDIA_PENALTY,
            message: format!("Section '{name}' renders media without lazy loading"),
        });
    }

    findings
}

pub(crate) fn analyze(sections: &[SectionAnalysisData]) -> LiquidQualityReport {
    if sections.is_empty() {
        return LiquidQualityReport {
            score: NEUTRAL_SCORE,
            issues: Vec::new(),
            recommendations: Vec::new(),
        };
    }

    let mut all_findings = Vec::new();
    let mut total = 0.0f32;
    for section in sections {
        let findings = inspect(section);
        let penalty: f32 = findings.iter().map(|finding| finding.penalty).sum();
        total += (100.0 - penalty).max(0.0);
        all_findings.extend(findings);
    }
    let score = (total / sections.len() as f32).clamp(0.0, 100.0);

    let recommendations = recommendations_for(sections);

    // stable sort keeps scan order among equal penalties
    all_findings.sort_by(|a, b| b.penalty.total_cmp(&a.penalty));
    let issues = all_findings
        .into_iter()
        .take(MAX_REPORTED_ISSUES)
        .map(|finding| finding.message)
        .collect();

    LiquidQualityReport {
        score,
        issues,
        recommendations,
    }
}

fn recommendations_for(sections: &[SectionAnalysisData]) -> Vec<String> {
    let mut recommendations = Vec::new();
    if sections
        .iter()
        .any(|section| LOOPS.penalty(section.liquid_loops) > 0.0)
    {
        recommendations.push(
            "Move repeated Liquid loops into snippets or paginate large collections".to_string(),
        );
    }
    if sections
        .iter()
        .any(|section| CONDITIONS.penalty(section.liquid_conditions) > 0.0)
    {
        recommendations
            .push("Replace long conditional chains with section settings or case blocks".to_string());
    }
    if sections.iter().any(|section| section.inline_styles > 0) {
        recommendations.push("Move inline styles into the theme stylesheet".to_string());
    }
    if sections
        .iter()
        .any(|section| EXTERNAL_SCRIPTS.penalty(section.external_scripts) > 0.0)
    {
        recommendations.push("Consolidate external scripts and load them with defer".to_string());
    }
    if sections
        .iter()
        .any(|section| section.renders_media() && !section.has_lazy_loading)
    {
        recommendations.push("Add loading=\"lazy\" to images in media sections".to_string());
    }
    recommendations
}
