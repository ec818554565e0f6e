use serde::{Deserialize, Deserializer, Serialize};

/// Lab measurements for a storefront page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    /// Largest Contentful Paint in milliseconds.
    pub lcp: f32,
    /// Cumulative Layout Shift (unitless).
    pub cls: f32,
    /// Total Blocking Time in milliseconds.
    pub tbt: f32,
    /// First Contentful Paint in milliseconds.
    pub fcp: f32,
}

/// Signals extracted from a single theme section by the template scanner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionAnalysisData {
    pub name: String,
    #[serde(rename = "type", default)]
    pub section_type: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub lines_of_code: u32,
    #[serde(default, deserialize_with = "deserialize_complexity")]
    pub complexity_score: u8,
    #[serde(default)]
    pub has_video: bool,
    #[serde(default)]
    pub has_animations: bool,
    #[serde(default)]
    pub has_lazy_loading: bool,
    #[serde(default)]
    pub has_responsive_images: bool,
    #[serde(default)]
    pub has_preload: bool,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub liquid_loops: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub liquid_assigns: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub liquid_conditions: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub external_scripts: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub inline_styles: u32,
}

impl SectionAnalysisData {
    /// Minimal section with no detected signals.
    pub fn named(name: impl Into<String>, section_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section_type: section_type.into(),
            lines_of_code: 0,
            complexity_score: 0,
            has_video: false,
            has_animations: false,
            has_lazy_loading: false,
            has_responsive_images: false,
            has_preload: false,
            liquid_loops: 0,
            liquid_assigns: 0,
            liquid_conditions: 0,
            external_scripts: 0,
            inline_styles: 0,
        }
    }

    /// Sections that render images, video, or galleries.
    pub fn renders_media(&self) -> bool {
        if self.has_video || self.has_responsive_images {
            return true;
        }
        let kind = self.kind_text();
        MEDIA_KEYWORDS.iter().any(|keyword| kind.contains(keyword))
    }

    pub(crate) fn kind_text(&self) -> String {
        format!("{} {}", self.section_type, self.name).to_ascii_lowercase()
    }
}

const MEDIA_KEYWORDS: [&str; 7] = [
    "image", "video", "gallery", "slideshow", "hero", "banner", "media",
];

/// Theme-level aggregate produced alongside the per-section scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    #[serde(default, deserialize_with = "deserialize_count")]
    pub total_sections: u32,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub snippets_count: u32,
    #[serde(default)]
    pub has_translations: bool,
    #[serde(default, deserialize_with = "deserialize_optional_count")]
    pub sections_above_fold: Option<u32>,
}

/// Store context used to localize the revenue model.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkContext {
    #[serde(default)]
    pub monthly_revenue: Option<f32>,
    /// Rounded and clamped to 0-100 on input.
    #[serde(default, deserialize_with = "deserialize_optional_score")]
    pub industry_average_score: Option<u8>,
}

/// Transport bundle for one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeScoreInput {
    #[serde(default)]
    pub core_web_vitals: Option<CoreWebVitals>,
    #[serde(default)]
    pub sections: Vec<SectionAnalysisData>,
    #[serde(default)]
    pub theme: ThemeData,
    #[serde(default)]
    pub context: Option<BenchmarkContext>,
}

/// Negative and fractional counts are floored at zero rather than rejected.
fn clamp_count(raw: f64) -> u32 {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= u32::MAX as f64 {
        u32::MAX
    } else {
        raw.floor() as u32
    }
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_count(raw))
}

fn deserialize_optional_count<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(clamp_count))
}

fn deserialize_complexity<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(clamp_count(raw.round()).min(100) as u8)
}

fn deserialize_optional_score<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|score| clamp_count(score.round()).min(100) as u8))
}
