//! Performance, code-quality and conversion scoring for storefront themes.

pub mod analyses;
pub mod config;
pub mod error;
pub mod input;
pub mod scoring;
pub mod telemetry;

pub use error::AppError;
pub use scoring::{calculate_theme_score, ScoreBreakdown, ThemeScoreEngine, ThemeScoreInput};
