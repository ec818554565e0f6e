use std::fs;
use std::path::{Path, PathBuf};

use crate::scoring::ThemeScoreInput;

/// Failure reading a scan export from disk.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid theme scan payload: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn parse_score_input(raw: &str) -> Result<ThemeScoreInput, InputError> {
    Ok(serde_json::from_str(raw)?)
}

/// Loads a camelCase `ThemeScoreInput` JSON document.
pub fn load_score_input(path: &Path) -> Result<ThemeScoreInput, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_score_input(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_payload_with_defaults() {
        let input = parse_score_input("{}").expect("empty object is a valid scan");
        assert!(input.core_web_vitals.is_none());
        assert!(input.sections.is_empty());
        assert_eq!(input.theme.total_sections, 0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_score_input("{\"sections\": 4}").expect_err("sections must be a list");
        assert!(matches!(err, InputError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_score_input(Path::new("/nonexistent/theme-scan.json"))
            .expect_err("file does not exist");
        assert!(err.to_string().contains("/nonexistent/theme-scan.json"));
    }
}
