// 🏷️ Extraction Rules - Rules as Data
// Which tokens open a shop block, and which words sit right after a shop name

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RULE DEFINITION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRules {
    /// Facility names that start a block on an exact match
    #[serde(default = "default_sentinel_places")]
    pub sentinel_places: Vec<String>,

    /// Weekday/weekend qualifiers printed between a shop name and its hours
    #[serde(default = "default_name_keywords")]
    pub name_keywords: Vec<String>,

    /// How many tokens after the boundary are searched for a keyword
    #[serde(default = "default_name_window")]
    pub name_window: usize,

    /// How many tokens after the keyword are searched for baseline hours
    #[serde(default = "default_hours_window")]
    pub hours_window: usize,
}

fn default_sentinel_places() -> Vec<String> {
    vec!["本山寮".to_string()]
}

fn default_name_keywords() -> Vec<String> {
    [
        "平日", "月～土", "土", "日～月", "日～土", "月", "火", "水", "木", "金",
        "Weekday", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}

fn default_name_window() -> usize {
    11
}

fn default_hours_window() -> usize {
    4
}

impl Default for ExtractionRules {
    fn default() -> Self {
        ExtractionRules {
            sentinel_places: default_sentinel_places(),
            name_keywords: default_name_keywords(),
            name_window: default_name_window(),
            hours_window: default_hours_window(),
        }
    }
}

impl ExtractionRules {
    /// Load rules from JSON file; missing fields fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScheduleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScheduleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ScheduleError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Exact match against a known facility name
    pub fn is_sentinel(&self, token: &str) -> bool {
        self.sentinel_places.iter().any(|p| p == token)
    }

    /// Substring match against any name keyword
    pub fn matches_keyword(&self, token: &str) -> bool {
        self.name_keywords
            .iter()
            .any(|k| !k.is_empty() && token.contains(k.as_str()))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_rules() {
        let rules = ExtractionRules::default();
        assert!(rules.is_sentinel("本山寮"));
        assert!(!rules.is_sentinel("本山寮食堂"));
        assert_eq!(rules.name_window, 11);
        assert_eq!(rules.hours_window, 4);
    }

    #[test]
    fn test_keyword_substring_match() {
        let rules = ExtractionRules::default();
        assert!(rules.matches_keyword("平日"));
        assert!(rules.matches_keyword("（土）"));
        assert!(rules.matches_keyword("Sun"));
        assert!(!rules.matches_keyword("Cafe"));
        assert!(!rules.matches_keyword("9:00～18:00"));
    }

    #[test]
    fn test_empty_keyword_never_matches() {
        let rules = ExtractionRules {
            name_keywords: vec![String::new()],
            ..ExtractionRules::default()
        };
        assert!(!rules.matches_keyword("anything"));
    }

    #[test]
    fn test_from_file_partial_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sentinel_places": ["東寮"], "name_window": 5 }}"#).unwrap();
        file.flush().unwrap();

        let rules = ExtractionRules::from_file(file.path()).unwrap();
        assert!(rules.is_sentinel("東寮"));
        assert!(!rules.is_sentinel("本山寮"));
        assert_eq!(rules.name_window, 5);
        assert_eq!(rules.hours_window, 4);
        assert!(rules.matches_keyword("平日"));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();

        let result = ExtractionRules::from_file(file.path());
        assert!(matches!(result, Err(ScheduleError::Config { .. })));
    }
}
