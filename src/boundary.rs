// 🔍 Boundary Detector - where each shop record starts
// A boundary is a known facility name or a floor label such as "３Ｆ"

use crate::rules::ExtractionRules;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Floor digit then floor unit, at the end of the token
static FLOOR_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[123１２３][FＦ]$").expect("floor marker pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryHit {
    /// Position in the document token list
    pub index: usize,
    pub text: String,
}

/// Rule (b) only: length is counted in characters, not bytes
pub fn is_floor_marker(token: &str) -> bool {
    token.chars().count() >= 2 && FLOOR_MARKER.is_match(token)
}

pub fn is_boundary(token: &str, rules: &ExtractionRules) -> bool {
    rules.is_sentinel(token) || is_floor_marker(token)
}

/// Hits come out in token order, so indices are strictly increasing
pub fn find_boundaries(tokens: &[String], rules: &ExtractionRules) -> Vec<BoundaryHit> {
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| is_boundary(t, rules))
        .map(|(index, t)| BoundaryHit {
            index,
            text: t.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ascii_floor_hit() {
        assert!(is_floor_marker("3F"));
        assert!(is_floor_marker("2F"));
    }

    #[test]
    fn test_full_width_floor_hit() {
        assert!(is_floor_marker("３Ｆ"));
        assert!(is_floor_marker("１Ｆ"));
        assert!(is_floor_marker("本館２Ｆ"));
    }

    #[test]
    fn test_floor_marker_must_end_token() {
        assert!(!is_floor_marker("3F食堂"));
        assert!(!is_floor_marker("4F"));
    }

    #[test]
    fn test_single_char_never_floor() {
        assert!(!is_floor_marker("3"));
        assert!(!is_floor_marker("F"));
    }

    #[test]
    fn test_sentinel_hit_regardless_of_length() {
        let rules = ExtractionRules::default();
        assert!(is_boundary("本山寮", &rules));
        assert!(!is_boundary("本山", &rules));
    }

    #[test]
    fn test_find_boundaries_in_order() {
        let rules = ExtractionRules::default();
        let tokens = toks(&["表紙", "1F", "Cafe", "○", "本山寮", "食堂", "×", "３Ｆ", "Bar"]);
        let hits = find_boundaries(&tokens, &rules);

        let indices: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![1, 4, 7]);
        assert_eq!(hits[1].text, "本山寮");
        assert!(hits.windows(2).all(|w| w[0].index < w[1].index));
    }

    #[test]
    fn test_no_boundaries() {
        let rules = ExtractionRules::default();
        let tokens = toks(&["Cafe", "○", "×", "3"]);
        assert!(find_boundaries(&tokens, &rules).is_empty());
    }
}
