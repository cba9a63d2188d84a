// 🚦 Status Token Extractor - per-day open/closed marks
//
// Grammar (after stripping spaces):
//   ○HH:MM|HH:MM   open with explicit hours
//   ○              open
//   ×              closed
// Anything else in the block is noise.

use crate::shop::strip_spaces;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const OPEN_MARK: &str = "○";
pub const CLOSED_MARK: &str = "×";

static TIME_RANGE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^○\s*([0-2]?\d:\d{2})\|([0-2]?\d:\d{2})$").expect("time range pattern is valid")
});

static STRAY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,2}$").expect("stray number pattern is valid"));

// ============================================================================
// CLASSIFICATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusToken {
    OpenOnly,
    ClosedOnly,
    OpenWithRange { start: String, end: String },
}

impl StatusToken {
    pub fn is_open(&self) -> bool {
        !matches!(self, StatusToken::ClosedOnly)
    }

    /// (start, end) for explicit ranges only
    pub fn time_range(&self) -> (Option<String>, Option<String>) {
        match self {
            StatusToken::OpenWithRange { start, end } => (Some(start.clone()), Some(end.clone())),
            _ => (None, None),
        }
    }
}

/// Outcome of looking at one token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass {
    Status(StatusToken),
    NotStatus,
}

/// Classify one token; the range form is tried before the bare marks
pub fn classify_token(token: &str) -> TokenClass {
    let normalized = strip_spaces(token);

    if let Some(caps) = TIME_RANGE_TOKEN.captures(&normalized) {
        return TokenClass::Status(StatusToken::OpenWithRange {
            start: caps[1].to_string(),
            end: caps[2].to_string(),
        });
    }

    match normalized.as_str() {
        OPEN_MARK => TokenClass::Status(StatusToken::OpenOnly),
        CLOSED_MARK => TokenClass::Status(StatusToken::ClosedOnly),
        _ => TokenClass::NotStatus,
    }
}

// ============================================================================
// EXTRACTION
// ============================================================================

/// Accepted status with the normalized text it came from
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExtractedStatus {
    token: StatusToken,
    text: String,
}

/// Ordered statuses of a block; the n-th entry is day n of the month
pub fn extract_status_tokens(tokens: &[String]) -> Vec<StatusToken> {
    let mut statuses: Vec<ExtractedStatus> = tokens
        .iter()
        .filter_map(|t| match classify_token(t) {
            TokenClass::Status(token) => Some(ExtractedStatus {
                token,
                text: strip_spaces(t),
            }),
            TokenClass::NotStatus => None,
        })
        .collect();

    // A trailing page/date number is dropped. Accepted texts always start
    // with a mark, so this never removes anything today.
    if statuses
        .last()
        .map(|s| STRAY_NUMBER.is_match(&s.text))
        .unwrap_or(false)
    {
        statuses.pop();
    }

    statuses.into_iter().map(|s| s.token).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_range() {
        assert_eq!(
            classify_token("○10:00|20:00"),
            TokenClass::Status(StatusToken::OpenWithRange {
                start: "10:00".to_string(),
                end: "20:00".to_string(),
            })
        );
    }

    #[test]
    fn test_classify_range_with_spaces() {
        assert_eq!(
            classify_token("○ 9:30 | 14:00"),
            TokenClass::Status(StatusToken::OpenWithRange {
                start: "9:30".to_string(),
                end: "14:00".to_string(),
            })
        );
    }

    #[test]
    fn test_classify_marks() {
        assert_eq!(classify_token("○"), TokenClass::Status(StatusToken::OpenOnly));
        assert_eq!(classify_token("×"), TokenClass::Status(StatusToken::ClosedOnly));
        assert_eq!(classify_token("\u{3000}×"), TokenClass::Status(StatusToken::ClosedOnly));
    }

    #[test]
    fn test_classify_noise() {
        assert_eq!(classify_token("15"), TokenClass::NotStatus);
        assert_eq!(classify_token("○○"), TokenClass::NotStatus);
        assert_eq!(classify_token("○10:00"), TokenClass::NotStatus);
        assert_eq!(classify_token("○10:0|20:00"), TokenClass::NotStatus);
        assert_eq!(classify_token("3F"), TokenClass::NotStatus);
        assert_eq!(classify_token(""), TokenClass::NotStatus);
    }

    #[test]
    fn test_time_range_accessor() {
        let open = StatusToken::OpenWithRange {
            start: "10:00".to_string(),
            end: "19:00".to_string(),
        };
        assert!(open.is_open());
        assert_eq!(open.time_range(), (Some("10:00".to_string()), Some("19:00".to_string())));
        assert!(StatusToken::OpenOnly.is_open());
        assert!(!StatusToken::ClosedOnly.is_open());
        assert_eq!(StatusToken::ClosedOnly.time_range(), (None, None));
    }

    #[test]
    fn test_extract_skips_noise_keeps_order() {
        let block = toks(&["3F", "Cafe", "Sun", "9:00～18:00", "○", "1", "×", "2", "○10:00|19:00", "15"]);
        let statuses = extract_status_tokens(&block);

        assert_eq!(
            statuses,
            vec![
                StatusToken::OpenOnly,
                StatusToken::ClosedOnly,
                StatusToken::OpenWithRange {
                    start: "10:00".to_string(),
                    end: "19:00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_extract_is_repeatable() {
        let block = toks(&["本山寮", "○", "×", "×", "○ 8:00|13:00"]);
        assert_eq!(extract_status_tokens(&block), extract_status_tokens(&block));
        assert_eq!(extract_status_tokens(&block).len(), 4);
    }

    #[test]
    fn test_trailing_trim_is_noop() {
        let block = toks(&["1F", "Cafe", "○", "×", "○", "15"]);
        let statuses = extract_status_tokens(&block);

        assert_eq!(statuses.len(), 3);
        assert_eq!(statuses.last(), Some(&StatusToken::OpenOnly));
    }

    #[test]
    fn test_extract_empty_block() {
        assert!(extract_status_tokens(&toks(&["1F", "Cafe", "平日"])).is_empty());
    }
}
