// 🏪 Shop Field Extractor - shop name and baseline hours
// Positional heuristic: the name sits between the boundary token and the
// first weekday qualifier, the baseline hours shortly after that qualifier.

use crate::rules::ExtractionRules;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Characters that make a token look like an hours string
const HOURS_MARKERS: [char; 4] = ['～', '〜', ':', '：'];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRecord {
    pub name: String,
    pub base_hours: Option<String>,
}

/// Remove ASCII and ideographic spaces
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| *c != ' ' && *c != '\u{3000}').collect()
}

pub fn looks_like_hours(token: &str) -> bool {
    token.contains(&HOURS_MARKERS[..])
}

/// Relative index of the first keyword token within the name window
pub fn find_keyword_anchor(tokens: &[String], rules: &ExtractionRules) -> Option<usize> {
    let limit = tokens.len().min(rules.name_window.saturating_add(1));
    (1..limit).find(|&i| rules.matches_keyword(&tokens[i]))
}

/// Never fails: short blocks give a short (or empty) name and no hours
pub fn extract_shop_fields(tokens: &[String], rules: &ExtractionRules) -> ShopRecord {
    let anchor = find_keyword_anchor(tokens, rules);

    let (name_tokens, base_hours) = match anchor {
        None => (tokens.iter().skip(1).take(2).collect::<Vec<_>>(), None),
        Some(k) => {
            let name_tokens = tokens.iter().skip(1).take(k - 1).collect::<Vec<_>>();
            let window_end = tokens.len().min((k + 1).saturating_add(rules.hours_window));
            let base_hours = tokens
                .get(k + 1..window_end)
                .and_then(|window| window.iter().find(|t| looks_like_hours(t)))
                .cloned();
            (name_tokens, base_hours)
        }
    };

    let joined: String = name_tokens.iter().map(|t| t.as_str()).collect();
    let record = ShopRecord {
        name: strip_spaces(&joined),
        base_hours,
    };

    debug!(
        boundary = tokens.first().map(|t| t.as_str()).unwrap_or(""),
        anchor = ?anchor,
        name = %record.name,
        base_hours = ?record.base_hours,
        "shop fields extracted"
    );

    record
}
