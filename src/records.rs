// 📋 Record Builder - flat per-shop, per-day table
// Boundary hits → blocks → (shop fields, statuses) → DailyEntry rows

use crate::blocks::{split_blocks, Block};
use crate::boundary::find_boundaries;
use crate::error::ScheduleError;
use crate::rules::ExtractionRules;
use crate::shop::extract_shop_fields;
use crate::status::{extract_status_tokens, CLOSED_MARK, OPEN_MARK};
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, info};

// ============================================================================
// CORE TYPES
// ============================================================================

/// One shop on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyEntry {
    /// Ordinal of the status token in its block (1-based), not read from the calendar
    pub day: u32,
    pub shop_name: String,
    /// Boundary token of the block (floor label or facility name)
    pub place: String,
    pub open: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub base_hours: Option<String>,
}

impl DailyEntry {
    /// Deduplication key across the whole table
    pub fn shop_key(&self) -> String {
        format!("{} / {}", self.place, self.shop_name)
    }
}

/// Counts gathered while parsing, for the run report
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseSummary {
    pub token_count: usize,
    pub boundary_count: usize,
    pub block_count: usize,
    /// Blocks that produced no status tokens (and therefore no rows)
    pub empty_blocks: usize,
    pub entry_count: usize,
    /// Status count of each block, in block order
    pub statuses_per_block: Vec<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleTable {
    pub entries: Vec<DailyEntry>,
    pub summary: ParseSummary,
}

// ============================================================================
// BUILDING
// ============================================================================

/// Rows for a single block; empty when the block has no statuses
pub fn build_block_entries(block: &Block<'_>, rules: &ExtractionRules) -> Vec<DailyEntry> {
    let shop = extract_shop_fields(block.tokens, rules);
    let statuses = extract_status_tokens(block.tokens);

    statuses
        .iter()
        .zip(1u32..)
        .map(|(status, day)| {
            let (start_time, end_time) = status.time_range();
            DailyEntry {
                day,
                shop_name: shop.name.clone(),
                place: block.boundary.to_string(),
                open: status.is_open(),
                start_time,
                end_time,
                base_hours: shop.base_hours.clone(),
            }
        })
        .collect()
}

/// Whole pipeline over an in-memory token list.
/// No boundary hits means an empty table, not an error.
pub fn parse_tokens(tokens: &[String], rules: &ExtractionRules) -> ScheduleTable {
    let hits = find_boundaries(tokens, rules);
    let blocks = split_blocks(tokens, &hits);

    let mut summary = ParseSummary {
        token_count: tokens.len(),
        boundary_count: hits.len(),
        block_count: blocks.len(),
        ..ParseSummary::default()
    };

    let mut entries = Vec::new();
    for block in &blocks {
        let block_entries = build_block_entries(block, rules);
        debug!(
            place = block.boundary,
            start = block.start,
            end = block.end,
            statuses = block_entries.len(),
            "block parsed"
        );

        if block_entries.is_empty() {
            summary.empty_blocks += 1;
        }
        summary.statuses_per_block.push(block_entries.len());
        entries.extend(block_entries);
    }
    summary.entry_count = entries.len();

    info!(
        tokens = summary.token_count,
        blocks = summary.block_count,
        entries = summary.entry_count,
        "schedule parsed"
    );

    ScheduleTable { entries, summary }
}

// ============================================================================
// CSV EXPORT
// ============================================================================

/// Flat-table CSV row, headers as printed in the source document's language
#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    #[serde(rename = "日付")]
    date_label: String,

    #[serde(rename = "日")]
    day: u32,

    #[serde(rename = "店舗名")]
    shop_name: &'a str,

    #[serde(rename = "場所")]
    place: &'a str,

    #[serde(rename = "営業可否")]
    open_mark: &'static str,

    #[serde(rename = "営業開始")]
    start_time: Option<&'a str>,

    #[serde(rename = "営業終了")]
    end_time: Option<&'a str>,

    #[serde(rename = "基準営業時間")]
    base_hours: Option<&'a str>,
}

impl<'a> EntryRow<'a> {
    fn new(entry: &'a DailyEntry, month: u32) -> Self {
        EntryRow {
            date_label: format!("{}月{}日", month, entry.day),
            day: entry.day,
            shop_name: &entry.shop_name,
            place: &entry.place,
            open_mark: if entry.open { OPEN_MARK } else { CLOSED_MARK },
            start_time: entry.start_time.as_deref(),
            end_time: entry.end_time.as_deref(),
            base_hours: entry.base_hours.as_deref(),
        }
    }
}

/// Write the flat table; `month` only labels the date column
pub fn write_entries_csv<W: Write>(
    entries: &[DailyEntry],
    month: u32,
    writer: W,
) -> Result<(), ScheduleError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for entry in entries {
        csv_writer.serialize(EntryRow::new(entry, month))?;
    }
    csv_writer.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scenario_single_shop() {
        let tokens = toks(&["3F", "Cafe", "Sun", "9:00～18:00", "○", "×", "○10:00|19:00"]);
        let table = parse_tokens(&tokens, &ExtractionRules::default());

        assert_eq!(table.entries.len(), 3);
        let days: Vec<u32> = table.entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![1, 2, 3]);

        let first = &table.entries[0];
        assert_eq!(first.shop_name, "Cafe");
        assert_eq!(first.place, "3F");
        assert!(first.open);
        assert_eq!(first.start_time, None);
        assert_eq!(first.base_hours, Some("9:00～18:00".to_string()));

        assert!(!table.entries[1].open);
        assert_eq!(table.entries[2].start_time, Some("10:00".to_string()));
        assert_eq!(table.entries[2].end_time, Some("19:00".to_string()));
        assert!(table.entries.iter().all(|e| e.base_hours == first.base_hours));
    }

    #[test]
    fn test_synthetic_block_round_trip() {
        let n = 30;
        let mut items = vec!["本山寮".to_string(), "食堂".to_string(), "平日".to_string(), "11:00～14:00".to_string()];
        for day in 1..=n {
            items.push(if day % 7 == 0 { "×".to_string() } else { "○".to_string() });
        }
        let table = parse_tokens(&items, &ExtractionRules::default());

        assert_eq!(table.entries.len(), n);
        for (i, entry) in table.entries.iter().enumerate() {
            assert_eq!(entry.day as usize, i + 1);
            assert_eq!(entry.shop_name, "食堂");
            assert_eq!(entry.base_hours.as_deref(), Some("11:00～14:00"));
            assert_eq!(entry.open, (i + 1) % 7 != 0);
        }
    }

    #[test]
    fn test_block_order_then_day_order() {
        let tokens = toks(&["cover", "1F", "A", "B", "○", "×", "2F", "C", "D", "×"]);
        let table = parse_tokens(&tokens, &ExtractionRules::default());

        let keys: Vec<(String, u32)> = table.entries.iter().map(|e| (e.shop_key(), e.day)).collect();
        assert_eq!(
            keys,
            vec![
                ("1F / AB".to_string(), 1),
                ("1F / AB".to_string(), 2),
                ("2F / CD".to_string(), 1),
            ]
        );
        assert_eq!(table.summary.statuses_per_block, vec![2, 1]);
    }

    #[test]
    fn test_block_without_statuses_emits_nothing() {
        let tokens = toks(&["1F", "Closed", "Shop", "2F", "Open", "Shop", "○"]);
        let table = parse_tokens(&tokens, &ExtractionRules::default());

        assert_eq!(table.summary.block_count, 2);
        assert_eq!(table.summary.empty_blocks, 1);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[0].place, "2F");
    }

    #[test]
    fn test_no_boundaries_empty_table() {
        let tokens = toks(&["○", "×", "○"]);
        let table = parse_tokens(&tokens, &ExtractionRules::default());

        assert!(table.entries.is_empty());
        assert_eq!(table.summary.token_count, 3);
        assert_eq!(table.summary.block_count, 0);
    }

    #[test]
    fn test_write_entries_csv() {
        let tokens = toks(&["3F", "Cafe", "Sun", "9:00～18:00", "○", "×", "○10:00|19:00"]);
        let table = parse_tokens(&tokens, &ExtractionRules::default());

        let mut buffer = Vec::new();
        write_entries_csv(&table.entries, 10, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "日付,日,店舗名,場所,営業可否,営業開始,営業終了,基準営業時間");
        assert_eq!(lines[1], "10月1日,1,Cafe,3F,○,,,9:00～18:00");
        assert_eq!(lines[2], "10月2日,2,Cafe,3F,×,,,9:00～18:00");
        assert_eq!(lines[3], "10月3日,3,Cafe,3F,○,10:00,19:00,9:00～18:00");
    }
}
