// 🗓️ Matrix Projector - shops × calendar days
// Pivots the flat table into a dense grid a spreadsheet renderer can draw as-is

use crate::error::ScheduleError;
use crate::records::DailyEntry;
use crate::status::CLOSED_MARK;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::io::Write;

const WEEKDAY_LABELS: [&str; 7] = ["月", "火", "水", "木", "金", "土", "日"];
const BASE_HOURS_SEPARATOR: &str = ", ";
const MATRIX_NOTE: &str = "※ 食堂店舗のラストオーダーは閉店時間の30分前です";

// ============================================================================
// CONFIG
// ============================================================================

/// Which month the grid covers and which days the renderer should call out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixConfig {
    pub target_year: i32,
    pub target_month: u32,
    pub highlighted_days: BTreeSet<u32>,
}

/// Number of days in the month; fails for months outside 1..=12
pub fn days_in_month(year: i32, month: u32) -> Result<u32, ScheduleError> {
    let invalid = || ScheduleError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEKDAY_LABELS[weekday.num_days_from_monday() as usize]
}

// ============================================================================
// GRID TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayColumn {
    pub day: u32,
    pub weekday_label: String,
    pub is_weekend: bool,
    pub is_highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixCell {
    pub text: String,
    /// Renderer fills open cells; closed and empty cells stay blank
    pub filled: bool,
}

impl MatrixCell {
    pub fn new(text: String) -> Self {
        let filled = !text.is_empty() && !text.starts_with(CLOSED_MARK);
        MatrixCell { text, filled }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopRow {
    /// 1-based, in order of first appearance
    pub no: usize,
    pub key: String,
    pub place: String,
    pub name: String,
    /// Distinct baseline hours, sorted and joined; empty when none
    pub base_hours_summary: String,
    /// Exactly one cell per day of the month
    pub cells: Vec<MatrixCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleMatrix {
    pub year: i32,
    pub month: u32,
    pub title: String,
    pub columns: Vec<DayColumn>,
    pub rows: Vec<ShopRow>,
    pub note: String,
    /// Entries whose ordinal day does not exist in the month
    pub overflow_entries: usize,
}

impl ScheduleMatrix {
    pub fn day_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).sum()
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Display text for one entry: closed mark, explicit range, baseline hours, or nothing
pub fn cell_text(entry: &DailyEntry) -> String {
    if !entry.open {
        return CLOSED_MARK.to_string();
    }
    if let (Some(start), Some(end)) = (&entry.start_time, &entry.end_time) {
        return format!("{}-{}", start, end);
    }
    entry.base_hours.clone().unwrap_or_default()
}

/// Per-shop accumulator while walking the flat table
struct ShopAccumulator {
    key: String,
    place: String,
    name: String,
    base_hours: BTreeSet<String>,
    day_text: HashMap<u32, String>,
}

pub fn project(entries: &[DailyEntry], config: &MatrixConfig) -> Result<ScheduleMatrix, ScheduleError> {
    let year = config.target_year;
    let month = config.target_month;
    let days = days_in_month(year, month)?;

    let columns = (1..=days)
        .map(|day| {
            let weekday = NaiveDate::from_ymd_opt(year, month, day)
                .map(|d| d.weekday())
                .ok_or(ScheduleError::InvalidMonth { year, month })?;
            Ok(DayColumn {
                day,
                weekday_label: weekday_label(weekday).to_string(),
                is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
                is_highlighted: config.highlighted_days.contains(&day),
            })
        })
        .collect::<Result<Vec<_>, ScheduleError>>()?;

    let mut shops: Vec<ShopAccumulator> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();
    let mut overflow_entries = 0;

    for entry in entries {
        let key = entry.shop_key();
        let idx = *index_by_key.entry(key.clone()).or_insert_with(|| {
            shops.push(ShopAccumulator {
                key,
                place: entry.place.clone(),
                name: entry.shop_name.clone(),
                base_hours: BTreeSet::new(),
                day_text: HashMap::new(),
            });
            shops.len() - 1
        });

        let shop = &mut shops[idx];
        if let Some(hours) = &entry.base_hours {
            shop.base_hours.insert(hours.clone());
        }

        if entry.day >= 1 && entry.day <= days {
            // later entries for the same shop and day win
            shop.day_text.insert(entry.day, cell_text(entry));
        } else {
            overflow_entries += 1;
        }
    }

    let rows = shops
        .into_iter()
        .enumerate()
        .map(|(i, mut shop)| ShopRow {
            no: i + 1,
            base_hours_summary: shop
                .base_hours
                .iter()
                .map(|h| h.as_str())
                .collect::<Vec<_>>()
                .join(BASE_HOURS_SEPARATOR),
            cells: (1..=days)
                .map(|day| MatrixCell::new(shop.day_text.remove(&day).unwrap_or_default()))
                .collect(),
            key: shop.key,
            place: shop.place,
            name: shop.name,
        })
        .collect();

    Ok(ScheduleMatrix {
        year,
        month,
        title: format!("{}月 各店舗 営業時間・日付別（○=営業）", month),
        columns,
        rows,
        note: MATRIX_NOTE.to_string(),
        overflow_entries,
    })
}

// ============================================================================
// CSV OUTPUT
// ============================================================================

/// Spreadsheet-shaped CSV: title, day header, weekday header, shop rows, note
pub fn write_matrix_csv<W: Write>(matrix: &ScheduleMatrix, writer: W) -> Result<(), ScheduleError> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    csv_writer.write_record([matrix.title.as_str()])?;

    let mut header: Vec<String> = ["No.", "場所", "名称", "営業時間"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    header.extend(matrix.columns.iter().map(|c| c.day.to_string()));
    csv_writer.write_record(&header)?;

    let mut weekdays: Vec<String> = vec![String::new(); 4];
    weekdays.extend(matrix.columns.iter().map(|c| c.weekday_label.clone()));
    csv_writer.write_record(&weekdays)?;

    for row in &matrix.rows {
        let mut record = vec![
            row.no.to_string(),
            row.place.clone(),
            row.name.clone(),
            row.base_hours_summary.clone(),
        ];
        record.extend(row.cells.iter().map(|c| c.text.clone()));
        csv_writer.write_record(&record)?;
    }

    csv_writer.write_record([""])?;
    csv_writer.write_record([matrix.note.as_str()])?;
    csv_writer.flush()?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
