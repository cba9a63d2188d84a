// 🔄 Pipeline - document in, matrix CSV out
// Tokenizer → boundaries → blocks → records → matrix → files

use crate::config::ScheduleConfig;
use crate::error::ScheduleError;
use crate::matrix::{project, write_matrix_csv, ScheduleMatrix};
use crate::records::{parse_tokens, write_entries_csv, ParseSummary, ScheduleTable};
use crate::tokens::tokens_from_document;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub summary: ParseSummary,
    pub shop_count: usize,
    pub day_count: usize,
    /// Blocks whose status count differs from the month length
    pub misaligned_blocks: usize,
    pub overflow_entries: usize,
    pub output_path: PathBuf,
    pub entries_path: Option<PathBuf>,
}

impl RunReport {
    pub fn summary_line(&self) -> String {
        format!(
            "{} shops × {} days from {} blocks ({} entries, {} blocks misaligned, {} entries past month end)",
            self.shop_count,
            self.day_count,
            self.summary.block_count,
            self.summary.entry_count,
            self.misaligned_blocks,
            self.overflow_entries
        )
    }
}

/// Count (and log) blocks whose ordinal days cannot line up with the calendar
fn check_day_alignment(summary: &ParseSummary, day_count: usize) -> usize {
    let mut misaligned = 0;
    for (block, statuses) in summary.statuses_per_block.iter().enumerate() {
        if *statuses != 0 && *statuses != day_count {
            warn!(
                block,
                statuses = *statuses,
                days = day_count,
                "status count differs from month length; day numbers may be shifted"
            );
            misaligned += 1;
        }
    }
    misaligned
}

/// Read and parse the document, then project it. Writes nothing.
pub fn build_schedule(config: &ScheduleConfig) -> Result<(ScheduleTable, ScheduleMatrix), ScheduleError> {
    if !config.input_path.exists() {
        return Err(ScheduleError::MissingInput(config.input_path.clone()));
    }
    config.validate()?;

    let tokens = tokens_from_document(&config.input_path)?;
    let table = parse_tokens(&tokens, &config.rules);
    let matrix = project(&table.entries, &config.matrix_config())?;
    Ok((table, matrix))
}

/// Full run. Both artifacts are written only after parsing succeeded.
pub fn run(config: &ScheduleConfig) -> Result<RunReport, ScheduleError> {
    let (table, matrix) = build_schedule(config)?;
    let misaligned_blocks = check_day_alignment(&table.summary, matrix.day_count());

    let output = BufWriter::new(File::create(&config.output_path)?);
    write_matrix_csv(&matrix, output)?;
    info!(path = %config.output_path.display(), "matrix written");

    if let Some(entries_path) = &config.entries_path {
        let output = BufWriter::new(File::create(entries_path)?);
        write_entries_csv(&table.entries, config.target_month, output)?;
        info!(path = %entries_path.display(), "entries written");
    }

    Ok(RunReport {
        shop_count: matrix.rows.len(),
        day_count: matrix.day_count(),
        misaligned_blocks,
        overflow_entries: matrix.overflow_entries,
        output_path: config.output_path.clone(),
        entries_path: config.entries_path.clone(),
        summary: table.summary,
    })
}
