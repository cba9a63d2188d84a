// ⚠️ Error Types - everything that can stop a run
// Extraction never fails; only the run-level preconditions and I/O do.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The source document is not where the config says it is
    #[error("input document not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// No token source handles this file extension
    #[error("unsupported input document: {}", .0.display())]
    UnsupportedInput(PathBuf),

    /// The token producer failed on an existing document
    #[error("failed to extract tokens from {}: {message}", .path.display())]
    Tokenize { path: PathBuf, message: String },

    #[error("invalid target month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    /// Config or rules file could not be read or parsed
    #[error("invalid configuration in {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
