// Shop Schedule - Core Library
// Monthly restaurant schedule document → per-shop, per-day table → calendar matrix

pub mod error;
pub mod rules;
pub mod tokens;
pub mod boundary;
pub mod blocks;
pub mod shop;
pub mod status;
pub mod records;
pub mod matrix;
pub mod config;
pub mod pipeline;

// Re-export commonly used types
pub use error::ScheduleError;
pub use rules::ExtractionRules;
pub use tokens::{
    TokenSource, SourceKind, PdfTokenSource, TextTokenSource,
    detect_source, get_source, split_tokens, tokens_from_document,
};
pub use boundary::{BoundaryHit, find_boundaries, is_boundary, is_floor_marker};
pub use blocks::{Block, split_blocks};
pub use shop::{ShopRecord, extract_shop_fields};
pub use status::{StatusToken, TokenClass, classify_token, extract_status_tokens};
pub use records::{
    DailyEntry, ParseSummary, ScheduleTable,
    build_block_entries, parse_tokens, write_entries_csv,
};
pub use matrix::{
    DayColumn, MatrixCell, MatrixConfig, ScheduleMatrix, ShopRow,
    cell_text, days_in_month, project, write_matrix_csv,
};
pub use config::{ScheduleConfig, DEFAULT_CONFIG_FILE};
pub use pipeline::{RunReport, build_schedule, run};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
