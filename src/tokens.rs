// 🏗️ Token Sources - Tokenizer Adapter
// Turns a schedule document into one flat, ordered list of text tokens

use crate::error::ScheduleError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

// ============================================================================
// CORE TYPES
// ============================================================================

/// SourceKind - Which producer reads the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    Pdf,
    PlainText,
}

impl SourceKind {
    /// Human-readable name for display
    pub fn name(&self) -> &str {
        match self {
            SourceKind::Pdf => "PDF",
            SourceKind::PlainText => "Plain text",
        }
    }
}

/// TokenSource - the only thing the pipeline needs from a document
///
/// Output contract: tokens in reading order, all pages concatenated,
/// no layout information.
pub trait TokenSource {
    fn tokens(&self, path: &Path) -> Result<Vec<String>, ScheduleError>;

    fn kind(&self) -> SourceKind;
}

/// Split extracted text into tokens on any Unicode whitespace
/// (ideographic space included)
pub fn split_tokens(text: &str) -> Vec<String> {
    text.split_whitespace().map(|t| t.to_string()).collect()
}

// ============================================================================
// FACTORY FUNCTIONS
// ============================================================================

/// Pick a source from the file extension
pub fn detect_source(path: &Path) -> Result<SourceKind, ScheduleError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "pdf" => Ok(SourceKind::Pdf),
        "txt" => Ok(SourceKind::PlainText),
        _ => Err(ScheduleError::UnsupportedInput(path.to_path_buf())),
    }
}

pub fn get_source(kind: SourceKind) -> Box<dyn TokenSource> {
    match kind {
        SourceKind::Pdf => Box::new(PdfTokenSource),
        SourceKind::PlainText => Box::new(TextTokenSource),
    }
}

/// Detect, then read
pub fn tokens_from_document(path: &Path) -> Result<Vec<String>, ScheduleError> {
    let source = get_source(detect_source(path)?);
    let tokens = source.tokens(path)?;
    debug!(
        source = source.kind().name(),
        path = %path.display(),
        tokens = tokens.len(),
        "tokens extracted"
    );
    Ok(tokens)
}

// ============================================================================
// SOURCES
// ============================================================================

/// Whole-document text via pdf-extract
pub struct PdfTokenSource;

impl TokenSource for PdfTokenSource {
    fn tokens(&self, path: &Path) -> Result<Vec<String>, ScheduleError> {
        let text = pdf_extract::extract_text(path).map_err(|e| ScheduleError::Tokenize {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(split_tokens(&text))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Pdf
    }
}

/// Text already pulled out of a document by some other tool
pub struct TextTokenSource;

impl TokenSource for TextTokenSource {
    fn tokens(&self, path: &Path) -> Result<Vec<String>, ScheduleError> {
        let text = fs::read_to_string(path)?;
        Ok(split_tokens(&text))
    }

    fn kind(&self) -> SourceKind {
        SourceKind::PlainText
    }
}

// ============================================================================
// TESTS
// ============================================================================
