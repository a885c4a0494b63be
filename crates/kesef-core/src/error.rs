use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KesefError {
    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("no data extracted: {0}")]
    NoData(String),

    #[error("input does not look like a bank statement: {0} (use --force to bypass)")]
    NotAStatement(String),

    #[error("input file too large: {size} bytes (max {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("no transactions found: {0}")]
    NoTransactions(String),

    #[error("failed to load rulebook from {path}: {reason}")]
    RulebookLoad { path: PathBuf, reason: String },

    #[error("invalid rulebook: {0}")]
    RulebookInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
