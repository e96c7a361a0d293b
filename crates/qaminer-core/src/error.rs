use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum QaError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("block '{block}': required marker '{marker}' not found")]
    MarkerMissing { block: String, marker: String },

    #[error("block '{block}' could not be read: {reason}")]
    BlockUnreadable { block: String, reason: String },

    #[error("field '{field}' is not numeric: '{value}'")]
    NumericCoercion { field: String, value: String },

    #[error("failed to load options from {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QaError {
    /// Name of the block that caused an extraction failure, if any.
    pub fn block(&self) -> Option<&str> {
        match self {
            QaError::MarkerMissing { block, .. } | QaError::BlockUnreadable { block, .. } => {
                Some(block)
            }
            _ => None,
        }
    }
}
