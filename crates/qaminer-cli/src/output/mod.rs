pub mod json;
pub mod rows;
pub mod table;

use qaminer_core::{DocumentOutcome, ExtractedReport, QaError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of one input file, as reported by every output format.
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<DocumentOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileResult {
    pub fn new(path: &Path, result: Result<DocumentOutcome, QaError>) -> Self {
        let (outcome, error) = match result {
            Ok(outcome) => (Some(outcome), None),
            Err(e) => (None, Some(e.to_string())),
        };
        FileResult {
            file: path.to_path_buf(),
            outcome,
            error,
        }
    }

    pub fn report(&self) -> Option<&ExtractedReport> {
        self.outcome.as_ref().and_then(DocumentOutcome::report)
    }
}
