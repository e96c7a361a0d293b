use crate::model::Record;
use crate::trace::ExtractionTrace;
use serde::Serialize;

/// A successfully classified and extracted document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedReport {
    /// Machine name of the matched variant (e.g. "delta4").
    pub report_type: String,
    /// Canonical column names, in export order.
    pub columns: Vec<String>,
    /// One value per column.
    pub record: Record,
    /// Stage transitions and non-fatal warnings from the extraction.
    pub trace: ExtractionTrace,
}

/// What the core produced for one document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum DocumentOutcome {
    Extracted(ExtractedReport),
    /// No registered variant matched; there is no record for this document.
    Unclassified,
}

impl DocumentOutcome {
    pub fn report(&self) -> Option<&ExtractedReport> {
        match self {
            DocumentOutcome::Extracted(report) => Some(report),
            DocumentOutcome::Unclassified => None,
        }
    }

    pub fn is_unclassified(&self) -> bool {
        matches!(self, DocumentOutcome::Unclassified)
    }
}
