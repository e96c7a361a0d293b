use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

/// Where a variant's extraction currently is.
///
/// Extraction walks `NotStarted → LocatingBlock → ExtractingPairs → … →
/// Normalizing → Done`; `Failed` is terminal and only reachable while a block
/// is being located or read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage", content = "block")]
pub enum ExtractionStage {
    NotStarted,
    LocatingBlock(String),
    ExtractingPairs(String),
    Normalizing,
    Done,
    Failed { block: String, reason: String },
}

impl fmt::Display for ExtractionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionStage::NotStarted => write!(f, "NotStarted"),
            ExtractionStage::LocatingBlock(block) => write!(f, "LocatingBlock({block})"),
            ExtractionStage::ExtractingPairs(block) => write!(f, "ExtractingPairs({block})"),
            ExtractionStage::Normalizing => write!(f, "Normalizing"),
            ExtractionStage::Done => write!(f, "Done"),
            ExtractionStage::Failed { block, reason } => write!(f, "Failed({block}: {reason})"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceSeverity {
    Important,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Keys left without a value after reconciliation.
    ReconciliationShortfall,
    /// A label outside the block's expected set was dropped.
    UnexpectedLabel,
    /// A field was filled with its documented default.
    DefaultedField,
    /// A numeric or date field fell back to the "n/a" sentinel.
    NumericFallback,
    /// An optional block was absent.
    MissingOptionalBlock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceWarning {
    pub block: String,
    pub kind: WarningKind,
    pub message: String,
    pub severity: TraceSeverity,
}

/// Record of one document's extraction: every stage transition, in order,
/// plus the non-fatal problems met along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionTrace {
    pub trace_schema_version: String,
    pub stages: Vec<ExtractionStage>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<TraceWarning>,
}

impl Default for ExtractionTrace {
    fn default() -> Self {
        Self {
            trace_schema_version: TRACE_SCHEMA_VERSION.to_string(),
            stages: vec![ExtractionStage::NotStarted],
            warnings: Vec::new(),
        }
    }
}

impl ExtractionTrace {
    pub fn enter(&mut self, stage: ExtractionStage) {
        log::trace!("extraction stage: {stage}");
        self.stages.push(stage);
    }

    pub fn current(&self) -> Option<&ExtractionStage> {
        self.stages.last()
    }

    pub fn warn(
        &mut self,
        block: &str,
        kind: WarningKind,
        severity: TraceSeverity,
        message: impl Into<String>,
    ) {
        let message = message.into();
        log::debug!("[{block}] {message}");
        self.warnings.push(TraceWarning {
            block: block.to_string(),
            kind,
            message,
            severity,
        });
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &TraceWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_started() {
        let trace = ExtractionTrace::default();
        assert_eq!(trace.current(), Some(&ExtractionStage::NotStarted));
    }

    #[test]
    fn test_stage_display() {
        let failed = ExtractionStage::Failed {
            block: "Summary".into(),
            reason: "marker missing".into(),
        };
        assert_eq!(failed.to_string(), "Failed(Summary: marker missing)");
        assert_eq!(
            ExtractionStage::LocatingBlock("Notes".into()).to_string(),
            "LocatingBlock(Notes)"
        );
    }

    #[test]
    fn test_warnings_filtered_by_kind() {
        let mut trace = ExtractionTrace::default();
        trace.warn(
            "Daily Corr",
            WarningKind::DefaultedField,
            TraceSeverity::Important,
            "defaulted",
        );
        trace.warn(
            "QA File Parameter",
            WarningKind::UnexpectedLabel,
            TraceSeverity::Info,
            "dropped",
        );
        assert_eq!(trace.warnings_of(WarningKind::DefaultedField).count(), 1);
    }

    #[test]
    fn test_serializes_stage_tags() {
        let mut trace = ExtractionTrace::default();
        trace.enter(ExtractionStage::LocatingBlock("Beam".into()));
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains(r#""stage":"locating_block""#));
        assert!(json.contains(r#""block":"Beam""#));
        assert!(!json.contains("warnings"));
    }
}
