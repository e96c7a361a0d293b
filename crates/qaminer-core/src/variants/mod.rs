//! Supported report variants and the ordered registry the classifier scans.

pub mod arccheck;
pub mod delta4;
pub mod snc;
pub mod snc_patient;

use crate::config::ExtractOptions;
use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::normalize::Column;
use crate::parsing::parse_date;
use crate::trace::{ExtractionStage, ExtractionTrace, TraceSeverity, WarningKind};
use serde::Serialize;

/// One string a document must contain to belong to a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "match", content = "text")]
pub enum Identifier {
    /// Some line equals the text.
    Line(&'static str),
    /// Some line contains the text.
    Substring(&'static str),
}

impl Identifier {
    pub fn is_present(&self, doc: &DocumentLines) -> bool {
        match self {
            Identifier::Line(text) => doc.contains_line(text),
            Identifier::Substring(text) => doc.contains_text(text),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Identifier::Line(text) | Identifier::Substring(text) => text,
        }
    }
}

/// A vendor report family: how to recognise it, what it exports, and how to
/// read it.
pub trait ReportVariant: Send + Sync {
    /// Short machine name, e.g. `"delta4"`.
    fn report_type(&self) -> &str;

    fn description(&self) -> &str;

    /// Every identifier must be present for a document to match.
    fn identifiers(&self) -> &[Identifier];

    /// Canonical export columns, in order.
    fn columns(&self) -> &[Column];

    /// Read the document's blocks into raw fields.
    fn extract(
        &self,
        doc: &DocumentLines,
        ctx: &mut ExtractContext,
    ) -> Result<RawFields, QaError>;
}

/// Per-document extraction state: the caller's options and the trace.
#[derive(Debug, Clone, Default)]
pub struct ExtractContext {
    pub options: ExtractOptions,
    pub trace: ExtractionTrace,
}

impl ExtractContext {
    pub fn new(options: ExtractOptions) -> Self {
        ExtractContext {
            options,
            trace: ExtractionTrace::default(),
        }
    }

    pub fn locating(&mut self, block: &str) {
        self.trace
            .enter(ExtractionStage::LocatingBlock(block.to_string()));
    }

    pub fn extracting(&mut self, block: &str) {
        self.trace
            .enter(ExtractionStage::ExtractingPairs(block.to_string()));
    }

    /// Fail `block` because `marker` is absent.
    pub fn missing_marker(&mut self, block: &str, marker: &str) -> QaError {
        self.fail(block, format!("marker '{marker}' not found"));
        QaError::MarkerMissing {
            block: block.to_string(),
            marker: marker.to_string(),
        }
    }

    /// Fail `block` because it was located but holds nothing usable.
    pub fn unreadable(&mut self, block: &str, reason: impl Into<String>) -> QaError {
        let reason = reason.into();
        self.fail(block, reason.clone());
        QaError::BlockUnreadable {
            block: block.to_string(),
            reason,
        }
    }

    /// Fail `block` on a numeric coercion error for a field that may not
    /// fall back to a sentinel.
    pub fn numeric_failure(&mut self, block: &str, err: QaError) -> QaError {
        self.fail(block, err.to_string());
        err
    }

    pub fn warn(&mut self, block: &str, kind: WarningKind, message: impl Into<String>) {
        let severity = match kind {
            WarningKind::DefaultedField
            | WarningKind::NumericFallback
            | WarningKind::ReconciliationShortfall => TraceSeverity::Important,
            WarningKind::UnexpectedLabel | WarningKind::MissingOptionalBlock => {
                TraceSeverity::Info
            }
        };
        self.trace.warn(block, kind, severity, message);
    }

    /// Read a printed date in the caller's day/month order, rendered
    /// `YYYY-MM-DD`. A date only valid in the opposite order is still read,
    /// with a `NumericFallback` warning on `block`.
    pub fn date(&mut self, block: &str, printed: &str) -> Option<String> {
        let parsed = parse_date(printed, self.options.day_first)?;
        if parsed.swapped {
            let order = if self.options.day_first {
                "month/day"
            } else {
                "day/month"
            };
            let message = format!("date '{printed}' only valid as {order}, read that way");
            self.warn(block, WarningKind::NumericFallback, message);
        }
        Some(parsed.formatted())
    }

    fn fail(&mut self, block: &str, reason: String) {
        self.trace.enter(ExtractionStage::Failed {
            block: block.to_string(),
            reason,
        });
    }
}

/// Ordered collection of report variants. The first variant whose
/// identifiers all match a document wins, so more specific variants must be
/// registered before the ones they overlap with.
#[derive(Default)]
pub struct VariantRegistry {
    variants: Vec<Box<dyn ReportVariant>>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The production registry: Delta4, ArcCHECK, SNC Patient.
    ///
    /// ArcCHECK's identifiers are a superset of SNC Patient's and are
    /// therefore tried first.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(delta4::Delta4);
        registry.register(arccheck::ArcCheck);
        registry.register(snc_patient::SncPatient);
        registry
    }

    pub fn register<V: ReportVariant + 'static>(&mut self, variant: V) -> &mut Self {
        self.variants.push(Box::new(variant));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ReportVariant> {
        self.variants.iter().map(|v| v.as_ref())
    }

    pub fn get(&self, report_type: &str) -> Option<&dyn ReportVariant> {
        self.iter().find(|v| v.report_type() == report_type)
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = VariantRegistry::builtin();
        let types: Vec<&str> = registry.iter().map(|v| v.report_type()).collect();
        assert_eq!(types, ["delta4", "arccheck", "sncpatient"]);
    }

    #[test]
    fn test_arccheck_identifiers_extend_snc_patient() {
        let registry = VariantRegistry::builtin();
        let arccheck = registry.get("arccheck").unwrap();
        let snc = registry.get("sncpatient").unwrap();
        for id in snc.identifiers() {
            assert!(arccheck.identifiers().contains(id), "missing {id:?}");
        }
        assert!(arccheck.identifiers().len() > snc.identifiers().len());
    }

    #[test]
    fn test_identifier_matching() {
        let doc: DocumentLines = ["Energy Daily corr Norm", "Notes"].into_iter().collect();
        assert!(Identifier::Line("Notes").is_present(&doc));
        assert!(!Identifier::Line("Daily corr").is_present(&doc));
        assert!(Identifier::Substring("Daily corr").is_present(&doc));
    }

    #[test]
    fn test_missing_marker_records_failure() {
        let mut ctx = ExtractContext::default();
        let err = ctx.missing_marker("Analysis", "Daily corr Norm");
        assert_eq!(err.block(), Some("Analysis"));
        assert!(matches!(
            ctx.trace.current(),
            Some(ExtractionStage::Failed { block, .. }) if block == "Analysis"
        ));
    }

    #[test]
    fn test_swapped_date_is_warned() {
        let mut ctx = ExtractContext::default();
        assert_eq!(ctx.date("Plan Date", "13/01/2020").as_deref(), Some("2020-01-13"));
        assert_eq!(ctx.trace.warnings.len(), 1);
        assert_eq!(ctx.trace.warnings[0].kind, WarningKind::NumericFallback);
        assert_eq!(ctx.trace.warnings[0].block, "Plan Date");

        let mut ctx = ExtractContext::default();
        assert_eq!(ctx.date("Plan Date", "01/13/2020").as_deref(), Some("2020-01-13"));
        assert!(ctx.trace.warnings.is_empty());
        assert_eq!(ctx.date("Plan Date", "Treatment"), None);
    }
}
