//! Pieces shared by the Sun Nuclear report family (SNC Patient and
//! ArcCHECK). Both print the same sections; they differ in how the
//! key/value blocks are laid out.

use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::parsing::blocks::{extract_block, Anomaly, BlockSpec};
use crate::parsing::values::extract_numbers;
use crate::parsing::parse_header;
use crate::trace::WarningKind;
use crate::variants::ExtractContext;

pub const ABSOLUTE_COMPARISON: &str = "Absolute Dose Comparison";
pub const RELATIVE_COMPARISON: &str = "Relative Comparison";

/// Summary headings, in detection order, with the analysis type they imply.
const ANALYSIS_TYPES: &[(&str, &str)] = &[
    ("Summary (Gamma Analysis)", "Gamma"),
    ("Summary (DTA Analysis)", "DTA"),
    ("Summary (GC Analysis)", "GC"),
];

/// Statistics printed in the Gamma Index Summary section.
pub const GAMMA_STATS: &[&str] = &["Minimum", "Maximum", "Average", "Stdv"];

pub const QA_FILE_PARAMETER_LABELS: &[&str] = &[
    "Patient Name",
    "Patient ID",
    "Plan Date",
    "Measured Date",
    "Energy",
    "Angle",
    "SSD",
    "Depth",
    "SSD/Depth",
    "Set1",
    "Plan File",
    "Measured File",
    "Reference File",
];

pub const DOSE_COMPARISON_LABELS: &[&str] = &[
    "Difference (%)",
    "Distance (mm)",
    "Threshold (%)",
    "Meas Uncertainty",
    "Use VanDyk",
    "Dose Normalization",
];

pub const SUMMARY_LABELS: &[&str] = &["Total Points", "Passed", "Failed", "% Passed"];

/// Some software versions print `% Diff` for `Difference (%)`.
pub const DIFFERENCE_ALIAS: Anomaly = Anomaly::LabelAlias {
    alternate: "% Diff",
    canonical: "Difference (%)",
};

/// Some software versions print `Threshold` for `Threshold (%)`.
pub const THRESHOLD_ALIAS: Anomaly = Anomaly::LabelAlias {
    alternate: "Threshold",
    canonical: "Threshold (%)",
};

/// Block layouts of one member of the family.
pub struct FamilyBlocks {
    pub qa_file_parameter: BlockSpec,
    /// Start marker is replaced by the comparison heading found.
    pub dose_comparison: BlockSpec,
    /// Start marker is replaced by the summary heading found.
    pub summary: BlockSpec,
    /// Whether the report carries the equipment and relative-dose fields.
    pub equipment: bool,
}

/// Read every section of a Sun Nuclear report.
pub fn extract_family(
    doc: &DocumentLines,
    blocks: &FamilyBlocks,
    ctx: &mut ExtractContext,
) -> Result<RawFields, QaError> {
    let mut raw = RawFields::new();
    read_report_header(doc, &mut raw);

    raw.extend(extract_block(doc, &blocks.qa_file_parameter, ctx)?);
    normalize_plan_date(&mut raw, ctx);

    read_cax_offsets(doc, ctx, &mut raw);

    let comparison = dose_comparison_type(doc);
    raw.insert("Dose Type", comparison);
    let dose_comparison = BlockSpec {
        start: comparison,
        ..blocks.dose_comparison
    };
    raw.extend(extract_block(doc, &dose_comparison, ctx)?);

    let (heading, analysis) = analysis_type(doc, ctx)?;
    raw.insert("Analysis Type", analysis);
    let summary = BlockSpec {
        start: heading,
        ..blocks.summary
    };
    raw.extend(extract_block(doc, &summary, ctx)?);

    read_gamma_stats(doc, ctx, &mut raw);
    read_notes(doc, ctx, &mut raw);

    if blocks.equipment {
        raw.insert("Equipment", equipment_type(doc));
        raw.insert("Relative Dose", relative_dose(doc).to_string());
    }

    Ok(raw)
}

/// `Date: ` and `Hospital Name: ` from the page header.
pub fn read_report_header(doc: &DocumentLines, raw: &mut RawFields) {
    let header = parse_header(doc);
    if let Some(date) = header.date {
        raw.insert("Date", date);
    }
    if let Some(hospital) = header.hospital {
        raw.insert("Hospital Name", hospital);
    }
}

/// Render the plan date as `YYYY-MM-DD` when it parses; otherwise keep the
/// text as printed.
fn normalize_plan_date(raw: &mut RawFields, ctx: &mut ExtractContext) {
    let Some(printed) = raw.get("Plan Date") else {
        return;
    };
    match ctx.date("QA File Parameter", printed) {
        Some(date) => raw.insert("Plan Date", date),
        None => {
            let message = format!("plan date '{printed}' kept as printed");
            ctx.warn("QA File Parameter", WarningKind::NumericFallback, message);
        }
    }
}

/// CAX offsets, printed two lines below the `Plan` heading. Both default
/// to `0` when the line is absent or does not hold exactly two numbers.
pub fn read_cax_offsets(doc: &DocumentLines, ctx: &mut ExtractContext, raw: &mut RawFields) {
    const BLOCK: &str = "CAX Offset";
    ctx.locating(BLOCK);

    let line = doc
        .find_marker("Plan", 0)
        .and_then(|i| doc.get(i + 2))
        .filter(|line| line.contains("CAX"));

    let (x, y) = match line {
        Some(line) => {
            ctx.extracting(BLOCK);
            match extract_numbers(line).as_slice() {
                [x, y] => (x.to_string(), y.to_string()),
                other => {
                    let message = format!("expected 2 offsets, found {}", other.len());
                    ctx.warn(BLOCK, WarningKind::NumericFallback, message);
                    ("0".to_string(), "0".to_string())
                }
            }
        }
        None => ("0".to_string(), "0".to_string()),
    };

    raw.insert("X offset (mm)", x);
    raw.insert("Y offset (mm)", y);
}

/// Heading of the dose comparison block present in the document.
pub fn dose_comparison_type(doc: &DocumentLines) -> &'static str {
    if doc.contains_line(ABSOLUTE_COMPARISON) {
        ABSOLUTE_COMPARISON
    } else {
        RELATIVE_COMPARISON
    }
}

/// Summary heading present in the document and its analysis type.
pub fn analysis_type(
    doc: &DocumentLines,
    ctx: &mut ExtractContext,
) -> Result<(&'static str, &'static str), QaError> {
    ctx.locating("Summary");
    ANALYSIS_TYPES
        .iter()
        .copied()
        .find(|(heading, _)| doc.contains_line(heading))
        .ok_or_else(|| ctx.missing_marker("Summary", "Summary (<type> Analysis)"))
}

/// Minimum / Maximum / Average / Stdv from the Gamma Index Summary section,
/// each printed on the line after its label.
pub fn read_gamma_stats(doc: &DocumentLines, ctx: &mut ExtractContext, raw: &mut RawFields) {
    const BLOCK: &str = "Gamma Index Summary";
    ctx.locating(BLOCK);

    let Some(start) = doc.find_marker(BLOCK, 0) else {
        ctx.warn(BLOCK, WarningKind::MissingOptionalBlock, "section absent");
        return;
    };

    ctx.extracting(BLOCK);
    for &stat in GAMMA_STATS {
        match doc.find_marker(stat, start).and_then(|i| doc.get(i + 1)) {
            Some(value) => raw.insert(stat, value.trim()),
            None => ctx.warn(
                BLOCK,
                WarningKind::ReconciliationShortfall,
                format!("no value for {stat}"),
            ),
        }
    }
}

/// The line after the `Notes` heading.
pub fn read_notes(doc: &DocumentLines, ctx: &mut ExtractContext, raw: &mut RawFields) {
    ctx.locating("Notes");
    match doc.line_after("Notes") {
        Some(notes) => raw.insert("Notes", notes.trim()),
        None => ctx.warn("Notes", WarningKind::MissingOptionalBlock, "no notes line"),
    }
}

/// Detector family named by the first line mentioning one.
pub fn equipment_type(doc: &DocumentLines) -> &'static str {
    doc.lines()
        .iter()
        .map(|line| line.to_lowercase())
        .find_map(|line| {
            if line.contains("arccheck") {
                Some("ArcCheck")
            } else if line.contains("mapcheck") {
                Some("MapCheck")
            } else {
                None
            }
        })
        .unwrap_or("Unknown")
}

/// Whether the QA File Parameter block is closed by a relative comparison.
pub fn relative_dose(doc: &DocumentLines) -> bool {
    let Some(start) = doc.find_marker("QA File Parameter", 0) else {
        return false;
    };
    doc.lines()
        .iter()
        .skip(start + 1)
        .find(|line| line.contains("Dose Comparison") || line.contains(RELATIVE_COMPARISON))
        .is_some_and(|line| line.contains(RELATIVE_COMPARISON))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: &[&str]) -> DocumentLines {
        lines.iter().copied().collect()
    }

    #[test]
    fn test_cax_offsets() {
        let d = doc(&["Plan", "plan.dcm", "CAX offset X: -0.3 mm Y: 0.2 mm"]);
        let mut raw = RawFields::new();
        read_cax_offsets(&d, &mut ExtractContext::default(), &mut raw);
        assert_eq!(raw.get("X offset (mm)"), Some("-0.3"));
        assert_eq!(raw.get("Y offset (mm)"), Some("0.2"));
    }

    #[test]
    fn test_cax_offsets_default_to_zero() {
        let mut raw = RawFields::new();
        read_cax_offsets(&doc(&["Plan", "a", "b"]), &mut ExtractContext::default(), &mut raw);
        assert_eq!(raw.get("X offset (mm)"), Some("0"));
        assert_eq!(raw.get("Y offset (mm)"), Some("0"));

        let mut ctx = ExtractContext::default();
        let mut raw = RawFields::new();
        read_cax_offsets(&doc(&["Plan", "a", "CAX offset 1.0"]), &mut ctx, &mut raw);
        assert_eq!(raw.get("X offset (mm)"), Some("0"));
        assert_eq!(ctx.trace.warnings_of(WarningKind::NumericFallback).count(), 1);
    }

    #[test]
    fn test_analysis_type_detection_order() {
        let mut ctx = ExtractContext::default();
        let d = doc(&["Summary (DTA Analysis)", "Summary (GC Analysis)"]);
        assert_eq!(
            analysis_type(&d, &mut ctx).unwrap(),
            ("Summary (DTA Analysis)", "DTA")
        );
    }

    #[test]
    fn test_missing_summary_fails() {
        let mut ctx = ExtractContext::default();
        let err = analysis_type(&doc(&["Notes"]), &mut ctx).unwrap_err();
        assert_eq!(err.block(), Some("Summary"));
    }

    #[test]
    fn test_gamma_stats() {
        let d = doc(&[
            "Gamma Index Summary",
            "Minimum",
            "0.00",
            "Maximum",
            "1.84",
            "Average",
            "0.31",
            "Stdv",
            "0.22",
        ]);
        let mut raw = RawFields::new();
        read_gamma_stats(&d, &mut ExtractContext::default(), &mut raw);
        assert_eq!(raw.get("Minimum"), Some("0.00"));
        assert_eq!(raw.get("Stdv"), Some("0.22"));
    }

    #[test]
    fn test_gamma_stats_absent() {
        let mut ctx = ExtractContext::default();
        let mut raw = RawFields::new();
        read_gamma_stats(&doc(&["Notes"]), &mut ctx, &mut raw);
        assert!(raw.is_empty());
        assert_eq!(
            ctx.trace.warnings_of(WarningKind::MissingOptionalBlock).count(),
            1
        );
    }

    #[test]
    fn test_equipment_type() {
        assert_eq!(equipment_type(&doc(&["MapCHECK 2", "ArcCHECK"])), "MapCheck");
        assert_eq!(equipment_type(&doc(&["SNC ArcCheck"])), "ArcCheck");
        assert_eq!(equipment_type(&doc(&["Notes"])), "Unknown");
    }

    #[test]
    fn test_comparison_and_relative_dose() {
        let d = doc(&["QA File Parameter", "Patient Name", "Relative Comparison"]);
        assert_eq!(dose_comparison_type(&d), RELATIVE_COMPARISON);
        assert!(relative_dose(&d));

        let d = doc(&["QA File Parameter", "Absolute Dose Comparison"]);
        assert_eq!(dose_comparison_type(&d), ABSOLUTE_COMPARISON);
        assert!(!relative_dose(&d));
    }
}
