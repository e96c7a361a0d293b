use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::normalize::Column;
use crate::parsing::blocks::{Anomaly, BlockEnd, BlockSpec, Layout};
use crate::variants::snc::{
    self, FamilyBlocks, DIFFERENCE_ALIAS, DOSE_COMPARISON_LABELS, QA_FILE_PARAMETER_LABELS,
    SUMMARY_LABELS, THRESHOLD_ALIAS,
};
use crate::variants::{ExtractContext, Identifier, ReportVariant};

/// Sun Nuclear ArcCHECK report. Its blocks print a run of labels, a blank
/// line, then the run of values.
pub struct ArcCheck;

const IDENTIFIERS: &[Identifier] = &[
    Identifier::Line("QA File Parameter"),
    Identifier::Substring("Threshold"),
    Identifier::Line("Notes"),
    Identifier::Line("Reviewed By :"),
    Identifier::Line("SSD"),
    Identifier::Line("Depth"),
    Identifier::Line("Energy"),
    Identifier::Substring("ArcCHECK"),
];

const COLUMNS: &[Column] = &[
    Column::last_name("Patient Last Name", "Patient Name"),
    Column::first_name("Patient First Name", "Patient Name"),
    Column::copy("Patient ID"),
    Column::copy("Plan Date"),
    Column::copy("Dose Type"),
    Column::copy("Difference (%)"),
    Column::copy("Distance (mm)"),
    Column::copy("Threshold (%)"),
    Column::copy("Meas Uncertainty"),
    Column::copy("Analysis Type"),
    Column::copy("Total Points"),
    Column::copy("Passed"),
    Column::copy("Failed"),
    Column::copy("% Passed"),
    Column::from_label("Min", "Minimum"),
    Column::from_label("Max", "Maximum"),
    Column::copy("Average"),
    Column::from_label("Std Dev", "Stdv"),
    Column::copy("X offset (mm)"),
    Column::copy("Y offset (mm)"),
    Column::copy("Notes"),
];

const SET1: Anomaly = Anomaly::PlaceholderShift { placeholder: "Set1" };

const BLOCKS: FamilyBlocks = FamilyBlocks {
    qa_file_parameter: BlockSpec {
        name: "QA File Parameter",
        start: "QA File Parameter",
        end: BlockEnd::Blank,
        layout: Layout::Runs,
        ignore_keys: &[],
        anomalies: &[SET1],
        expected: QA_FILE_PARAMETER_LABELS,
    },
    dose_comparison: BlockSpec {
        name: "Dose Comparison",
        start: snc::ABSOLUTE_COMPARISON,
        end: BlockEnd::Blank,
        layout: Layout::Runs,
        ignore_keys: &[],
        anomalies: &[SET1, DIFFERENCE_ALIAS, THRESHOLD_ALIAS],
        expected: DOSE_COMPARISON_LABELS,
    },
    summary: BlockSpec {
        name: "Summary",
        start: "Summary (Gamma Analysis)",
        end: BlockEnd::Blank,
        layout: Layout::Runs,
        ignore_keys: &[],
        anomalies: &[SET1],
        expected: SUMMARY_LABELS,
    },
    equipment: false,
};

impl ReportVariant for ArcCheck {
    fn report_type(&self) -> &str {
        "arccheck"
    }

    fn description(&self) -> &str {
        "Sun Nuclear ArcCHECK dose comparison report"
    }

    fn identifiers(&self) -> &[Identifier] {
        IDENTIFIERS
    }

    fn columns(&self) -> &[Column] {
        COLUMNS
    }

    fn extract(
        &self,
        doc: &DocumentLines,
        ctx: &mut ExtractContext,
    ) -> Result<RawFields, QaError> {
        snc::extract_family(doc, &BLOCKS, ctx)
    }
}
