use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::normalize::Column;
use crate::parsing::blocks::{Anomaly, BlockEnd, BlockSpec, KeyFilter, Layout, Placement};
use crate::variants::snc::{
    self, FamilyBlocks, DIFFERENCE_ALIAS, DOSE_COMPARISON_LABELS, QA_FILE_PARAMETER_LABELS,
    SUMMARY_LABELS, THRESHOLD_ALIAS,
};
use crate::variants::{ExtractContext, Identifier, ReportVariant};

/// Sun Nuclear "SNC Patient" dose comparison report (MapCHECK or ArcCHECK
/// measurements), printed with inline `label : value` blocks.
pub struct SncPatient;

const IDENTIFIERS: &[Identifier] = &[
    Identifier::Line("QA File Parameter"),
    // "Threshold" or "Threshold (%)" depending on software version.
    Identifier::Substring("Threshold"),
    Identifier::Line("Notes"),
    Identifier::Line("Reviewed By :"),
    Identifier::Line("SSD"),
    Identifier::Line("Depth"),
    Identifier::Line("Energy"),
];

const COLUMNS: &[Column] = &[
    Column::last_name("Patient Last Name", "Patient Name"),
    Column::first_name("Patient First Name", "Patient Name"),
    Column::copy("Patient ID"),
    Column::copy("Plan Date"),
    Column::copy("Energy"),
    Column::copy("Angle"),
    Column::copy("Dose Type"),
    Column::copy("Difference (%)"),
    Column::copy("Distance (mm)"),
    Column::copy("Threshold (%)"),
    Column::copy("Meas Uncertainty"),
    Column::copy("Equipment"),
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

const BLOCKS: FamilyBlocks = FamilyBlocks {
    qa_file_parameter: BlockSpec {
        name: "QA File Parameter",
        start: "QA File Parameter",
        end: BlockEnd::Containing(&["Dose Comparison", "Relative Comparison"]),
        layout: Layout::Inline {
            value_marker: " : ",
            reconcile: Some(Placement::Prepend),
        },
        ignore_keys: &[
            KeyFilter::Exact("plan"),
            KeyFilter::Mentions("arccheck"),
            KeyFilter::Mentions("mapcheck"),
            KeyFilter::Mentions(".txt"),
            KeyFilter::Mentions(".snc"),
            KeyFilter::Mentions(".dcm"),
        ],
        anomalies: &[
            Anomaly::FallbackToRuns,
            Anomaly::PlaceholderShift { placeholder: "Set1" },
        ],
        expected: QA_FILE_PARAMETER_LABELS,
    },
    dose_comparison: BlockSpec {
        name: "Dose Comparison",
        start: snc::ABSOLUTE_COMPARISON,
        end: BlockEnd::Containing(&["Summary "]),
        layout: Layout::Inline {
            value_marker: ":",
            reconcile: None,
        },
        ignore_keys: &[],
        anomalies: &[DIFFERENCE_ALIAS, THRESHOLD_ALIAS],
        expected: DOSE_COMPARISON_LABELS,
    },
    summary: BlockSpec {
        name: "Summary",
        start: "Summary (Gamma Analysis)",
        end: BlockEnd::Containing(&["Dose Values in "]),
        layout: Layout::Inline {
            value_marker: " : ",
            reconcile: Some(Placement::Append),
        },
        ignore_keys: &[KeyFilter::Mentions("*")],
        anomalies: &[],
        expected: SUMMARY_LABELS,
    },
    equipment: true,
};

impl ReportVariant for SncPatient {
    fn report_type(&self) -> &str {
        "sncpatient"
    }

    fn description(&self) -> &str {
        "Sun Nuclear SNC Patient dose comparison report"
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
