use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::normalize::Column;
use crate::parsing::blocks::{block_lines, skip_blocks, Anomaly};
use crate::parsing::values::{distinct_joined, mean, parse_number, parse_percent};
use crate::parsing::parse_date;
use crate::trace::WarningKind;
use crate::variants::{ExtractContext, Identifier, ReportVariant};
use std::collections::VecDeque;

/// ScandiDos Delta4 treatment summary report.
pub struct Delta4;

const CRITERIA_MARKER: &str = "Parameter Definitions & Acceptance Criteria, Detectors";
const ACCEPTANCE_MARKER: &str = "Acceptance Limits";
const ANALYSIS_HEADER: &str = "Daily corr Norm";

const IDENTIFIERS: &[Identifier] = &[
    Identifier::Line("ScandiDos AB"),
    Identifier::Line("Treatment Summary"),
    Identifier::Line(ACCEPTANCE_MARKER),
    // Printed inside the "Energy Daily corr Norm" table header.
    Identifier::Substring("Daily corr"),
    Identifier::Line("Selected Detectors"),
    Identifier::Line(CRITERIA_MARKER),
];

const COLUMNS: &[Column] = &[
    Column::copy("Patient Name"),
    Column::copy("Patient ID"),
    Column::copy("Plan Date"),
    Column::copy("Energy"),
    Column::copy("Daily Corr"),
    Column::copy("Norm Dose"),
    Column::copy("Dev"),
    Column::copy("DTA"),
    Column::copy("Gamma-Index"),
    Column::copy("Dose Dev"),
    Column::copy("Radiation Dev"),
    Column::copy("Gamma Pass Criteria"),
    Column::copy("Gamma Dose Criteria"),
    Column::copy("Gamma Dist Criteria"),
];

/// Per-beam analysis metrics, in table order.
const ANALYSIS_FIELDS: [&str; 5] = ["Norm Dose", "Dev", "DTA", "Gamma-Index", "Dose Dev"];

/// Energy labels that some report versions render where they cannot be
/// read positionally. The first one found anywhere in the document wins.
const GLOBAL_ENERGY_OVERRIDES: &[&str] = &["6 MV FFF", "10 MV FFF", "6 FFF", "10 FFF"];

const DAILY_CORR_SKIPS: &[Anomaly] = &[
    Anomaly::SkipBlockContaining("Det within acceptance"),
    Anomaly::SkipBlockContaining("index dose dev"),
    Anomaly::SkipBlockContaining("factor"),
];

const ENERGY_SKIPS: &[Anomaly] = &[Anomaly::SkipBlockContaining("dose dev")];

/// Used when no daily correction factor can be read.
const DEFAULT_DAILY_CORR: &str = "1.0";

/// Where the patient name and ID sit, depending on the report revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderLayout {
    /// Line 3 reads `PRE-TREATMENT REPORT`: name and ID on lines 0 and 1.
    PreTreatment,
    /// Line 2 is not the clinic line: name and ID on lines 2 and 3.
    ClinicLess,
    /// Name and ID three and two lines above `Treatment Summary`.
    SummaryAnchored,
}

const HEADER_LAYOUTS: &[HeaderLayout] = &[
    HeaderLayout::PreTreatment,
    HeaderLayout::ClinicLess,
    HeaderLayout::SummaryAnchored,
];

impl HeaderLayout {
    /// Index of the patient name line; the ID follows it.
    fn locate(self, doc: &DocumentLines) -> Option<usize> {
        match self {
            HeaderLayout::PreTreatment => doc
                .get(3)
                .filter(|line| line.contains("PRE-TREATMENT REPORT"))
                .map(|_| 0),
            HeaderLayout::ClinicLess => doc
                .get(2)
                .filter(|line| !line.contains("Clinic"))
                .map(|_| 2),
            HeaderLayout::SummaryAnchored => doc
                .find_marker("Treatment Summary", 0)
                .and_then(|i| i.checked_sub(3)),
        }
    }
}

impl ReportVariant for Delta4 {
    fn report_type(&self) -> &str {
        "delta4"
    }

    fn description(&self) -> &str {
        "ScandiDos Delta4 treatment summary"
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
        let mut raw = RawFields::new();

        read_patient(doc, ctx, &mut raw);
        let gantry_start = locate_beams(doc, ctx)?;
        let overrides = energy_overrides(doc, gantry_start);
        let analysis_start = read_analysis(doc, ctx, &mut raw)?;
        let daily_start = read_daily_corr(doc, ctx, &mut raw, doc.next_block(analysis_start));
        read_energy(doc, ctx, &mut raw, daily_start, &overrides);
        read_gamma_criteria(doc, ctx, &mut raw)?;

        if let Some(device) = doc.value_after_prefix("Radiation Device: ") {
            raw.insert("Radiation Dev", device);
        }
        read_plan_date(doc, ctx, &mut raw);

        Ok(raw)
    }
}

fn read_patient(doc: &DocumentLines, ctx: &mut ExtractContext, raw: &mut RawFields) {
    const BLOCK: &str = "Patient";
    ctx.locating(BLOCK);

    let located = HEADER_LAYOUTS
        .iter()
        .find_map(|layout| layout.locate(doc).map(|i| (*layout, i)));
    let Some((layout, name_idx)) = located else {
        ctx.warn(BLOCK, WarningKind::MissingOptionalBlock, "no header layout applies");
        return;
    };

    ctx.extracting(BLOCK);
    log::debug!("patient header layout: {layout:?}");
    if let Some(name) = doc.get(name_idx) {
        raw.insert("Patient Name", name.trim());
    }
    if let Some(id) = doc.get(name_idx + 1) {
        raw.insert("Patient ID", id.trim());
    }
}

/// Locate the beam block, the block after the first line with a `°` sign
/// (skipping a lone `Gantry` heading block). Returns the start of the
/// gantry block that follows it.
fn locate_beams(doc: &DocumentLines, ctx: &mut ExtractContext) -> Result<Option<usize>, QaError> {
    const BLOCK: &str = "Beam";
    ctx.locating(BLOCK);

    let mut start = doc
        .find_containing("°", 0)
        .and_then(|i| doc.next_block(i))
        .ok_or_else(|| ctx.missing_marker(BLOCK, "°"))?;
    if doc.get(start) == Some("Gantry") {
        start = doc
            .next_block(start)
            .ok_or_else(|| ctx.missing_marker(BLOCK, "beam block after Gantry"))?;
    }

    log::debug!("beam block at line {start}");
    Ok(doc.next_block(start))
}

/// Energies printed on the same row as a gantry angle (`180.0 ° 10 MV`)
/// override the energy column for that beam.
fn energy_overrides(doc: &DocumentLines, gantry_start: Option<usize>) -> Vec<Option<String>> {
    let Some(start) = gantry_start else {
        return Vec::new();
    };
    block_lines(doc, start)
        .iter()
        .filter(|row| row.as_str() != "Fraction")
        .map(|row| {
            let tokens: Vec<&str> = row.split(' ').collect();
            (tokens.len() > 3).then(|| tokens[tokens.len() - 2..].join(" "))
        })
        .collect()
}

/// Read the first beam's analysis metrics. Returns the first line of the
/// analysis rows.
fn read_analysis(
    doc: &DocumentLines,
    ctx: &mut ExtractContext,
    raw: &mut RawFields,
) -> Result<usize, QaError> {
    const BLOCK: &str = "Analysis";
    ctx.locating(BLOCK);

    let start = doc
        .find_containing(ANALYSIS_HEADER, 0)
        .map(|i| i + 2)
        .ok_or_else(|| ctx.missing_marker(BLOCK, ANALYSIS_HEADER))?;

    ctx.extracting(BLOCK);
    let rows = analysis_rows(block_lines(doc, start));
    let Some(first) = rows.first() else {
        return Err(ctx.unreadable(BLOCK, "no complete dose/analysis row"));
    };
    log::debug!("{} analysis row(s)", rows.len());

    for (field, value) in ANALYSIS_FIELDS.iter().zip(first) {
        let number = parse_number(field, value).map_err(|e| ctx.numeric_failure(BLOCK, e))?;
        raw.insert(*field, number.to_string());
    }

    Ok(start)
}

/// Re-join wrapped table rows and split each into its five metrics.
///
/// A row without `cGy` lost its leading dose to the following line; a row
/// without `%` lost its trailing metrics to the following line.
fn analysis_rows(lines: &[String]) -> Vec<[String; 5]> {
    let mut queue: VecDeque<&str> = lines.iter().map(String::as_str).collect();
    let mut rows = Vec::new();

    while let Some(line) = queue.pop_front() {
        let mut row = line.to_string();
        if !row.contains("cGy") {
            if let Some(next) = queue.pop_front() {
                row = format!("{next} {row}");
            }
        }
        if !row.contains('%') {
            if let Some(next) = queue.pop_front() {
                row = format!("{row} {next}");
            }
        }
        if let Some(metrics) = split_analysis_row(&row) {
            rows.push(metrics);
        }
    }

    rows
}

fn split_analysis_row(row: &str) -> Option<[String; 5]> {
    if !row.contains("cGy") || !row.contains('%') {
        return None;
    }
    let parts: Vec<&str> = row.split('%').collect();
    let (dose, dev) = parts[0].split_once("cGy")?;
    let mut metrics = vec![dose.trim(), dev.trim()];
    metrics.extend(parts[1..parts.len() - 1].iter().map(|p| p.trim()));

    match metrics.as_slice() {
        [norm, dev, dta, gamma, dose_dev, ..] => Some([
            norm.to_string(),
            dev.to_string(),
            dta.to_string(),
            gamma.to_string(),
            dose_dev.to_string(),
        ]),
        _ => None,
    }
}

/// Mean daily correction factor. Returns where the daily correction block
/// starts so the energy block can be found after it.
fn read_daily_corr(
    doc: &DocumentLines,
    ctx: &mut ExtractContext,
    raw: &mut RawFields,
    after_analysis: Option<usize>,
) -> Option<usize> {
    const BLOCK: &str = "Daily Corr";
    ctx.locating(BLOCK);

    let start = after_analysis.map(|i| skip_blocks(doc, i, DAILY_CORR_SKIPS));
    let factors: Vec<_> = start
        .map(|i| block_lines(doc, i))
        .unwrap_or_default()
        .iter()
        .map(|row| {
            if !row.is_empty() && row.chars().all(|c| c.is_ascii_digit()) {
                row.as_str()
            } else {
                last_chars(row, 5)
            }
        })
        .filter_map(|factor| parse_number(BLOCK, factor).ok())
        .collect();

    ctx.extracting(BLOCK);
    match mean(&factors) {
        Some(avg) => raw.insert(BLOCK, avg.to_string()),
        None => {
            log::warn!("no daily correction factor found, defaulting to {DEFAULT_DAILY_CORR}");
            ctx.warn(
                BLOCK,
                WarningKind::DefaultedField,
                format!("no numeric entry, defaulted to {DEFAULT_DAILY_CORR}"),
            );
            raw.insert_defaulted(BLOCK, DEFAULT_DAILY_CORR);
        }
    }

    start
}

fn read_energy(
    doc: &DocumentLines,
    ctx: &mut ExtractContext,
    raw: &mut RawFields,
    daily_start: Option<usize>,
    overrides: &[Option<String>],
) {
    const BLOCK: &str = "Energy";
    ctx.locating(BLOCK);

    if let Some(literal) = GLOBAL_ENERGY_OVERRIDES
        .iter()
        .find(|literal| doc.contains_text(literal))
    {
        log::debug!("energy overridden by literal '{literal}'");
        raw.insert(BLOCK, *literal);
        return;
    }

    let Some(start) = daily_start
        .and_then(|i| doc.next_block(i))
        .map(|i| skip_blocks(doc, i, ENERGY_SKIPS))
    else {
        ctx.warn(BLOCK, WarningKind::MissingOptionalBlock, "energy block not found");
        return;
    };

    ctx.extracting(BLOCK);
    let energies: Vec<&str> = block_lines(doc, start)
        .iter()
        .enumerate()
        .map(|(i, energy)| match overrides.get(i) {
            Some(Some(inline)) => inline.as_str(),
            _ => energy.trim(),
        })
        .filter(|energy| !energy.is_empty())
        .collect();

    if energies.is_empty() {
        ctx.warn(BLOCK, WarningKind::MissingOptionalBlock, "energy block is empty");
    } else {
        raw.insert(BLOCK, distinct_joined(energies, "/"));
    }
}

/// Gamma distance and dose criteria, then the pass-rate criterion from the
/// last line of the acceptance limits.
fn read_gamma_criteria(
    doc: &DocumentLines,
    ctx: &mut ExtractContext,
    raw: &mut RawFields,
) -> Result<(), QaError> {
    const BLOCK: &str = "Gamma Criteria";
    ctx.locating(BLOCK);

    let criteria = doc
        .find_marker(CRITERIA_MARKER, 0)
        .ok_or_else(|| ctx.missing_marker(BLOCK, CRITERIA_MARKER))?;
    let acceptance = doc
        .find_marker(ACCEPTANCE_MARKER, 0)
        .ok_or_else(|| ctx.missing_marker(BLOCK, ACCEPTANCE_MARKER))?;

    ctx.extracting(BLOCK);
    // The line right above "Acceptance Limits" is its heading row.
    let end = acceptance.saturating_sub(1);
    for row in doc.block(criteria, end) {
        if let Some((distance, _)) = row.split_once("mm") {
            let distance = distance.trim();
            if parse_number("Gamma Dist Criteria", distance).is_ok() {
                raw.insert("Gamma Dist Criteria", distance);
            }
        } else if let Some((_, dose)) = row.split_once('±') {
            insert_criterion(ctx, raw, "Gamma Dose Criteria", dose);
        }
    }

    let pass = block_lines(doc, acceptance)
        .last()
        .and_then(|line| line.split('%').next())
        .unwrap_or_default();
    insert_criterion(ctx, raw, "Gamma Pass Criteria", pass);

    for field in ["Gamma Dist Criteria", "Gamma Dose Criteria"] {
        if !raw.contains(field) {
            ctx.warn(BLOCK, WarningKind::NumericFallback, format!("{field} not found"));
        }
    }

    Ok(())
}

/// Store a percentage criterion, or leave it unavailable with a warning.
fn insert_criterion(ctx: &mut ExtractContext, raw: &mut RawFields, field: &str, value: &str) {
    match parse_percent(field, value) {
        Ok(number) => raw.insert(field, number.to_string()),
        Err(e) => ctx.warn("Gamma Criteria", WarningKind::NumericFallback, e.to_string()),
    }
}

/// Plan date from the first line that looks like a timestamp
/// (`6/21/2019 10:15:03 AM` or `21.06.2019 10:15:03 AM`).
fn read_plan_date(doc: &DocumentLines, ctx: &mut ExtractContext, raw: &mut RawFields) {
    const BLOCK: &str = "Plan Date";
    ctx.locating(BLOCK);
    let day_first = ctx.options.day_first;

    let timestamp = doc.lines().iter().position(|line| {
        let shaped = (line.contains('/') || line.contains('.'))
            && line.contains(':')
            && line.contains('M');
        shaped && parse_date(first_token(line), day_first).is_some()
    });

    let date = timestamp.and_then(|i| {
        let printed = [doc.get(i), doc.get(i + 2)]
            .into_iter()
            .flatten()
            .map(first_token)
            .find(|token| parse_date(token, day_first).is_some())?;
        ctx.date(BLOCK, printed)
    });

    match date {
        Some(date) => raw.insert(BLOCK, date),
        None => ctx.warn(BLOCK, WarningKind::NumericFallback, "no parseable plan date"),
    }
}

fn first_token(line: &str) -> &str {
    line.split(' ').next().unwrap_or_default().trim()
}

/// The last `n` characters of `s` (all of it when shorter).
fn last_chars(s: &str, n: usize) -> &str {
    match s.char_indices().rev().nth(n.saturating_sub(1)) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}
