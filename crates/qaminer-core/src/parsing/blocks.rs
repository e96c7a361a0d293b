//! Declarative key/value block extraction.
//!
//! Every report variant describes its semantic blocks as [`BlockSpec`]s:
//! where the block starts and ends, how its labels and values are laid out,
//! which lines are noise, and which known rendering anomalies to correct.
//! [`extract_block`] turns one [`BlockSpec`] into [`RawFields`].

use crate::error::QaError;
use crate::layout::DocumentLines;
use crate::model::RawFields;
use crate::trace::WarningKind;
use crate::variants::ExtractContext;

/// How many lines above a block's start marker are searched for
/// `label : value` lines when a block has fewer values than labels.
pub const RECONCILE_WINDOW: usize = 12;

/// Separator of the `label : value` inline form.
const INLINE_SEPARATOR: &str = " : ";

/// Line a block ends at (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEnd {
    /// The first blank line after the start marker.
    Blank,
    /// The first line after the start marker containing any of the texts.
    Containing(&'static [&'static str]),
}

/// Where values recovered from above the start marker are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Before the block's own values, nearest line first.
    Prepend,
    /// After the block's own values, in document order.
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A run of labels up to a blank line, then a run of values in the same
    /// order.
    Runs,
    /// Labels and values interleaved in one run; a line containing
    /// `value_marker` is a value, anything else a label.
    Inline {
        value_marker: &'static str,
        reconcile: Option<Placement>,
    },
}

/// Label lines that carry no field, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFilter {
    Exact(&'static str),
    Mentions(&'static str),
}

impl KeyFilter {
    fn matches(&self, line: &str) -> bool {
        let line = line.trim().to_lowercase();
        match self {
            KeyFilter::Exact(text) => line == text.to_lowercase(),
            KeyFilter::Mentions(text) => line.contains(&text.to_lowercase()),
        }
    }
}

/// Known rendering anomalies, corrected in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// The value run opens with a placeholder (a long patient name pushes
    /// `Set1` into the value column); skip it.
    PlaceholderShift { placeholder: &'static str },
    /// A report revision prints `alternate` for the `canonical` label.
    LabelAlias {
        alternate: &'static str,
        canonical: &'static str,
    },
    /// An inline block without any value lines is read as key/value runs.
    FallbackToRuns,
    /// Skip the block at the cursor when its first line contains the text.
    /// Consecutive rules nest: the second is only tried once the first
    /// has skipped a block.
    SkipBlockContaining(&'static str),
}

/// One semantic block of a report variant.
#[derive(Debug, Clone, Copy)]
pub struct BlockSpec {
    pub name: &'static str,
    /// The block starts at the first line equal to this text.
    pub start: &'static str,
    pub end: BlockEnd,
    pub layout: Layout,
    pub ignore_keys: &'static [KeyFilter],
    pub anomalies: &'static [Anomaly],
    /// Closed set of labels this block may produce.
    pub expected: &'static [&'static str],
}

impl BlockSpec {
    fn is_ignored(&self, key: &str) -> bool {
        self.ignore_keys.iter().any(|f| f.matches(key))
    }

    fn has(&self, anomaly: Anomaly) -> bool {
        self.anomalies.contains(&anomaly)
    }

    fn placeholder(&self) -> Option<&'static str> {
        self.anomalies.iter().find_map(|a| match a {
            Anomaly::PlaceholderShift { placeholder } => Some(*placeholder),
            _ => None,
        })
    }
}

/// Result of matching labels with values.
#[derive(Debug, Default, PartialEq, Eq)]
struct Pairing {
    pairs: Vec<(String, String)>,
    /// Labels left without a value, in block order.
    unpaired: Vec<String>,
}

/// Consecutive labels of an inline block and the value lines printed
/// after them, up to the next label.
#[derive(Debug, Default, PartialEq, Eq)]
struct InlineGroup {
    keys: Vec<String>,
    values: Vec<String>,
}

impl InlineGroup {
    fn shortfall(&self) -> usize {
        self.keys.len().saturating_sub(self.values.len())
    }
}

/// Locate and read one block into raw fields.
///
/// A missing start marker, or a missing end marker for blocks that are
/// closed by a named marker, fails the block. Missing values are reported
/// as a reconciliation shortfall and the affected labels are absent.
pub fn extract_block(
    doc: &DocumentLines,
    spec: &BlockSpec,
    ctx: &mut ExtractContext,
) -> Result<RawFields, QaError> {
    ctx.locating(spec.name);
    let start = doc
        .find_marker(spec.start, 0)
        .ok_or_else(|| ctx.missing_marker(spec.name, spec.start))?;

    ctx.extracting(spec.name);
    let pairing = match spec.layout {
        Layout::Runs => read_runs(doc, spec, start, ctx)?,
        Layout::Inline {
            value_marker,
            reconcile,
        } => {
            let end = block_end(doc, spec, start, ctx)?;
            let mut groups = split_inline(doc.slice(start + 1..end), spec, value_marker);
            let no_values = groups.iter().all(|g| g.values.is_empty());
            if no_values && spec.has(Anomaly::FallbackToRuns) {
                log::debug!("[{}] no inline values, reading as runs", spec.name);
                read_runs(doc, spec, start, ctx)?
            } else {
                if let Some(placement) = reconcile {
                    reconcile_groups(doc, start, &mut groups, placement);
                }
                pair_groups(groups)
            }
        }
    };

    let unpaired: Vec<&str> = pairing
        .unpaired
        .iter()
        .map(String::as_str)
        .filter(|k| !spec.is_ignored(k))
        .collect();
    if !unpaired.is_empty() {
        ctx.warn(
            spec.name,
            WarningKind::ReconciliationShortfall,
            format!("no value for {}", unpaired.join(", ")),
        );
    }

    Ok(collect_fields(pairing.pairs, spec, ctx))
}

/// Zip a label run to a value run positionally. Surplus values are dropped;
/// labels without a value are returned as unpaired.
fn pair_keys_values(keys: Vec<String>, values: Vec<String>) -> Pairing {
    let mut pairing = Pairing::default();
    let mut values = values.into_iter();
    for key in keys {
        match values.next() {
            Some(value) => pairing.pairs.push((key, value)),
            None => pairing.unpaired.push(key),
        }
    }
    let surplus = values.count();
    if surplus > 0 {
        log::debug!("{surplus} value(s) without a label dropped");
    }
    pairing
}

/// Pair each inline group on its own. A group whose counts differ is never
/// zipped: a single value belongs to the label printed right above it, a
/// single label takes the first of its values, and anything else leaves the
/// group's labels unpaired.
fn pair_groups(groups: Vec<InlineGroup>) -> Pairing {
    let mut pairing = Pairing::default();
    for InlineGroup { mut keys, values } in groups {
        match (keys.len(), values.len()) {
            (k, v) if k == v => pairing.pairs.extend(keys.into_iter().zip(values)),
            (_, 0) => pairing.unpaired.extend(keys),
            (_, 1) => {
                let last = keys.pop();
                pairing.unpaired.extend(keys);
                pairing.pairs.extend(last.zip(values.into_iter().next()));
            }
            (1, v) => {
                log::debug!("{} extra value(s) after '{}' dropped", v - 1, keys[0]);
                pairing.pairs.extend(keys.into_iter().zip(values));
            }
            (k, v) => {
                log::debug!("{v} value(s) for {k} label(s) dropped");
                pairing.unpaired.extend(keys);
            }
        }
    }
    pairing
}

/// Give labels that have no value of their own the `label : value` lines
/// printed just above the block, searching at most [`RECONCILE_WINDOW`]
/// lines, nearest first. Groups are served in block order, and a group only
/// takes recovered values when there are enough for all its bare labels.
fn reconcile_groups(
    doc: &DocumentLines,
    start: usize,
    groups: &mut [InlineGroup],
    placement: Placement,
) {
    let missing: usize = groups.iter().map(InlineGroup::shortfall).sum();
    if missing == 0 {
        return;
    }
    let mut recovered = window_values(doc, start, missing).into_iter();
    for group in groups.iter_mut() {
        let wanted = group.shortfall();
        if wanted == 0 {
            continue;
        }
        let taken: Vec<String> = recovered.by_ref().take(wanted).collect();
        if taken.len() < wanted {
            break;
        }
        log::debug!("recovered {wanted} value(s) above line {start}");
        place(&mut group.values, taken, placement);
    }
}

/// Up to `count` values from the window above `start`, nearest first.
fn window_values(doc: &DocumentLines, start: usize, count: usize) -> Vec<String> {
    doc.slice(start.saturating_sub(RECONCILE_WINDOW)..start)
        .iter()
        .rev()
        .filter(|line| line.contains(INLINE_SEPARATOR))
        .take(count)
        .map(|line| inline_value(line))
        .collect()
}

/// Add `recovered` (nearest first) to a group's own values.
fn place(values: &mut Vec<String>, recovered: Vec<String>, placement: Placement) {
    match placement {
        Placement::Prepend => {
            values.splice(0..0, recovered);
        }
        Placement::Append => values.extend(recovered.into_iter().rev()),
    }
}

/// First line of the block at `start` after applying the nested
/// [`Anomaly::SkipBlockContaining`] rules in `anomalies`.
pub fn skip_blocks(doc: &DocumentLines, start: usize, anomalies: &[Anomaly]) -> usize {
    let mut cursor = start;
    for anomaly in anomalies {
        let Anomaly::SkipBlockContaining(text) = anomaly else {
            continue;
        };
        let fires = doc.get(cursor).is_some_and(|line| line.contains(text));
        if !fires {
            break;
        }
        match doc.next_block(cursor) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    cursor
}

/// Lines from `start` up to the next blank line.
pub fn block_lines(doc: &DocumentLines, start: usize) -> &[String] {
    let end = doc.find_block_end(start).unwrap_or(doc.len());
    doc.slice(start..end)
}

fn block_end(
    doc: &DocumentLines,
    spec: &BlockSpec,
    start: usize,
    ctx: &mut ExtractContext,
) -> Result<usize, QaError> {
    match spec.end {
        BlockEnd::Blank => Ok(doc.find_block_end(start + 1).unwrap_or(doc.len())),
        BlockEnd::Containing(markers) => markers
            .iter()
            .filter_map(|m| doc.find_containing(m, start + 1))
            .min()
            .ok_or_else(|| ctx.missing_marker(spec.name, &markers.join(" | "))),
    }
}

/// Label run up to the first blank line, then the value run after it.
fn read_runs(
    doc: &DocumentLines,
    spec: &BlockSpec,
    start: usize,
    ctx: &mut ExtractContext,
) -> Result<Pairing, QaError> {
    let keys_start = start + 1;
    let blank = doc
        .find_block_end(keys_start)
        .ok_or_else(|| ctx.missing_marker(spec.name, "blank line after labels"))?;
    let keys: Vec<String> = doc
        .slice(keys_start..blank)
        .iter()
        .map(|k| k.trim().to_string())
        .collect();

    let mut values_start = blank + 1;
    if let Some(placeholder) = spec.placeholder() {
        if doc.get(values_start) == Some(placeholder) {
            log::debug!("[{}] skipping placeholder '{placeholder}'", spec.name);
            values_start += 1;
        }
    }
    let values: Vec<String> = block_lines(doc, values_start)
        .iter()
        .map(|v| v.replace(INLINE_SEPARATOR, "").trim().to_string())
        .collect();

    Ok(pair_keys_values(keys, values))
}

/// Group an inline block's lines: a label following a value line opens a
/// new group. Value lines before the first label belong to no label.
fn split_inline(lines: &[String], spec: &BlockSpec, value_marker: &str) -> Vec<InlineGroup> {
    let mut groups: Vec<InlineGroup> = Vec::new();
    for line in lines.iter().filter(|l| !l.trim().is_empty()) {
        if line.contains(value_marker) {
            match groups.last_mut() {
                Some(group) => group.values.push(inline_value(line)),
                None => log::debug!(
                    "[{}] value '{}' before any label dropped",
                    spec.name,
                    line.trim()
                ),
            }
        } else if !spec.is_ignored(line) {
            let opens_group = groups.last().is_none_or(|g| !g.values.is_empty());
            if opens_group {
                groups.push(InlineGroup::default());
            }
            if let Some(group) = groups.last_mut() {
                group.keys.push(line.trim().to_string());
            }
        }
    }
    groups
}

fn inline_value(line: &str) -> String {
    line.replace(':', "").trim().to_string()
}

/// Apply label aliases, drop ignored and unexpected labels.
fn collect_fields(
    pairs: Vec<(String, String)>,
    spec: &BlockSpec,
    ctx: &mut ExtractContext,
) -> RawFields {
    let mut fields = RawFields::new();
    for (key, value) in pairs {
        let key = canonical_label(spec, key);
        if spec.is_ignored(&key) {
            continue;
        }
        if !spec.expected.contains(&key.as_str()) {
            ctx.warn(
                spec.name,
                WarningKind::UnexpectedLabel,
                format!("dropped unexpected label '{key}'"),
            );
            continue;
        }
        fields.insert(key, value);
    }
    fields
}

fn canonical_label(spec: &BlockSpec, key: String) -> String {
    spec.anomalies
        .iter()
        .find_map(|a| match a {
            Anomaly::LabelAlias {
                alternate,
                canonical,
            } if *alternate == key => Some(canonical.to_string()),
            _ => None,
        })
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractOptions;

    fn doc(lines: &[&str]) -> DocumentLines {
        lines.iter().copied().collect()
    }

    fn ctx() -> ExtractContext {
        ExtractContext::new(ExtractOptions::default())
    }

    const RUNS: BlockSpec = BlockSpec {
        name: "QA File Parameter",
        start: "QA File Parameter",
        end: BlockEnd::Blank,
        layout: Layout::Runs,
        ignore_keys: &[],
        anomalies: &[Anomaly::PlaceholderShift { placeholder: "Set1" }],
        expected: &["Patient Name", "Patient ID", "Plan Date"],
    };

    const INLINE: BlockSpec = BlockSpec {
        name: "QA File Parameter",
        start: "QA File Parameter",
        end: BlockEnd::Containing(&["Dose Comparison", "Relative Comparison"]),
        layout: Layout::Inline {
            value_marker: " : ",
            reconcile: Some(Placement::Prepend),
        },
        ignore_keys: &[KeyFilter::Exact("plan"), KeyFilter::Mentions(".snc")],
        anomalies: &[Anomaly::FallbackToRuns],
        expected: &["Patient Name", "Patient ID", "Plan Date"],
    };

    #[test]
    fn test_runs_layout() {
        let d = doc(&[
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            "",
            "Smith, John",
            "12345",
        ]);
        let mut c = ctx();
        let fields = extract_block(&d, &RUNS, &mut c).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert_eq!(fields.get("Patient ID"), Some("12345"));
        assert!(c.trace.warnings.is_empty());
    }

    #[test]
    fn test_runs_placeholder_shift_and_separator() {
        let d = doc(&[
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            "",
            "Set1",
            " : Doe, Jane",
            " : 777",
        ]);
        let fields = extract_block(&d, &RUNS, &mut ctx()).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Doe, Jane"));
        assert_eq!(fields.get("Patient ID"), Some("777"));
    }

    #[test]
    fn test_runs_shortfall_never_cross_assigns() {
        let d = doc(&[
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            "Plan Date",
            "",
            "Smith, John",
        ]);
        let mut c = ctx();
        let fields = extract_block(&d, &RUNS, &mut c).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert!(!fields.contains("Patient ID"));
        assert!(!fields.contains("Plan Date"));
        assert_eq!(
            c.trace
                .warnings_of(WarningKind::ReconciliationShortfall)
                .count(),
            1
        );
    }

    #[test]
    fn test_missing_start_marker_fails_block() {
        let mut c = ctx();
        let err = extract_block(&doc(&["Notes"]), &RUNS, &mut c).unwrap_err();
        assert_eq!(err.block(), Some("QA File Parameter"));
        assert!(matches!(
            c.trace.current(),
            Some(crate::trace::ExtractionStage::Failed { .. })
        ));
    }

    #[test]
    fn test_inline_with_ignored_keys() {
        let d = doc(&[
            "QA File Parameter",
            "Plan",
            "Patient Name",
            " : Smith, John",
            "Patient ID",
            " : 12345",
            "plan_file.snc",
            "Absolute Dose Comparison",
        ]);
        let fields = extract_block(&d, &INLINE, &mut ctx()).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert_eq!(fields.get("Patient ID"), Some("12345"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_inline_reconciles_from_window_nearest_first() {
        let d = doc(&[
            " : 12345",
            " : Smith, John",
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            "Plan Date",
            " : 6/21/2019",
            "Relative Comparison",
        ]);
        let mut c = ctx();
        let fields = extract_block(&d, &INLINE, &mut c).unwrap();
        // Prepended nearest-first: the line directly above the marker pairs
        // with the first label.
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert_eq!(fields.get("Patient ID"), Some("12345"));
        assert_eq!(fields.get("Plan Date"), Some("6/21/2019"));
        assert!(c.trace.warnings.is_empty());
    }

    #[test]
    fn test_reconcile_window_is_bounded() {
        let mut lines = vec!["Patient Name : far away"];
        lines.extend(std::iter::repeat("filler").take(RECONCILE_WINDOW));
        lines.extend([
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            " : 12345",
            "Dose Comparison",
        ]);
        let mut c = ctx();
        let fields = extract_block(&doc(&lines), &INLINE, &mut c).unwrap();
        assert_eq!(fields.get("Patient ID"), Some("12345"));
        assert!(!fields.contains("Patient Name"));
        assert_eq!(
            c.trace
                .warnings_of(WarningKind::ReconciliationShortfall)
                .count(),
            1
        );
    }

    #[test]
    fn test_append_placement_keeps_document_order() {
        let d = doc(&[" : 1", " : 2", "start"]);
        let recovered = window_values(&d, 2, 2);
        assert_eq!(recovered, ["2", "1"]);

        let mut values = vec!["0".to_string()];
        place(&mut values, recovered.clone(), Placement::Append);
        assert_eq!(values, ["0", "1", "2"]);

        let mut values = vec!["0".to_string()];
        place(&mut values, recovered, Placement::Prepend);
        assert_eq!(values, ["2", "1", "0"]);
    }

    #[test]
    fn test_inline_missing_value_stays_with_its_label() {
        let d = doc(&[
            "QA File Parameter",
            "Patient Name",
            " : Smith, John",
            "Patient ID",
            "Plan Date",
            " : 06/21/2019",
            "Energy",
            " : 6 MV",
            "SSD",
            " : 100",
            "Dose Comparison",
        ]);
        const SPEC: BlockSpec = BlockSpec {
            expected: &["Patient Name", "Patient ID", "Plan Date", "Energy", "SSD"],
            ..INLINE
        };
        let mut c = ctx();
        let fields = extract_block(&d, &SPEC, &mut c).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert_eq!(fields.get("Plan Date"), Some("06/21/2019"));
        assert_eq!(fields.get("Energy"), Some("6 MV"));
        assert_eq!(fields.get("SSD"), Some("100"));
        assert!(!fields.contains("Patient ID"));
        let shortfalls: Vec<_> = c
            .trace
            .warnings_of(WarningKind::ReconciliationShortfall)
            .collect();
        assert_eq!(shortfalls.len(), 1);
        assert!(shortfalls[0].message.contains("Patient ID"));
    }

    #[test]
    fn test_inline_groups_with_uneven_counts_are_not_zipped() {
        let lines: Vec<String> = [
            " : stray",
            "Patient Name",
            "Patient ID",
            " : 12345",
            "Plan Date",
            " : 6/21/2019",
            " : 10:15 AM",
            "Energy",
            "SSD",
            "Gantry",
            " : 6 MV",
            " : 100",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        let groups = split_inline(&lines, &INLINE, " : ");
        assert_eq!(groups.len(), 3);

        let pairing = pair_groups(groups);
        assert_eq!(
            pairing.pairs,
            [
                ("Patient ID".to_string(), "12345".to_string()),
                ("Plan Date".to_string(), "6/21/2019".to_string()),
            ]
        );
        assert_eq!(pairing.unpaired, ["Patient Name", "Energy", "SSD", "Gantry"]);
    }

    #[test]
    fn test_reconcile_skips_group_when_window_runs_short() {
        let d = doc(&[" : 1", "start"]);
        let mut groups = vec![
            InlineGroup {
                keys: vec!["A".into(), "B".into(), "C".into()],
                values: vec!["c".into()],
            },
            InlineGroup {
                keys: vec!["D".into()],
                values: vec![],
            },
        ];
        reconcile_groups(&d, 1, &mut groups, Placement::Prepend);
        assert_eq!(groups[0].values, ["c"]);
        assert!(groups[1].values.is_empty());
    }

    #[test]
    fn test_inline_falls_back_to_runs() {
        let d = doc(&[
            "QA File Parameter",
            "Patient Name",
            "Patient ID",
            "",
            "Smith, John",
            "12345",
            "Absolute Dose Comparison",
        ]);
        let fields = extract_block(&d, &INLINE, &mut ctx()).unwrap();
        assert_eq!(fields.get("Patient Name"), Some("Smith, John"));
        assert_eq!(fields.get("Patient ID"), Some("12345"));
    }

    #[test]
    fn test_missing_end_marker_fails_block() {
        let d = doc(&["QA File Parameter", "Patient Name", " : Smith"]);
        let err = extract_block(&d, &INLINE, &mut ctx()).unwrap_err();
        assert!(matches!(err, QaError::MarkerMissing { .. }));
    }

    #[test]
    fn test_alias_and_unexpected_labels() {
        const SPEC: BlockSpec = BlockSpec {
            name: "Dose Comparison",
            start: "Absolute Dose Comparison",
            end: BlockEnd::Containing(&["Summary "]),
            layout: Layout::Inline {
                value_marker: ":",
                reconcile: None,
            },
            ignore_keys: &[],
            anomalies: &[Anomaly::LabelAlias {
                alternate: "% Diff",
                canonical: "Difference (%)",
            }],
            expected: &["Difference (%)", "Distance (mm)"],
        };
        let d = doc(&[
            "Absolute Dose Comparison",
            "% Diff",
            ": 3.0",
            "Distance (mm)",
            ": 2.0",
            "Use VanDyk",
            ": Yes",
            "Summary (Gamma Analysis)",
        ]);
        let mut c = ctx();
        let fields = extract_block(&d, &SPEC, &mut c).unwrap();
        assert_eq!(fields.get("Difference (%)"), Some("3.0"));
        assert_eq!(fields.get("Distance (mm)"), Some("2.0"));
        assert!(!fields.contains("% Diff"));
        assert!(!fields.contains("Use VanDyk"));
        assert_eq!(c.trace.warnings_of(WarningKind::UnexpectedLabel).count(), 1);
    }

    #[test]
    fn test_skip_blocks_nests() {
        let rules = [
            Anomaly::SkipBlockContaining("Det within acceptance"),
            Anomaly::SkipBlockContaining("index dose dev"),
            Anomaly::SkipBlockContaining("factor"),
        ];
        let d = doc(&[
            "Det within acceptance",
            "",
            "index dose dev",
            "",
            "1.010",
            "",
        ]);
        assert_eq!(skip_blocks(&d, 0, &rules), 4);

        // Second rule does not fire, so the third is never evaluated.
        let d = doc(&["Det within acceptance", "", "1.010", "", "factor", ""]);
        assert_eq!(skip_blocks(&d, 0, &rules), 2);

        let d = doc(&["1.010", ""]);
        assert_eq!(skip_blocks(&d, 0, &rules), 0);
    }

    #[test]
    fn test_block_lines() {
        let d = doc(&["a", "b", "", "c"]);
        assert_eq!(block_lines(&d, 0), &["a", "b"]);
        assert_eq!(block_lines(&d, 3), &["c"]);
        assert!(block_lines(&d, 2).is_empty());
    }
}
