use qaminer_core::ExtractedReport;
use std::collections::BTreeMap;

use super::FileResult;

const DELIMITER: char = ',';
/// Stands in for the delimiter inside values.
const DELIMITER_SUBSTITUTE: &str = "^";

/// One header line per report type followed by one delimited row per
/// extracted document of that type. Unclassified and failed files have no
/// row.
pub fn print(results: &[FileResult]) {
    let mut by_type: BTreeMap<&str, Vec<&ExtractedReport>> = BTreeMap::new();
    for report in results.iter().filter_map(FileResult::report) {
        by_type
            .entry(report.report_type.as_str())
            .or_default()
            .push(report);
    }

    for (i, (report_type, reports)) in by_type.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("# {report_type}");
        if let Some(first) = reports.first() {
            println!("{}", join_row(first.columns.iter().map(String::as_str)));
        }
        for report in reports {
            println!("{}", join_row(report.record.values()));
        }
    }
}

fn join_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells
        .map(|cell| cell.replace(DELIMITER, DELIMITER_SUBSTITUTE))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string())
}
