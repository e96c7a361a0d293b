use qaminer_core::trace::TraceSeverity;
use qaminer_core::ExtractedReport;

use super::FileResult;

pub fn print(results: &[FileResult]) {
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }

        let file = result.file.display();
        if let Some(ref error) = result.error {
            println!("=== {file} ===\n");
            println!("  Error: {error}");
            continue;
        }

        match result.report() {
            Some(report) => {
                println!("=== {file} ({}) ===\n", report.report_type);
                print_report(report);
            }
            None => {
                println!("=== {file} ===\n");
                println!("  Not a supported QA report, no record produced");
            }
        }
    }
}

fn print_report(report: &ExtractedReport) {
    let max_name = report
        .record
        .columns()
        .map(str::len)
        .max()
        .unwrap_or(10);

    for field in report.record.fields() {
        let defaulted_marker = if report.record.is_defaulted(&field.column) {
            " (default)"
        } else {
            ""
        };
        println!(
            "  {:<width$}  {}{}",
            field.column,
            field.value,
            defaulted_marker,
            width = max_name
        );
    }

    let important: Vec<_> = report
        .trace
        .warnings
        .iter()
        .filter(|w| w.severity == TraceSeverity::Important)
        .collect();
    if !important.is_empty() {
        println!("\n  Warnings:");
        for w in important {
            println!("    [{}] {}", w.block, w.message);
        }
    }
}
