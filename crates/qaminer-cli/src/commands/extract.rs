use qaminer_core::config::load_options;
use qaminer_core::extraction::pdftotext::PdftotextExtractor;
use qaminer_core::extraction::PdfExtractor;
use qaminer_core::{DocumentOutcome, ExtractOptions, QaError, VariantRegistry};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use crate::output::{self, FileResult};

pub fn run(
    files: Vec<PathBuf>,
    day_first: bool,
    config: Option<PathBuf>,
    output_format: &str,
) -> Result<(), QaError> {
    let mut options = match &config {
        Some(path) => load_options(path)?,
        None => ExtractOptions::default(),
    };
    options.day_first |= day_first;

    if !PdftotextExtractor::is_available() {
        return Err(QaError::PdftotextNotFound);
    }

    let registry = VariantRegistry::builtin();
    let extractor = PdftotextExtractor::new();

    // Each document is independent; a failure only affects its own entry.
    let results: Vec<FileResult> = files
        .par_iter()
        .map(|path| {
            let outcome = extract_file(path, &extractor, &registry, &options);
            if let Err(e) = &outcome {
                log::warn!("{}: {e}", path.display());
            }
            FileResult::new(path, outcome)
        })
        .collect();

    match output_format {
        "json" => output::json::print(&results)?,
        "rows" => output::rows::print(&results),
        _ => output::table::print(&results),
    }

    let failed = results.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        eprintln!("{failed} of {} file(s) could not be extracted", results.len());
    }

    Ok(())
}

fn extract_file(
    path: &Path,
    extractor: &dyn PdfExtractor,
    registry: &VariantRegistry,
    options: &ExtractOptions,
) -> Result<DocumentOutcome, QaError> {
    let pdf_bytes = std::fs::read(path)?;
    qaminer_core::extract_pdf(&pdf_bytes, extractor, registry, options)
}
