use qaminer_core::classify::classify;
use qaminer_core::extraction::pdftotext::PdftotextExtractor;
use qaminer_core::extraction::PdfExtractor;
use qaminer_core::layout::document_from_pages;
use qaminer_core::{QaError, VariantRegistry};
use std::path::PathBuf;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), QaError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdftotextExtractor::new();
    let pages = extractor.extract_fragments(&pdf_bytes)?;
    let doc = document_from_pages(&pages);

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&doc)?),
        _ => {
            let width = doc.len().to_string().len();
            for (i, line) in doc.lines().iter().enumerate() {
                println!("{i:>width$}  {line}");
            }
        }
    }

    let registry = VariantRegistry::builtin();
    match classify(&doc, &registry) {
        Some(variant) => eprintln!(
            "{} page(s), {} line(s), classified as {}",
            pages.len(),
            doc.len(),
            variant.report_type()
        ),
        None => eprintln!(
            "{} page(s), {} line(s), no matching report variant",
            pages.len(),
            doc.len()
        ),
    }

    Ok(())
}
