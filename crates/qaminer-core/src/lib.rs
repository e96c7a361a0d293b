pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod parsing;
pub mod trace;
pub mod variants;

pub use classify::{DocumentOutcome, ExtractedReport};
pub use config::ExtractOptions;
pub use error::QaError;
pub use layout::DocumentLines;
pub use model::Record;
pub use variants::{ReportVariant, VariantRegistry};

use extraction::{PageFragments, PdfExtractor};
use trace::ExtractionStage;
use variants::ExtractContext;

/// Main API entry point: extract one record from a QA report PDF.
///
/// A failing extraction backend is not fatal: the error is logged and the
/// document is reported as unclassified.
pub fn extract_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    registry: &VariantRegistry,
    options: &ExtractOptions,
) -> Result<DocumentOutcome, QaError> {
    let pages = match extractor.extract_fragments(pdf_bytes) {
        Ok(pages) => pages,
        Err(e) => {
            log::warn!("{} could not read document: {e}", extractor.backend_name());
            return Ok(DocumentOutcome::Unclassified);
        }
    };
    extract_pages(&pages, registry, options)
}

/// Reconstruct already-extracted page fragments and extract from them.
pub fn extract_pages(
    pages: &[PageFragments],
    registry: &VariantRegistry,
    options: &ExtractOptions,
) -> Result<DocumentOutcome, QaError> {
    let doc = layout::document_from_pages(pages);
    extract_document(&doc, registry, options)
}

/// Classify a reconstructed document and extract its record.
pub fn extract_document(
    doc: &DocumentLines,
    registry: &VariantRegistry,
    options: &ExtractOptions,
) -> Result<DocumentOutcome, QaError> {
    let Some(variant) = classify::classify(doc, registry) else {
        log::info!("document matches no registered report variant");
        return Ok(DocumentOutcome::Unclassified);
    };
    log::debug!(
        "classified as {} ({} lines)",
        variant.report_type(),
        doc.len()
    );

    let mut ctx = ExtractContext::new(*options);
    let raw = variant.extract(doc, &mut ctx)?;

    ctx.trace.enter(ExtractionStage::Normalizing);
    let record = normalize::normalize(&raw, variant.columns());
    ctx.trace.enter(ExtractionStage::Done);

    Ok(DocumentOutcome::Extracted(ExtractedReport {
        report_type: variant.report_type().to_string(),
        columns: normalize::column_names(variant.columns()),
        record,
        trace: ctx.trace,
    }))
}
