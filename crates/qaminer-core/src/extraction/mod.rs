pub mod pdftotext;

use crate::error::QaError;
use serde::{Deserialize, Serialize};

/// One positioned unit of text from a PDF page.
///
/// `(x, y)` is the lower-left corner of the text box in page coordinates
/// with the origin at the bottom of the page, so larger `y` is higher up.
/// The payload may span several lines separated by `\n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

impl TextFragment {
    pub fn new(x: f32, y: f32, text: impl Into<String>) -> Self {
        TextFragment {
            x,
            y,
            text: text.into(),
        }
    }
}

/// Fragments of a single page, already flattened out of any containers.
pub type PageFragments = Vec<TextFragment>;

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text from PDF bytes, returning one entry per page.
    fn extract_fragments(&self, pdf_bytes: &[u8]) -> Result<Vec<PageFragments>, QaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
