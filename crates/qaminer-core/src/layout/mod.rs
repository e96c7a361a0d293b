//! Reading-order reconstruction.
//!
//! PDF pages carry no line structure, only positioned text. This module turns
//! the fragments of each page into lines in the order a person reads them and
//! concatenates the pages into one [`DocumentLines`] sequence, the sole input
//! to classification and field extraction.

pub mod document;
pub mod reconstruct;

pub use document::DocumentLines;
pub use reconstruct::reconstruct;

use crate::extraction::PageFragments;

/// Concatenate per-page line sequences, in page order, into one document.
pub fn assemble<I>(pages: I) -> DocumentLines
where
    I: IntoIterator<Item = Vec<String>>,
{
    DocumentLines::new(pages.into_iter().flatten().collect())
}

/// Reconstruct every page and assemble the result.
pub fn document_from_pages(pages: &[PageFragments]) -> DocumentLines {
    assemble(pages.iter().map(|page| reconstruct(page)))
}
