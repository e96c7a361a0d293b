pub mod engine;
pub mod outcome;

pub use engine::{classify, is_match};
pub use outcome::{DocumentOutcome, ExtractedReport};
