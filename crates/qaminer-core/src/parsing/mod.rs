//! Text-level building blocks shared by the report variants.

pub mod blocks;
pub mod dates;
pub mod header;
pub mod values;

pub use blocks::{extract_block, Anomaly, BlockEnd, BlockSpec, KeyFilter, Layout, Placement};
pub use dates::{parse_date, ParsedDate};
pub use header::{parse_header, ReportHeader};
