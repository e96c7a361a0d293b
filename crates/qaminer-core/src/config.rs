use crate::error::QaError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Caller-supplied options for one extraction run.
///
/// The variant registry itself is compiled in; the only runtime knob is how
/// ambiguous numeric dates such as `01/02/2020` are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Read `NN/NN/YYYY` as day/month/year instead of month/day/year.
    #[serde(default)]
    pub day_first: bool,
}

impl ExtractOptions {
    pub fn day_first() -> Self {
        ExtractOptions { day_first: true }
    }
}

/// Load extraction options from a JSON file.
pub fn load_options(path: &Path) -> Result<ExtractOptions, QaError> {
    let content = std::fs::read_to_string(path).map_err(|e| QaError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| QaError::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
