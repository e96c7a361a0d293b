use qaminer_core::QaError;

use super::FileResult;

pub fn print(results: &[FileResult]) -> Result<(), QaError> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{json}");
    Ok(())
}
