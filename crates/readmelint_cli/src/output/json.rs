//! JSON output formatter

use miette::{IntoDiagnostic, Result};
use readmelint_core::ValidationResult;

pub fn output_json(result: &ValidationResult) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(result).into_diagnostic()?
    );
    Ok(())
}
