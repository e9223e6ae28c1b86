//! Output formatting module

mod github;
mod json;
mod text;

use miette::Result;
use readmelint_core::ValidationResult;

pub fn output_result(result: &ValidationResult, format: &str, filename: &str) -> Result<bool> {
    match format {
        "github-actions" => github::output_annotations(result, filename),
        "json" => json::output_json(result)?,
        _ => text::output_text(result),
    }

    Ok(result.has_errors())
}
