//! GitHub Actions workflow command formatter
//!
//! Emits one annotation per diagnostic so runs inside Actions surface
//! results directly on the checked file.

use readmelint_core::ValidationResult;

pub fn output_annotations(result: &ValidationResult, filename: &str) {
    for message in &result.errors {
        println!("::error file={filename}::{message}");
    }
    for message in &result.warnings {
        println!("::warning file={filename}::{message}");
    }
    for message in &result.notes {
        println!("::notice file={filename}::{message}");
    }
}
