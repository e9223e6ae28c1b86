//! Text output formatter

use readmelint_core::ValidationResult;

pub fn output_text(result: &ValidationResult) {
    for message in &result.errors {
        println!("Error: {message}");
    }
    for message in &result.warnings {
        println!("Warning: {message}");
    }
    for message in &result.notes {
        println!("Note: {message}");
    }

    if result.has_errors() {
        println!("Error: Readme validated with errors.");
    } else {
        println!("Success: Readme successfully validated.");
    }
}
