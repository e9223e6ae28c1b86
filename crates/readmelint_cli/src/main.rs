//! readmelint CLI
//!
//! Parses and validates WordPress plugin readme files.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use readmelint_core::{ParserOptions, Validator};

mod output;

/// readmelint - WordPress plugin readme parser and validator
#[derive(Parser)]
#[command(name = "readmelint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a readme file, or the readme contents themselves
    readme: String,

    /// Output format (default, github-actions, json)
    #[arg(short, long, default_value = "default")]
    format: String,

    /// Treat every warning and note as an error
    #[arg(long)]
    strict: bool,

    /// Stable WordPress branch used in version hints (e.g. 6.4)
    #[arg(long, value_name = "VERSION")]
    stable_branch: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let (content, filename) = read_input(&cli.readme)?;

    if content.is_empty() {
        return Err(miette::miette!("Incorrect readme provided"));
    }

    let validator = Validator::with_options(ParserOptions {
        stable_branch: cli.stable_branch.clone(),
    });

    let mut result = validator.validate_bytes(&content);
    debug!(diagnostics = result.len(), "validation finished");

    if cli.strict {
        result = result.into_strict();
    }

    output::output_result(&result, &cli.format, &filename)
}

/// Reads the positional argument as a file when it names one, otherwise
/// treats it as literal readme contents.
fn read_input(arg: &str) -> Result<(Vec<u8>, String)> {
    let path = PathBuf::from(arg);
    if path.is_file() {
        debug!("reading readme from {}", path.display());
        let bytes = std::fs::read(&path).into_diagnostic()?;
        Ok((bytes, path.display().to_string()))
    } else {
        Ok((arg.as_bytes().to_vec(), "readme.txt".to_string()))
    }
}
