//! Error handling utilities
//!
//! This module provides centralized error handling for the application.

use crate::cli::Cli;
use crate::error::{ErrorCode, PrimesumError};
use clap::error::ErrorKind;
use clap::CommandFactory;
use std::num::{IntErrorKind, ParseIntError};
use tracing::debug;

/// Handle fatal errors and exit with appropriate status code
///
/// - For `PrimesumError`: shows the user message always, the developer
///   message in verbose mode, and the usage line for bad arguments
/// - For other errors: shows the error message and exits with 1
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    debug!("Fatal error: {}", error);

    let exit_code = if let Some(err) = error.downcast_ref::<PrimesumError>() {
        eprintln!("{}", err.user_message());

        if err.is_usage_error() {
            eprintln!("{}", usage());
        }

        // Show developer message with full context chain in verbose mode
        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", err.developer_message());
        }

        err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }

        1
    };

    std::process::exit(exit_code)
}

/// Report a command-line parse failure and exit
///
/// Help and version requests exit 0. Every other parse failure (missing or
/// extra arguments, non-numeric or out-of-range values) prints clap's message
/// followed by the usage line and exits with the mapped argument error code.
pub fn handle_parse_error(err: clap::Error) -> ! {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let failure = parse_failure(&err);
            let _ = err.print();
            // value errors render without a usage line
            if !err.render().to_string().contains("Usage:") {
                eprintln!("\n{}", usage());
            }
            std::process::exit(failure.exit_code())
        }
    }
}

/// Classify a clap parse failure as an invalid-argument error
pub fn parse_failure(err: &clap::Error) -> PrimesumError {
    let code = match err.kind() {
        ErrorKind::MissingRequiredArgument
        | ErrorKind::UnknownArgument
        | ErrorKind::TooManyValues
        | ErrorKind::TooFewValues
        | ErrorKind::WrongNumberOfValues => ErrorCode::ARG_WRONG_COUNT,
        ErrorKind::ValueValidation => match int_error_kind(err) {
            Some(IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                ErrorCode::ARG_OUT_OF_RANGE
            }
            _ => ErrorCode::ARG_NOT_NUMERIC,
        },
        _ => ErrorCode::ARG_GENERIC,
    };

    let rendered = err.render().to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .to_string();

    PrimesumError::invalid_argument_with_code(code, message, None)
}

fn int_error_kind(err: &clap::Error) -> Option<IntErrorKind> {
    std::error::Error::source(err)
        .and_then(|source| source.downcast_ref::<ParseIntError>())
        .map(|e| e.kind().clone())
}

fn usage() -> String {
    Cli::command().render_usage().to_string()
}
