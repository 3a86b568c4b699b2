//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::CliError;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &CliError) -> String {
    match e {
        CliError::Rejected { message, .. } => message.clone(),
        other => format!("Error: {}", other),
    }
}

/// Process exit status: 1 for a rejected request, 2 for anything else.
pub fn exit_code(e: &CliError) -> i32 {
    match e {
        CliError::Rejected { .. } => 1,
        _ => 2,
    }
}
