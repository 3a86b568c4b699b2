//! CLI command-name contract for logging.

use crate::cli::parse::Commands;

/// Command name string for log fields (e.g. "create", "list").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Create { .. } => "create",
        Commands::Move { .. } => "move",
        Commands::Delete { .. } => "delete",
        Commands::List { .. } => "list",
        Commands::Run { .. } => "run",
    }
}
