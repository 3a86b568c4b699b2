//! CLI domain: parse, route, help and output only.
//! No tree logic; the route table dispatches to the directory service.

mod help;
mod output;
mod parse;
mod route;

pub use help::command_name;
pub use output::{exit_code, map_error};
pub use parse::{Cli, Commands, ListFormat};
pub use route::RunContext;
