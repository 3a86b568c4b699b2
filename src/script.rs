//! Line-oriented command scripts
//!
//! ```text
//! CREATE fruits/apples/fuji
//! MOVE grains foods
//! DELETE foods/grains
//! LIST
//! ```
//!
//! Each command line is echoed, followed by LIST output or the failure message
//! of a command that did not succeed. A failing command does not stop the run.

use crate::service::{DirectoryTreeService, ServiceResponse};
use crate::types::ROOT_SENTINEL;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create { path: String },
    Move { source: String, target: String },
    Delete { path: String },
    List,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Create { path } => write!(f, "CREATE {}", path),
            Command::Move { source, target } if target.is_empty() => write!(f, "MOVE {}", source),
            Command::Move { source, target } => write!(f, "MOVE {} {}", source, target),
            Command::Delete { path } => write!(f, "DELETE {}", path),
            Command::List => write!(f, "LIST"),
        }
    }
}

impl Command {
    /// Parse one line. Returns `Ok(None)` for blank lines and `#` comments.
    pub fn parse(line_no: usize, line: &str) -> Result<Option<Command>, ScriptError> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let mut words = trimmed.split_whitespace();
        let keyword = words.next().unwrap_or_default().to_ascii_uppercase();
        let args: Vec<&str> = words.collect();
        let fail = |message: String| ScriptError::Parse {
            line: line_no,
            message,
        };

        let command = match (keyword.as_str(), args.as_slice()) {
            ("CREATE", [path]) => Command::Create {
                path: path.to_string(),
            },
            ("MOVE", [source]) => Command::Move {
                source: source.to_string(),
                target: ROOT_SENTINEL.to_string(),
            },
            ("MOVE", [source, target]) => Command::Move {
                source: source.to_string(),
                target: target.to_string(),
            },
            ("DELETE", [path]) => Command::Delete {
                path: path.to_string(),
            },
            ("LIST", []) => Command::List,
            ("CREATE" | "DELETE", _) => {
                return Err(fail(format!("{} takes exactly one path", keyword)))
            }
            ("MOVE", _) => return Err(fail("MOVE takes a source and an optional target".into())),
            ("LIST", _) => return Err(fail("LIST takes no arguments".into())),
            (other, _) => return Err(fail(format!("unknown command {:?}", other))),
        };
        Ok(Some(command))
    }

    /// Run against the service. Returns the text to print after the echoed command.
    pub fn execute(&self, service: &DirectoryTreeService) -> Option<String> {
        match self {
            Command::Create { path } => failure_text(service.create_directory(path)),
            Command::Move { source, target } => failure_text(service.move_directory(source, target)),
            Command::Delete { path } => failure_text(service.delete_directory(path)),
            Command::List => match service.list_directories() {
                ServiceResponse::Success(rendered) => Some(rendered),
                failure => failure.message().map(str::to_string),
            },
        }
    }
}

fn failure_text<T>(response: ServiceResponse<T>) -> Option<String> {
    response.message().map(|m| format!("{}\n", m))
}

/// Parse a whole script up front so a typo is reported before anything runs.
pub fn parse_script(input: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (index, line) in input.lines().enumerate() {
        if let Some(command) = Command::parse(index + 1, line)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Parse and execute a script, returning the transcript.
pub fn run_script(service: &DirectoryTreeService, input: &str) -> Result<String, ScriptError> {
    let mut transcript = String::new();
    for command in parse_script(input)? {
        transcript.push_str(&command.to_string());
        transcript.push('\n');
        if let Some(output) = command.execute(service) {
            transcript.push_str(&output);
        }
    }
    Ok(transcript)
}
