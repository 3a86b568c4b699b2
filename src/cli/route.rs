//! CLI route: single dispatch table from parsed commands to the directory service.

use crate::cli::help::command_name;
use crate::cli::parse::{Commands, ListFormat};
use crate::config::{ConfigLoader, DirTreeConfig, StorageBackend};
use crate::error::{CliError, StorageError};
use crate::script;
use crate::service::{messages, DirectoryTreeService, ServiceResponse};
use crate::store::{MemoryNodeStore, NodeStore, SledNodeStore};
use crate::types::ROOT_SENTINEL;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution. Owns the opened store and the facade.
pub struct RunContext {
    service: DirectoryTreeService,
    sled: Option<Arc<SledNodeStore>>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, CliError> {
        let config = ConfigLoader::load_for(&workspace_root, config_path.as_deref())?;
        Self::from_config(workspace_root, config)
    }

    /// Open the store the configuration names.
    pub fn from_config(workspace_root: PathBuf, config: DirTreeConfig) -> Result<Self, CliError> {
        let config = config.ensure_valid()?;

        let (store, sled): (Arc<dyn NodeStore>, _) = match config.storage.backend_kind()? {
            StorageBackend::Memory => {
                (Arc::new(MemoryNodeStore::new()) as Arc<dyn NodeStore>, None)
            }
            StorageBackend::Sled => {
                let store_path = config.storage.resolve_path(&workspace_root);
                std::fs::create_dir_all(&store_path).map_err(StorageError::IoError)?;
                let store = Arc::new(SledNodeStore::new(&store_path)?);
                debug!(store_path = %store_path.display(), "Opened sled store");
                (store.clone() as Arc<dyn NodeStore>, Some(store))
            }
        };

        Ok(Self {
            service: DirectoryTreeService::new(store),
            sled,
        })
    }

    pub fn service(&self) -> &DirectoryTreeService {
        &self.service
    }

    /// Execute a command and return what to print on success.
    pub fn execute(&self, command: &Commands) -> Result<String, CliError> {
        info!(command = command_name(command), "Executing command");
        let result = self.execute_inner(command);
        if let Some(store) = &self.sled {
            store.flush()?;
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, CliError> {
        match command {
            Commands::Create { path } => {
                accepted(self.service.create_directory(path))?;
                Ok(messages::created(path))
            }
            Commands::Move { source, target } => {
                let target = target.as_deref().unwrap_or(ROOT_SENTINEL);
                accepted(self.service.move_directory(source, target))?;
                Ok(messages::moved(source, target).trim_end().to_string())
            }
            Commands::Delete { path } => {
                accepted(self.service.delete_directory(path))?;
                Ok(messages::deleted(path))
            }
            Commands::List { format } => match format {
                ListFormat::Text => {
                    let rendered = accepted(self.service.list_directories())?;
                    Ok(rendered.trim_end_matches('\n').to_string())
                }
                ListFormat::Json => {
                    let tree = accepted(self.service.directory_tree())?;
                    Ok(serde_json::to_string_pretty(&tree)?)
                }
            },
            Commands::Run { file } => {
                let input = read_script(file.as_deref())?;
                let transcript = script::run_script(&self.service, &input)?;
                Ok(transcript.trim_end_matches('\n').to_string())
            }
        }
    }
}

/// Unwrap a successful response, or turn a refusal into `CliError::Rejected`.
fn accepted<T>(response: ServiceResponse<T>) -> Result<T, CliError> {
    let status = response.status_code();
    match response {
        ServiceResponse::Success(value) => Ok(value),
        ServiceResponse::Conflict(message)
        | ServiceResponse::NotFound(message)
        | ServiceResponse::BadInput(message)
        | ServiceResponse::Internal(message) => Err(CliError::Rejected { status, message }),
    }
}

fn read_script(file: Option<&Path>) -> Result<String, CliError> {
    match file {
        Some(path) => std::fs::read_to_string(path).map_err(|error| CliError::Input {
            path: path.to_path_buf(),
            error,
        }),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .map_err(|error| CliError::Input {
                    path: PathBuf::from("<stdin>"),
                    error,
                })?;
            Ok(input)
        }
    }
}
