use thiserror::Error;

use invitation_config::ConfigError;
use invitation_core::CatalogError;
use invitation_storage_json::StorageError;

/// Top-level error for the studio binary and its helpers.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("Line editor error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
    #[error("Invalid template: {0}")]
    Template(String),
}
