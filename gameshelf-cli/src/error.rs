use thiserror::Error;

use gameshelf_core::{CatalogError, ValidationError};
use gameshelf_store::StoreError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A field was rejected by the catalog rules
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    /// Loading or saving the data file failed
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The named game, DLC, user, or library entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The key is already taken
    #[error("Already exists: {0}")]
    Duplicate(String),

    #[error("Config error: {0}")]
    Config(String),

    /// Standard input ended while the shell was waiting for a reply
    #[error("input closed")]
    InputClosed,
}

impl CliError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
