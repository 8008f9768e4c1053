use thiserror::Error;

use psvpack_catalog::CatalogError;
use psvpack_lib::{InstallError, SettingsError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Settings file could not be read or written
    #[error("Config error: {0}")]
    Config(#[from] SettingsError),

    /// Catalog could not be opened, refreshed, or parsed
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Resolution or installation failure
    #[error("{0}")]
    Install(#[from] InstallError),

    /// Some records of a batch failed; details were already reported
    #[error("{failed} of {total} items failed")]
    Partial { failed: usize, total: usize },

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
