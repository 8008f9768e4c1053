pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod install;
pub(crate) mod search;

use std::path::Path;

use psvpack_lib::{Config, load_or_init};

use crate::error::CliError;

/// Load the settings file, creating it with defaults on first run.
pub(crate) fn load_config(path: &Path) -> Result<Config, CliError> {
    let loaded = load_or_init(path)?;
    if !loaded.created && loaded.config.configured_lists().is_empty() {
        log::warn!(
            "No catalog URLs are set in {}; edit catalog_urls before searching",
            loaded.path.display()
        );
    }
    Ok(loaded.config)
}
