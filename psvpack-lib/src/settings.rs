//! User configuration (`~/.config/psvpack/config.toml`).
//!
//! The settings file is created with defaults on first run. Catalog URLs are
//! not shipped with the tool, so a freshly generated file must be edited
//! before `search`/`install` can do anything.
//!
//! A [`Config`] is an owned snapshot: front ends load it once and pass it
//! into each service call.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use psvpack_catalog::CatalogSource;
use psvpack_core::ListId;

use crate::error::SettingsError;

const DEFAULT_TTL: u64 = 86400;
const DEFAULT_PKG2ZIP: &str = "/usr/local/bin/pkg2zip";

const CONFIG_HEADER: &str = "\
# psvpack - user configuration file
#
# To revert back to defaults, delete this file; it is recreated the next
# time psvpack runs.
#
# Required:
# * pkg2zip       - path to the pkg2zip binary (try `which pkg2zip`)
# * catalog_urls  - TSV catalog URLs (obtained independently)
#
# Optional:
# * install_root  - where packages are extracted; point this at a mounted
#                   Vita or SD card to install directly. Defaults to the
#                   current directory.
# * cache_dir     - where catalogs (cache_dir/tsv) and packages
#                   (cache_dir/pkg) are stored
# * cache_ttl     - max age in seconds of a cached catalog before refresh
#
";

/// Resolved user configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cache_dir: PathBuf,
    /// Catalog freshness window in seconds.
    pub cache_ttl: u64,
    /// Path to the pkg2zip binary.
    pub pkg2zip: PathBuf,
    pub install_root: PathBuf,
    /// Catalog URL per list (`PSV`, `PSV_DLC`, ...). Kept last so it
    /// serializes as a trailing table.
    pub catalog_urls: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .map(|d| d.join("psvpack"))
            .unwrap_or_else(|| PathBuf::from(".psvpack-cache"));
        Self {
            cache_dir,
            cache_ttl: DEFAULT_TTL,
            pkg2zip: PathBuf::from(DEFAULT_PKG2ZIP),
            install_root: PathBuf::from("./"),
            catalog_urls: ListId::ALL
                .iter()
                .map(|l| (l.code().to_string(), String::new()))
                .collect(),
        }
    }
}

impl Config {
    /// Configured URL for a list, if any (keys are matched case-insensitively).
    pub fn catalog_url(&self, list: ListId) -> Option<&str> {
        self.catalog_urls
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(list.code()))
            .map(|(_, v)| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Lists that have a URL configured.
    pub fn configured_lists(&self) -> Vec<ListId> {
        ListId::ALL
            .into_iter()
            .filter(|l| self.catalog_url(*l).is_some())
            .collect()
    }

    /// Copy of this config with `~` expanded in every path.
    pub fn expanded(&self) -> Self {
        Self {
            cache_dir: expand_tilde(&self.cache_dir),
            pkg2zip: expand_tilde(&self.pkg2zip),
            install_root: expand_tilde(&self.install_root),
            ..self.clone()
        }
    }

    /// Catalog location and freshness window for a list. An unconfigured
    /// list yields an empty URL, which the store rejects.
    pub fn catalog_source(&self, list: ListId) -> CatalogSource {
        CatalogSource::new(
            list,
            self.catalog_url(list).unwrap_or_default(),
            self.cache_dir.clone(),
            self.cache_ttl,
        )
    }

    /// Directory holding downloaded packages.
    pub fn pkg_dir(&self) -> PathBuf {
        pkg_dir(&self.cache_dir)
    }

    /// Directory holding cached catalogs.
    pub fn tsv_dir(&self) -> PathBuf {
        psvpack_catalog::tsv_dir(&self.cache_dir)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(contents).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Render this config as a commented settings file.
    pub fn to_file_contents(&self) -> Result<String, SettingsError> {
        let body =
            toml::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))?;
        Ok(format!("{CONFIG_HEADER}\n{body}"))
    }

    /// Write this config to `path` atomically (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        let contents = self.to_file_contents()?;
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, contents).map_err(|e| SettingsError::io(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| SettingsError::io(path, e))?;
        Ok(())
    }
}

/// Directory holding downloaded packages below `cache_dir`.
pub fn pkg_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("pkg")
}

/// Canonical settings path: `<config_dir>/psvpack/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("psvpack").join("config.toml")
}

/// Resolve the settings path: CLI override first, then the default location.
pub fn resolve_config_path(cli_override: Option<PathBuf>) -> PathBuf {
    cli_override
        .map(|p| expand_tilde(&p))
        .unwrap_or_else(config_path)
}

/// Result of [`load_or_init`].
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    /// True when the file did not exist and defaults were just written.
    pub created: bool,
}

/// Load the settings file, writing defaults first if it doesn't exist.
///
/// The returned config has `~` expanded in its paths.
pub fn load_or_init(path: &Path) -> Result<LoadedConfig, SettingsError> {
    if !path.exists() {
        let config = Config::default();
        config.save(path)?;
        log::warn!("Wrote default config to: {}", path.display());
        log::warn!("Edit it to set catalog_urls and pkg2zip before continuing.");
        return Ok(LoadedConfig {
            config: config.expanded(),
            path: path.to_path_buf(),
            created: true,
        });
    }

    let contents = fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
    let config = Config::from_toml(&contents, path)?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(LoadedConfig {
        config: config.expanded(),
        path: path.to_path_buf(),
        created: false,
    })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
