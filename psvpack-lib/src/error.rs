use std::path::PathBuf;

use thiserror::Error;

use psvpack_catalog::CatalogError;

/// Errors from loading or writing the settings file.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Could not serialize settings: {0}")]
    Serialize(String),
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors that can occur while resolving and installing packages.
#[derive(Debug, Error)]
pub enum InstallError {
    /// Settings could not be loaded, or a required setting is absent.
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// Catalog refresh or parse failure.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No {list} match found for {identifier}")]
    RecordNotFound { list: String, identifier: String },

    /// More than one record matched and batch mode was not requested.
    #[error("{count} records match {identifier}; use a content id or fetch all related items")]
    AmbiguousMatch { identifier: String, count: usize },

    #[error("{content_id} has no license key (zRIF)")]
    MissingLicenseKey { content_id: String },

    #[error("{content_id} has no package download link")]
    MissingPackageUrl { content_id: String },

    #[error("Download of {url} failed: {reason}")]
    DownloadFailed { url: String, reason: String },

    /// A cached package did not hash to the catalog checksum. Never
    /// terminal: the package is downloaded again.
    #[error("Checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Extraction failed{}: {detail}", exit_code_suffix(.code))]
    ExtractionFailed { code: Option<i32>, detail: String },

    /// The extractor reported success but its output is not where it
    /// should be.
    #[error("Extraction reported success but {expected} is missing")]
    ExtractionVerificationFailed { expected: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_code_suffix(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" (exit code {c})"),
        None => String::new(),
    }
}

impl From<SettingsError> for InstallError {
    fn from(e: SettingsError) -> Self {
        Self::ConfigUnavailable(e.to_string())
    }
}

impl InstallError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigUnavailable(msg.into())
    }

    pub fn download(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DownloadFailed {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn extraction(code: Option<i32>, detail: impl Into<String>) -> Self {
        Self::ExtractionFailed {
            code,
            detail: detail.into(),
        }
    }
}
