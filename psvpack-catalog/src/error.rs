/// Errors that can occur while refreshing or loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No source URL is configured for the requested list.
    #[error("Configuration unavailable: {0}")]
    ConfigUnavailable(String),

    /// The catalog could not be downloaded and no local copy exists.
    #[error("Catalog unreachable: {0}")]
    Unreachable(String),

    /// The local catalog file could not be read or decoded.
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl CatalogError {
    pub fn config_unavailable(msg: impl Into<String>) -> Self {
        Self::ConfigUnavailable(msg.into())
    }

    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseFailed(msg.into())
    }

    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}
