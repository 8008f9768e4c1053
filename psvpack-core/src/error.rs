use thiserror::Error;

/// Errors raised while interpreting catalog identifiers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// The region code is not one of US, EU, JP, ASIA
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// The list name is not one of the known catalogs
    #[error("Unknown game list: {0}")]
    UnknownList(String),
}

impl CoreError {
    pub fn unknown_region(msg: impl Into<String>) -> Self {
        Self::UnknownRegion(msg.into())
    }

    pub fn unknown_list(msg: impl Into<String>) -> Self {
        Self::UnknownList(msg.into())
    }
}
