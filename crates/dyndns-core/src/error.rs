//! Error types for the dyndns system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

use crate::address::Family;

/// Result type alias for dyndns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the dyndns system
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (fatal at construction)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A string failed the textual grammar of its address family
    #[error("'{value}' is not a valid {family} address")]
    InvalidAddress {
        /// Address family the value was validated against
        family: Family,
        /// The offending (trimmed) input
        value: String,
    },

    /// A resolver could not produce a usable result; isolated per resolver,
    /// never fatal to the chain
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// The remote DNS authority embedded a non-empty error list in a response
    #[error("Remote API error: {0}")]
    RemoteApi(String),

    /// An updater failed for this cycle; the next scheduled cycle is the retry
    #[error("Update error: {0}")]
    Update(String),

    /// Transport-level HTTP failure without a parseable response
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an address validation error
    pub fn invalid_address(family: Family, value: impl Into<String>) -> Self {
        Self::InvalidAddress {
            family,
            value: value.into(),
        }
    }

    /// Create a resolution error
    pub fn resolution(msg: impl Into<String>) -> Self {
        Self::Resolution(msg.into())
    }

    /// Create a remote API error from the authority's `code: message` pairs
    pub fn remote_api(msg: impl Into<String>) -> Self {
        Self::RemoteApi(msg.into())
    }

    /// Create an update error
    pub fn update(msg: impl Into<String>) -> Self {
        Self::Update(msg.into())
    }

    /// Create an HTTP transport error
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Update(err.to_string())
    }
}
