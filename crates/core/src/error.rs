//! Error types for directory fetches and configuration loading.

use thiserror::Error;

/// Message shown in the panel for every failed search, whatever the cause.
pub const GENERIC_SEARCH_ERROR: &str = "Something went wrong while fetching the user";

/// Why a directory request failed. The panel never shows these details; they
/// are logged for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("invalid directory url: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// The text the user sees for this failure.
    pub fn user_message(&self) -> &'static str {
        GENERIC_SEARCH_ERROR
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status { status: status.as_u16(), message: e.to_string() }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Problems reading or validating `.usersearch.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {message}")]
    Parse { path: String, message: String },
    #[error("invalid value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}
