//! Error types

use thiserror::Error;

/// Errors raised while setting up error capture.
///
/// Handlers themselves never fail; only construction paths return these.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The configured page location is not a valid absolute url.
    #[error("Invalid page location '{location}': {source}")]
    InvalidLocation {
        location: String,
        #[source]
        source: url::ParseError,
    },

    /// A configuration value is out of range.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl CaptureError {
    /// Creates a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
