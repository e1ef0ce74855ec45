//! Error handling for CampKit
//!
//! Core errors cover configuration validation and misuse of geometry values.
//! The transform engine itself never fails; it clamps instead.

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A configuration value is outside its valid range
    #[error("Invalid config value '{key}': {reason}")]
    InvalidConfig {
        /// The configuration key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A geometry value is not usable (NaN, infinite, negative extent)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl Error {
    /// Creates an `InvalidConfig` error.
    pub fn invalid_config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
