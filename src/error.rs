//! Error types for the planner.

use thiserror::Error;

/// Planner error type.
#[derive(Error, Debug)]
pub enum SyclopError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Decomposition error: {0}")]
    Decomposition(String),
}

impl From<toml::de::Error> for SyclopError {
    fn from(e: toml::de::Error) -> Self {
        SyclopError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyclopError>;
