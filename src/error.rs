//! Errors raised while building an agent from its configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("invalid name: {0}")]
    InvalidName(String),

    #[error("illegal search mode: {0}")]
    InvalidSearchMode(String),

    /// Recognized but not available in this engine.
    #[error("search mode not implemented: {0}")]
    Unimplemented(&'static str),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
