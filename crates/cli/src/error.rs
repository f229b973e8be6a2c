//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration is invalid or missing required variables.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The serve loop failed on its transport.
    #[error(transparent)]
    Mcp(#[from] mcp::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
