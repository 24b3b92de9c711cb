//! CLI-level errors (wraps tree and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::errors::TreeError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tree(#[from] TreeError),

    #[error("config error: {0}")]
    Settings(#[from] SettingsError),

    #[error("cannot render settings: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Tree(e) => match e {
                TreeError::InvalidDepth(_) | TreeError::WouldCycle => crate::exitcode::DATAERR,
                TreeError::Exhausted => crate::exitcode::SOFTWARE,
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Render(_) => crate::exitcode::SOFTWARE,
        }
    }
}
