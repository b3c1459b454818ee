//! CLI-level errors (wraps manifest, config and I/O errors)

use std::path::PathBuf;

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;
use crate::manifest::ManifestError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Manifest(#[from] ManifestError),

    #[error("{0}")]
    Config(#[from] SettingsError),

    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Write { .. } => crate::exitcode::CANTCREAT,
            CliError::Manifest(e) => match e {
                ManifestError::Read { .. } => crate::exitcode::NOINPUT,
                ManifestError::Parse(_) => crate::exitcode::DATAERR,
                ManifestError::Domain(DomainError::InvalidArgument { .. }) => {
                    crate::exitcode::DATAERR
                }
                ManifestError::Domain(_) => crate::exitcode::SOFTWARE,
            },
        }
    }
}
