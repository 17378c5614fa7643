//! Error types for pybuild_packager operations.
//!
//! This module defines the top-level error type with actionable error
//! messages and recovery suggestions.

use crate::builder;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pybuild_packager operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for all pybuild_packager operations
#[derive(Error, Debug)]
pub enum PackagerError {
    /// Build orchestration errors
    #[error("Build error: {0}")]
    Build(#[from] builder::Error),

    /// Failure while removing the `Builds/` directory
    #[error("An error occurred when cleaning {}: {source}", path.display())]
    Clean {
        /// Directory being removed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: builder::Error,
    },

    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

impl PackagerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            PackagerError::Build(err) => build_suggestions(err),
            PackagerError::Clean { path, .. } => vec![
                format!("Check permissions on {}", path.display()),
                "Make sure no running process holds files open inside Builds/".to_string(),
            ],
            PackagerError::Cli(CliError::MissingArgument { argument }) => vec![format!(
                "Pass {argument}, or use --clean / --extrahelp which do not need it"
            )],
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}

fn build_suggestions(err: &builder::Error) -> Vec<String> {
    match err {
        builder::Error::Context(_, inner) => build_suggestions(inner),
        builder::Error::SourceNotFound(path) => vec![
            format!("Check the path {}", path.display()),
            "Pass the folder containing your code as the first argument".to_string(),
        ],
        builder::Error::UnnamedSource(_) => {
            vec!["Pass a named directory rather than a filesystem root".to_string()]
        }
        builder::Error::ToolFailed { .. } => vec![
            "Inspect the tool output printed above".to_string(),
            "Re-run with --continue-on-error to build the remaining targets".to_string(),
        ],
        builder::Error::CommandFailed { .. } | builder::Error::ToolNotFound { .. } => vec![
            "Install fpm (gem install fpm) and pyinstaller (pip install pyinstaller)".to_string(),
            "Point --fpm / --pyinstaller at the tool if it is not on PATH".to_string(),
        ],
        _ => vec!["Check the error message above for specific details".to_string()],
    }
}
