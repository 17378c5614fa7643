//! Error types for build orchestration.
//!
//! Provides path-aware filesystem errors, external tool failures, and the
//! [`Context`]/[`ErrorExt`] helpers used by the platform drivers.
//!
//! # Example
//!
//! ```no_run
//! use pybuild_packager::builder::{ErrorExt, Result};
//! use std::path::Path;
//!
//! fn create_work_dir(path: &Path) -> Result<()> {
//!     std::fs::create_dir_all(path).fs_context("creating work directory", path)?;
//!     Ok(())
//! }
//! ```

use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the build orchestrator.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "creating directory")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// The source directory handed to the orchestrator does not exist.
    #[error("source directory {} does not exist", .0.display())]
    SourceNotFound(PathBuf),

    /// The source path has no final component to name the build after.
    #[error("cannot derive a build name from {}", .0.display())]
    UnnamedSource(PathBuf),

    /// An external tool could not be resolved on `PATH`.
    #[error("{tool} not found on PATH: {reason}")]
    ToolNotFound {
        /// Program name that was looked up
        tool: String,
        /// Lookup failure reported by `which`
        reason: String,
    },

    /// An external tool could not be started.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// An external tool ran and exited unsuccessfully.
    #[error("{command} exited with {}", describe_exit(.code))]
    ToolFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Convenient type alias of Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait to add context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying source tree".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

impl Error {
    /// Returns `true` when the error is a non-zero exit of an external tool.
    ///
    /// These are the only failures a [`FailurePolicy`](crate::builder::FailurePolicy)
    /// may tolerate; spawn and filesystem errors always abort.
    pub fn is_tool_failure(&self) -> bool {
        match self {
            Error::ToolFailed { .. } => true,
            Error::Context(_, inner) => inner.is_tool_failure(),
            _ => false,
        }
    }
}
