//! Unified error types for the stackpilot workspace.
//!
//! Missing or undecodable input files are fatal to an invocation. Child
//! process failures are carried by [`StackpilotError::ChildProcess`] so the
//! forwarder can report them and carry on.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum StackpilotError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required file or directory was not found.
    #[error("{kind} not found: {}", path.display())]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Path of the missing resource.
        path: PathBuf,
    },

    /// An environment file could not be decoded as `KEY=VALUE` lines.
    #[error("invalid environment file {}:{line}: {message}", path.display())]
    EnvParse {
        /// Environment file being decoded.
        path: PathBuf,
        /// 1-based line number of the offending line (0 when not line-specific).
        line: usize,
        /// Description of the decoding failure.
        message: String,
    },

    /// A compose file does not have the expected structure.
    #[error("malformed compose file {}: {message}", path.display())]
    MalformedDocument {
        /// Compose file being decoded.
        path: PathBuf,
        /// Description of the structural problem.
        message: String,
    },

    /// The orchestration binary failed to spawn or exited unsuccessfully.
    #[error("command `{command}` failed: {message}")]
    ChildProcess {
        /// Rendered command line.
        command: String,
        /// Description of the failure.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

impl StackpilotError {
    /// Maps an I/O error on `path` to [`StackpilotError::NotFound`] when the
    /// file is missing, and to [`StackpilotError::Io`] otherwise.
    #[must_use]
    pub fn from_io(kind: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { kind, path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, StackpilotError>;
