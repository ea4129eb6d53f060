//! # Error Types
//!
//! Defines the error types shared across the validator workspace. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Load errors always name the offending path.
//! - Schema-level verdicts (meta-schema violations, compilation failures)
//!   are *not* errors: they are data inside a validation result. Only
//!   failures that prevent a result from being produced at all live here.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for configuration-level failures.
#[derive(Error, Debug)]
pub enum JsvError {
    /// A JSON document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The batch manifest is structurally unusable.
    #[error("invalid manifest {}: {reason}", path.display())]
    Manifest {
        /// Path to the manifest file.
        path: PathBuf,
        /// Reason the manifest was rejected.
        reason: String,
    },

    /// A report could not be written to its sink.
    #[error("failed to write {}: {cause}", path.display())]
    Output {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        cause: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure to read or parse a JSON document from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to load {}: {cause}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        cause: std::io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("failed to load {}: {cause}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying parse failure, including line and column.
        cause: serde_json::Error,
    },
}

impl LoadError {
    /// The path that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}
