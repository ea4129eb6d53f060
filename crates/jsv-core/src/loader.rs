//! # JSON Document Loader
//!
//! Reads a file and parses it as JSON. Used for schema documents and
//! batch manifests alike; callers decide whether a [`LoadError`] is a
//! per-item verdict or a run-aborting configuration failure.

use std::path::Path;

use serde_json::Value;

use crate::error::LoadError;

/// Read `path` and parse its contents as a JSON value.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read and
/// [`LoadError::Parse`] if its contents are not valid JSON.
pub fn load_json(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|cause| LoadError::Io {
        path: path.to_path_buf(),
        cause,
    })?;
    tracing::trace!(path = %path.display(), bytes = content.len(), "read JSON document");
    parse_json(path, &content)
}

/// Parse already-read `content` as JSON, attributing failures to `path`.
pub fn parse_json(path: impl AsRef<Path>, content: &str) -> Result<Value, LoadError> {
    serde_json::from_str(content).map_err(|cause| LoadError::Parse {
        path: path.as_ref().to_path_buf(),
        cause,
    })
}
