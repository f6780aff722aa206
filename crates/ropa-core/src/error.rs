//! Error types for the ROPA transform.

use std::path::PathBuf;

/// Fatal failures of one pipeline run.
///
/// Absent extraction fields are never errors; they default inside the
/// source accessors instead.
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    /// A required input document does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Reading or writing a document failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON.
    #[error("failed to parse JSON {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A document is valid JSON but does not fit the expected shape.
    #[error("failed to decode {what} from {}: {source}", path.display())]
    Decode {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A template path the transform writes through is missing.
    #[error("template is missing `{0}`")]
    MissingPath(&'static str),

    /// A touched template path holds the wrong shape.
    #[error("template `{path}` is malformed: {source}")]
    MalformedTemplate {
        path: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
