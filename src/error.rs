use std::path::PathBuf;

/// Errors raised at the edges of the crate (files and JSON).
///
/// Link generation itself never fails; unknown pages and missing anchors
/// produce empty results instead.
#[derive(Debug, thiserror::Error)]
pub enum LinkerError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LinkerError>;
