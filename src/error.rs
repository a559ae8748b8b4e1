use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShrinkError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Response body is empty")]
    EmptyBody,

    #[error("Malformed shrink response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PathPersistError,
    },

    #[error("Path has no file name: {0}")]
    NoFileName(PathBuf),
}

pub type Result<T> = std::result::Result<T, ShrinkError>;
