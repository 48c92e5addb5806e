//! Error types for restpad

use thiserror::Error;

/// Main error type for restpad
///
/// The engine itself only ever fails through [`RestpadError::Parse`] (a curl
/// command that cannot be imported); everything else degrades to a
/// best-effort value. The remaining variants belong to the collaborator
/// implementations (transport, workspace store).
#[derive(Error, Debug)]
pub enum RestpadError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RestpadError>;
