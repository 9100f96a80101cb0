use thiserror::Error;

/// Why a job file couldn't be loaded. The current catalog is kept.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read job file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse job file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of jobs, found {0}")]
    NotAnArray(&'static str),
}

pub type Result<T> = std::result::Result<T, LoadError>;
