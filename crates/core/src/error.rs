//! Error types for cf-dashboard-core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("Failed to fetch contests: {0}")]
    FetchFailed(String),

    #[error("Contest not found: {0}")]
    NotFound(String),

    #[error("Page size must be positive")]
    InvalidPageSize,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Message shown by the detail view when it falls back to the placeholder contest.
    pub fn detail_message(&self) -> String {
        match self {
            Error::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            Error::FetchFailed(_) => "Failed to fetch contest details".to_string(),
            Error::NotFound(_) => "Contest not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::FetchFailed(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
