//! Error type shared by the library modules.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid quality rating {0}: expected 1 (Again) to 4 (Easy)")]
    InvalidQuality(i64),

    #[error("Invalid quality rating '{0}': expected 1-4 or again, hard, good, easy")]
    InvalidQualityLabel(String),

    #[error("Invalid difficulty '{0}': expected easy, medium or hard")]
    InvalidDifficulty(String),

    #[error("Flashcard {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Flashcard not found: {0}")]
    CardNotFound(i64),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, Error>;
