pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};
pub use models::{Difficulty, Flashcard, NewFlashcard, Quality, ReviewSession, ReviewState};
