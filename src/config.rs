//! Runtime configuration for the flashcard tool.
//!
//! Values come from command-line flags or `JEE_FLASHCARDS_*` environment
//! variables; anything left unset falls back to [`Config::default`].

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::PathBuf;

pub const DEFAULT_DATABASE_PATH: &str = "db.sqlite3";
pub const DEFAULT_OWNER: &str = "local";
pub const DEFAULT_STUDY_PLAN: &str = "default";
/// Cards offered when nothing is due yet.
pub const DEFAULT_FALLBACK_BATCH_SIZE: usize = 10;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub owner_id: String,
    pub study_plan_id: String,
    pub fallback_batch_size: usize,
    /// Simulated "today", used to practise ahead without waiting for the calendar.
    pub today_override: Option<NaiveDate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            owner_id: DEFAULT_OWNER.to_string(),
            study_plan_id: DEFAULT_STUDY_PLAN.to_string(),
            fallback_batch_size: DEFAULT_FALLBACK_BATCH_SIZE,
            today_override: None,
        }
    }
}

impl Config {
    /// The calendar date reviews are scheduled against.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        self.today_override.unwrap_or_else(|| now.date_naive())
    }

    /// The review timestamp, moved onto the simulated date when one is set.
    pub fn review_time(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.today_override {
            Some(day) => day.and_time(now.time()).and_utc(),
            None => now,
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(value.to_string()))
}
