//! Spaced-repetition state carried by every flashcard.
use super::sm2::INITIAL_EASE_FACTOR;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
    /// Consecutive passing reviews since the last lapse.
    pub repetitions: u32,
    pub ease_factor: f64,
    /// Days between the last review and the next one.
    pub interval: u32,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub next_review_at: NaiveDate,
}

impl ReviewState {
    /// State of a freshly created card: due immediately, never reviewed.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            repetitions: 0,
            ease_factor: INITIAL_EASE_FACTOR,
            interval: 0,
            last_reviewed_at: None,
            next_review_at: today,
        }
    }

    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.next_review_at <= today
    }

    /// Negative when the card is overdue.
    pub fn days_until_due(&self, today: NaiveDate) -> i64 {
        (self.next_review_at - today).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_card_state() {
        let state = ReviewState::new(day(2024, 1, 15));
        assert_eq!(state.repetitions, 0);
        assert_eq!(state.ease_factor, 2.5);
        assert_eq!(state.interval, 0);
        assert!(state.last_reviewed_at.is_none());
        assert!(state.is_due(day(2024, 1, 15)));
    }

    #[test]
    fn test_due_is_date_only() {
        let state = ReviewState {
            next_review_at: day(2024, 1, 17),
            ..ReviewState::new(day(2024, 1, 15))
        };
        assert!(!state.is_due(day(2024, 1, 16)));
        assert!(state.is_due(day(2024, 1, 17)));
        assert!(state.is_due(day(2024, 1, 20)));
        assert_eq!(state.days_until_due(day(2024, 1, 15)), 2);
        assert_eq!(state.days_until_due(day(2024, 1, 20)), -3);
    }
}
