//! SM-2 (SuperMemo 2) style review scheduler.
//!
//! Ratings run from 1 (Again) to 4 (Easy):
//! - Ratings 1-2 are a lapse: the streak resets and the card comes back tomorrow
//! - Ratings 3-4 grow the interval: 1 day, then 6 days, then interval × ease factor
//! - The ease factor is adjusted after every review, lapses included, and never
//!   drops below 1.3
//!
//! Scheduling is a pure transform over [`ReviewState`]; persisting the result
//! is up to the caller.

use super::{Quality, ReviewState};
use chrono::{DateTime, Days, NaiveDate, Utc};

pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Applies one review to `state` and returns the updated scheduling fields.
///
/// `now` is the moment of review; its UTC calendar date is the base for the
/// next due date, not the card's previous due date.
pub fn schedule_review(state: &ReviewState, quality: Quality, now: DateTime<Utc>) -> ReviewState {
    let (interval, repetitions) = if quality.is_passing() {
        let interval = match state.repetitions {
            0 => 1,
            1 => 6,
            // Uses the ease factor from before this review.
            _ => (f64::from(state.interval) * state.ease_factor).round() as u32,
        };
        (interval, state.repetitions + 1)
    } else {
        (1, 0)
    };

    ReviewState {
        repetitions,
        ease_factor: ease_adjustment(state.ease_factor, quality),
        interval,
        last_reviewed_at: Some(now),
        next_review_at: add_days(now.date_naive(), interval),
    }
}

/// EF' = max(1.3, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))
pub fn ease_adjustment(ease_factor: f64, quality: Quality) -> f64 {
    let distance = 5.0 - f64::from(quality.value());
    let next = ease_factor + (0.1 - distance * (0.08 + distance * 0.02));
    next.max(MIN_EASE_FACTOR)
}

/// Interval each rating would produce, indexed Again, Hard, Good, Easy.
pub fn preview_intervals(state: &ReviewState) -> [u32; 4] {
    let now = Utc::now();
    Quality::ALL.map(|quality| schedule_review(state, quality, now).interval)
}

/// Formats an interval in days as a short label for rating buttons.
pub fn format_interval(days: u32) -> String {
    match days {
        0 => "now".to_string(),
        1..=6 => format!("{}d", days),
        7..=29 => format!("{}w", days / 7),
        30..=364 => format!("{}mo", days / 30),
        _ => format!("{}y", days / 365),
    }
}

/// Latest due date handed out. Later dates gain a sign and a fifth year digit
/// when written as text, which breaks date ordering in storage.
pub fn latest_due_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 12, 31).unwrap_or(NaiveDate::MAX)
}

fn add_days(day: NaiveDate, days: u32) -> NaiveDate {
    let latest = latest_due_date();
    day.checked_add_days(Days::new(u64::from(days)))
        .map_or(latest, |due| due.min(latest))
}
