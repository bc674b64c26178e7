//! Picking which cards to study today, and grouping cards by due date.
use super::Flashcard;
use chrono::NaiveDate;

/// Cards whose next review date is on or before `today`, in input order.
pub fn due_cards(cards: &[Flashcard], today: NaiveDate) -> Vec<&Flashcard> {
    cards.iter().filter(|card| card.is_due(today)).collect()
}

/// Cards for a study session: everything due, or when nothing is due the
/// first `fallback_size` cards so the session is never empty.
pub fn session_queue(cards: &[Flashcard], today: NaiveDate, fallback_size: usize) -> Vec<&Flashcard> {
    let due = due_cards(cards, today);
    if due.is_empty() {
        cards.iter().take(fallback_size).collect()
    } else {
        due
    }
}

#[derive(Debug, Default)]
pub struct RevisionBuckets<'a> {
    pub overdue: Vec<&'a Flashcard>,
    pub due_today: Vec<&'a Flashcard>,
    pub upcoming: Vec<&'a Flashcard>,
}

pub fn bucket_by_due_date(cards: &[Flashcard], today: NaiveDate) -> RevisionBuckets<'_> {
    let mut buckets = RevisionBuckets::default();
    for card in cards {
        let due = card.review.next_review_at;
        if due < today {
            buckets.overdue.push(card);
        } else if due == today {
            buckets.due_today.push(card);
        } else {
            buckets.upcoming.push(card);
        }
    }
    buckets
}

/// Human readable distance between `date` and `today`, e.g. "In 3 days".
pub fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        n if n > 0 => format!("In {} days", n),
        n => format!("{} days ago", -n),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StudyStats {
    pub total: usize,
    pub due_today: usize,
    pub reviewed_today: usize,
    /// Percentage of cards on a passing streak, rounded; 0 for an empty plan.
    pub success_rate: u32,
}

pub fn study_stats(cards: &[Flashcard], today: NaiveDate) -> StudyStats {
    let on_streak = cards.iter().filter(|card| card.review.repetitions > 0).count();
    let success_rate = if cards.is_empty() {
        0
    } else {
        (on_streak as f64 / cards.len() as f64 * 100.0).round() as u32
    };

    StudyStats {
        total: cards.len(),
        due_today: cards.iter().filter(|card| card.is_due(today)).count(),
        reviewed_today: cards.iter().filter(|card| card.was_reviewed_on(today)).count(),
        success_rate,
    }
}
