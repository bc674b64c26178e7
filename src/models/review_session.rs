//! Batch review session over a study plan's cards.
//! Each queued card is shown once and graded once, in queue order.

use super::due::session_queue;
use super::sm2::schedule_review;
use super::{Flashcard, Quality};
use chrono::{DateTime, NaiveDate, Utc};

/// Ratings collected so far in a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub reviewed: usize,
    pub passed: usize,
    pub lapsed: usize,
}

pub struct ReviewSession {
    queue: Vec<Flashcard>,
    current_index: usize,
    show_answer: bool,
    summary: SessionSummary,
}

impl ReviewSession {
    /// Queues today's due cards, or the first `fallback_size` cards when none are due.
    pub fn start(cards: &[Flashcard], today: NaiveDate, fallback_size: usize) -> Self {
        let queue = session_queue(cards, today, fallback_size)
            .into_iter()
            .cloned()
            .collect();

        Self {
            queue,
            current_index: 0,
            show_answer: false,
            summary: SessionSummary::default(),
        }
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.queue.get(self.current_index)
    }

    pub fn reveal_answer(&mut self) {
        self.show_answer = true;
    }

    pub fn answer_shown(&self) -> bool {
        self.show_answer
    }

    /// Schedules the current card, moves to the next one and returns the
    /// updated card so the caller can persist it. `None` once the queue is done.
    pub fn grade_current(&mut self, quality: Quality, now: DateTime<Utc>) -> Option<Flashcard> {
        let card = self.queue.get_mut(self.current_index)?;
        card.review = schedule_review(&card.review, quality, now);
        let updated = card.clone();

        self.summary.reviewed += 1;
        if quality.is_passing() {
            self.summary.passed += 1;
        } else {
            self.summary.lapsed += 1;
        }

        self.current_index += 1;
        self.show_answer = false;
        Some(updated)
    }

    pub fn total_count(&self) -> usize {
        self.queue.len()
    }

    pub fn reviewed_count(&self) -> usize {
        self.current_index
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.reviewed_count()
    }

    pub fn progress_percent(&self) -> f64 {
        if self.queue.is_empty() {
            return 100.0;
        }
        self.reviewed_count() as f64 / self.total_count() as f64 * 100.0
    }

    pub fn is_completed(&self) -> bool {
        self.current_index >= self.queue.len()
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    pub fn progress_message(&self) -> String {
        format!(
            "Card {} of {} ({:.0}% done)",
            (self.reviewed_count() + 1).min(self.total_count()),
            self.total_count(),
            self.progress_percent()
        )
    }
}
