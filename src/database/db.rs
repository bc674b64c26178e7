//! Database operations for the flashcard application
//!
//! Handles SQLite initialization and CRUD for flashcards. Every card row
//! carries its own spaced repetition state and is scoped by owner and study plan.

use crate::error::{Error, Result};
use crate::models::{Difficulty, Flashcard, NewFlashcard, ReviewState};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;

const CARD_COLUMNS: &str = "id, owner_id, study_plan_id, front, back, subject, topic, difficulty,
     repetitions, ease_factor, interval_days, last_reviewed_at, next_review_at, created_at";

impl ToSql for Difficulty {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Difficulty {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
    }
}

/// Opens (creating if needed) the database file and ensures the schema exists
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    info!("Opened flashcard database at {}", path.display());
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_id TEXT NOT NULL,
            study_plan_id TEXT NOT NULL,
            front TEXT NOT NULL,
            back TEXT NOT NULL,
            subject TEXT NOT NULL DEFAULT '',
            topic TEXT NOT NULL DEFAULT '',
            difficulty TEXT NOT NULL DEFAULT 'medium',
            repetitions INTEGER NOT NULL DEFAULT 0,
            ease_factor REAL NOT NULL DEFAULT 2.5,
            interval_days INTEGER NOT NULL DEFAULT 0,
            last_reviewed_at TEXT,
            next_review_at TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        (),
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_flashcards_owner_plan
         ON flashcards (owner_id, study_plan_id)",
        (),
    )?;

    Ok(())
}

fn row_to_flashcard(row: &Row<'_>) -> rusqlite::Result<Flashcard> {
    Ok(Flashcard {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        study_plan_id: row.get(2)?,
        front: row.get(3)?,
        back: row.get(4)?,
        subject: row.get(5)?,
        topic: row.get(6)?,
        difficulty: row.get(7)?,
        review: ReviewState {
            repetitions: row.get(8)?,
            ease_factor: row.get(9)?,
            interval: row.get(10)?,
            last_reviewed_at: row.get(11)?,
            next_review_at: row.get(12)?,
        },
        created_at: row.get(13)?,
    })
}

/// Stores a new card in its initial review state (due today, never reviewed)
pub fn create_flashcard(
    conn: &Connection,
    owner_id: &str,
    study_plan_id: &str,
    card: &NewFlashcard,
    now: DateTime<Utc>,
) -> Result<Flashcard> {
    card.validate()?;

    let flashcard = Flashcard {
        id: 0,
        owner_id: owner_id.to_string(),
        study_plan_id: study_plan_id.to_string(),
        front: card.front.trim().to_string(),
        back: card.back.trim().to_string(),
        subject: card.subject.trim().to_string(),
        topic: card.topic.trim().to_string(),
        difficulty: card.difficulty,
        review: ReviewState::new(now.date_naive()),
        created_at: now,
    };
    let id = insert_flashcard(conn, &flashcard)?;

    info!("Flashcard {} created in study plan '{}'", id, study_plan_id);
    Ok(Flashcard { id, ..flashcard })
}

/// Inserts a card keeping its review state as-is. The `id` field is ignored;
/// the new row id is returned.
pub fn insert_flashcard(conn: &Connection, card: &Flashcard) -> Result<i64> {
    conn.execute(
        "INSERT INTO flashcards (owner_id, study_plan_id, front, back, subject, topic, difficulty,
             repetitions, ease_factor, interval_days, last_reviewed_at, next_review_at, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
        params![
            card.owner_id,
            card.study_plan_id,
            card.front,
            card.back,
            card.subject,
            card.topic,
            card.difficulty,
            card.review.repetitions,
            card.review.ease_factor,
            card.review.interval,
            card.review.last_reviewed_at,
            card.review.next_review_at,
            card.created_at,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

pub fn get_flashcard(conn: &Connection, id: i64) -> Result<Option<Flashcard>> {
    let card = conn
        .query_row(
            &format!("SELECT {} FROM flashcards WHERE id = ?1", CARD_COLUMNS),
            params![id],
            row_to_flashcard,
        )
        .optional()?;
    Ok(card)
}

/// All cards in a study plan, newest first
pub fn list_flashcards(conn: &Connection, owner_id: &str, study_plan_id: &str) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM flashcards
         WHERE owner_id = ?1 AND study_plan_id = ?2
         ORDER BY created_at DESC, id DESC",
        CARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![owner_id, study_plan_id], row_to_flashcard)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(cards)
}

/// Cards with next_review_at <= today, most overdue first
pub fn list_due_flashcards(
    conn: &Connection,
    owner_id: &str,
    study_plan_id: &str,
    today: NaiveDate,
) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM flashcards
         WHERE owner_id = ?1 AND study_plan_id = ?2 AND next_review_at <= ?3
         ORDER BY next_review_at ASC, id ASC",
        CARD_COLUMNS
    ))?;

    let cards = stmt
        .query_map(params![owner_id, study_plan_id, today], row_to_flashcard)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(cards)
}

/// Persists the scheduling fields produced by a review
pub fn update_review_state(conn: &Connection, id: i64, review: &ReviewState) -> Result<()> {
    let updated = conn.execute(
        "UPDATE flashcards
         SET repetitions = ?1, ease_factor = ?2, interval_days = ?3,
             last_reviewed_at = ?4, next_review_at = ?5
         WHERE id = ?6",
        params![
            review.repetitions,
            review.ease_factor,
            review.interval,
            review.last_reviewed_at,
            review.next_review_at,
            id
        ],
    )?;

    if updated == 0 {
        return Err(Error::CardNotFound(id));
    }
    debug!(
        "Flashcard {} scheduled for {} (interval {}d, ease {:.2})",
        id, review.next_review_at, review.interval, review.ease_factor
    );
    Ok(())
}

pub fn delete_flashcard(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn.execute("DELETE FROM flashcards WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(Error::CardNotFound(id));
    }
    info!("Flashcard {} deleted", id);
    Ok(())
}

/// Study plans an owner has cards in, with their card counts
pub fn list_study_plans(conn: &Connection, owner_id: &str) -> Result<Vec<(String, usize)>> {
    let mut stmt = conn.prepare(
        "SELECT study_plan_id, COUNT(*) FROM flashcards
         WHERE owner_id = ?1
         GROUP BY study_plan_id
         ORDER BY study_plan_id",
    )?;

    let plans = stmt
        .query_map(params![owner_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as usize))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(plans)
}
