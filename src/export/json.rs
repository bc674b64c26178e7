//! JSON import/export for study plans.
//! Cards travel with their spaced repetition state, so progress survives a move
//! between databases.

use crate::database::db;
use crate::error::Result;
use crate::models::{Difficulty, Flashcard, ReviewState};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportedCard {
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub review: ReviewState,
    pub created_at: DateTime<Utc>,
}

impl From<&Flashcard> for ExportedCard {
    fn from(card: &Flashcard) -> Self {
        Self {
            front: card.front.clone(),
            back: card.back.clone(),
            subject: card.subject.clone(),
            topic: card.topic.clone(),
            difficulty: card.difficulty,
            review: card.review.clone(),
            created_at: card.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudyPlanExport {
    pub study_plan_id: String,
    pub flashcards: Vec<ExportedCard>,
}

impl StudyPlanExport {
    pub fn from_cards(study_plan_id: &str, cards: &[Flashcard]) -> Self {
        Self {
            study_plan_id: study_plan_id.to_string(),
            flashcards: cards.iter().map(ExportedCard::from).collect(),
        }
    }
}

/// Writes the export as pretty-printed JSON, replacing any existing file.
pub fn export_json_to_path(export: &StudyPlanExport, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(export)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    info!(
        "Exported {} cards from '{}' to '{}'",
        export.flashcards.len(),
        export.study_plan_id,
        path.display()
    );
    Ok(())
}

pub fn import_json(path: impl AsRef<Path>) -> Result<StudyPlanExport> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let export: StudyPlanExport = serde_json::from_reader(BufReader::new(file))?;
    info!(
        "Study plan '{}' read from '{}'",
        export.study_plan_id,
        path.display()
    );
    Ok(export)
}

/// Stores every card of `export` for `owner_id`, in the plan named by
/// `study_plan_override` or else the exported plan. All-or-nothing.
pub fn import_into(
    conn: &Connection,
    owner_id: &str,
    study_plan_override: Option<&str>,
    export: &StudyPlanExport,
) -> Result<usize> {
    let study_plan_id = study_plan_override.unwrap_or(&export.study_plan_id);
    let tx = conn.unchecked_transaction()?;

    for card in &export.flashcards {
        db::insert_flashcard(
            &tx,
            &Flashcard {
                id: 0,
                owner_id: owner_id.to_string(),
                study_plan_id: study_plan_id.to_string(),
                front: card.front.clone(),
                back: card.back.clone(),
                subject: card.subject.clone(),
                topic: card.topic.clone(),
                difficulty: card.difficulty,
                review: card.review.clone(),
                created_at: card.created_at,
            },
        )?;
    }
    tx.commit()?;

    info!(
        "Imported {} cards into study plan '{}'",
        export.flashcards.len(),
        study_plan_id
    );
    Ok(export.flashcards.len())
}
