//! Interactive terminal review session.
//! Shows each queued card, waits for the answer to be revealed, reads a 1-4
//! rating and persists the new schedule right away.

use chrono::{DateTime, Utc};
use jee_flashcards::database::db;
use jee_flashcards::models::due::relative_day_label;
use jee_flashcards::models::sm2::{format_interval, preview_intervals};
use jee_flashcards::models::{Quality, ReviewSession, SessionSummary};
use jee_flashcards::{Config, Result};
use log::info;
use rusqlite::Connection;
use std::io::{BufRead, Lines, Write};

/// `clock` is read once at session start and once per rating.
pub fn run_review<R: BufRead, W: Write>(
    conn: &Connection,
    config: &Config,
    input: R,
    mut out: W,
    mut clock: impl FnMut() -> DateTime<Utc>,
) -> Result<SessionSummary> {
    let cards = db::list_flashcards(conn, &config.owner_id, &config.study_plan_id)?;
    let today = config.today(clock());
    let mut session = ReviewSession::start(&cards, today, config.fallback_batch_size);

    if session.total_count() == 0 {
        writeln!(out, "No flashcards in study plan '{}'.", config.study_plan_id)?;
        return Ok(session.summary());
    }
    info!(
        "Review session started: {} cards from '{}'",
        session.total_count(),
        config.study_plan_id
    );

    let mut lines = input.lines();
    while let Some(card) = session.current_card().cloned() {
        writeln!(out)?;
        writeln!(out, "{}", session.progress_message())?;
        if !card.subject.is_empty() || !card.topic.is_empty() {
            writeln!(out, "[{} / {}] ({})", card.subject, card.topic, card.difficulty)?;
        }
        writeln!(out, "Q: {}", card.front)?;
        writeln!(out, "Press Enter to show the answer, q to quit.")?;
        out.flush()?;

        match lines.next().transpose()? {
            Some(line) if line.trim() != "q" => {}
            _ => break,
        }
        session.reveal_answer();

        writeln!(out, "A: {}", card.back)?;
        let previews = preview_intervals(&card.review);
        let choices: Vec<String> = Quality::ALL
            .iter()
            .zip(previews)
            .map(|(quality, days)| format!("{} {} ({})", quality.value(), quality.label(), format_interval(days)))
            .collect();
        writeln!(out, "{}", choices.join("  "))?;

        let Some(quality) = read_quality(&mut lines, &mut out)? else {
            break;
        };
        let reviewed_at = config.review_time(clock());
        let Some(updated) = session.grade_current(quality, reviewed_at) else {
            break;
        };
        db::update_review_state(conn, updated.id, &updated.review)?;
        writeln!(
            out,
            "Next review {} ({})",
            updated.review.next_review_at,
            relative_day_label(updated.review.next_review_at, config.today(reviewed_at))
        )?;
    }

    let summary = session.summary();
    writeln!(out)?;
    if session.is_completed() {
        writeln!(out, "Study session complete! You reviewed {} flashcards.", summary.reviewed)?;
    } else {
        writeln!(
            out,
            "Session stopped: {} reviewed, {} left.",
            summary.reviewed,
            session.remaining_count()
        )?;
    }
    writeln!(out, "Passed: {}  Again/Hard: {}", summary.passed, summary.lapsed)?;
    Ok(summary)
}

/// Reads ratings until a valid one arrives. `None` on quit or end of input.
fn read_quality<R: BufRead, W: Write>(lines: &mut Lines<R>, out: &mut W) -> Result<Option<Quality>> {
    loop {
        write!(out, "Rating: ")?;
        out.flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(None);
        };
        if line.trim() == "q" {
            return Ok(None);
        }
        match line.parse::<Quality>() {
            Ok(quality) => return Ok(Some(quality)),
            Err(e) => writeln!(out, "{}", e)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use jee_flashcards::NewFlashcard;
    use std::io::Cursor;

    fn config() -> Config {
        Config {
            owner_id: "student".to_string(),
            study_plan_id: "jee-main".to_string(),
            today_override: Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
            ..Config::default()
        }
    }

    fn seed(conn: &Connection, fronts: &[&str]) -> Vec<i64> {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        fronts
            .iter()
            .map(|front| {
                let card = NewFlashcard {
                    front: front.to_string(),
                    back: "answer".to_string(),
                    ..NewFlashcard::default()
                };
                db::create_flashcard(conn, "student", "jee-main", &card, created)
                    .unwrap()
                    .id
            })
            .collect()
    }

    #[test]
    fn test_review_persists_each_rating() {
        let conn = db::open_in_memory().unwrap();
        let ids = seed(&conn, &["Q1", "Q2"]);

        let mut output = Vec::new();
        let input = Cursor::new("\n3\n\n9\n1\n");
        let summary = run_review(&conn, &config(), input, &mut output, Utc::now).unwrap();
        assert_eq!(summary.reviewed, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.lapsed, 1);

        for id in ids {
            let card = db::get_flashcard(&conn, id).unwrap().unwrap();
            assert_eq!(card.review.interval, 1);
            assert_eq!(card.review.next_review_at, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());
            assert!(card.review.last_reviewed_at.is_some());
        }

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Invalid quality rating 9"));
        assert!(text.contains("Study session complete! You reviewed 2 flashcards."));
    }

    #[test]
    fn test_quit_stops_without_grading() {
        let conn = db::open_in_memory().unwrap();
        let ids = seed(&conn, &["Q1", "Q2"]);

        let mut output = Vec::new();
        let summary = run_review(&conn, &config(), Cursor::new("\n4\nq\n"), &mut output, Utc::now).unwrap();
        assert_eq!(summary.reviewed, 1);

        let untouched = ids
            .iter()
            .filter_map(|&id| db::get_flashcard(&conn, id).unwrap())
            .filter(|card| card.review.last_reviewed_at.is_none())
            .count();
        assert_eq!(untouched, 1);
        assert!(String::from_utf8(output).unwrap().contains("1 reviewed, 1 left"));
    }

    #[test]
    fn test_empty_plan() {
        let conn = db::open_in_memory().unwrap();
        let mut output = Vec::new();
        let summary = run_review(&conn, &config(), Cursor::new(""), &mut output, Utc::now).unwrap();
        assert_eq!(summary, SessionSummary::default());
        assert!(String::from_utf8(output).unwrap().contains("No flashcards"));
    }

    #[test]
    fn test_label_uses_rating_day_after_midnight() {
        let conn = db::open_in_memory().unwrap();
        seed(&conn, &["Q1"]);
        let config = Config {
            today_override: None,
            ..config()
        };
        let mut times = vec![
            Utc.with_ymd_and_hms(2024, 1, 15, 23, 59, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 16, 0, 30, 0).unwrap(),
        ]
        .into_iter();
        let last = Utc.with_ymd_and_hms(2024, 1, 16, 0, 30, 0).unwrap();

        let mut output = Vec::new();
        run_review(&conn, &config, Cursor::new("\n3\n"), &mut output, || {
            times.next().unwrap_or(last)
        })
        .unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Next review 2024-01-17 (Tomorrow)"));
    }
}
