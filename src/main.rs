mod app;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use jee_flashcards::config::{
    DEFAULT_DATABASE_PATH, DEFAULT_FALLBACK_BATCH_SIZE, DEFAULT_OWNER, DEFAULT_STUDY_PLAN, parse_date,
};
use jee_flashcards::database::db;
use jee_flashcards::export::json::{StudyPlanExport, export_json_to_path, import_into, import_json};
use jee_flashcards::models::due::{bucket_by_due_date, relative_day_label, study_stats};
use jee_flashcards::models::sm2::{format_interval, preview_intervals, schedule_review};
use jee_flashcards::{Config, Difficulty, Error, Flashcard, NewFlashcard, Quality};
use std::io;
use std::path::PathBuf;

/// Spaced-repetition flashcards for JEE study plans
#[derive(Parser)]
#[command(name = "jee-flashcards", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "JEE_FLASHCARDS_DB", default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    #[arg(long, global = true, env = "JEE_FLASHCARDS_OWNER", default_value = DEFAULT_OWNER)]
    owner: String,

    /// Study plan the cards belong to
    #[arg(long, short, global = true, env = "JEE_FLASHCARDS_PLAN", default_value = DEFAULT_STUDY_PLAN)]
    plan: String,

    /// Cards to study when nothing is due
    #[arg(long, global = true, env = "JEE_FLASHCARDS_BATCH_SIZE", default_value_t = DEFAULT_FALLBACK_BATCH_SIZE)]
    batch_size: usize,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true, env = "JEE_FLASHCARDS_TODAY", value_parser = parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a flashcard
    Add {
        front: String,
        back: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long, default_value = "")]
        topic: String,
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,
    },
    /// List all cards in the study plan
    List,
    /// Show overdue, due today and upcoming cards
    Due,
    /// Review due cards interactively
    Review,
    /// Rate a single card without the interactive session
    Rate { id: i64, quality: Quality },
    /// Show the interval each rating would give a card
    Preview { id: i64 },
    Delete { id: i64 },
    Stats,
    /// List study plans with card counts
    Plans,
    Export { path: PathBuf },
    Import {
        path: PathBuf,
        /// Import into this plan instead of the one named in the file
        #[arg(long)]
        into: Option<String>,
    },
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            database_path: self.database.clone(),
            owner_id: self.owner.clone(),
            study_plan_id: self.plan.clone(),
            fallback_batch_size: self.batch_size,
            today_override: self.today,
        }
    }
}

fn print_card(card: &Flashcard, today: NaiveDate) {
    println!(
        "#{:<4} {:<40} due {} ({}), interval {}d, ease {:.2}, reps {}",
        card.id,
        card.front,
        card.review.next_review_at,
        relative_day_label(card.review.next_review_at, today),
        card.review.interval,
        card.review.ease_factor,
        card.review.repetitions
    );
}

fn find_card(conn: &rusqlite::Connection, config: &Config, id: i64) -> Result<Flashcard, Error> {
    db::get_flashcard(conn, id)?
        .filter(|card| card.owner_id == config.owner_id && card.study_plan_id == config.study_plan_id)
        .ok_or(Error::CardNotFound(id))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    let conn = db::open_database(&config.database_path)?;
    let now = Utc::now();
    let today = config.today(now);

    match cli.command {
        Command::Add {
            front,
            back,
            subject,
            topic,
            difficulty,
        } => {
            let card = NewFlashcard {
                front,
                back,
                subject,
                topic,
                difficulty,
            };
            let created = db::create_flashcard(
                &conn,
                &config.owner_id,
                &config.study_plan_id,
                &card,
                config.review_time(now),
            )?;
            println!("Flashcard #{} added to '{}'.", created.id, config.study_plan_id);
        }
        Command::List => {
            let cards = db::list_flashcards(&conn, &config.owner_id, &config.study_plan_id)?;
            if cards.is_empty() {
                println!("No flashcards yet. Create your first one with `add`.");
            }
            for card in &cards {
                print_card(card, today);
            }
        }
        Command::Due => {
            let cards = db::list_flashcards(&conn, &config.owner_id, &config.study_plan_id)?;
            let buckets = bucket_by_due_date(&cards, today);
            for (title, group) in [
                ("Overdue", &buckets.overdue),
                ("Due today", &buckets.due_today),
                ("Upcoming", &buckets.upcoming),
            ] {
                println!("{} ({})", title, group.len());
                for card in group.iter() {
                    print_card(card, today);
                }
            }
        }
        Command::Review => {
            app::run_review(&conn, &config, io::stdin().lock(), io::stdout(), Utc::now)?;
        }
        Command::Rate { id, quality } => {
            let card = find_card(&conn, &config, id)?;
            let review = schedule_review(&card.review, quality, config.review_time(now));
            db::update_review_state(&conn, id, &review)?;
            println!(
                "#{} rated {}: next review {} ({})",
                id,
                quality,
                review.next_review_at,
                relative_day_label(review.next_review_at, today)
            );
        }
        Command::Preview { id } => {
            let card = find_card(&conn, &config, id)?;
            for (quality, days) in Quality::ALL.iter().zip(preview_intervals(&card.review)) {
                println!("{:<10} {}", quality.to_string(), format_interval(days));
            }
        }
        Command::Delete { id } => {
            find_card(&conn, &config, id)?;
            db::delete_flashcard(&conn, id)?;
            println!("Flashcard #{} deleted.", id);
        }
        Command::Stats => {
            let cards = db::list_flashcards(&conn, &config.owner_id, &config.study_plan_id)?;
            let stats = study_stats(&cards, today);
            println!("Total cards:    {}", stats.total);
            println!("Due today:      {}", stats.due_today);
            println!("Reviewed today: {}", stats.reviewed_today);
            println!("Success rate:   {}%", stats.success_rate);
        }
        Command::Plans => {
            for (plan, count) in db::list_study_plans(&conn, &config.owner_id)? {
                println!("{} ({} cards)", plan, count);
            }
        }
        Command::Export { path } => {
            let cards = db::list_flashcards(&conn, &config.owner_id, &config.study_plan_id)?;
            let export = StudyPlanExport::from_cards(&config.study_plan_id, &cards);
            export_json_to_path(&export, &path)?;
            println!("Exported {} cards to {}.", cards.len(), path.display());
        }
        Command::Import { path, into } => {
            let export = import_json(&path)?;
            let count = import_into(&conn, &config.owner_id, into.as_deref(), &export)?;
            println!("Imported {} cards.", count);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(plan: &str) -> Config {
        Config {
            owner_id: "student".to_string(),
            study_plan_id: plan.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_find_card_is_scoped_to_owner_and_plan() {
        let conn = db::open_in_memory().unwrap();
        let card = NewFlashcard {
            front: "Bohr radius?".to_string(),
            back: "0.529 Å".to_string(),
            ..NewFlashcard::default()
        };
        let created = db::create_flashcard(&conn, "student", "jee-main", &card, Utc::now()).unwrap();

        assert_eq!(find_card(&conn, &config("jee-main"), created.id).unwrap().id, created.id);
        assert!(matches!(
            find_card(&conn, &config("boards"), created.id),
            Err(Error::CardNotFound(_))
        ));

        let other_owner = Config {
            owner_id: "someone-else".to_string(),
            ..config("jee-main")
        };
        assert!(matches!(
            find_card(&conn, &other_owner, created.id),
            Err(Error::CardNotFound(_))
        ));
    }
}
