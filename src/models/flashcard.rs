//! Flashcard is a question/answer pair tagged with a JEE subject and topic,
//! owned by a user and filed under one of their study plans.
use super::ReviewState;
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(Error::InvalidDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content for a card that has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewFlashcard {
    pub front: String,
    pub back: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
}

impl NewFlashcard {
    pub fn validate(&self) -> Result<()> {
        if self.front.trim().is_empty() {
            return Err(Error::EmptyField("front"));
        }
        if self.back.trim().is_empty() {
            return Err(Error::EmptyField("back"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: i64,
    pub owner_id: String,
    pub study_plan_id: String,
    pub front: String,
    pub back: String,
    pub subject: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub review: ReviewState,
    pub created_at: DateTime<Utc>,
}

impl Flashcard {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.review.is_due(today)
    }

    pub fn was_reviewed_on(&self, day: NaiveDate) -> bool {
        self.review
            .last_reviewed_at
            .is_some_and(|at| at.date_naive() == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_card() -> Flashcard {
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        Flashcard {
            id: 1,
            owner_id: "student".to_string(),
            study_plan_id: "jee-main".to_string(),
            front: "What is the derivative of sin(x)?".to_string(),
            back: "cos(x)".to_string(),
            subject: "Mathematics".to_string(),
            topic: "Calculus".to_string(),
            difficulty: Difficulty::Easy,
            review: ReviewState::new(created.date_naive()),
            created_at: created,
        }
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(Error::InvalidDifficulty(_))
        ));
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_validate_requires_front_and_back() {
        let mut card = NewFlashcard {
            front: "Unit of magnetic flux?".to_string(),
            back: "Weber".to_string(),
            ..NewFlashcard::default()
        };
        assert!(card.validate().is_ok());

        card.back = "   ".to_string();
        assert!(matches!(card.validate(), Err(Error::EmptyField("back"))));

        card.front.clear();
        assert!(matches!(card.validate(), Err(Error::EmptyField("front"))));
    }

    #[test]
    fn test_was_reviewed_on() {
        let mut card = sample_card();
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert!(!card.was_reviewed_on(day));

        card.review.last_reviewed_at = Some(Utc.with_ymd_and_hms(2024, 1, 15, 22, 0, 0).unwrap());
        assert!(card.was_reviewed_on(day));
        assert!(!card.was_reviewed_on(day.succ_opt().unwrap()));
    }

    #[test]
    fn test_serialized_difficulty_is_lowercase() {
        let json = serde_json::to_string(&sample_card()).unwrap();
        assert!(json.contains("\"difficulty\":\"easy\""));
    }
}
