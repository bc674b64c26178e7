//! Self-assessed recall grade given after revealing a card's answer.
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Quality {
    pub const ALL: [Quality; 4] = [Quality::Again, Quality::Hard, Quality::Good, Quality::Easy];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Grades of 3 and above keep the repetition streak going.
    pub fn is_passing(self) -> bool {
        self.value() >= 3
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Again => "Again",
            Quality::Hard => "Hard",
            Quality::Good => "Good",
            Quality::Easy => "Easy",
        }
    }
}

impl TryFrom<i64> for Quality {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            1 => Ok(Quality::Again),
            2 => Ok(Quality::Hard),
            3 => Ok(Quality::Good),
            4 => Ok(Quality::Easy),
            other => Err(Error::InvalidQuality(other)),
        }
    }
}

impl TryFrom<u8> for Quality {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Quality::try_from(i64::from(value))
    }
}

impl FromStr for Quality {
    type Err = Error;

    /// Accepts either the numeric grade or its label, e.g. `"3"` or `"good"`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i64>() {
            return Quality::try_from(n);
        }
        Quality::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidQualityLabel(s.to_string()))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_range() {
        for (n, expected) in (1u8..=4).zip(Quality::ALL) {
            assert_eq!(Quality::try_from(n).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        assert!(matches!(Quality::try_from(0u8), Err(Error::InvalidQuality(0))));
        assert!(matches!(Quality::try_from(5u8), Err(Error::InvalidQuality(5))));
        assert!(matches!(Quality::try_from(-1i64), Err(Error::InvalidQuality(-1))));
    }

    #[test]
    fn test_passing_threshold() {
        assert!(!Quality::Again.is_passing());
        assert!(!Quality::Hard.is_passing());
        assert!(Quality::Good.is_passing());
        assert!(Quality::Easy.is_passing());
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!("4".parse::<Quality>().unwrap(), Quality::Easy);
        assert_eq!(" hard ".parse::<Quality>().unwrap(), Quality::Hard);
        assert!("7".parse::<Quality>().is_err());
        assert!(matches!(
            "perfect".parse::<Quality>(),
            Err(Error::InvalidQualityLabel(label)) if label == "perfect"
        ));
    }
}
