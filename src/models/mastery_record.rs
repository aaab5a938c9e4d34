//! Per-shortcut mastery counters and the tier derived from them.
use crate::error::Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryTier {
    #[default]
    New,
    Learning,
    Familiar,
    Master,
}

impl MasteryTier {
    pub const ALL: [MasteryTier; 4] = [
        MasteryTier::New,
        MasteryTier::Learning,
        MasteryTier::Familiar,
        MasteryTier::Master,
    ];

    /// Practice order: new shortcuts first, mastered ones last.
    pub fn rank(self) -> u32 {
        self as u32
    }

    /// Minimum (correct count, current streak) to hold this tier.
    pub fn threshold(self) -> (u32, u32) {
        match self {
            MasteryTier::New => (0, 0),
            MasteryTier::Learning => (1, 0),
            MasteryTier::Familiar => (5, 3),
            MasteryTier::Master => (15, 7),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MasteryTier::New => "new",
            MasteryTier::Learning => "learning",
            MasteryTier::Familiar => "familiar",
            MasteryTier::Master => "master",
        }
    }
}

impl fmt::Display for MasteryTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MasteryTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MasteryTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "mastery tier",
                value: s.to_string(),
            })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MasteryRecord {
    pub item_id: String,
    pub tier: MasteryTier,
    pub correct_count: u32,
    pub incorrect_count: u32,
    /// Correct answers in a row; reset by any miss.
    pub current_streak: u32,
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl MasteryRecord {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            tier: MasteryTier::New,
            correct_count: 0,
            incorrect_count: 0,
            current_streak: 0,
            last_seen_at: None,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Share of correct answers, 0 when never answered.
    pub fn accuracy(&self) -> f64 {
        match self.total_attempts() {
            0 => 0.0,
            total => f64::from(self.correct_count) / f64::from(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_order() {
        assert!(MasteryTier::New < MasteryTier::Learning);
        assert!(MasteryTier::Familiar < MasteryTier::Master);
        assert_eq!(MasteryTier::Master.rank(), 3);
    }

    #[test]
    fn test_tier_parse() {
        for tier in MasteryTier::ALL {
            assert_eq!(tier.as_str().parse::<MasteryTier>().unwrap(), tier);
        }
        assert!("expert".parse::<MasteryTier>().is_err());
    }

    #[test]
    fn test_accuracy() {
        let mut record = MasteryRecord::new("a");
        assert_eq!(record.accuracy(), 0.0);
        record.correct_count = 3;
        record.incorrect_count = 1;
        assert_eq!(record.accuracy(), 0.75);
    }
}
