//! Recall quality on the SM-2 0-5 scale, derived from gameplay outcomes
//! instead of self-report.
//!
//! - 0: complete failure after several attempts
//! - 2: wrong, but on the first or second try
//! - 3: correct after two or more misses
//! - 4: correct after one miss
//! - 5: correct on the first try

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_QUALITY: u8 = 5;

/// Lowest quality that counts as a successful recall.
pub const PASSING_QUALITY: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    /// Builds a quality score, clamping anything above 5 down to 5.
    ///
    /// Out-of-range input is always clamped (and logged), never rejected.
    pub fn new(value: u8) -> Self {
        if value > MAX_QUALITY {
            warn!(value, "quality out of range, clamping to {MAX_QUALITY}");
        }
        Self(value.min(MAX_QUALITY))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_passing(self) -> bool {
        self.0 >= PASSING_QUALITY
    }
}

impl From<u8> for Quality {
    fn from(value: u8) -> Self {
        Quality::new(value)
    }
}

/// Converts a practice outcome into a quality score.
///
/// `attempts` is the number of misses on the item before this answer.
pub fn derive_quality(correct: bool, attempts: u32) -> Quality {
    let value = match (correct, attempts) {
        (false, 0..=1) => 2,
        (false, _) => 0,
        (true, 0) => 5,
        (true, 1) => 4,
        (true, _) => 3,
    };
    Quality(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_answers() {
        assert_eq!(derive_quality(true, 0).value(), 5);
        assert_eq!(derive_quality(true, 1).value(), 4);
        assert_eq!(derive_quality(true, 2).value(), 3);
        assert_eq!(derive_quality(true, 5).value(), 3);
    }

    #[test]
    fn test_incorrect_answers() {
        assert_eq!(derive_quality(false, 0).value(), 2);
        assert_eq!(derive_quality(false, 1).value(), 2);
        assert_eq!(derive_quality(false, 2).value(), 0);
        assert_eq!(derive_quality(false, 3).value(), 0);
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Quality::new(9).value(), 5);
        assert_eq!(Quality::from(4).value(), 4);
    }

    #[test]
    fn test_passing_boundary() {
        assert!(!Quality::new(2).is_passing());
        assert!(Quality::new(3).is_passing());
    }
}
