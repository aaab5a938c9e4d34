use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const MIN_EASE_FACTOR: f64 = 1.3;
/// Intervals stop growing at roughly a century.
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

/// SM-2 scheduling state for one shortcut.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReviewCard {
    pub item_id: String,
    pub interval_days: u32,
    pub repetitions: u32,
    pub ease_factor: f64,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
}

impl ReviewCard {
    /// A never-reviewed card, due immediately.
    pub fn new(item_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            item_id: item_id.into(),
            interval_days: 0,
            repetitions: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review_at: now,
            last_reviewed_at: None,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }
}
