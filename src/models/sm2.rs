//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates review intervals based on recall quality:
//! - Each card has an ease factor (EF) that adjusts based on performance
//! - Quality 0-2: reset interval to one day and repetitions to zero
//! - Quality 3-5: grow the interval (1 day → 6 days → previous interval × EF)
//! - EF is adjusted after each review and never falls below 1.3

use super::quality::Quality;
use super::review_card::{MAX_INTERVAL_DAYS, MIN_EASE_FACTOR, ReviewCard};
use chrono::{DateTime, Duration, Utc};

/// Returns the card's state after a review of the given quality.
pub fn update_card(card: &ReviewCard, quality: Quality, now: DateTime<Utc>) -> ReviewCard {
    let (interval_days, repetitions) = if quality.is_passing() {
        let interval = match card.repetitions {
            0 => 1,
            1 => 6,
            // Grows with the ease factor as it stood before this review
            _ => grow_interval(card.interval_days, card.ease_factor),
        };
        (interval, card.repetitions.saturating_add(1))
    } else {
        (1, 0)
    };

    ReviewCard {
        item_id: card.item_id.clone(),
        interval_days,
        repetitions,
        ease_factor: next_ease_factor(card.ease_factor, quality),
        next_review_at: now
            .checked_add_signed(Duration::days(i64::from(interval_days)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
        last_reviewed_at: Some(now),
    }
}

fn grow_interval(interval_days: u32, ease_factor: f64) -> u32 {
    let grown = (f64::from(interval_days) * ease_factor).round();
    grown.clamp(1.0, f64::from(MAX_INTERVAL_DAYS)) as u32
}

/// EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)), floored at 1.3.
pub fn next_ease_factor(ease_factor: f64, quality: Quality) -> f64 {
    let miss = 5.0 - f64::from(quality.value());
    (ease_factor + (0.1 - miss * (0.08 + miss * 0.02))).max(MIN_EASE_FACTOR)
}

/// Cards due at `now`, soonest first. Ties are ordered by item id.
pub fn list_due<'a, I>(cards: I, now: DateTime<Utc>) -> Vec<ReviewCard>
where
    I: IntoIterator<Item = &'a ReviewCard>,
{
    let mut due: Vec<ReviewCard> = cards
        .into_iter()
        .filter(|card| card.is_due(now))
        .cloned()
        .collect();
    due.sort_by(|a, b| {
        a.next_review_at
            .cmp(&b.next_review_at)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });
    due
}
