//! In-memory set of review cards keyed by shortcut id.
//! Loaded from the store once per session and written back by the caller.

use super::quality::derive_quality;
use super::review_card::ReviewCard;
use super::shortcut::Shortcut;
use super::sm2::{list_due, update_card};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::debug;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

#[derive(Clone, Debug, Default)]
pub struct ReviewSchedule {
    cards: HashMap<String, ReviewCard>,
}

impl ReviewSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the card for `item_id`, creating a fresh due card on first use.
    pub fn get_or_create(&mut self, item_id: &str, now: DateTime<Utc>) -> &mut ReviewCard {
        self.cards
            .entry(item_id.to_string())
            .or_insert_with(|| ReviewCard::new(item_id, now))
    }

    /// Records one practice outcome and returns the rescheduled card.
    pub fn record_review(
        &mut self,
        item_id: &str,
        correct: bool,
        attempts: u32,
        now: DateTime<Utc>,
    ) -> ReviewCard {
        let quality = derive_quality(correct, attempts);
        let card = self.get_or_create(item_id, now);
        let updated = update_card(card, quality, now);
        debug!(
            item_id,
            quality = quality.value(),
            interval_days = updated.interval_days,
            ease_factor = updated.ease_factor,
            "review recorded"
        );
        *card = updated.clone();
        updated
    }

    pub fn card(&self, item_id: &str) -> Option<&ReviewCard> {
        self.cards.get(item_id)
    }

    pub fn due_cards(&self, now: DateTime<Utc>) -> Vec<ReviewCard> {
        list_due(self.cards.values(), now)
    }

    pub fn due_count(&self, now: DateTime<Utc>) -> usize {
        self.cards.values().filter(|card| card.is_due(now)).count()
    }

    /// Filters `shortcuts` down to the ones with a due card, keeping input
    /// order, optionally truncated to `limit`.
    pub fn due_items<'a>(
        &self,
        shortcuts: &'a [Shortcut],
        now: DateTime<Utc>,
        limit: Option<usize>,
    ) -> Vec<&'a Shortcut> {
        shortcuts
            .iter()
            .filter(|s| self.cards.get(&s.id).is_some_and(|card| card.is_due(now)))
            .take(limit.unwrap_or(usize::MAX))
            .collect()
    }

    /// Number of cards last reviewed on the same UTC date as `now`.
    pub fn reviewed_today(&self, now: DateTime<Utc>) -> usize {
        let today = now.date_naive();
        self.cards
            .values()
            .filter(|card| card.last_reviewed_at.is_some_and(|at| at.date_naive() == today))
            .count()
    }

    /// Whole days until the card is due, rounded up. Zero if due or unknown.
    pub fn days_until_review(&self, item_id: &str, now: DateTime<Utc>) -> i64 {
        let Some(card) = self.cards.get(item_id) else {
            return 0;
        };
        let diff = (card.next_review_at - now).num_milliseconds();
        if diff <= 0 {
            0
        } else {
            (diff + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
        }
    }

    /// Replaces the schedule with the given cards.
    pub fn load_all(&mut self, cards: Vec<ReviewCard>) {
        self.cards = cards
            .into_iter()
            .map(|card| (card.item_id.clone(), card))
            .collect();
    }

    pub fn all_cards(&self) -> Vec<ReviewCard> {
        let mut cards: Vec<ReviewCard> = self.cards.values().cloned().collect();
        cards.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
