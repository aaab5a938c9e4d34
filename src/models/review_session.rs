//! Review session over due shortcuts.
//! Feeds each outcome to the SM-2 schedule and the mastery tracker; shortcuts
//! that were not recalled come back in the next round.

use super::mastery_record::MasteryTier;
use super::mastery_tracker::MasteryTracker;
use super::review_card::ReviewCard;
use super::schedule::ReviewSchedule;
use chrono::{DateTime, Utc};

/// What one answer changed.
#[derive(Clone, Debug, PartialEq)]
pub struct AnswerOutcome {
    pub item_id: String,
    pub tier: MasteryTier,
    /// Set once the item is finished for this round.
    pub card: Option<ReviewCard>,
}

pub struct ReviewSession {
    pub items: Vec<String>,
    pub current_round: Vec<usize>,
    pub current_index: usize,
    /// Misses on the current item so far.
    pub attempts: u32,
    pub round_number: usize,
    recalled: Vec<bool>,
}

impl ReviewSession {
    pub fn new(items: Vec<String>) -> Self {
        let recalled = vec![false; items.len()];
        Self {
            current_round: (0..items.len()).collect(),
            items,
            current_index: 0,
            attempts: 0,
            round_number: 1,
            recalled,
        }
    }

    /// Session over every card due at `now`, soonest first.
    pub fn from_due(schedule: &ReviewSchedule, now: DateTime<Utc>) -> Self {
        Self::new(
            schedule
                .due_cards(now)
                .into_iter()
                .map(|card| card.item_id)
                .collect(),
        )
    }

    pub fn current_item(&self) -> Option<&str> {
        self.current_round
            .get(self.current_index)
            .and_then(|&idx| self.items.get(idx))
            .map(String::as_str)
    }

    /// Records an answer for the current item.
    ///
    /// A miss demotes mastery and keeps the item current; a correct answer
    /// schedules the card with the accumulated miss count and moves on.
    pub fn answer(
        &mut self,
        correct: bool,
        now: DateTime<Utc>,
        schedule: &mut ReviewSchedule,
        mastery: &mut MasteryTracker,
    ) -> Option<AnswerOutcome> {
        let idx = *self.current_round.get(self.current_index)?;
        let item_id = self.items[idx].clone();

        if !correct {
            let tier = mastery.record_incorrect(&item_id, now);
            self.attempts += 1;
            return Some(AnswerOutcome {
                item_id,
                tier,
                card: None,
            });
        }

        let tier = mastery.record_correct(&item_id, now);
        let card = schedule.record_review(&item_id, true, self.attempts, now);
        self.recalled[idx] = true;
        self.advance();
        Some(AnswerOutcome {
            item_id,
            tier,
            card: Some(card),
        })
    }

    /// Gives up on the current item: schedules it as a lapse and queues it for
    /// the next round.
    pub fn give_up(
        &mut self,
        now: DateTime<Utc>,
        schedule: &mut ReviewSchedule,
    ) -> Option<ReviewCard> {
        let idx = *self.current_round.get(self.current_index)?;
        let card = schedule.record_review(&self.items[idx], false, self.attempts, now);
        self.recalled[idx] = false;
        self.advance();
        Some(card)
    }

    fn advance(&mut self) {
        self.attempts = 0;
        if self.current_index + 1 < self.current_round.len() {
            self.current_index += 1;
        } else {
            self.start_next_round();
        }
    }

    /// Starts a new round with the items that were not recalled.
    /// If none remain, the session is complete.
    fn start_next_round(&mut self) {
        let missed: Vec<usize> = self
            .current_round
            .iter()
            .copied()
            .filter(|&idx| !self.recalled[idx])
            .collect();

        if missed.is_empty() {
            self.current_index = self.current_round.len();
            return;
        }
        self.current_round = missed;
        self.current_index = 0;
        self.round_number += 1;
    }

    pub fn recalled_count(&self) -> usize {
        self.current_round
            .iter()
            .filter(|&&idx| self.recalled[idx])
            .count()
    }

    pub fn total_count(&self) -> usize {
        self.current_round.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.total_count() - self.recalled_count()
    }

    pub fn is_completed(&self) -> bool {
        self.current_item().is_none()
    }

    pub fn phase_message(&self) -> String {
        if self.round_number == 1 {
            format!("Round {}: {} shortcuts", self.round_number, self.total_count())
        } else {
            format!(
                "Round {} (Review): {} shortcuts to retry",
                self.round_number,
                self.total_count()
            )
        }
    }
}
