//! In-memory mastery records keyed by shortcut id.

use super::mastery::{self, prioritize};
use super::mastery_record::{MasteryRecord, MasteryTier};
use super::shortcut::Shortcut;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Read access to mastery state, as consumed by the learning path builder.
pub trait MasteryLookup {
    /// Tier for `item_id`; unknown ids are `New`.
    fn tier_of(&self, item_id: &str) -> MasteryTier;

    fn last_seen(&self, item_id: &str) -> Option<DateTime<Utc>>;
}

impl MasteryLookup for HashMap<String, MasteryTier> {
    fn tier_of(&self, item_id: &str) -> MasteryTier {
        self.get(item_id).copied().unwrap_or_default()
    }

    fn last_seen(&self, _item_id: &str) -> Option<DateTime<Utc>> {
        None
    }
}

impl MasteryLookup for HashMap<String, MasteryRecord> {
    fn tier_of(&self, item_id: &str) -> MasteryTier {
        self.get(item_id).map(|r| r.tier).unwrap_or_default()
    }

    fn last_seen(&self, item_id: &str) -> Option<DateTime<Utc>> {
        self.get(item_id).and_then(|r| r.last_seen_at)
    }
}

/// Record counts per tier plus answer totals.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MasteryStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub familiar: usize,
    pub master: usize,
    pub total_correct: u64,
    pub total_incorrect: u64,
}

impl MasteryStats {
    pub fn add(&mut self, tier: MasteryTier, correct: u32, incorrect: u32) {
        self.total += 1;
        match tier {
            MasteryTier::New => self.new += 1,
            MasteryTier::Learning => self.learning += 1,
            MasteryTier::Familiar => self.familiar += 1,
            MasteryTier::Master => self.master += 1,
        }
        self.total_correct += u64::from(correct);
        self.total_incorrect += u64::from(incorrect);
    }
}

#[derive(Clone, Debug, Default)]
pub struct MasteryTracker {
    records: HashMap<String, MasteryRecord>,
}

impl MasteryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, item_id: &str) -> &mut MasteryRecord {
        self.records
            .entry(item_id.to_string())
            .or_insert_with(|| MasteryRecord::new(item_id))
    }

    pub fn record_correct(&mut self, item_id: &str, now: DateTime<Utc>) -> MasteryTier {
        let record = self.get_or_create(item_id);
        let previous = record.tier;
        let tier = mastery::record_correct(record, now);
        if tier != previous {
            debug!(item_id, from = %previous, to = %tier, "mastery tier changed");
        }
        tier
    }

    pub fn record_incorrect(&mut self, item_id: &str, now: DateTime<Utc>) -> MasteryTier {
        let record = self.get_or_create(item_id);
        let previous = record.tier;
        let tier = mastery::record_incorrect(record, now);
        if tier != previous {
            debug!(item_id, from = %previous, to = %tier, "mastery tier demoted");
        }
        tier
    }

    pub fn record(&self, item_id: &str) -> Option<&MasteryRecord> {
        self.records.get(item_id)
    }

    /// Shortcuts ordered new-first for practice; stable within a tier.
    pub fn prioritized(&self, shortcuts: &[Shortcut]) -> Vec<Shortcut> {
        prioritize(shortcuts, |s| self.tier_of(&s.id))
    }

    pub fn stats(&self) -> MasteryStats {
        let mut stats = MasteryStats::default();
        for record in self.records.values() {
            stats.add(record.tier, record.correct_count, record.incorrect_count);
        }
        stats
    }

    pub fn mastered_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.tier == MasteryTier::Master)
            .count()
    }

    /// Rounded percentage of tracked shortcuts at `Master`.
    pub fn mastery_percent(&self) -> u32 {
        if self.records.is_empty() {
            return 0;
        }
        (self.mastered_count() as f64 / self.records.len() as f64 * 100.0).round() as u32
    }

    pub fn load_all(&mut self, records: Vec<MasteryRecord>) {
        self.records = records
            .into_iter()
            .map(|record| (record.item_id.clone(), record))
            .collect();
    }

    pub fn all_records(&self) -> Vec<MasteryRecord> {
        let mut records: Vec<MasteryRecord> = self.records.values().cloned().collect();
        records.sort_by(|a, b| a.item_id.cmp(&b.item_id));
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

impl MasteryLookup for MasteryTracker {
    fn tier_of(&self, item_id: &str) -> MasteryTier {
        self.records.tier_of(item_id)
    }

    fn last_seen(&self, item_id: &str) -> Option<DateTime<Utc>> {
        self.records.last_seen(item_id)
    }
}
