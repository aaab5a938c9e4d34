//! Mastery classification: promotion from counters, one-step demotion on a miss.

use super::mastery_record::{MasteryRecord, MasteryTier};
use chrono::{DateTime, Utc};

/// Highest tier whose thresholds the record's counters satisfy.
pub fn compute_tier(record: &MasteryRecord) -> MasteryTier {
    MasteryTier::ALL
        .into_iter()
        .rev()
        .find(|tier| {
            let (min_correct, min_streak) = tier.threshold();
            record.correct_count >= min_correct && record.current_streak >= min_streak
        })
        .unwrap_or(MasteryTier::New)
}

pub fn record_correct(record: &mut MasteryRecord, now: DateTime<Utc>) -> MasteryTier {
    record.correct_count += 1;
    record.current_streak += 1;
    record.last_seen_at = Some(now);
    record.tier = compute_tier(record);
    record.tier
}

/// Demotes by exactly one step without consulting the thresholds, so a record
/// can sit below the tier its correct count would allow until the streak is
/// rebuilt.
pub fn record_incorrect(record: &mut MasteryRecord, now: DateTime<Utc>) -> MasteryTier {
    record.incorrect_count += 1;
    record.current_streak = 0;
    record.last_seen_at = Some(now);
    record.tier = match record.tier {
        MasteryTier::Master => MasteryTier::Familiar,
        MasteryTier::Familiar => MasteryTier::Learning,
        other => other,
    };
    record.tier
}

/// Sorts items new-first, keeping input order within a tier.
pub fn prioritize<T, F>(items: &[T], tier_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> MasteryTier,
{
    let mut sorted = items.to_vec();
    sorted.sort_by_key(|item| tier_of(item).rank());
    sorted
}
