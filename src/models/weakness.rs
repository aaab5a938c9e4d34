//! Weak-spot analysis over per-shortcut performance.

use super::mastery_record::MasteryRecord;
use super::shortcut::{Difficulty, Shortcut, modifier_combo};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

const DEFAULT_AVG_TIME_MS: f64 = 2000.0;
const SLOW_ANSWER_MS: f64 = 3000.0;
const WEAKEST_LIMIT: usize = 10;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShortcutStats {
    pub shortcut_id: String,
    pub app: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub keys: Vec<String>,
    /// 0..=1
    pub accuracy: f64,
    pub avg_time_ms: f64,
    pub total_attempts: u32,
    pub last_practiced: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    App,
    Modifier,
    Complexity,
    Category,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeaknessPattern {
    pub kind: PatternKind,
    pub description: String,
    pub shortcut_ids: Vec<String>,
    /// 0..=1, higher is worse.
    pub severity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeaknessReport {
    pub overall_accuracy: f64,
    pub weakest: Vec<(String, f64)>,
    pub patterns: Vec<WeaknessPattern>,
    pub strengths: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Joins shortcuts with their mastery records. Shortcuts never practiced are
/// skipped; `avg_times_ms` supplies answer times where known.
pub fn build_stats(
    shortcuts: &[Shortcut],
    records: &HashMap<String, MasteryRecord>,
    avg_times_ms: &HashMap<String, f64>,
) -> Vec<ShortcutStats> {
    shortcuts
        .iter()
        .filter_map(|s| {
            let record = records.get(&s.id)?;
            Some(ShortcutStats {
                shortcut_id: s.id.clone(),
                app: s.app.clone(),
                category: s.category.clone(),
                difficulty: s.difficulty,
                keys: s.keys.clone(),
                accuracy: record.accuracy(),
                avg_time_ms: avg_times_ms.get(&s.id).copied().unwrap_or(DEFAULT_AVG_TIME_MS),
                total_attempts: record.total_attempts(),
                last_practiced: record.last_seen_at,
            })
        })
        .collect()
}

/// Weakness score in `[0, 100]`; higher needs more practice.
///
/// Accuracy weighs 40, speed 20, staleness 20, and a hard shortcut below 70%
/// accuracy adds a flat 20. Never-practiced counts as fully stale.
pub fn weakness_score(stats: &ShortcutStats, now: DateTime<Utc>) -> f64 {
    let mut score = (1.0 - stats.accuracy) * 40.0;
    score += (stats.avg_time_ms / SLOW_ANSWER_MS).min(1.0) * 20.0;

    let staleness = match stats.last_practiced {
        Some(at) => ((now - at).num_milliseconds() as f64 / 86_400_000.0 / 7.0).min(1.0),
        None => 1.0,
    };
    score += staleness * 20.0;

    if stats.difficulty == Difficulty::Hard && stats.accuracy < 0.7 {
        score += 20.0;
    }
    score.min(100.0)
}

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn group_by<'a>(
    stats: &'a [ShortcutStats],
    key: impl Fn(&ShortcutStats) -> String,
) -> BTreeMap<String, Vec<&'a ShortcutStats>> {
    let mut groups: BTreeMap<String, Vec<&ShortcutStats>> = BTreeMap::new();
    for s in stats {
        groups.entry(key(s)).or_default().push(s);
    }
    groups
}

fn pattern(
    kind: PatternKind,
    description: String,
    group: &[&ShortcutStats],
    avg: f64,
) -> WeaknessPattern {
    WeaknessPattern {
        kind,
        description,
        shortcut_ids: group.iter().map(|s| s.shortcut_id.clone()).collect(),
        severity: 1.0 - avg,
    }
}

fn percent(accuracy: f64) -> i64 {
    (accuracy * 100.0).round() as i64
}

/// Finds groups of shortcuts (by app, modifier combo, key count, category)
/// with low accuracy, most severe first.
pub fn analyze_patterns(stats: &[ShortcutStats]) -> Vec<WeaknessPattern> {
    let mut patterns = Vec::new();

    for (app, group) in group_by(stats, |s| s.app.clone()) {
        let avg = average(group.iter().map(|s| s.accuracy));
        if avg < 0.7 {
            let description = format!(
                "Need more practice with {app} shortcuts ({}% accuracy)",
                percent(avg)
            );
            patterns.push(pattern(PatternKind::App, description, &group, avg));
        }
    }

    for (combo, group) in group_by(stats, |s| modifier_combo(&s.keys)) {
        if combo.is_empty() || group.len() < 2 {
            continue;
        }
        let avg = average(group.iter().map(|s| s.accuracy));
        if avg < 0.7 {
            let description = format!(
                "Struggling with {combo} combinations ({}% accuracy)",
                percent(avg)
            );
            patterns.push(pattern(PatternKind::Modifier, description, &group, avg));
        }
    }

    let three_key: Vec<&ShortcutStats> = stats.iter().filter(|s| s.keys.len() >= 3).collect();
    if three_key.len() >= 2 {
        let avg = average(three_key.iter().map(|s| s.accuracy));
        if avg < 0.6 {
            let description = format!(
                "Three-key combinations need work ({}% accuracy)",
                percent(avg)
            );
            patterns.push(pattern(PatternKind::Complexity, description, &three_key, avg));
        }
    }

    for (category, group) in group_by(stats, |s| s.category.clone()) {
        if group.len() < 2 {
            continue;
        }
        let avg = average(group.iter().map(|s| s.accuracy));
        if avg < 0.65 {
            let description = format!(
                "{category} category needs practice ({}% accuracy)",
                percent(avg)
            );
            patterns.push(pattern(PatternKind::Category, description, &group, avg));
        }
    }

    patterns.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    patterns
}

pub fn generate_report(stats: &[ShortcutStats], now: DateTime<Utc>) -> WeaknessReport {
    if stats.is_empty() {
        return WeaknessReport {
            overall_accuracy: 0.0,
            weakest: Vec::new(),
            patterns: Vec::new(),
            strengths: Vec::new(),
            recommendations: vec!["Start practicing to see your weakness analysis!".to_string()],
        };
    }

    let overall_accuracy = average(stats.iter().map(|s| s.accuracy));
    let patterns = analyze_patterns(stats);

    let mut weakest: Vec<(String, f64)> = stats
        .iter()
        .map(|s| (s.shortcut_id.clone(), weakness_score(s, now)))
        .collect();
    weakest.sort_by(|a, b| b.1.total_cmp(&a.1));
    weakest.truncate(WEAKEST_LIMIT);

    let strengths = group_by(stats, |s| s.app.clone())
        .into_iter()
        .filter_map(|(app, group)| {
            let avg = average(group.iter().map(|s| s.accuracy));
            (avg >= 0.85).then(|| format!("{app} shortcuts ({}%)", percent(avg)))
        })
        .collect();

    let mut recommendations = Vec::new();
    if let Some(top) = patterns.first() {
        recommendations.push(format!("Focus on: {}", top.description));
    }
    if !weakest.is_empty() {
        recommendations.push(format!(
            "Practice your {} weakest shortcuts first",
            weakest.len()
        ));
    }
    if overall_accuracy < 0.7 {
        recommendations.push("Try Practice Mode daily to build muscle memory".to_string());
    } else if overall_accuracy >= 0.9 {
        recommendations.push(
            "Excellent accuracy! Try Speed Run or Time Attack to increase speed".to_string(),
        );
    }

    WeaknessReport {
        overall_accuracy,
        weakest,
        patterns,
        strengths,
        recommendations,
    }
}
