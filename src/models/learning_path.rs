//! Suggested learning paths built from mastery, frequency and difficulty.

use super::mastery_record::MasteryTier;
use super::mastery_tracker::MasteryLookup;
use super::shortcut::{Difficulty, Frequency, Shortcut};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_PATH_LIMIT: usize = 20;
pub const DEFAULT_QUICK_WINS_LIMIT: usize = 10;
pub const DEFAULT_CHALLENGE_LIMIT: usize = 10;
pub const DEFAULT_REVIEW_LIMIT: usize = 15;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LearningPathItem {
    pub shortcut: Shortcut,
    pub reason: String,
    /// Lower is practiced sooner.
    pub priority: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LearningPath {
    pub name: String,
    pub description: String,
    pub items: Vec<LearningPathItem>,
}

impl LearningPath {
    pub fn shortcut_ids(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.shortcut.id.as_str()).collect()
    }
}

#[derive(Clone, Debug)]
pub struct PathOptions {
    pub app: Option<String>,
    pub category: Option<String>,
    pub exclude_mastered: bool,
    pub limit: usize,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            app: None,
            category: None,
            exclude_mastered: true,
            limit: DEFAULT_PATH_LIMIT,
        }
    }
}

/// mastery × 100 + frequency × 10 + difficulty
pub fn priority_score(tier: MasteryTier, frequency: Frequency, difficulty: Difficulty) -> u32 {
    tier.rank() * 100 + frequency.rank() * 10 + difficulty.rank()
}

/// Builds the main path: untouched and everyday shortcuts first, easy before
/// hard.
pub fn build_path(
    shortcuts: &[Shortcut],
    mastery: &impl MasteryLookup,
    options: &PathOptions,
) -> LearningPath {
    let mut items: Vec<LearningPathItem> = shortcuts
        .iter()
        .filter(|s| options.app.as_ref().is_none_or(|app| &s.app == app))
        .filter(|s| options.category.as_ref().is_none_or(|c| &s.category == c))
        .filter_map(|s| {
            let tier = mastery.tier_of(&s.id);
            if options.exclude_mastered && tier == MasteryTier::Master {
                return None;
            }
            let reason = match tier {
                MasteryTier::New => "Never practiced, start here".to_string(),
                MasteryTier::Learning => "Still learning, needs more repetition".to_string(),
                _ => format!("Familiar but not mastered, {} use", s.frequency),
            };
            Some(LearningPathItem {
                shortcut: s.clone(),
                reason,
                priority: priority_score(tier, s.frequency, s.difficulty),
            })
        })
        .collect();

    items.sort_by_key(|item| item.priority);
    items.truncate(options.limit);

    let name = match &options.app {
        Some(app) => format!("{app} Learning Path"),
        None => "Recommended Learning Path".to_string(),
    };

    LearningPath {
        name,
        description: format!(
            "{} shortcuts ordered by priority, most impactful first",
            items.len()
        ),
        items,
    }
}

fn sequential(
    shortcuts: Vec<&Shortcut>,
    reason: impl Fn(&Shortcut) -> String,
) -> Vec<LearningPathItem> {
    shortcuts
        .into_iter()
        .zip(0..)
        .map(|(s, priority)| LearningPathItem {
            shortcut: s.clone(),
            reason: reason(s),
            priority,
        })
        .collect()
}

/// Easy, common shortcuts not yet mastered.
pub fn quick_wins_path(
    shortcuts: &[Shortcut],
    mastery: &impl MasteryLookup,
    limit: usize,
) -> LearningPath {
    let picked: Vec<&Shortcut> = shortcuts
        .iter()
        .filter(|s| s.difficulty == Difficulty::Easy && s.frequency == Frequency::Common)
        .filter(|s| mastery.tier_of(&s.id) != MasteryTier::Master)
        .take(limit)
        .collect();
    let items = sequential(picked, |_| {
        "Easy and common, highest impact for beginners".to_string()
    });

    LearningPath {
        name: "Quick Wins".to_string(),
        description: format!(
            "{} easy, high-frequency shortcuts to master first",
            items.len()
        ),
        items,
    }
}

/// Hard shortcuts not yet mastered.
pub fn challenge_path(
    shortcuts: &[Shortcut],
    mastery: &impl MasteryLookup,
    limit: usize,
) -> LearningPath {
    let picked: Vec<&Shortcut> = shortcuts
        .iter()
        .filter(|s| s.difficulty == Difficulty::Hard)
        .filter(|s| mastery.tier_of(&s.id) != MasteryTier::Master)
        .take(limit)
        .collect();
    let items = sequential(picked, |_| {
        "Hard shortcut, mastering this will set you apart".to_string()
    });

    LearningPath {
        name: "Challenge Mode".to_string(),
        description: format!("{} hard shortcuts to level up your skills", items.len()),
        items,
    }
}

/// Practiced shortcuts not seen for at least a day, least recently seen first.
/// Shortcuts with no last-seen time lead the list.
pub fn review_path(
    shortcuts: &[Shortcut],
    mastery: &impl MasteryLookup,
    now: DateTime<Utc>,
    limit: usize,
) -> LearningPath {
    let mut picked: Vec<(&Shortcut, Option<DateTime<Utc>>)> = shortcuts
        .iter()
        .filter(|s| mastery.tier_of(&s.id) != MasteryTier::New)
        .map(|s| (s, mastery.last_seen(&s.id)))
        .filter(|(_, seen)| seen.is_none_or(|at| (now - at).num_days() >= 1))
        .collect();
    // None sorts before Some, so never-seen shortcuts come first
    picked.sort_by_key(|(_, seen)| *seen);
    picked.truncate(limit);

    let items = picked
        .into_iter()
        .zip(0..)
        .map(|((s, seen), priority)| {
            let when = match seen {
                Some(at) => format!("{}d ago", (now - at).num_days()),
                None => "never".to_string(),
            };
            LearningPathItem {
                shortcut: s.clone(),
                reason: format!("Last practiced {when}, time to review"),
                priority,
            }
        })
        .collect::<Vec<_>>();

    LearningPath {
        name: "Review Session".to_string(),
        description: format!("{} shortcuts due for review", items.len()),
        items,
    }
}
