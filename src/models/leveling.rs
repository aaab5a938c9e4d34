//! XP and player levels.
//!
//! Completing level `n` costs `floor(100 * n^1.5)` XP; the level is derived from
//! cumulative XP.

use serde::{Deserialize, Serialize};

pub const XP_CORRECT_ANSWER: u64 = 10;
pub const XP_PERFECT_TIMING: u64 = 25;
pub const XP_STREAK_5: u64 = 50;
pub const XP_STREAK_10: u64 = 100;
pub const XP_STREAK_20: u64 = 200;
pub const XP_DAILY_CHALLENGE: u64 = 100;
pub const XP_BOSS_DEFEATED: u64 = 250;

/// Game modes unlocked on reaching each level.
pub const LEVEL_UNLOCKS: [(u32, &str); 9] = [
    (1, "Practice, Flash Round"),
    (5, "Speed Run"),
    (10, "Survival, Time Attack"),
    (15, "Daily Challenge"),
    (20, "Rhythm Mode"),
    (25, "Memory Match"),
    (30, "Blind Mode"),
    (40, "Boss Battle"),
    (50, "Endless Mode"),
];

pub fn xp_for_level(level: u32) -> u64 {
    (100.0 * f64::from(level).powf(1.5)).floor() as u64
}

pub fn level_from_xp(xp: u64) -> u32 {
    let mut level = 1;
    let mut required: u64 = 0;
    while let Some(next) = required.checked_add(xp_for_level(level)) {
        if next > xp {
            break;
        }
        required = next;
        level += 1;
    }
    level
}

/// Cumulative XP spent on all levels below `level`.
pub fn xp_at_level_start(level: u32) -> u64 {
    (1..level).map(xp_for_level).fold(0, u64::saturating_add)
}

pub fn unlock_at(level: u32) -> Option<&'static str> {
    LEVEL_UNLOCKS
        .iter()
        .find(|(at, _)| *at == level)
        .map(|(_, unlock)| *unlock)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpEvent {
    pub previous_level: u32,
    pub new_level: u32,
    pub unlock: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpLedger {
    pub total_xp: u64,
}

impl XpLedger {
    pub fn new(total_xp: u64) -> Self {
        Self { total_xp }
    }

    pub fn level(&self) -> u32 {
        level_from_xp(self.total_xp)
    }

    /// Adds XP and reports a level-up if one happened.
    pub fn add_xp(&mut self, amount: u64) -> Option<LevelUpEvent> {
        let previous_level = self.level();
        self.total_xp = self.total_xp.saturating_add(amount);
        let new_level = self.level();
        (new_level > previous_level).then(|| LevelUpEvent {
            previous_level,
            new_level,
            unlock: unlock_at(new_level).map(str::to_string),
        })
    }

    pub fn xp_in_current_level(&self) -> u64 {
        self.total_xp - xp_at_level_start(self.level())
    }

    pub fn xp_needed_for_next_level(&self) -> u64 {
        xp_for_level(self.level())
    }

    /// Fraction of the current level completed, in `[0, 1)`.
    pub fn level_progress(&self) -> f64 {
        self.xp_in_current_level() as f64 / self.xp_needed_for_next_level() as f64
    }

    pub fn next_unlock(&self) -> Option<(u32, &'static str)> {
        let level = self.level();
        LEVEL_UNLOCKS.iter().copied().find(|(at, _)| *at > level)
    }

    pub fn is_unlocked(&self, required_level: u32) -> bool {
        self.level() >= required_level
    }
}
