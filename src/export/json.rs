//! JSON backup of learning progress.
//! Saves and restores review cards, mastery records and XP as one file.

use crate::database::ProgressStore;
use crate::error::Result;
use crate::models::{MasteryRecord, ReviewCard};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub cards: Vec<ReviewCard>,
    pub mastery: Vec<MasteryRecord>,
    #[serde(default)]
    pub total_xp: u64,
}

impl ProgressSnapshot {
    /// Reads every card and mastery record out of a store.
    pub fn from_store(store: &impl ProgressStore, total_xp: u64) -> Result<Self> {
        Ok(Self {
            cards: store.load_all_cards()?,
            mastery: store.load_all_mastery()?,
            total_xp,
        })
    }

    /// Writes every card and mastery record into a store, replacing records
    /// with the same item id.
    pub fn restore_into(&self, store: &impl ProgressStore) -> Result<()> {
        store.save_all_cards(&self.cards)?;
        store.save_all_mastery(&self.mastery)
    }
}

/// Exports a snapshot to a JSON file at the specified path.
pub fn export_json_to_path(snapshot: &ProgressSnapshot, path: impl AsRef<Path>) -> Result<()> {
    let json_string = serde_json::to_string_pretty(snapshot)?;
    fs::write(path.as_ref(), json_string)?;
    info!(
        path = %path.as_ref().display(),
        cards = snapshot.cards.len(),
        mastery = snapshot.mastery.len(),
        "progress exported"
    );
    Ok(())
}

/// Imports a snapshot from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(path: impl AsRef<Path>) -> Result<ProgressSnapshot> {
    let contents = fs::read_to_string(path.as_ref())?;
    let snapshot: ProgressSnapshot = serde_json::from_str(&contents)?;
    info!(path = %path.as_ref().display(), "progress imported");
    Ok(snapshot)
}
