pub mod db;

use crate::error::Result;
use crate::models::{MasteryRecord, ReviewCard};
use rusqlite::Connection;

/// Keyed persistence for review cards and mastery records.
///
/// The scheduler never touches storage itself; callers load the maps once per
/// session and write records back through this trait.
pub trait ProgressStore {
    fn load_all_cards(&self) -> Result<Vec<ReviewCard>>;
    fn save_card(&self, card: &ReviewCard) -> Result<()>;
    fn save_all_cards(&self, cards: &[ReviewCard]) -> Result<()>;

    fn load_all_mastery(&self) -> Result<Vec<MasteryRecord>>;
    fn save_mastery(&self, record: &MasteryRecord) -> Result<()>;
    fn save_all_mastery(&self, records: &[MasteryRecord]) -> Result<()>;

    fn clear_all_data(&self) -> Result<()>;
}

impl ProgressStore for Connection {
    fn load_all_cards(&self) -> Result<Vec<ReviewCard>> {
        db::load_all_cards(self)
    }

    fn save_card(&self, card: &ReviewCard) -> Result<()> {
        db::save_card(card, self)
    }

    fn save_all_cards(&self, cards: &[ReviewCard]) -> Result<()> {
        db::save_all_cards(cards, self)
    }

    fn load_all_mastery(&self) -> Result<Vec<MasteryRecord>> {
        db::load_all_mastery(self)
    }

    fn save_mastery(&self, record: &MasteryRecord) -> Result<()> {
        db::save_mastery(record, self)
    }

    fn save_all_mastery(&self, records: &[MasteryRecord]) -> Result<()> {
        db::save_all_mastery(records, self)
    }

    fn clear_all_data(&self) -> Result<()> {
        db::clear_all_data(self)
    }
}
