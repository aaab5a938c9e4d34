pub mod catalog;
pub mod learning_path;
pub mod leveling;
pub mod mastery;
pub mod mastery_record;
pub mod mastery_tracker;
pub mod quality;
pub mod review_card;
pub mod review_session;
pub mod schedule;
pub mod shortcut;
pub mod sm2;
pub mod weakness;

pub use learning_path::{LearningPath, LearningPathItem, PathOptions};
pub use leveling::XpLedger;
pub use mastery_record::{MasteryRecord, MasteryTier};
pub use mastery_tracker::{MasteryLookup, MasteryStats, MasteryTracker};
pub use quality::{Quality, derive_quality};
pub use review_card::ReviewCard;
pub use review_session::ReviewSession;
pub use schedule::ReviewSchedule;
pub use shortcut::{Difficulty, Frequency, Shortcut};
