pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;

pub use error::{Error, Result};
pub use models::{
    MasteryRecord, MasteryTier, MasteryTracker, Quality, ReviewCard, ReviewSchedule, Shortcut,
};
