//! Database operations for shortcut progress
//!
//! Handles SQLite database initialization, the shortcut catalog, SM-2 review
//! cards, mastery records and the simulated current date.

use crate::error::{Error, Result};
use crate::models::{
    Difficulty, Frequency, MasteryRecord, MasteryStats, MasteryTier, ReviewCard, Shortcut,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::types::{
    FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::Path;
use tracing::{debug, info};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS shortcuts (
        id TEXT PRIMARY KEY,
        app TEXT NOT NULL,
        category TEXT NOT NULL,
        action TEXT NOT NULL,
        description TEXT NOT NULL,
        keys TEXT NOT NULL,
        difficulty TEXT NOT NULL,
        frequency TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_shortcuts_app ON shortcuts(app, category);

    CREATE TABLE IF NOT EXISTS review_cards (
        item_id TEXT PRIMARY KEY,
        interval_days INTEGER NOT NULL DEFAULT 0,
        repetitions INTEGER NOT NULL DEFAULT 0,
        ease_factor REAL NOT NULL DEFAULT 2.5,
        next_review_at INTEGER NOT NULL,
        last_reviewed_at INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_review_cards_due ON review_cards(next_review_at);

    CREATE TABLE IF NOT EXISTS mastery (
        item_id TEXT PRIMARY KEY,
        tier TEXT NOT NULL DEFAULT 'new',
        correct_count INTEGER NOT NULL DEFAULT 0,
        incorrect_count INTEGER NOT NULL DEFAULT 0,
        current_streak INTEGER NOT NULL DEFAULT 0,
        last_seen_at INTEGER
    );

    CREATE TABLE IF NOT EXISTS app_state (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";

macro_rules! text_enum_sql {
    ($ty:ty) => {
        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

text_enum_sql!(MasteryTier);
text_enum_sql!(Difficulty);
text_enum_sql!(Frequency);

fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis).ok_or(Error::InvalidTimestamp { millis })
}

/// Column-level variant of [`from_millis`] for use inside row mappers.
fn column_millis(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let millis: i64 = row.get(idx)?;
    from_millis(millis).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e))
    })
}

fn column_opt_millis(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<i64>>(idx)? {
        Some(_) => column_millis(row, idx).map(Some),
        None => Ok(None),
    }
}

/// Unwraps crate errors raised inside row mappers so corrupt rows surface as
/// `InvalidTimestamp` or `UnknownVariant` rather than a generic database error.
fn row_error(err: rusqlite::Error) -> Error {
    let rusqlite::Error::FromSqlConversionFailure(idx, ty, inner) = err else {
        return err.into();
    };
    match inner.downcast::<Error>() {
        Ok(own) => *own,
        Err(inner) => rusqlite::Error::FromSqlConversionFailure(idx, ty, inner).into(),
    }
}

/// Opens (or creates) the database at `path` and ensures the schema exists.
///
/// Sets the current date to now if not already initialized.
pub fn init_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let conn = Connection::open(path)?;
    prepare(&conn)?;
    info!(path = %path.display(), "progress database ready");
    Ok(conn)
}

/// In-memory database with the same schema, for tests and throwaway sessions.
pub fn init_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    prepare(&conn)?;
    Ok(conn)
}

fn prepare(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.execute(
        "INSERT OR IGNORE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![to_millis(Utc::now()).to_string()],
    )?;
    Ok(())
}

/// Retrieves current simulated date from database
pub fn get_current_date(conn: &Connection) -> Result<DateTime<Utc>> {
    let value: String = conn.query_row(
        "SELECT value FROM app_state WHERE key = 'current_date'",
        [],
        |row| row.get(0),
    )?;
    let millis = value
        .parse::<i64>()
        .map_err(|_| Error::InvalidState {
            key: "current_date",
            value,
        })?;
    from_millis(millis)
}

pub fn set_current_date(date: DateTime<Utc>, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES ('current_date', ?1)",
        params![to_millis(date).to_string()],
    )?;
    Ok(())
}

/// Advances current date by 24 hours (fast-forwards the review schedule)
pub fn advance_day(conn: &Connection) -> Result<DateTime<Utc>> {
    let next_day = get_current_date(conn)? + Duration::days(1);
    set_current_date(next_day, conn)?;
    debug!(date = %next_day, "advanced current date");
    Ok(next_day)
}

// ============ Shortcuts ============

/// Inserts or replaces shortcuts in the catalog
pub fn save_shortcuts(shortcuts: &[Shortcut], conn: &Connection) -> Result<()> {
    let mut stmt = conn.prepare(
        "INSERT OR REPLACE INTO shortcuts
         (id, app, category, action, description, keys, difficulty, frequency)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for s in shortcuts {
        stmt.execute(params![
            s.id,
            s.app,
            s.category,
            s.action,
            s.description,
            serde_json::to_string(&s.keys)?,
            s.difficulty,
            s.frequency,
        ])?;
    }
    debug!(count = shortcuts.len(), "saved shortcuts");
    Ok(())
}

/// Optional catalog filters; unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct ShortcutFilter {
    pub app: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

fn shortcut_from_row(row: &Row<'_>) -> rusqlite::Result<(Shortcut, String)> {
    Ok((
        Shortcut {
            id: row.get(0)?,
            app: row.get(1)?,
            category: row.get(2)?,
            action: row.get(3)?,
            description: row.get(4)?,
            keys: Vec::new(),
            difficulty: row.get(6)?,
            frequency: row.get(7)?,
        },
        row.get(5)?,
    ))
}

fn with_keys((mut shortcut, keys): (Shortcut, String)) -> Result<Shortcut> {
    shortcut.keys = serde_json::from_str(&keys)?;
    Ok(shortcut)
}

/// Retrieves shortcuts matching the filter, ordered by id
pub fn get_shortcuts(filter: &ShortcutFilter, conn: &Connection) -> Result<Vec<Shortcut>> {
    let mut stmt = conn.prepare(
        "SELECT id, app, category, action, description, keys, difficulty, frequency
         FROM shortcuts
         WHERE (?1 IS NULL OR app = ?1)
           AND (?2 IS NULL OR category = ?2)
           AND (?3 IS NULL OR difficulty = ?3)
         ORDER BY id",
    )?;

    let rows = stmt
        .query_map(
            params![filter.app, filter.category, filter.difficulty],
            shortcut_from_row,
        )?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(row_error)?;

    rows.into_iter().map(with_keys).collect()
}

pub fn get_shortcut_by_id(id: &str, conn: &Connection) -> Result<Option<Shortcut>> {
    let row = conn
        .query_row(
            "SELECT id, app, category, action, description, keys, difficulty, frequency
             FROM shortcuts WHERE id = ?1",
            params![id],
            shortcut_from_row,
        )
        .optional()
        .map_err(row_error)?;
    row.map(with_keys).transpose()
}

// ============ Review cards ============

fn card_from_row(row: &Row<'_>) -> rusqlite::Result<ReviewCard> {
    Ok(ReviewCard {
        item_id: row.get(0)?,
        interval_days: row.get(1)?,
        repetitions: row.get(2)?,
        ease_factor: row.get(3)?,
        next_review_at: column_millis(row, 4)?,
        last_reviewed_at: column_opt_millis(row, 5)?,
    })
}

const CARD_COLUMNS: &str =
    "item_id, interval_days, repetitions, ease_factor, next_review_at, last_reviewed_at";

pub fn load_all_cards(conn: &Connection) -> Result<Vec<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS} FROM review_cards ORDER BY item_id"
    ))?;
    let cards = stmt
        .query_map([], card_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(row_error)?;
    Ok(cards)
}

/// Inserts or updates the SM-2 state of one card
pub fn save_card(card: &ReviewCard, conn: &Connection) -> Result<()> {
    conn.execute(
        &format!("INSERT OR REPLACE INTO review_cards ({CARD_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
        params![
            card.item_id,
            card.interval_days,
            card.repetitions,
            card.ease_factor,
            to_millis(card.next_review_at),
            card.last_reviewed_at.map(to_millis),
        ],
    )?;
    debug!(item_id = %card.item_id, "saved review card");
    Ok(())
}

/// Saves all cards in a single transaction
pub fn save_all_cards(cards: &[ReviewCard], conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for card in cards {
        save_card(card, &tx)?;
    }
    tx.commit()?;
    Ok(())
}

/// Retrieves cards due for review
///
/// Returns cards where next_review_at <= now, soonest first, ties by item id.
pub fn get_due_for_review(
    now: DateTime<Utc>,
    limit: Option<usize>,
    conn: &Connection,
) -> Result<Vec<ReviewCard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CARD_COLUMNS} FROM review_cards
         WHERE next_review_at <= ?1
         ORDER BY next_review_at ASC, item_id ASC
         LIMIT ?2"
    ))?;
    // SQLite treats a negative LIMIT as unbounded
    let limit = limit.map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));
    let cards = stmt
        .query_map(params![to_millis(now), limit], card_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(row_error)?;
    Ok(cards)
}

// ============ Mastery ============

fn mastery_from_row(row: &Row<'_>) -> rusqlite::Result<MasteryRecord> {
    Ok(MasteryRecord {
        item_id: row.get(0)?,
        tier: row.get(1)?,
        correct_count: row.get(2)?,
        incorrect_count: row.get(3)?,
        current_streak: row.get(4)?,
        last_seen_at: column_opt_millis(row, 5)?,
    })
}

pub fn load_all_mastery(conn: &Connection) -> Result<Vec<MasteryRecord>> {
    let mut stmt = conn.prepare(
        "SELECT item_id, tier, correct_count, incorrect_count, current_streak, last_seen_at
         FROM mastery ORDER BY item_id",
    )?;
    let records = stmt
        .query_map([], mastery_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(row_error)?;
    Ok(records)
}

pub fn save_mastery(record: &MasteryRecord, conn: &Connection) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO mastery
         (item_id, tier, correct_count, incorrect_count, current_streak, last_seen_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.item_id,
            record.tier,
            record.correct_count,
            record.incorrect_count,
            record.current_streak,
            record.last_seen_at.map(to_millis),
        ],
    )?;
    debug!(item_id = %record.item_id, tier = %record.tier, "saved mastery");
    Ok(())
}

/// Saves all records in a single transaction
pub fn save_all_mastery(records: &[MasteryRecord], conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    for record in records {
        save_mastery(record, &tx)?;
    }
    tx.commit()?;
    Ok(())
}

/// Tier counts and answer totals across all stored mastery records
pub fn get_progress_stats(conn: &Connection) -> Result<MasteryStats> {
    let mut stmt = conn.prepare("SELECT tier, correct_count, incorrect_count FROM mastery")?;
    let mut rows = stmt.query([])?;
    let mut stats = MasteryStats::default();
    while let Some(row) = rows.next()? {
        stats.add(row.get(0)?, row.get(1)?, row.get(2)?);
    }
    Ok(stats)
}

/// Removes all progress and catalog data; the current date is kept
pub fn clear_all_data(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "DELETE FROM shortcuts;
         DELETE FROM review_cards;
         DELETE FROM mastery;",
    )?;
    info!("cleared all progress data");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::sample_shortcuts;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_current_date_advances() {
        let conn = init_in_memory().unwrap();
        set_current_date(now(), &conn).unwrap();
        assert_eq!(get_current_date(&conn).unwrap(), now());
        assert_eq!(advance_day(&conn).unwrap(), now() + Duration::days(1));
        assert_eq!(get_current_date(&conn).unwrap(), now() + Duration::days(1));
    }

    #[test]
    fn test_shortcut_filters() {
        let conn = init_in_memory().unwrap();
        save_shortcuts(&sample_shortcuts(), &conn).unwrap();

        let all = get_shortcuts(&ShortcutFilter::default(), &conn).unwrap();
        assert_eq!(all.len(), sample_shortcuts().len());

        let filter = ShortcutFilter {
            app: Some("chrome".to_string()),
            difficulty: Some(Difficulty::Medium),
            ..ShortcutFilter::default()
        };
        let chrome: Vec<String> = get_shortcuts(&filter, &conn)
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(chrome, vec!["chrome-devtools", "chrome-reopen-tab"]);

        let ids = |filter: ShortcutFilter| -> Vec<String> {
            get_shortcuts(&filter, &conn)
                .unwrap()
                .into_iter()
                .map(|s| s.id)
                .collect()
        };
        let developer = ShortcutFilter {
            category: Some("developer".to_string()),
            ..ShortcutFilter::default()
        };
        assert_eq!(ids(developer), vec!["chrome-devtools", "chrome-task-manager"]);

        let hard_editing = ShortcutFilter {
            app: Some("vscode".to_string()),
            category: Some("editing".to_string()),
            difficulty: Some(Difficulty::Hard),
        };
        assert_eq!(ids(hard_editing), vec!["vscode-block-comment"]);

        let mismatched = ShortcutFilter {
            app: Some("vscode".to_string()),
            category: Some("tabs".to_string()),
            ..ShortcutFilter::default()
        };
        assert!(ids(mismatched).is_empty());

        let palette = get_shortcut_by_id("vscode-command-palette", &conn)
            .unwrap()
            .unwrap();
        assert_eq!(palette.keys, vec!["Ctrl", "Shift", "P"]);
        assert!(get_shortcut_by_id("missing", &conn).unwrap().is_none());
    }

    #[test]
    fn test_card_roundtrip() {
        let conn = init_in_memory().unwrap();
        let mut reviewed = ReviewCard::new("a", now());
        reviewed.interval_days = 6;
        reviewed.repetitions = 2;
        reviewed.ease_factor = 2.7;
        reviewed.last_reviewed_at = Some(now());
        reviewed.next_review_at = now() + Duration::days(6);
        let fresh = ReviewCard::new("b", now());

        save_all_cards(&[reviewed.clone(), fresh.clone()], &conn).unwrap();
        assert_eq!(load_all_cards(&conn).unwrap(), vec![reviewed, fresh]);
    }

    #[test]
    fn test_due_query() {
        let conn = init_in_memory().unwrap();
        save_card(&ReviewCard::new("late", now() - Duration::hours(1)), &conn).unwrap();
        save_card(&ReviewCard::new("early", now() - Duration::days(2)), &conn).unwrap();
        save_card(&ReviewCard::new("tie", now() - Duration::hours(1)), &conn).unwrap();
        save_card(&ReviewCard::new("future", now() + Duration::days(1)), &conn).unwrap();

        let ids: Vec<String> = get_due_for_review(now(), None, &conn)
            .unwrap()
            .into_iter()
            .map(|c| c.item_id)
            .collect();
        assert_eq!(ids, vec!["early", "late", "tie"]);
        assert_eq!(get_due_for_review(now(), Some(1), &conn).unwrap().len(), 1);
    }

    #[test]
    fn test_mastery_roundtrip_and_stats() {
        let conn = init_in_memory().unwrap();
        let mut familiar = MasteryRecord::new("a");
        familiar.tier = MasteryTier::Familiar;
        familiar.correct_count = 6;
        familiar.incorrect_count = 2;
        familiar.current_streak = 3;
        familiar.last_seen_at = Some(now());
        let fresh = MasteryRecord::new("b");

        save_all_mastery(&[familiar.clone(), fresh.clone()], &conn).unwrap();
        assert_eq!(load_all_mastery(&conn).unwrap(), vec![familiar, fresh]);

        let stats = get_progress_stats(&conn).unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.familiar, 1);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.total_correct, 6);
        assert_eq!(stats.total_incorrect, 2);
    }

    #[test]
    fn test_bad_tier_is_an_error() {
        let conn = init_in_memory().unwrap();
        conn.execute(
            "INSERT INTO mastery (item_id, tier) VALUES ('a', 'guru')",
            [],
        )
        .unwrap();
        assert!(matches!(
            load_all_mastery(&conn),
            Err(Error::UnknownVariant { kind: "mastery tier", .. })
        ));
    }

    #[test]
    fn test_corrupt_timestamp_is_reported() {
        let conn = init_in_memory().unwrap();
        conn.execute(
            "INSERT INTO review_cards (item_id, next_review_at) VALUES ('a', ?1)",
            params![i64::MAX],
        )
        .unwrap();
        assert!(matches!(
            load_all_cards(&conn),
            Err(Error::InvalidTimestamp { millis: i64::MAX })
        ));

        save_card(&ReviewCard::new("b", now()), &conn).unwrap();
        conn.execute(
            "UPDATE review_cards SET last_reviewed_at = ?1 WHERE item_id = 'b'",
            params![i64::MIN],
        )
        .unwrap();
        conn.execute("DELETE FROM review_cards WHERE item_id = 'a'", []).unwrap();
        assert!(matches!(
            get_due_for_review(now(), None, &conn),
            Err(Error::InvalidTimestamp { millis: i64::MIN })
        ));
    }

    #[test]
    fn test_clear_all_data() {
        let conn = init_in_memory().unwrap();
        save_shortcuts(&sample_shortcuts(), &conn).unwrap();
        save_card(&ReviewCard::new("a", now()), &conn).unwrap();
        save_mastery(&MasteryRecord::new("a"), &conn).unwrap();

        clear_all_data(&conn).unwrap();
        assert!(load_all_cards(&conn).unwrap().is_empty());
        assert!(load_all_mastery(&conn).unwrap().is_empty());
        assert!(get_shortcuts(&ShortcutFilter::default(), &conn).unwrap().is_empty());
        assert!(get_current_date(&conn).is_ok());
    }
}
