use chrono::{DateTime, Duration, TimeZone, Utc};
use keydrill::database::ProgressStore;
use keydrill::database::db::{self, ShortcutFilter};
use keydrill::models::catalog::sample_shortcuts;
use keydrill::models::learning_path::{PathOptions, build_path, review_path};
use keydrill::models::quality::derive_quality;
use keydrill::models::{
    Difficulty, Frequency, MasteryTier, MasteryTracker, ReviewSchedule, ReviewSession, Shortcut,
};
use std::collections::HashMap;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn shortcut(id: &str, difficulty: Difficulty, frequency: Frequency) -> Shortcut {
    Shortcut {
        id: id.to_string(),
        app: "vscode".to_string(),
        category: "general".to_string(),
        action: id.to_string(),
        description: String::new(),
        keys: vec!["Ctrl".into(), "S".into()],
        difficulty,
        frequency,
    }
}

#[test]
fn quality_table() {
    assert_eq!(derive_quality(true, 0).value(), 5);
    assert_eq!(derive_quality(true, 1).value(), 4);
    assert_eq!(derive_quality(true, 5).value(), 3);
    assert_eq!(derive_quality(false, 0).value(), 2);
    assert_eq!(derive_quality(false, 3).value(), 0);
}

#[test]
fn three_perfect_reviews_give_1_6_16() {
    let mut schedule = ReviewSchedule::new();
    let intervals: Vec<u32> = (0..3)
        .map(|_| schedule.record_review("vscode-save", true, 0, now()).interval_days)
        .collect();
    assert_eq!(intervals, vec![1, 6, 16]);

    let card = schedule.card("vscode-save").unwrap();
    assert!((card.ease_factor - 2.8).abs() < 1e-9);
    assert_eq!(card.repetitions, 3);
}

#[test]
fn build_path_scenario() {
    let shortcuts = vec![
        shortcut("fresh", Difficulty::Easy, Frequency::Common),
        shortcut("known", Difficulty::Hard, Frequency::Rare),
        shortcut("done", Difficulty::Easy, Frequency::Common),
    ];
    let mastery: HashMap<String, MasteryTier> = HashMap::from([
        ("fresh".to_string(), MasteryTier::New),
        ("known".to_string(), MasteryTier::Familiar),
        ("done".to_string(), MasteryTier::Master),
    ]);

    let path = build_path(&shortcuts, &mastery, &PathOptions::default());
    assert_eq!(path.shortcut_ids(), vec!["fresh", "known"]);
}

#[test]
fn session_progress_survives_store_roundtrip() {
    let conn = db::init_in_memory().unwrap();
    db::set_current_date(now(), &conn).unwrap();
    db::save_shortcuts(&sample_shortcuts(), &conn).unwrap();
    let shortcuts = db::get_shortcuts(&ShortcutFilter::default(), &conn).unwrap();

    let mut schedule = ReviewSchedule::new();
    let mut mastery = MasteryTracker::new();
    for s in &shortcuts {
        schedule.get_or_create(&s.id, now());
    }

    let today = db::get_current_date(&conn).unwrap();
    let mut session = ReviewSession::from_due(&schedule, today);
    assert_eq!(session.total_count(), shortcuts.len());
    while !session.is_completed() {
        session.answer(true, today, &mut schedule, &mut mastery);
    }

    conn.save_all_cards(&schedule.all_cards()).unwrap();
    conn.save_all_mastery(&mastery.all_records()).unwrap();

    // Nothing is due until the simulated clock moves a day forward
    assert!(db::get_due_for_review(today, None, &conn).unwrap().is_empty());
    let tomorrow = db::advance_day(&conn).unwrap();
    assert_eq!(
        db::get_due_for_review(tomorrow, None, &conn).unwrap().len(),
        shortcuts.len()
    );

    let mut reloaded = MasteryTracker::new();
    reloaded.load_all(conn.load_all_mastery().unwrap());
    assert_eq!(reloaded.stats().learning, shortcuts.len());

    // Everything was seen today, so the review path only fills up tomorrow
    assert!(review_path(&shortcuts, &reloaded, today, 15).items.is_empty());
    assert_eq!(
        review_path(&shortcuts, &reloaded, tomorrow, 15).items.len(),
        shortcuts.len()
    );
}

#[test]
fn missing_records_are_created_on_demand() {
    let mut schedule = ReviewSchedule::new();
    let mut mastery = MasteryTracker::new();

    let card = schedule.record_review("unknown", false, 0, now());
    assert_eq!(card.interval_days, 1);
    assert_eq!(mastery.record_incorrect("unknown", now()), MasteryTier::New);
    assert_eq!(schedule.due_count(now() + Duration::days(1)), 1);
}
