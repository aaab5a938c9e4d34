use keydrill::config::KeydrillConfig;
use keydrill::database::db::{self, ShortcutFilter};
use keydrill::database::ProgressStore;
use keydrill::models::catalog::sample_shortcuts;
use keydrill::models::learning_path::{
    LearningPath, PathOptions, build_path, challenge_path, quick_wins_path, review_path,
};
use keydrill::models::{MasteryTracker, ReviewSchedule};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("KEYDRILL_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_path(path: &LearningPath) {
    println!("\n{} ({})", path.name, path.description);
    for item in &path.items {
        println!(
            "  {:>3}  {:<32} {}",
            item.priority,
            item.shortcut.id,
            item.reason
        );
    }
}

fn main() -> keydrill::Result<()> {
    init_tracing();

    let config = KeydrillConfig::from_env()?;
    let conn = db::init_database(&config.storage.db_path)?;

    if std::env::args().any(|arg| arg == "--advance-day") {
        let date = db::advance_day(&conn)?;
        println!("Current date is now {}", date.format("%Y-%m-%d"));
    }

    let mut shortcuts = db::get_shortcuts(&ShortcutFilter::default(), &conn)?;
    if shortcuts.is_empty() {
        db::save_shortcuts(&sample_shortcuts(), &conn)?;
        shortcuts = db::get_shortcuts(&ShortcutFilter::default(), &conn)?;
        info!(count = shortcuts.len(), "sample shortcuts created");
    }

    let now = db::get_current_date(&conn)?;
    let mut schedule = ReviewSchedule::new();
    schedule.load_all(conn.load_all_cards()?);
    let mut mastery = MasteryTracker::new();
    mastery.load_all(conn.load_all_mastery()?);

    let stats = mastery.stats();
    println!("Date: {}", now.format("%Y-%m-%d"));
    println!(
        "{} shortcuts, {} tracked: {} new, {} learning, {} familiar, {} master ({}% mastered)",
        shortcuts.len(),
        stats.total,
        stats.new,
        stats.learning,
        stats.familiar,
        stats.master,
        mastery.mastery_percent()
    );
    println!(
        "{} due for review, {} reviewed today",
        schedule.due_count(now),
        schedule.reviewed_today(now)
    );

    let options = PathOptions {
        limit: config.paths.default_limit,
        ..PathOptions::default()
    };
    print_path(&build_path(&shortcuts, &mastery, &options));
    print_path(&quick_wins_path(&shortcuts, &mastery, config.paths.quick_wins_limit));
    print_path(&challenge_path(&shortcuts, &mastery, config.paths.challenge_limit));
    print_path(&review_path(&shortcuts, &mastery, now, config.paths.review_limit));

    Ok(())
}
