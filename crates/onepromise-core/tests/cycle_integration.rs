//! Integration tests for the daily promise cycle.
//!
//! These run the full stack: cycle engine on top of the SQLite-backed
//! key-value store, across simulated restarts and day boundaries.

use chrono::{DateTime, Local, TimeZone};
use onepromise_core::storage::Database;
use onepromise_core::{
    CycleEngine, CycleState, Event, HistoryLedger, KvStore, MemoryKv, Outcome, PostLogoutFlag,
    Thumb,
};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

#[test]
fn test_full_day_against_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let morning = at(2024, 3, 11, 8, 30);
    let evening = at(2024, 3, 11, 21, 0);

    {
        let db = Database::open_at(&path).unwrap();
        let mut engine = CycleEngine::new(&db);
        assert_eq!(engine.resume(morning), CycleState::Create);

        engine.submit("Go to bed by 23:00", morning).unwrap();
        engine.confirm(morning);
    }

    // Restart in the evening: the promise is still there.
    {
        let db = Database::open_at(&path).unwrap();
        let mut engine = CycleEngine::new(&db);
        assert_eq!(engine.resume(evening), CycleState::Reflect);

        let event = engine.reflect(Thumb::Up, evening).unwrap();
        assert!(matches!(
            event,
            Some(Event::ReflectionRecorded {
                outcome: Outcome::Kept,
                ..
            })
        ));
    }

    // And the outcome survives another restart.
    let db = Database::open_at(&path).unwrap();
    let mut engine = CycleEngine::new(&db);
    assert_eq!(engine.resume(evening), CycleState::Rest);

    let entries = engine.ledger().list_all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].day_key, "2024-03-11");
    assert_eq!(entries[0].promise, "Go to bed by 23:00");
    assert_eq!(entries[0].outcome, Some(Outcome::Kept));
}

#[test]
fn test_day_rolls_over_at_six() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let db = Database::open_at(&path).unwrap();

    let mut engine = CycleEngine::new(&db);
    engine.submit("Late night promise", at(2024, 3, 11, 23, 50)).unwrap();

    // 01:30 is still March 11th as far as the journal is concerned.
    let mut engine = CycleEngine::new(&db);
    assert_eq!(engine.resume(at(2024, 3, 12, 1, 30)), CycleState::Reflect);

    // 06:05 starts a fresh day; yesterday's promise no longer occupies
    // the slot, but its ledger entry remains.
    let mut engine = CycleEngine::new(&db);
    assert_eq!(engine.resume(at(2024, 3, 12, 6, 5)), CycleState::Create);
    assert_eq!(engine.ledger().list_all().len(), 1);
}

#[test]
fn test_week_summary_over_several_days() {
    let store = MemoryKv::new();
    let mut engine = CycleEngine::new(&store);

    let days = [
        (at(2024, 3, 11, 9, 0), "Walk to work", Thumb::Up),
        (at(2024, 3, 13, 9, 0), "No coffee after lunch", Thumb::Down),
        (at(2024, 3, 15, 9, 0), "Read before bed", Thumb::Up),
    ];
    for (day, text, thumb) in days {
        engine.resume(day);
        engine.submit(text, day).unwrap();
        engine.confirm(day);
        engine.reflect(thumb, day).unwrap();
    }

    // Sunday evening still belongs to the same calendar week.
    let sunday = at(2024, 3, 17, 21, 0);
    let summary = engine.ledger().week_summary(sunday);
    assert_eq!(summary.made, 3);
    assert_eq!(summary.kept, 2);
    assert_eq!(
        summary.headline(),
        "You kept 2 out of 3 promises this week."
    );

    // The next Monday opens an empty week.
    let next_monday = at(2024, 3, 18, 9, 0);
    assert_eq!(engine.ledger().week_summary(next_monday).made, 0);
}

#[test]
fn test_repair_pass_heals_legacy_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let db = Database::open_at(&path).unwrap();

    // Ledger written by an older build: one entry holds a value the
    // normalizer no longer accepts.
    let legacy = r#"[
        {"dayKey":"2024-03-08","date":"2024-03-08T19:00:00Z","promise":"Stretch","outcome":"maybe"},
        {"dayKey":"2024-03-09","date":"2024-03-09T19:00:00Z","promise":"Hydrate","outcome":"positive"}
    ]"#;
    db.set("journal_history", legacy).unwrap();

    let ledger = HistoryLedger::new(&db);
    assert_eq!(ledger.repair_once().unwrap(), 1);

    let entries = ledger.list_all();
    let stretch = entries.iter().find(|e| e.promise == "Stretch").unwrap();
    assert_eq!(stretch.outcome, Some(Outcome::Missed));
    let hydrate = entries.iter().find(|e| e.promise == "Hydrate").unwrap();
    assert_eq!(hydrate.outcome, Some(Outcome::Kept));

    // Marker is set: the pass never runs twice.
    assert_eq!(ledger.repair_once().unwrap(), 0);
    let after = Database::open_at(&path).unwrap();
    assert_eq!(HistoryLedger::new(&after).repair_once().unwrap(), 0);
}

#[test]
fn test_logout_then_fresh_start() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("journal.db");
    let db = Database::open_at(&path).unwrap();
    let session = MemoryKv::new();
    let flag = PostLogoutFlag::new(&session);
    let now = at(2024, 3, 11, 9, 0);

    let mut engine = CycleEngine::new(&db);
    engine.submit("Inbox zero", now).unwrap();
    engine.confirm(now);
    engine.reflect(Thumb::Down, now).unwrap();

    engine.logout(&flag, now).unwrap();

    assert_eq!(engine.state(), CycleState::Create);
    assert!(engine.ledger().list_all().is_empty());
    assert!(flag.consume());

    // The account starts over cleanly after logging back in.
    let mut engine = CycleEngine::new(&db);
    assert_eq!(engine.resume(now), CycleState::Create);
    engine.submit("Fresh start", now).unwrap();
    assert_eq!(engine.ledger().list_all().len(), 1);
}
