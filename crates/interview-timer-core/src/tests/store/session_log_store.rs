#![allow(clippy::unwrap_used)]

use crate::{
    AppSettings, AppStats, HistoryFilter, MemoryStore, PracticeMode, RecordKey, SessionLog,
    Storage, StoreError, group_by_local_date, store::apply_retention,
    tests::support::FailingStore,
};

use chrono::{Duration, Local, TimeZone, Utc};

fn log(id: &str, question_id: &str, recorded: bool) -> SessionLog {
    let now = Utc::now();
    SessionLog {
        id: id.to_string(),
        session_id: "run-1".to_string(),
        deck_id: "deck-a".to_string(),
        deck_name: "Deck A".to_string(),
        question_id: question_id.to_string(),
        question_text: format!("Text of {}", question_id),
        mode: PracticeMode::Random,
        started_at: now,
        ended_at: now,
        elapsed_seconds: 30,
        recommended_seconds: 60,
        is_overtime: false,
        memo: None,
        has_recording: recorded,
        recording_data: recorded.then(|| format!("data:audio/wav;base64,{}", id)),
        pinned: None,
    }
}

fn storage_with_limit(recording_limit: usize) -> Storage<MemoryStore> {
    let mut storage = Storage::new(MemoryStore::new());
    storage
        .settings()
        .put(&AppSettings {
            recording_limit,
            ..AppSettings::default()
        })
        .unwrap();
    storage
}

/// WHAT: Only the newest recordings survive the retention limit
/// WHY: Embedded audio is large; old recordings are evicted first
#[test]
fn given_limit_two_when_three_recorded_logs_saved_then_oldest_loses_audio() {
    // Given: A recording limit of 2
    let mut storage = storage_with_limit(2);

    // When: Saving three recorded logs in sequence
    for id in ["a", "b", "c"] {
        storage.sessions().append(log(id, "q1", true)).unwrap();
    }

    // Then: The oldest lost its audio, the newest two kept theirs
    let logs = storage.sessions().list().unwrap();
    assert_eq!(logs.len(), 3);
    assert!(!logs[0].has_recording);
    assert!(logs[0].recording_data.is_none());
    assert!(logs[1].has_recording && logs[1].recording_data.is_some());
    assert!(logs[2].has_recording && logs[2].recording_data.is_some());
}

/// WHAT: Retention ignores logs without recordings
/// WHY: Only the embedded audio counts toward the limit
#[test]
fn given_mixed_logs_when_retention_applied_then_only_recorded_logs_counted() {
    // Given: recorded, plain, recorded, plain, recorded
    let mut logs = vec![
        log("a", "q1", true),
        log("b", "q2", false),
        log("c", "q3", true),
        log("d", "q4", false),
        log("e", "q5", true),
    ];

    // When: Applying a limit of 2
    let evicted = apply_retention(&mut logs, 2);

    // Then: Only "a" is evicted and nothing is deleted
    assert_eq!(evicted, 1);
    assert_eq!(logs.len(), 5);
    let recorded: Vec<&str> = logs
        .iter()
        .filter(|l| l.has_recording)
        .map(|l| l.id.as_str())
        .collect();
    assert_eq!(recorded, vec!["c", "e"]);
}

/// WHAT: Toggling a pin twice restores the original value
/// WHY: Pin toggling must be its own inverse
#[test]
fn given_saved_log_when_pin_toggled_twice_then_unpinned_again() {
    // Given: One unpinned log
    let mut storage = storage_with_limit(20);
    storage.sessions().append(log("a", "q1", false)).unwrap();

    // When: Toggling twice
    let first = storage.sessions().toggle_pin("a").unwrap();
    let second = storage.sessions().toggle_pin("a").unwrap();

    // Then: true then false, stored value false
    assert!(first);
    assert!(!second);
    assert!(!storage.sessions().list().unwrap()[0].is_pinned());
}

/// WHAT: Pinning an unknown log fails
/// WHY: Silent no-ops would hide stale ids in the front-end
#[test]
fn given_unknown_id_when_pinning_then_session_not_found() {
    // Given: An empty log store
    let mut storage = storage_with_limit(20);

    // When: Pinning a missing id
    let result = storage.sessions().update_pinned("missing", true);

    // Then: SessionNotFound
    assert!(matches!(result, Err(StoreError::SessionNotFound { .. })));
}

/// WHAT: Stats count total and today's logs and track the latest start
/// WHY: The home screen summary is derived from the log list
#[test]
fn given_logs_across_days_when_stats_computed_then_today_counted_separately() {
    // Given: One log from two days ago and two from today
    let today = Local::now().date_naive();
    let mut old = log("a", "q1", false);
    old.started_at = Utc::now() - Duration::days(2);
    let logs = vec![old, log("b", "q2", false), log("c", "q3", false)];

    // When: Computing stats for today
    let stats = AppStats::compute(&logs, today);

    // Then: 3 total, 2 today, last date from the final log
    assert_eq!(stats.total_sessions, 3);
    assert_eq!(stats.today_sessions, 2);
    assert_eq!(stats.last_session_date, Some(logs[2].started_at));
}

/// WHAT: Appending persists refreshed stats
/// WHY: Stats are recomputed after every save
#[test]
fn given_two_appends_when_reading_stats_then_total_is_two() {
    // Given: An empty store
    let mut storage = storage_with_limit(20);
    assert_eq!(storage.sessions().stats().unwrap(), AppStats::default());

    // When: Appending twice
    storage.sessions().append(log("a", "q1", false)).unwrap();
    storage.sessions().append(log("b", "q1", false)).unwrap();

    // Then: Persisted stats reflect both
    assert_eq!(storage.sessions().stats().unwrap().total_sessions, 2);
}

/// WHAT: Weak questions are ranked by overtime count
/// WHY: The history view highlights questions that keep running long
#[test]
fn given_overtime_history_when_ranking_then_most_overtime_first() {
    // Given: q2 overtime twice, q1 once, q3 never
    let mut storage = storage_with_limit(20);
    for (id, question, overtime) in [
        ("a", "q1", true),
        ("b", "q2", true),
        ("c", "q2", true),
        ("d", "q3", false),
        ("e", "q1", false),
    ] {
        let mut entry = log(id, question, false);
        entry.is_overtime = overtime;
        storage.sessions().append(entry).unwrap();
    }

    // When: Ranking the top two
    let ranked = storage.sessions().weak_questions(2).unwrap();

    // Then: q2 (2 of 2), then q1 (1 of 2)
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].question_id, "q2");
    assert_eq!((ranked[0].overtime_count, ranked[0].total_count), (2, 2));
    assert_eq!(ranked[1].question_id, "q1");
    assert_eq!((ranked[1].overtime_count, ranked[1].total_count), (1, 2));
}

/// WHAT: Pinned memo list excludes blank memos and is newest first
/// WHY: Only real reflections belong in the memo list
#[test]
fn given_pinned_logs_when_listing_memos_then_blank_skipped_newest_first() {
    // Given: Pinned logs with memo, blank memo, and an unpinned memo
    let mut storage = storage_with_limit(20);
    let mut first = log("a", "q1", false);
    first.memo = Some("slow start".to_string());
    first.pinned = Some(true);
    let mut blank = log("b", "q2", false);
    blank.memo = Some("  ".to_string());
    blank.pinned = Some(true);
    let mut unpinned = log("c", "q3", false);
    unpinned.memo = Some("fine".to_string());
    let mut last = log("d", "q4", false);
    last.memo = Some("good structure".to_string());
    last.pinned = Some(true);
    for entry in [first, blank, unpinned, last] {
        storage.sessions().append(entry).unwrap();
    }

    // When: Listing pinned memos
    let memos = storage.sessions().pinned_memos().unwrap();

    // Then: d then a
    let ids: Vec<&str> = memos.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "a"]);
}

/// WHAT: History filters by mode and deck, newest first
/// WHY: Users review one deck or mode at a time
#[test]
fn given_mixed_history_when_filtered_then_matching_logs_newest_first() {
    // Given: Logs across modes and decks
    let mut storage = storage_with_limit(20);
    let mut real_a = log("a", "q1", false);
    real_a.mode = PracticeMode::Real;
    let random_a = log("b", "q2", false);
    let mut real_b = log("c", "q3", false);
    real_b.mode = PracticeMode::Real;
    real_b.deck_id = "deck-b".to_string();
    let mut real_a2 = log("d", "q4", false);
    real_a2.mode = PracticeMode::Real;
    for entry in [real_a, random_a, real_b, real_a2] {
        storage.sessions().append(entry).unwrap();
    }

    // When: Filtering real mode on deck-a
    let filter = HistoryFilter {
        mode: Some(PracticeMode::Real),
        deck_id: Some("deck-a".to_string()),
    };
    let history = storage.sessions().history(&filter).unwrap();

    // Then: d then a
    let ids: Vec<&str> = history.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["d", "a"]);
    assert_eq!(
        storage.sessions().history(&HistoryFilter::default()).unwrap().len(),
        4
    );
}

/// WHAT: Logs started on another local date are not counted today
/// WHY: "Today" is a local calendar date, not the last 24 hours
#[test]
fn given_log_from_fixed_past_date_when_stats_for_today_then_not_counted() {
    // Given: A log started in 2020
    let mut storage = storage_with_limit(20);
    let mut old = log("a", "q1", false);
    old.started_at = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    storage.sessions().append(old).unwrap();

    // When: Computing stats for today
    let stats = storage
        .sessions()
        .stats_for(Local::now().date_naive())
        .unwrap();

    // Then: Counted in total only
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.today_sessions, 0);
}

/// WHAT: History groups consecutive logs by local start date
/// WHY: The history view shows one heading per practice day
#[test]
fn given_logs_on_two_days_when_grouped_then_one_group_per_day_in_order() {
    // Given: Newest-first logs, two today and one from 2020
    let mut old = log("a", "q1", false);
    old.started_at = Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap();
    let logs = vec![log("c", "q3", false), log("b", "q2", false), old];

    // When: Grouping
    let groups = group_by_local_date(&logs);

    // Then: Today's group first with two logs, then the old day
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, Local::now().date_naive());
    assert_eq!(groups[0].1.len(), 2);
    assert_eq!(groups[1].1[0].id, "a");
}

/// WHAT: A failed stats refresh still reports success and stores the log once
/// WHY: The log write already landed; an error here would make the caller save it twice
#[test]
fn given_stats_write_failing_when_appended_then_ok_and_single_log() {
    // Given: A store whose first Stats write fails
    let mut storage = Storage::new(FailingStore::new(MemoryStore::new(), RecordKey::Stats, 1));

    // When: Appending one log
    let stats = storage.sessions().append(log("a", "q1", false)).unwrap();

    // Then: Stats computed from the stored list; one log stored; cache not refreshed
    assert_eq!(stats.total_sessions, 1);
    assert_eq!(storage.sessions().list().unwrap().len(), 1);
    assert_eq!(storage.sessions().stats().unwrap(), AppStats::default());

    // When: The next append succeeds
    storage.sessions().append(log("b", "q2", false)).unwrap();

    // Then: The cache catches up
    assert_eq!(storage.sessions().stats().unwrap().total_sessions, 2);
}

/// WHAT: A failed log write stores nothing
/// WHY: Callers retry on error, which must not leave a half-written record behind
#[test]
fn given_sessions_write_failing_when_appended_then_error_and_no_log() {
    // Given: A store whose first Sessions write fails
    let mut storage = Storage::new(FailingStore::new(MemoryStore::new(), RecordKey::Sessions, 1));

    // When: Appending, then retrying
    let first = storage.sessions().append(log("a", "q1", false));
    let listed = storage.sessions().list().unwrap();
    storage.sessions().append(log("a", "q1", false)).unwrap();

    // Then: First attempt failed without a trace; retry stored exactly one
    assert!(matches!(first, Err(StoreError::Io { .. })));
    assert!(listed.is_empty());
    assert_eq!(storage.sessions().list().unwrap().len(), 1);
}
