#![allow(clippy::unwrap_used)]

use crate::{MemoryStore, Storage, consecutive_days};

use chrono::NaiveDate;

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
}

/// WHAT: Checking in on consecutive days grows the streak
/// WHY: The streak rewards practicing every day
#[test]
fn given_three_consecutive_days_when_checking_in_then_streak_three() {
    // Given: An empty store
    let mut storage = Storage::new(MemoryStore::new());

    // When: Checking in on the 1st, 2nd and 3rd
    let streaks: Vec<usize> = [1, 2, 3]
        .into_iter()
        .map(|d| storage.practice_days().check_in(day(d)).unwrap())
        .collect();

    // Then: 1, 2, 3
    assert_eq!(streaks, vec![1, 2, 3]);
}

/// WHAT: A skipped day resets the streak
/// WHY: Only an unbroken run of days counts
#[test]
fn given_gap_of_one_day_when_checking_in_then_streak_restarts() {
    // Given: Check-ins on the 1st and 2nd
    let mut storage = Storage::new(MemoryStore::new());
    storage.practice_days().check_in(day(1)).unwrap();
    storage.practice_days().check_in(day(2)).unwrap();

    // When: Checking in on the 4th
    let streak = storage.practice_days().check_in(day(4)).unwrap();

    // Then: Streak is 1 and only the 4th is stored
    assert_eq!(streak, 1);
    assert_eq!(storage.practice_days().stamps().unwrap(), vec![day(4)]);
}

/// WHAT: Checking in twice on one day is a no-op
#[test]
fn given_check_in_today_when_checking_in_again_then_unchanged() {
    let mut storage = Storage::new(MemoryStore::new());
    storage.practice_days().check_in(day(1)).unwrap();
    storage.practice_days().check_in(day(2)).unwrap();

    let streak = storage.practice_days().check_in(day(2)).unwrap();

    assert_eq!(streak, 2);
    assert_eq!(storage.practice_days().stamps().unwrap().len(), 2);
}

/// WHAT: Streak counting ignores order and duplicates
/// WHY: Stamps may come from older data in any order
#[test]
fn given_unordered_stamps_when_counting_then_run_ending_at_latest() {
    let stamps = vec![day(3), day(1), day(5), day(4), day(5)];

    assert_eq!(consecutive_days(&stamps), 3);
    assert_eq!(consecutive_days(&[]), 0);
}
