use crate::{Countdown, Stopwatch};

/// WHAT: Countdown reports completion exactly at zero
/// WHY: Preparation must end on its last second, not after it
#[test]
fn given_three_second_countdown_when_ticked_then_done_on_third_tick() {
    // Given: A 3 second countdown
    let mut countdown = Countdown::new(3);

    // When/Then: Done only on the third tick, and stays at zero
    assert!(!countdown.tick());
    assert!(!countdown.tick());
    assert!(countdown.tick());
    assert!(countdown.tick());
    assert_eq!(countdown.remaining(), 0);
}

/// WHAT: Pause and resume are idempotent
/// WHY: Repeated button presses must not corrupt the stopwatch
#[test]
fn given_stopwatch_when_paused_twice_then_second_pause_is_noop() {
    // Given: A stopwatch at 2 seconds
    let mut stopwatch = Stopwatch::new();
    stopwatch.tick();
    stopwatch.tick();

    // When: Pausing twice, ticking, resuming twice
    assert!(stopwatch.pause());
    assert!(!stopwatch.pause());
    assert!(!stopwatch.tick());
    assert!(stopwatch.resume());
    assert!(!stopwatch.resume());
    assert!(stopwatch.tick());

    // Then: Only running ticks counted
    assert_eq!(stopwatch.elapsed(), 3);
    assert!(!stopwatch.is_paused());
}
