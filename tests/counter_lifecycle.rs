use primeduel::{CounterState, CounterTuning, JumpCounter, DEFAULT_INITIAL_VALUE};

#[test]
fn fresh_counter_brackets_its_value_with_primes() {
    let counter = JumpCounter::new(5_000);
    assert!(counter.is_active());
    assert_eq!(counter.current_value(), 5_000);
    assert_eq!(counter.lower_bound(), 4_999);
    assert_eq!(counter.upper_bound(), 5_003);
    assert!(counter.lower_bound() < counter.current_value());
    assert!(counter.current_value() < counter.upper_bound());

    let telemetry = counter.telemetry();
    assert_eq!(telemetry.query_count, 0);
    assert_eq!(telemetry.query_limit, 4);
    assert_eq!(telemetry.jump_count, 0);
}

#[test]
fn default_counter_uses_the_stock_initial_value() {
    let counter = JumpCounter::default();
    assert!(counter.is_active());
    assert_eq!(counter.initial_value(), DEFAULT_INITIAL_VALUE);
    assert_eq!(counter.current_value(), DEFAULT_INITIAL_VALUE);
}

#[test]
fn three_digit_value_fails_at_birth() {
    let mut counter = JumpCounter::new(999);
    assert!(counter.is_failed());
    assert!(!counter.is_active());
    assert_eq!(counter.query_up(), 0);
    assert_eq!(counter.query_down(), 0);
    assert!(!counter.reset());
    assert!(!counter.revive());
    assert!(counter.is_failed());
}

#[test]
fn reviving_an_active_counter_breaks_it_forever() {
    let mut counter = JumpCounter::new(5_000);
    assert!(!counter.revive());
    assert!(counter.is_failed());
    assert_eq!(counter.state(), CounterState::Failed);
    // No path back out.
    assert!(!counter.reset());
    assert!(!counter.revive());
    assert_eq!(counter.query_up(), 0);
}

#[test]
fn reviving_an_inactive_counter_zeroes_counts_but_keeps_the_value() {
    let tuning = CounterTuning::default().with_jump_limit(1);
    let mut counter = JumpCounter::with_tuning(1_020, tuning);
    // Twin-prime window: two queries exhaust it and the single allowed
    // jump deactivates the counter.
    counter.query_up();
    counter.query_up();
    assert_eq!(counter.state(), CounterState::Inactive);
    assert_eq!(counter.query_up(), 0);

    assert!(counter.revive());
    assert!(counter.is_active());
    let telemetry = counter.telemetry();
    assert_eq!(telemetry.query_count, 0);
    assert_eq!(telemetry.jump_count, 0);
    // The relocated value survives revival; only reset restores the
    // initial value.
    assert_eq!(counter.current_value(), 1_941);
}

#[test]
fn reset_restores_the_initial_value_and_counts() {
    let mut counter = JumpCounter::new(1_020);
    counter.query_up();
    counter.query_up();
    assert_eq!(counter.current_value(), 1_941);

    assert!(counter.reset());
    assert!(counter.is_active());
    assert_eq!(counter.current_value(), 1_020);
    assert_eq!(counter.lower_bound(), 1_019);
    assert_eq!(counter.upper_bound(), 1_021);
    let telemetry = counter.telemetry();
    assert_eq!(telemetry.query_count, 0);
    assert_eq!(telemetry.jump_count, 0);
    assert_eq!(telemetry.query_limit, 2);
}

#[test]
fn reset_also_recovers_an_inactive_counter() {
    let tuning = CounterTuning::default().with_jump_limit(1);
    let mut counter = JumpCounter::with_tuning(1_020, tuning);
    counter.query_up();
    counter.query_up();
    assert_eq!(counter.state(), CounterState::Inactive);

    assert!(counter.reset());
    assert!(counter.is_active());
    assert_eq!(counter.current_value(), 1_020);
}
