//! Prime-jump counters and the duel aggregation passes that drive them.
//!
//! A [`JumpCounter`] tracks one integer together with its neighboring
//! primes and relocates itself after a bounded number of queries. A
//! [`Duel`] owns a fixed roster of counters and tallies collisions and
//! inversions across shared query passes, journaling each pass as it
//! goes.

pub mod app;
pub mod counter;
pub mod duel;
pub mod journal;
pub mod primes;

pub use counter::{
    CounterState, CounterTelemetry, CounterTuning, JumpCounter, QueryDirection,
    DEFAULT_INITIAL_VALUE, DEFAULT_JUMP_DISTANCE, DEFAULT_JUMP_LIMIT, MIN_INITIAL_VALUE,
};
pub use duel::{Duel, DuelError, DuelTelemetry};
pub use journal::{JournalLevel, JournalRetention, PassJournal};
pub use primes::{is_prime, prime_above, prime_below};
