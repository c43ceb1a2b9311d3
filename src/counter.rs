use crate::primes::{prime_above, prime_below};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest admissible initial value: four decimal digits.
pub const MIN_INITIAL_VALUE: u32 = 1_000;

/// Initial value used by [`JumpCounter::default`].
pub const DEFAULT_INITIAL_VALUE: u32 = 9_999;

/// Jumps tolerated before a counter deactivates.
pub const DEFAULT_JUMP_LIMIT: u32 = 10;

/// Offset subtracted from the crossed bound when relocating.
pub const DEFAULT_JUMP_DISTANCE: u32 = 100;

/// Activity state of a counter. `Failed` is terminal: no transition leads
/// back out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterState {
    Active,
    Inactive,
    Failed,
}

impl CounterState {
    /// Canonical uppercase representation used in journal entries.
    pub fn as_str(self) -> &'static str {
        match self {
            CounterState::Active => "ACTIVE",
            CounterState::Inactive => "INACTIVE",
            CounterState::Failed => "FAILED",
        }
    }
}

impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a bound query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryDirection {
    Up,
    Down,
}

impl QueryDirection {
    /// Lowercase label used in journal entries and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            QueryDirection::Up => "up",
            QueryDirection::Down => "down",
        }
    }
}

impl fmt::Display for QueryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Construction-time knobs for a counter. One tuning covers a whole duel
/// roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterTuning {
    pub jump_limit: u32,
    pub jump_distance: u32,
}

impl Default for CounterTuning {
    fn default() -> Self {
        Self {
            jump_limit: DEFAULT_JUMP_LIMIT,
            jump_distance: DEFAULT_JUMP_DISTANCE,
        }
    }
}

impl CounterTuning {
    /// Replaces the jump limit.
    pub fn with_jump_limit(mut self, jump_limit: u32) -> Self {
        self.jump_limit = jump_limit;
        self
    }

    /// Replaces the relocation offset.
    pub fn with_jump_distance(mut self, jump_distance: u32) -> Self {
        self.jump_distance = jump_distance;
        self
    }
}

/// Bookkeeping snapshot of a single counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CounterTelemetry {
    pub state: CounterState,
    pub initial_value: u32,
    pub current_value: u32,
    pub upper_bound: u32,
    pub lower_bound: u32,
    pub query_count: u32,
    pub query_limit: u32,
    pub jump_count: u32,
    pub jump_limit: u32,
}

/// A counter that tracks one integer and its neighboring primes.
///
/// Queries return the prime just above or below the tracked value. The
/// query window is the gap between the two bounds; once enough queries
/// land, the counter relocates itself relative to the bound that was just
/// crossed and recomputes everything. After `jump_limit` relocations the
/// counter goes `Inactive` until revived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpCounter {
    initial_value: u32,
    current_value: u32,
    upper_bound: u32,
    lower_bound: u32,
    query_count: u32,
    query_limit: u32,
    jump_count: u32,
    jump_limit: u32,
    jump_distance: u32,
    state: CounterState,
}

impl Default for JumpCounter {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_VALUE)
    }
}

impl JumpCounter {
    /// Creates a counter with the default tuning.
    ///
    /// An `initial_value` with fewer than four decimal digits violates the
    /// construction contract: the counter is born `Failed` with zeroed
    /// bookkeeping, observable through [`JumpCounter::is_failed`].
    pub fn new(initial_value: u32) -> Self {
        Self::with_tuning(initial_value, CounterTuning::default())
    }

    /// Creates a counter with explicit tuning.
    pub fn with_tuning(initial_value: u32, tuning: CounterTuning) -> Self {
        let mut counter = Self {
            initial_value: 0,
            current_value: 0,
            upper_bound: 0,
            lower_bound: 0,
            query_count: 0,
            query_limit: 0,
            jump_count: 0,
            jump_limit: 0,
            jump_distance: tuning.jump_distance,
            state: CounterState::Failed,
        };
        if initial_value < MIN_INITIAL_VALUE {
            return counter;
        }
        counter.state = CounterState::Active;
        counter.jump_limit = tuning.jump_limit;
        counter.initial_value = initial_value;
        counter.reset();
        counter
    }

    /// Returns the prime above the tracked value, or sentinel 0 when the
    /// counter is not active.
    ///
    /// The triggering query still returns the bound captured before the
    /// relocation it caused.
    pub fn query_up(&mut self) -> u32 {
        self.query(QueryDirection::Up)
    }

    /// Returns the prime below the tracked value, or sentinel 0 when the
    /// counter is not active.
    pub fn query_down(&mut self) -> u32 {
        self.query(QueryDirection::Down)
    }

    /// Direction-parameterized query used by aggregation passes.
    ///
    /// Exhausting the query window relocates the counter by
    /// `bound - jump_distance`, where `bound` is the value just returned.
    /// Both directions subtract the offset, so a down-triggered jump lands
    /// below its bound while an up-triggered jump does not mirror it by
    /// landing above. Observed totals depend on this; see DESIGN.md.
    pub fn query(&mut self, direction: QueryDirection) -> u32 {
        if self.state != CounterState::Active {
            return 0;
        }
        let bound = match direction {
            QueryDirection::Up => self.upper_bound,
            QueryDirection::Down => self.lower_bound,
        };
        self.query_count += 1;
        if self.query_count >= self.query_limit {
            self.relocate(bound.wrapping_sub(self.jump_distance));
        }
        bound
    }

    /// Restores the counter to its initial value.
    ///
    /// Fails (returns false, mutating nothing) once the counter is
    /// `Failed`; otherwise reactivates it with fresh bounds and zeroed
    /// query and jump counts.
    pub fn reset(&mut self) -> bool {
        if self.state == CounterState::Failed {
            return false;
        }
        self.state = CounterState::Active;
        self.current_value = self.initial_value;
        self.set_prime_bounds();
        self.reset_query_window();
        self.jump_count = 0;
        true
    }

    /// Revives an `Inactive` counter, zeroing its query and jump counts
    /// but keeping the relocated value.
    ///
    /// Reviving a counter in any other state permanently fails it; the
    /// return value reports whether the counter ended `Active`.
    pub fn revive(&mut self) -> bool {
        if self.state == CounterState::Inactive {
            self.state = CounterState::Active;
            self.jump_count = 0;
            self.query_count = 0;
        } else {
            self.state = CounterState::Failed;
        }
        self.state == CounterState::Active
    }

    /// True while queries yield meaningful bounds.
    pub fn is_active(&self) -> bool {
        self.state == CounterState::Active
    }

    /// True once the counter is permanently unusable.
    pub fn is_failed(&self) -> bool {
        self.state == CounterState::Failed
    }

    /// Current activity state.
    pub fn state(&self) -> CounterState {
        self.state
    }

    /// The tracked value: the initial value after construction or reset,
    /// the landing value after a jump.
    pub fn current_value(&self) -> u32 {
        self.current_value
    }

    /// Nearest prime strictly above the tracked value.
    pub fn upper_bound(&self) -> u32 {
        self.upper_bound
    }

    /// Nearest prime strictly below the tracked value.
    pub fn lower_bound(&self) -> u32 {
        self.lower_bound
    }

    /// The construction-time value that `reset` restores.
    pub fn initial_value(&self) -> u32 {
        self.initial_value
    }

    /// Snapshot of the counter's bookkeeping.
    pub fn telemetry(&self) -> CounterTelemetry {
        CounterTelemetry {
            state: self.state,
            initial_value: self.initial_value,
            current_value: self.current_value,
            upper_bound: self.upper_bound,
            lower_bound: self.lower_bound,
            query_count: self.query_count,
            query_limit: self.query_limit,
            jump_count: self.jump_count,
            jump_limit: self.jump_limit,
        }
    }

    fn relocate(&mut self, delta: u32) {
        // Unsigned wraparound is the contract for the whole domain.
        self.current_value = self.current_value.wrapping_add(delta);
        self.set_prime_bounds();
        self.reset_query_window();
        self.jump_count += 1;
        if self.jump_count >= self.jump_limit {
            self.state = CounterState::Inactive;
        }
    }

    fn set_prime_bounds(&mut self) {
        self.upper_bound = prime_above(self.current_value);
        self.lower_bound = prime_below(self.current_value);
    }

    fn reset_query_window(&mut self) {
        self.query_limit = self.upper_bound.wrapping_sub(self.lower_bound);
        self.query_count = 0;
    }
}
