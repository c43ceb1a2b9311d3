use crate::counter::{CounterTelemetry, CounterTuning, JumpCounter, QueryDirection};
use crate::journal::{JournalLevel, PassJournal};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

/// A fixed roster of counters duelling through shared query passes.
///
/// The duel owns its counters exclusively; the only mutation channels are
/// the documented counting passes, which revive inactive counters before
/// querying so every counter yields a value. That repair step is part of
/// the counting contract: it can permanently fail an already-broken
/// counter as a side effect of a pass.
#[derive(Debug, Clone)]
pub struct Duel {
    counters: Vec<JumpCounter>,
    journal: PassJournal,
    passes_total: u64,
    revivals_total: u64,
    revive_failures_total: u64,
}

impl Duel {
    /// Builds one counter per initial value, in order, with default
    /// tuning.
    pub fn new(initial_values: &[u32]) -> Result<Self, DuelError> {
        Self::with_tuning(initial_values, CounterTuning::default())
    }

    /// Builds a duel whose counters all share the provided tuning.
    ///
    /// Values below the four-digit floor are accepted and yield counters
    /// that are `Failed` from birth, observable through
    /// [`Duel::counters`].
    pub fn with_tuning(
        initial_values: &[u32],
        tuning: CounterTuning,
    ) -> Result<Self, DuelError> {
        if initial_values.is_empty() {
            return Err(DuelError::EmptyRoster);
        }
        let counters = initial_values
            .iter()
            .map(|&value| JumpCounter::with_tuning(value, tuning))
            .collect();
        Ok(Self {
            counters,
            journal: PassJournal::default(),
            passes_total: 0,
            revivals_total: 0,
            revive_failures_total: 0,
        })
    }

    /// True iff every counter reports active.
    pub fn all_active(&self) -> bool {
        self.counters.iter().all(JumpCounter::is_active)
    }

    /// Queries every counter once in `direction` and returns the number
    /// of extra occurrences beyond the first for each repeated value.
    ///
    /// A value seen by a single counter contributes nothing; three
    /// counters returning the same bound contribute two.
    pub fn count_collisions(&mut self, direction: QueryDirection) -> u32 {
        self.ensure_all_active();
        let mut buckets: HashMap<u32, u32> = HashMap::with_capacity(self.counters.len());
        for (index, counter) in self.counters.iter_mut().enumerate() {
            let value = counter.query(direction);
            self.journal.record(
                JournalLevel::Debug,
                "collision",
                Some(index),
                &format!("{direction} query returned {value}"),
            );
            *buckets.entry(value).or_insert(0) += 1;
        }
        let collisions = buckets
            .values()
            .filter(|&&count| count > 1)
            .map(|&count| count - 1)
            .sum();
        self.passes_total += 1;
        self.journal.record(
            JournalLevel::Info,
            "collision",
            None,
            &format!(
                "{direction} pass counted {collisions} collisions across {} counters",
                self.counters.len()
            ),
        );
        collisions
    }

    /// Queries every counter's up bound, then every counter's down bound,
    /// and counts every ordered pair (including a counter against itself)
    /// whose up result equals the down result.
    ///
    /// Each counter is queried exactly once per direction, so a pass can
    /// itself trigger relocations; the up sweep completes before the down
    /// sweep begins.
    pub fn count_inversions(&mut self) -> u32 {
        self.ensure_all_active();
        let mut ups = Vec::with_capacity(self.counters.len());
        let mut downs = Vec::with_capacity(self.counters.len());
        for (index, counter) in self.counters.iter_mut().enumerate() {
            let value = counter.query_up();
            self.journal.record(
                JournalLevel::Debug,
                "inversion",
                Some(index),
                &format!("up query returned {value}"),
            );
            ups.push(value);
        }
        for (index, counter) in self.counters.iter_mut().enumerate() {
            let value = counter.query_down();
            self.journal.record(
                JournalLevel::Debug,
                "inversion",
                Some(index),
                &format!("down query returned {value}"),
            );
            downs.push(value);
        }
        let mut inversions = 0;
        for up in &ups {
            for down in &downs {
                if up == down {
                    inversions += 1;
                }
            }
        }
        self.passes_total += 1;
        self.journal.record(
            JournalLevel::Info,
            "inversion",
            None,
            &format!(
                "inversion pass counted {inversions} pairs across {} counters",
                self.counters.len()
            ),
        );
        inversions
    }

    /// Number of counters in the roster, fixed for the duel's lifetime.
    pub fn size(&self) -> usize {
        self.counters.len()
    }

    /// Read-only view of the roster.
    pub fn counters(&self) -> &[JumpCounter] {
        &self.counters
    }

    /// The pass audit log.
    pub fn journal(&self) -> &PassJournal {
        &self.journal
    }

    /// Adjusts the journal's level floor (per-query entries sit below the
    /// default).
    pub fn set_journal_level(&mut self, level: JournalLevel) {
        self.journal.set_level(level);
    }

    /// Snapshot of pass and roster state.
    pub fn telemetry(&self) -> DuelTelemetry {
        DuelTelemetry {
            size: self.counters.len(),
            passes_total: self.passes_total,
            revivals_total: self.revivals_total,
            revive_failures_total: self.revive_failures_total,
            journal_entries: self.journal.len(),
            counters: self.counters.iter().map(JumpCounter::telemetry).collect(),
        }
    }

    fn ensure_all_active(&mut self) {
        if !self.all_active() {
            self.reactivate();
        }
    }

    fn reactivate(&mut self) {
        for (index, counter) in self.counters.iter_mut().enumerate() {
            if counter.is_active() {
                continue;
            }
            if counter.revive() {
                self.revivals_total += 1;
                self.journal.record(
                    JournalLevel::Info,
                    "revive",
                    Some(index),
                    &format!("counter revived at value {}", counter.current_value()),
                );
            } else {
                self.revive_failures_total += 1;
                self.journal.record(
                    JournalLevel::Warn,
                    "revive",
                    Some(index),
                    "revive failed; counter is permanently failed",
                );
            }
        }
    }
}

/// Snapshot of a duel's passes and roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelTelemetry {
    pub size: usize,
    pub passes_total: u64,
    pub revivals_total: u64,
    pub revive_failures_total: u64,
    pub journal_entries: usize,
    pub counters: Vec<CounterTelemetry>,
}

/// Errors surfaced when assembling a duel.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DuelError {
    #[error("duel roster must contain at least one counter")]
    EmptyRoster,
}
