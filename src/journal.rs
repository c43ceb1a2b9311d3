use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/// Severity levels for pass journal entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JournalLevel {
    Debug,
    Info,
    Warn,
}

impl JournalLevel {
    /// Returns the canonical uppercase representation.
    pub fn as_str(self) -> &'static str {
        match self {
            JournalLevel::Debug => "DEBUG",
            JournalLevel::Info => "INFO",
            JournalLevel::Warn => "WARN",
        }
    }
}

impl fmt::Display for JournalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Retention policy: entries kept in memory before the oldest are evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalRetention {
    pub max_entries: usize,
}

impl Default for JournalRetention {
    fn default() -> Self {
        Self { max_entries: 1024 }
    }
}

/// Bounded JSON-line audit log of aggregation passes.
///
/// Entries are encoded eagerly into one JSON line each; `seq` keeps
/// climbing across evictions so gaps reveal dropped history. Encoding
/// failures are counted rather than surfaced, keeping counting passes
/// infallible.
#[derive(Debug, Clone)]
pub struct PassJournal {
    retention: JournalRetention,
    current_level: JournalLevel,
    entries: VecDeque<String>,
    next_seq: u64,
    encode_failures: u64,
}

impl Default for PassJournal {
    fn default() -> Self {
        Self::new(JournalRetention::default())
    }
}

impl PassJournal {
    /// Creates a journal with the given retention policy.
    pub fn new(retention: JournalRetention) -> Self {
        Self {
            retention,
            current_level: JournalLevel::Info,
            entries: VecDeque::new(),
            next_seq: 0,
            encode_failures: 0,
        }
    }

    /// Returns the current level floor.
    pub fn level(&self) -> JournalLevel {
        self.current_level
    }

    /// Lowers or raises the level floor; records below it are dropped.
    pub fn set_level(&mut self, level: JournalLevel) {
        self.current_level = level;
    }

    /// Records one entry under the given scope, optionally tied to a
    /// counter index.
    pub fn record(
        &mut self,
        level: JournalLevel,
        scope: &str,
        counter: Option<usize>,
        message: &str,
    ) {
        if level < self.current_level {
            return;
        }
        let entry = JournalEntry {
            seq: self.next_seq,
            level: level.as_str(),
            scope,
            counter,
            message,
        };
        self.next_seq += 1;
        match serde_json::to_string(&entry) {
            Ok(line) => {
                self.entries.push_back(line);
                while self.entries.len() > self.retention.max_entries {
                    self.entries.pop_front();
                }
            }
            Err(_) => self.encode_failures = self.encode_failures.saturating_add(1),
        }
    }

    /// Retained entries, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Most recent retained entry.
    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Number of retained entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been retained.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries recorded over the journal's lifetime, including evicted
    /// and drop-failed ones.
    pub fn recorded_total(&self) -> u64 {
        self.next_seq
    }

    /// Entries lost to encoding failures.
    pub fn encode_failures(&self) -> u64 {
        self.encode_failures
    }
}

#[derive(Debug, Serialize)]
struct JournalEntry<'a> {
    seq: u64,
    level: &'a str,
    scope: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    counter: Option<usize>,
    message: &'a str,
}
