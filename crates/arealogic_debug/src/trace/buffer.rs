//! Ring buffer for trace records.
//!
//! Keeps the most recent records of a compilation, queryable by source line
//! and event type.

use std::collections::{HashMap, VecDeque};

use arealogic_language::CompileEvent;

use super::record::TraceRecord;

/// Default number of records kept.
pub const DEFAULT_BUFFER_SIZE: usize = 10_000;

// =============================================================================
// Trace Buffer
// =============================================================================

/// A bounded buffer of trace records, oldest first.
///
/// When full, the oldest record is dropped for each new one.
#[derive(Clone, Debug)]
pub struct TraceBuffer {
    records: VecDeque<TraceRecord>,
    max_size: usize,
    next_id: u64,
    evicted: usize,
}

impl TraceBuffer {
    /// Creates a new trace buffer holding at most `max_size` records.
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(max_size.min(1024)),
            max_size,
            next_id: 0,
            evicted: 0,
        }
    }

    /// Pushes a new event to the buffer.
    ///
    /// Returns the assigned record ID.
    pub fn push(&mut self, line: usize, timestamp_ns: u64, event: CompileEvent) -> u64 {
        let id = self.next_id;
        self.next_id += 1;

        self.records
            .push_back(TraceRecord::new(id, line, timestamp_ns, event));
        while self.records.len() > self.max_size {
            self.records.pop_front();
            self.evicted += 1;
        }
        id
    }

    /// Returns the number of records in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clears all records. IDs keep increasing.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Returns an iterator over all records.
    pub fn iter(&self) -> impl Iterator<Item = &TraceRecord> {
        self.records.iter()
    }

    /// Returns the most recently pushed record.
    #[must_use]
    pub fn last(&self) -> Option<&TraceRecord> {
        self.records.back()
    }

    /// Returns records raised by source line `line`.
    #[must_use]
    pub fn records_for_line(&self, line: usize) -> Vec<&TraceRecord> {
        self.filter(|r| r.line == line)
    }

    /// Returns records raised by lines `start..=end`.
    #[must_use]
    pub fn records_in_range(&self, start: usize, end: usize) -> Vec<&TraceRecord> {
        self.filter(|r| (start..=end).contains(&r.line))
    }

    /// Returns the most recent `count` records.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<&TraceRecord> {
        let start = self.records.len().saturating_sub(count);
        self.records.iter().skip(start).collect()
    }

    /// Returns records matching a predicate.
    pub fn filter<F>(&self, predicate: F) -> Vec<&TraceRecord>
    where
        F: Fn(&TraceRecord) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Returns records of a specific event type.
    #[must_use]
    pub fn by_event_type(&self, event_type: &str) -> Vec<&TraceRecord> {
        self.filter(|r| r.event_type() == event_type)
    }

    /// Returns the distinct source lines present, in order of first record.
    #[must_use]
    pub fn lines(&self) -> Vec<usize> {
        let mut lines: Vec<usize> = Vec::new();
        for record in &self.records {
            if !lines.contains(&record.line) {
                lines.push(record.line);
            }
        }
        lines
    }

    /// Returns statistics about the buffer.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        let mut event_counts = HashMap::new();
        for record in &self.records {
            *event_counts.entry(record.event_type()).or_insert(0) += 1;
        }

        TraceBufferStats {
            record_count: self.records.len(),
            max_size: self.max_size,
            evicted: self.evicted,
            first_line: self.records.front().map(|r| r.line),
            last_line: self.records.back().map(|r| r.line),
            event_counts,
        }
    }
}

impl Default for TraceBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BUFFER_SIZE)
    }
}

// =============================================================================
// Buffer Statistics
// =============================================================================

/// Statistics about a trace buffer.
#[derive(Clone, Debug)]
pub struct TraceBufferStats {
    /// Number of records currently in buffer.
    pub record_count: usize,
    /// Maximum buffer size.
    pub max_size: usize,
    /// Records dropped to stay within `max_size`.
    pub evicted: usize,
    /// Source line of the oldest record.
    pub first_line: Option<usize>,
    /// Source line of the newest record.
    pub last_line: Option<usize>,
    /// Count of each event type.
    pub event_counts: HashMap<&'static str, usize>,
}

impl TraceBufferStats {
    /// Returns the count for one event type.
    #[must_use]
    pub fn count(&self, event_type: &str) -> usize {
        self.event_counts.get(event_type).copied().unwrap_or(0)
    }
}

// =============================================================================
// Tests
// =============================================================================
