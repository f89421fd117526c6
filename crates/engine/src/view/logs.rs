//! Bounded, newest-first log panel.

use std::collections::VecDeque;

use stackwatch_types::LogEntry;

/// Maximum number of entries the panel retains.
pub const LOG_CAPACITY: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPanel {
    entries: VecDeque<LogEntry>,
}

impl LogPanel {
    /// Prepend an entry, then evict the oldest ones beyond [`LOG_CAPACITY`].
    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(LOG_CAPACITY);
    }

    /// Entries newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
