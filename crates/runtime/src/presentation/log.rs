//! Bounded battle log retaining the most recent lines.

use std::collections::VecDeque;

/// Ordered battle log with bounded retention.
///
/// Keeps the most recent `capacity` lines, evicting the oldest first, so a
/// battle screen can render the log without trimming it itself.
#[derive(Clone, Debug)]
pub struct BattleLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl BattleLog {
    /// Default number of retained lines.
    pub const DEFAULT_CAPACITY: usize = 10;

    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Append a line, evicting the oldest if the log is full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    /// Retained lines, oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
