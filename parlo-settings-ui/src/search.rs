//! Inline type-ahead search over one table column.
//!
//! Consecutive keystrokes accumulate into an ephemeral buffer scoped to the
//! table's designated search column. The buffer resets after 3 seconds of
//! inactivity, on backspace past the last character, or when the targeted
//! column changes.

use std::time::{Duration, Instant};

/// Idle time after which the next keystroke starts a fresh buffer.
pub const SEARCH_RESET_AFTER: Duration = Duration::from_secs(3);

/// Accumulating keystroke buffer for type-ahead row selection.
pub struct SearchBuffer {
    text: String,
    column: usize,
    last_key: Option<Instant>,
}

impl SearchBuffer {
    pub fn new(column: usize) -> Self {
        Self {
            text: String::new(),
            column,
            last_key: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// Append a keystroke, starting over first if the buffer has expired.
    /// Returns the query to match against.
    pub fn push(&mut self, ch: char, now: Instant) -> &str {
        if let Some(last) = self.last_key
            && now.duration_since(last) >= SEARCH_RESET_AFTER
        {
            self.text.clear();
        }
        self.last_key = Some(now);
        self.text.push(ch);
        &self.text
    }

    /// Drop the last character; an emptied buffer resets entirely.
    pub fn backspace(&mut self) {
        self.text.pop();
        if self.text.is_empty() {
            self.last_key = None;
        }
    }

    /// Retarget the buffer to another column, resetting it if it moved.
    pub fn set_column(&mut self, column: usize) {
        if self.column != column {
            self.column = column;
            self.clear();
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.last_key = None;
    }
}

/// Find the row a query selects: the first whose text starts with the query
/// (case-insensitive), falling back to the first that contains it. `None`
/// leaves the caller's selection unchanged.
pub fn select_match(texts: &[String], query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let query = query.to_lowercase();
    let lowered: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    lowered
        .iter()
        .position(|t| t.starts_with(&query))
        .or_else(|| lowered.iter().position(|t| t.contains(&query)))
}
