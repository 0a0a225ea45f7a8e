//! In-session history of finished expressions
//!
//! Bounded, oldest entries drop first. Nothing is written to disk.

use serde::Serialize;
use std::collections::VecDeque;

use crate::core::format::format_number;

/// A single finished expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    /// The evaluated expression, without the result (`2 + 3 × 4`)
    pub expression: String,
    /// The result of the evaluation
    pub result: f64,
    /// When the expression was evaluated (Unix epoch millis)
    pub timestamp: u64,
}

impl HistoryEntry {
    /// Creates a new entry stamped with the current time
    #[must_use]
    pub fn new(expression: String, result: f64) -> Self {
        Self {
            expression,
            result,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Creates an entry with a specific timestamp
    #[must_use]
    pub fn with_timestamp(expression: String, result: f64, timestamp: u64) -> Self {
        Self {
            expression,
            result,
            timestamp,
        }
    }

    fn current_timestamp() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Returns the full trace, `expression = result`
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} = {}", self.expression, format_number(self.result))
    }
}

/// Bounded queue of finished expressions
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    max_entries: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Default maximum history size
    pub const DEFAULT_MAX_ENTRIES: usize = 100;

    /// Creates a history with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_MAX_ENTRIES)
    }

    /// Creates a history keeping at most `max_entries` (at least one)
    #[must_use]
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(Self::DEFAULT_MAX_ENTRIES)),
            max_entries,
        }
    }

    /// Adds an entry, evicting the oldest when full
    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Records a finished expression
    pub fn record(&mut self, expression: &str, result: f64) {
        self.push(HistoryEntry::new(expression.to_string(), result));
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept
    #[must_use]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Newest first
    pub fn iter_rev(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// The most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    /// The last `n` entries, newest first
    #[must_use]
    pub fn last_n(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== HistoryEntry tests =====

    #[test]
    fn test_entry_display() {
        let entry = HistoryEntry::with_timestamp("2 + 3 × 4".into(), 14.0, 0);
        assert_eq!(entry.display(), "2 + 3 × 4 = 14");
    }

    #[test]
    fn test_entry_display_fraction() {
        let entry = HistoryEntry::with_timestamp("3 ÷ 2".into(), 1.5, 0);
        assert_eq!(entry.display(), "3 ÷ 2 = 1.5");
    }

    #[test]
    fn test_entry_new_has_timestamp() {
        let entry = HistoryEntry::new("1 + 1".into(), 2.0);
        assert!(entry.timestamp > 0);
    }

    // ===== History tests =====

    #[test]
    fn test_history_new_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.max_entries(), History::DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_history_record_and_last() {
        let mut history = History::new();
        history.record("5 + 3", 8.0);
        history.record("8 + 2", 10.0);
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().expression, "8 + 2");
    }

    #[test]
    fn test_history_bounded() {
        let mut history = History::with_capacity(2);
        history.record("1 + 0", 1.0);
        history.record("1 + 1", 2.0);
        history.record("1 + 2", 3.0);
        assert_eq!(history.len(), 2);
        let results: Vec<f64> = history.iter().map(|e| e.result).collect();
        assert_eq!(results, vec![2.0, 3.0]);
    }

    #[test]
    fn test_history_zero_capacity_keeps_one() {
        let mut history = History::with_capacity(0);
        history.record("1 + 1", 2.0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_history_iter_rev_and_last_n() {
        let mut history = History::new();
        for i in 0..5 {
            history.record(&format!("{i} + 0"), f64::from(i));
        }
        let newest: Vec<f64> = history.iter_rev().map(|e| e.result).collect();
        assert_eq!(newest, vec![4.0, 3.0, 2.0, 1.0, 0.0]);
        let last_two: Vec<f64> = history.last_n(2).iter().map(|e| e.result).collect();
        assert_eq!(last_two, vec![4.0, 3.0]);
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.record("1 + 1", 2.0);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_entry_serializes() {
        let entry = HistoryEntry::with_timestamp("6 × 7".into(), 42.0, 1);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"expression\":\"6 × 7\""));
        assert!(json.contains("\"result\":42.0"));
    }
}
