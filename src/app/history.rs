//! Session-scoped analysis history.
//!
//! Entries are kept newest first. Insertion happens only at the front, so the
//! order always matches settlement order. With a limit configured the oldest
//! entries are evicted; otherwise the log grows for the life of the plugin.

use crate::domain::{AnalysisResult, HistoryEntry};
use std::collections::VecDeque;

/// Newest-first log of settled analyses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    limit: Option<usize>,
}

impl History {
    /// Creates an empty history. `None` (or `Some(0)`) means unbounded.
    #[must_use]
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.filter(|&n| n > 0),
        }
    }

    /// Prepends a result, evicting the oldest entries beyond the limit.
    pub fn push(&mut self, result: AnalysisResult) {
        self.push_entry(HistoryEntry::new(result));
    }

    pub(crate) fn push_entry(&mut self, entry: HistoryEntry) {
        self.entries.push_front(entry);

        if let Some(limit) = self.limit {
            while self.entries.len() > limit {
                if let Some(evicted) = self.entries.pop_back() {
                    tracing::debug!(
                        limit = limit,
                        evicted_recorded_at = evicted.recorded_at,
                        "history limit reached, evicted oldest entry"
                    );
                }
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn limit(&self) -> Option<usize> {
        self.limit
    }

    /// Entry at `index`, where `0` is the most recent.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawAnalysisResponse;

    fn result(text: &str) -> AnalysisResult {
        AnalysisResult::from_response(text.to_string(), RawAnalysisResponse::default())
    }

    fn texts(history: &History) -> Vec<&str> {
        history.iter().map(|e| e.result.text.as_str()).collect()
    }

    #[test]
    fn newest_entry_comes_first() {
        let mut history = History::new(None);
        history.push(result("first"));
        history.push(result("second"));
        history.push(result("third"));

        assert_eq!(texts(&history), ["third", "second", "first"]);
        assert_eq!(history.get(0).map(|e| e.result.text.as_str()), Some("third"));
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = History::new(Some(2));
        history.push(result("a"));
        history.push(result("b"));
        history.push(result("c"));

        assert_eq!(history.len(), 2);
        assert_eq!(texts(&history), ["c", "b"]);
    }

    #[test]
    fn zero_limit_means_unbounded() {
        let mut history = History::new(Some(0));
        for i in 0..50 {
            history.push(result(&i.to_string()));
        }
        assert_eq!(history.limit(), None);
        assert_eq!(history.len(), 50);
    }
}
