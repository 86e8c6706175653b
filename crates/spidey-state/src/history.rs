//! Submitted query history.
//!
//! Entries are stored oldest first, in the order `append` was admitted. The
//! store never filters: empty strings and repeats are recorded as given, and
//! any validation is the caller's job (see [`crate::SearchInput`]).

use crate::observable::{Observable, Subscription};

/// Observable, append-only (plus reset) sequence of submitted queries.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    entries: Observable<Vec<String>>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every entry, oldest first.
    ///
    /// The returned vector is a copy and does not change under later appends.
    pub fn get(&self) -> Vec<String> {
        self.entries.get()
    }

    /// Add `query` to the end of the history and notify subscribers with the
    /// full updated sequence.
    pub fn append(&self, query: impl Into<String>) {
        let query = query.into();
        self.entries.update(move |entries| entries.push(query));
        tracing::debug!(len = self.len(), "history appended");
    }

    /// Drop every entry and notify subscribers with the empty sequence.
    pub fn reset(&self) {
        self.entries.update(Vec::clear);
        tracing::debug!("history reset");
    }

    /// Receive the full sequence now and after every append or reset.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.entries
            .subscribe(move |entries: &Vec<String>| callback(entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.with(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recently appended entry.
    pub fn latest(&self) -> Option<String> {
        self.entries.with(|entries| entries.last().cloned())
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<String> {
        self.entries
            .with(|entries| entries.iter().rev().take(n).cloned().collect())
    }

    pub fn subscriber_count(&self) -> usize {
        self.entries.subscriber_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn append_keeps_call_order() {
        let history = HistoryState::new();
        let values = ["rust", "svelte", "rust", "", "   "];
        for v in values {
            history.append(v);
        }

        assert_eq!(history.get(), values);
        assert_eq!(history.len(), values.len());
        assert_eq!(history.latest().as_deref(), Some("   "));
    }

    #[test]
    fn snapshot_is_isolated_from_later_appends() {
        let history = HistoryState::new();
        history.append("first");

        let snapshot = history.get();
        history.append("second");

        assert_eq!(snapshot, vec!["first"]);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn reset_empties_and_notifies() {
        let history = HistoryState::new();
        history.append("a");
        history.append("b");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = history.subscribe(move |entries| sink.lock().push(entries.to_vec()));

        history.reset();

        assert!(history.is_empty());
        assert_eq!(
            *seen.lock(),
            vec![vec!["a".to_string(), "b".to_string()], Vec::<String>::new()]
        );
    }

    #[test]
    fn recent_is_newest_first_and_bounded() {
        let history = HistoryState::new();
        for v in ["one", "two", "three"] {
            history.append(v);
        }

        assert_eq!(history.recent(2), vec!["three", "two"]);
        assert_eq!(history.recent(10), vec!["three", "two", "one"]);
        assert!(history.recent(0).is_empty());
        assert_eq!(history.get(), vec!["one", "two", "three"]);
    }

    #[test]
    fn latest_on_empty_history_is_none() {
        assert_eq!(HistoryState::new().latest(), None);
    }
}
