//! The current search query.

use crate::observable::{Observable, Subscription};

/// Observable holder of the in-progress or last submitted query.
///
/// Starts out as the empty string and is never absent.
#[derive(Debug, Clone, Default)]
pub struct QueryState {
    current: Observable<String>,
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current query text.
    pub fn get(&self) -> String {
        self.current.get()
    }

    /// Replace the query and notify every subscriber with the new text.
    pub fn set(&self, value: impl Into<String>) {
        let value = value.into();
        tracing::trace!(len = value.len(), "query set");
        self.current.set(value);
    }

    /// Reset the query to the empty string.
    pub fn clear(&self) {
        self.set(String::new());
    }

    /// Receive the current query now and every replacement afterwards.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.current
            .subscribe(move |value: &String| callback(value.as_str()))
    }

    pub fn subscriber_count(&self) -> usize {
        self.current.subscriber_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn starts_empty() {
        assert_eq!(QueryState::new().get(), "");
    }

    #[test]
    fn get_returns_last_value_set() {
        let query = QueryState::new();
        for value in ["c", "ca", "cat", "cats", ""] {
            query.set(value);
        }
        assert_eq!(query.get(), "");

        query.set("dogs");
        assert_eq!(query.get(), "dogs");
    }

    #[test]
    fn subscribers_see_replay_then_updates() {
        let query = QueryState::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let sub = query.subscribe(move |q| sink.lock().push(q.to_string()));
        query.set("cats");
        query.clear();
        sub.unsubscribe();
        query.set("ignored");

        assert_eq!(*seen.lock(), vec!["", "cats", ""]);
        assert_eq!(query.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_the_same_cell() {
        let query = QueryState::new();
        let other = query.clone();

        other.set("shared");

        assert_eq!(query.get(), "shared");
    }
}
