//! The search state context handed to UI components.

use crate::{HistoryState, QueryState};

/// Both search cells, constructed once and injected into every component.
///
/// Cloning shares the underlying cells; two separately constructed
/// `SearchStores` are fully independent, which keeps tests isolated.
#[derive(Debug, Clone, Default)]
pub struct SearchStores {
    pub query: QueryState,
    pub history: HistoryState,
}

impl SearchStores {
    pub fn new() -> Self {
        Self::default()
    }
}
