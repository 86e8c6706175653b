//! spidey-state: Observable search state shared by the search UI components.
//!
//! Two cells make up the core: [`QueryState`] (the current query string) and
//! [`HistoryState`] (submitted queries, oldest first). Both are built on the
//! generic [`Observable`] and are handed to components through an explicitly
//! constructed [`SearchStores`] context rather than living in globals.
//! [`SearchInput`] is the collaborator that validates user input before it
//! reaches the cells.

pub mod history;
pub mod input;
pub mod observable;
pub mod query;
pub mod stores;

pub use history::HistoryState;
pub use input::{InputPolicy, SearchInput};
pub use observable::{Observable, Subscription};
pub use query::QueryState;
pub use stores::SearchStores;
