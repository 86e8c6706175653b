//! Search box collaborator.
//!
//! The state cells accept anything. This is where user input gets checked
//! before it is pushed into them.

use crate::SearchStores;
use spidey_core::config::{Config, UpdateOn};
use spidey_core::{Error, Result};

/// Rules the search box applies before touching the stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPolicy {
    pub update_on: UpdateOn,
    pub trim: bool,
    /// Reject queries that are empty or whitespace-only.
    pub reject_empty: bool,
    pub skip_consecutive_duplicates: bool,
}

impl Default for InputPolicy {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for InputPolicy {
    fn from(config: &Config) -> Self {
        Self {
            update_on: config.input.update_on,
            trim: config.input.trim,
            reject_empty: config.input.reject_empty,
            skip_consecutive_duplicates: config.history.skip_consecutive_duplicates,
        }
    }
}

/// Text entry bound to a [`SearchStores`].
#[derive(Debug)]
pub struct SearchInput {
    stores: SearchStores,
    policy: InputPolicy,
    buffer: String,
}

impl SearchInput {
    pub fn new(stores: SearchStores, policy: InputPolicy) -> Self {
        Self {
            stores,
            policy,
            buffer: String::new(),
        }
    }

    /// Text currently in the box.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Replace the box contents, as on a keystroke.
    ///
    /// With [`UpdateOn::Keystroke`] the query cell follows the box verbatim.
    pub fn type_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        if self.policy.update_on == UpdateOn::Keystroke {
            self.stores.query.set(self.buffer.clone());
        }
    }

    /// Submit whatever is in the box.
    ///
    /// On success the query cell holds the submitted text and, unless it
    /// repeats the latest entry while duplicates are skipped, history has
    /// grown by one. Returns the text that was submitted.
    pub fn submit(&mut self) -> Result<String> {
        let query = if self.policy.trim {
            self.buffer.trim().to_string()
        } else {
            self.buffer.clone()
        };

        if self.policy.reject_empty && query.trim().is_empty() {
            tracing::debug!("rejected empty query");
            return Err(Error::EmptyQuery);
        }

        self.stores.query.set(query.clone());

        let repeat = self.policy.skip_consecutive_duplicates
            && self.stores.history.latest().as_deref() == Some(query.as_str());
        if repeat {
            tracing::debug!("query repeats latest history entry, not recorded");
        } else {
            self.stores.history.append(query.clone());
        }

        Ok(query)
    }

    /// Put `text` in the box and submit it in one step.
    pub fn submit_text(&mut self, text: impl Into<String>) -> Result<String> {
        self.buffer = text.into();
        self.submit()
    }

    /// Empty the box and the query cell.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.stores.query.clear();
    }

    /// Explicit user request to forget past searches.
    pub fn clear_history(&self) {
        self.stores.history.reset();
    }
}
