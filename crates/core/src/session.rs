//! Per-mount search session state and its transitions.
//!
//! The session is plain data. The controller drives it; tests can drive it
//! directly without timers or a network.

use crate::types::User;
use crate::view::{render_panel, PanelView};

/// Sequence number of an issued search. Only the latest one may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchSeq(u64);

/// What committing a debounced query asks the caller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Issue one search for `query`.
    Search { query: String, seq: SearchSeq },
    /// Query went empty: search state was reset, nothing to fetch.
    Cleared,
    /// Same as the last committed query.
    Unchanged,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Suggestions {
    pub requested: bool,
    pub loading: bool,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    query: String,
    committed: String,
    loading: bool,
    error: Option<String>,
    users: Vec<User>,
    latest: u64,
    suggestions: Suggestions,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn committed(&self) -> &str {
        &self.committed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// Record live input. Does not touch search results.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Commit a debounced value.
    ///
    /// A new non-empty query clears previous results and error and marks the
    /// session loading before the request goes out. An empty query resets the
    /// search state and invalidates anything still in flight.
    /// The value is sent exactly as typed; only the empty string counts as empty.
    pub fn commit(&mut self, query: &str) -> Commit {
        if query == self.committed {
            return Commit::Unchanged;
        }
        self.committed = query.to_string();
        self.latest += 1;
        self.users.clear();
        self.error = None;

        if query.is_empty() {
            self.loading = false;
            return Commit::Cleared;
        }
        self.loading = true;
        Commit::Search { query: query.to_string(), seq: SearchSeq(self.latest) }
    }

    /// Land a search response. Returns `false` (and changes nothing) if a newer
    /// search has been issued since `seq`.
    pub fn finish_search(&mut self, seq: SearchSeq, outcome: Result<Vec<User>, String>) -> bool {
        if seq.0 != self.latest {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(users) => {
                self.users = users;
                self.error = None;
            }
            Err(message) => {
                self.users.clear();
                self.error = Some(message);
            }
        }
        true
    }

    /// Mark suggestions as requested. Returns `false` if they already were.
    pub fn begin_suggestions(&mut self) -> bool {
        if self.suggestions.requested {
            return false;
        }
        self.suggestions.requested = true;
        self.suggestions.loading = true;
        true
    }

    /// Store fetched suggestions. `None` means the fetch failed; the list stays empty.
    pub fn finish_suggestions(&mut self, users: Option<Vec<User>>) {
        self.suggestions.loading = false;
        self.suggestions.users = users.unwrap_or_default();
    }

    pub fn view(&self) -> PanelView {
        render_panel(
            &self.query,
            &self.suggestions.users,
            &self.users,
            self.error.as_deref(),
            self.loading,
        )
    }
}
