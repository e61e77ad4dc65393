//! Search controller — the glue between typed input, the directory, and the panel.
//!
//! Input is debounced, each committed query issues exactly one request, and a
//! newer request cancels the one before it. Session state is published on a
//! watch channel so any front end can subscribe and re-render.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::debounce::{Debouncer, Ticket};
use crate::directory::UserDirectory;
use crate::session::{Commit, SearchSeq, SearchSession};
use crate::store::PanelStore;
use crate::view::{profile_route, PanelView, UserRow};

/// Where row selection sends the user. Implemented by the host's router.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

#[derive(Clone)]
pub struct SearchController {
    inner: Arc<Inner>,
}

struct Inner {
    directory: Arc<dyn UserDirectory>,
    navigator: Arc<dyn Navigator>,
    panel: PanelStore,
    debouncer: Debouncer,
    state: watch::Sender<SearchSession>,
    /// Token of the newest search issued, tagged with its sequence number.
    inflight: Mutex<Option<(SearchSeq, CancellationToken)>>,
}

impl SearchController {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        navigator: Arc<dyn Navigator>,
        panel: PanelStore,
        debounce: Duration,
    ) -> Self {
        let (state, _rx) = watch::channel(SearchSession::new());
        Self {
            inner: Arc::new(Inner {
                directory,
                navigator,
                panel,
                debouncer: Debouncer::new(debounce),
                state,
                inflight: Mutex::new(None),
            }),
        }
    }

    pub fn panel(&self) -> &PanelStore {
        &self.inner.panel
    }

    /// Receiver that wakes whenever the session changes.
    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SearchSession {
        self.inner.state.borrow().clone()
    }

    pub fn view(&self) -> PanelView {
        self.inner.state.borrow().view()
    }

    // -----------------------------------------------------------------------
    // Suggestions
    // -----------------------------------------------------------------------

    /// Fetch suggested users. Only the first call per controller does anything;
    /// a failure is logged and leaves the list empty, with no retry.
    pub async fn load_suggestions(&self) {
        let mut first = false;
        self.inner.state.send_if_modified(|s| {
            first = s.begin_suggestions();
            first
        });
        if !first {
            return;
        }

        let users = match self.inner.directory.suggested_users().await {
            Ok(users) => {
                debug!(count = users.len(), "Loaded suggested users");
                Some(users)
            }
            Err(e) => {
                warn!(error = %e, "Could not load suggested users");
                None
            }
        };
        self.inner.state.send_modify(|s| s.finish_suggestions(users));
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Record a keystroke and restart the debounce window.
    pub fn input(&self, text: &str) -> Ticket {
        self.inner.state.send_modify(|s| s.set_query(text));
        self.inner.debouncer.bump()
    }

    /// Wait out the debounce window for `ticket` and commit the current query
    /// if nothing newer was typed. Returns whether a commit happened.
    pub async fn settle(&self, ticket: Ticket) -> bool {
        if !self.inner.debouncer.settle(ticket).await {
            return false;
        }
        let query = self.inner.state.borrow().query().to_string();
        self.commit(&query).await;
        true
    }

    /// [`input`](Self::input) followed by a spawned [`settle`](Self::settle).
    pub fn on_input(&self, text: &str) -> JoinHandle<bool> {
        let ticket = self.input(text);
        let this = self.clone();
        tokio::spawn(async move { this.settle(ticket).await })
    }

    /// Commit `query` immediately, bypassing the debounce window.
    pub async fn commit(&self, query: &str) {
        let mut commit = Commit::Unchanged;
        self.inner.state.send_if_modified(|s| {
            commit = s.commit(query);
            commit != Commit::Unchanged
        });

        match commit {
            Commit::Search { query, seq } => self.run_search(query, seq).await,
            Commit::Cleared => {
                debug!("Query cleared, falling back to suggestions");
                self.cancel_inflight();
            }
            Commit::Unchanged => {}
        }
    }

    async fn run_search(&self, query: String, seq: SearchSeq) {
        let token = CancellationToken::new();
        {
            let mut slot = self.lock_inflight();
            if matches!(slot.as_ref(), Some((newest, _)) if *newest > seq) {
                debug!(query = query.as_str(), "Newer search already issued, skipping");
                return;
            }
            if let Some((_, previous)) = slot.replace((seq, token.clone())) {
                previous.cancel();
            }
        }

        debug!(query = query.as_str(), "Issuing user search");
        let outcome = tokio::select! {
            _ = token.cancelled() => {
                debug!(query = query.as_str(), "Search superseded, dropping request");
                return;
            }
            res = self.inner.directory.search_users(&query) => res,
        };

        let outcome = outcome.map_err(|e| {
            warn!(error = %e, query = query.as_str(), "Error fetching user");
            e.user_message().to_string()
        });
        {
            let mut slot = self.lock_inflight();
            if matches!(slot.as_ref(), Some((current, _)) if *current == seq) {
                slot.take();
            }
        }
        let landed = self.inner.state.send_if_modified(|s| s.finish_search(seq, outcome));
        if !landed {
            debug!(query = query.as_str(), "Discarded stale search response");
        }
    }

    /// Cancel any in-flight search. Call when the panel is torn down.
    pub fn cancel_inflight(&self) {
        if let Some((_, token)) = self.lock_inflight().take() {
            token.cancel();
        }
    }

    fn lock_inflight(&self) -> std::sync::MutexGuard<'_, Option<(SearchSeq, CancellationToken)>> {
        self.inner.inflight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Navigate to the row's profile and close the panel. Returns the route.
    pub fn select(&self, row: &UserRow) -> String {
        self.navigate_to(&row.username)
    }

    fn navigate_to(&self, username: &str) -> String {
        let route = profile_route(username);
        info!(route = route.as_str(), "Opening profile");
        self.inner.navigator.navigate(&route);
        self.inner.panel.close();
        route
    }
}
