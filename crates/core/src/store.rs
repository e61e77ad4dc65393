//! Shared visibility state for the search panel.
//!
//! The store owns the open/closed flag. Clones share the same flag, and any
//! number of subscribers are notified when it actually changes.

use tokio::sync::watch;
use tracing::debug;

#[derive(Clone)]
pub struct PanelStore {
    tx: watch::Sender<bool>,
}

impl Default for PanelStore {
    fn default() -> Self {
        Self::new(false)
    }
}

impl PanelStore {
    pub fn new(open: bool) -> Self {
        let (tx, _rx) = watch::channel(open);
        Self { tx }
    }

    pub fn is_open(&self) -> bool {
        *self.tx.borrow()
    }

    pub fn open(&self) {
        self.set(true);
    }

    pub fn close(&self) {
        self.set(false);
    }

    pub fn toggle(&self) {
        self.tx.send_modify(|open| *open = !*open);
        debug!(open = self.is_open(), "Panel toggled");
    }

    /// Receiver that wakes on every open/close transition.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    fn set(&self, open: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == open {
                false
            } else {
                *current = open;
                true
            }
        });
        if changed {
            debug!(open, "Panel visibility changed");
        }
    }
}
