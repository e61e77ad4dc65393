//! Application state: the search controller plus Dioxus signals mirroring it.

use std::sync::Arc;

use dioxus::prelude::*;
use tracing::{debug, info};
use usersearch_core::view::PanelView;
use usersearch_core::{ClientConfig, HttpDirectory, Navigator, PanelStore, SearchController};

/// Everything the UI needs, built once at startup and shared through context.
#[derive(Clone)]
pub struct AppState {
    pub controller: SearchController,
    pub base_url: String,
}

impl AppState {
    /// Load config for the current working directory and wire the controller.
    pub fn from_cwd() -> Result<Self, String> {
        let cwd = std::env::current_dir().map_err(|e| format!("no working directory: {e}"))?;
        let config = ClientConfig::load(&cwd).map_err(|e| e.to_string())?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, String> {
        let directory = HttpDirectory::new(config).map_err(|e| e.to_string())?;
        info!(
            base_url = config.base_url.as_str(),
            debounce_ms = config.debounce.as_millis() as u64,
            "Directory client ready"
        );
        let controller = SearchController::new(
            Arc::new(directory),
            Arc::new(SignalNavigator),
            PanelStore::default(),
            config.debounce,
        );
        Ok(AppState { controller, base_url: config.base_url.clone() })
    }
}

/// Routes profile navigation into the [`ROUTE`] signal.
pub struct SignalNavigator;

impl Navigator for SignalNavigator {
    fn navigate(&self, route: &str) {
        debug!(route, "Showing profile");
        *ROUTE.write() = Some(route.to_string());
    }
}

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Mirror of the panel store's open flag
pub static PANEL_OPEN: GlobalSignal<bool> = Signal::global(|| false);

/// Live text in the search input
pub static QUERY: GlobalSignal<String> = Signal::global(String::new);

/// What the sheet currently shows
pub static VIEW: GlobalSignal<PanelView> = Signal::global(PanelView::default);

/// Profile route the user navigated to, if any
pub static ROUTE: GlobalSignal<Option<String>> = Signal::global(|| None);

// ---------------------------------------------------------------------------
// Store → signal bridges
// ---------------------------------------------------------------------------

/// Copy every session change into [`VIEW`]. Runs for the lifetime of the app.
pub async fn mirror_session(controller: SearchController) {
    let mut rx = controller.subscribe();
    loop {
        let view = rx.borrow_and_update().view();
        *VIEW.write() = view;
        if rx.changed().await.is_err() {
            break;
        }
    }
}

/// Copy panel open/close transitions into [`PANEL_OPEN`].
pub async fn mirror_panel(panel: PanelStore) {
    let mut rx = panel.subscribe();
    loop {
        let open = *rx.borrow_and_update();
        *PANEL_OPEN.write() = open;
        if rx.changed().await.is_err() {
            break;
        }
    }
}
