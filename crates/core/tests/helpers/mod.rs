//! Test harness for directory and panel integration tests.
//!
//! Starts an axum stub of the user directory on an ephemeral localhost port
//! and records every search query it receives.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use usersearch_core::{ClientConfig, HttpDirectory, Navigator, PanelStore, SearchController, User};

#[derive(Default)]
struct Backend {
    users: Vec<User>,
    fail_status: Option<StatusCode>,
    queries: Mutex<Vec<String>>,
}

pub struct StubBackend {
    pub base_url: String,
    backend: Arc<Backend>,
}

impl StubBackend {
    /// A healthy directory holding `users`.
    pub async fn with_users(users: Vec<User>) -> Self {
        Self::start(Backend { users, ..Default::default() }).await
    }

    /// A directory whose search endpoint always answers `status`.
    pub async fn failing(status: StatusCode) -> Self {
        Self::start(Backend { fail_status: Some(status), ..Default::default() }).await
    }

    async fn start(backend: Backend) -> Self {
        let backend = Arc::new(backend);
        let app = Router::new()
            .route("/api/search", get(search))
            .route("/api/users/suggested", get(suggested))
            .with_state(backend.clone());

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind stub");
        let addr = listener.local_addr().expect("No local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Stub server failed");
        });

        StubBackend { base_url: format!("http://{addr}"), backend }
    }

    /// Every `q` value the search endpoint has seen, in arrival order.
    pub fn queries(&self) -> Vec<String> {
        self.backend.queries.lock().unwrap().clone()
    }

    pub fn config(&self, debounce_ms: u64) -> ClientConfig {
        let mut config = ClientConfig::default();
        config.set_base_url(&self.base_url).unwrap();
        config.debounce = Duration::from_millis(debounce_ms);
        config
    }

    pub fn directory(&self) -> HttpDirectory {
        HttpDirectory::new(&self.config(0)).expect("Failed to build directory")
    }

    /// A mounted panel (open) wired to this backend.
    pub fn panel(&self, debounce_ms: u64) -> (SearchController, Arc<RecordingNavigator>) {
        let nav = Arc::new(RecordingNavigator::default());
        let controller = SearchController::new(
            Arc::new(self.directory()),
            nav.clone(),
            PanelStore::new(true),
            Duration::from_millis(debounce_ms),
        );
        (controller, nav)
    }
}

async fn search(
    State(backend): State<Arc<Backend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let q = params.get("q").cloned().unwrap_or_default();
    backend.queries.lock().unwrap().push(q.clone());

    if let Some(status) = backend.fail_status {
        return (status, Json(serde_json::json!({ "error": "database unavailable" })))
            .into_response();
    }

    let needle = q.to_lowercase();
    let users: Vec<&User> = backend
        .users
        .iter()
        .filter(|u| {
            u.username.to_lowercase().contains(&needle) || u.name.to_lowercase().contains(&needle)
        })
        .collect();
    Json(serde_json::json!({ "users": users })).into_response()
}

/// Served as a bare array to exercise the untagged envelope.
async fn suggested(State(backend): State<Arc<Backend>>) -> Json<Vec<User>> {
    Json(backend.users.iter().take(3).cloned().collect())
}

#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

pub fn people() -> Vec<User> {
    vec![
        User::new("ck1", "Alice Liddell", "alice").with_image("https://cdn.example/alice.png"),
        User::new("ck2", "Alan Turing", "aturing"),
        User::new("ck3", "Bob Ross", "bob"),
        User::new("ck4", "Carol Danvers", "carol"),
    ]
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
