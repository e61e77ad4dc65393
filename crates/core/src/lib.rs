//! UserSearch core — the logic behind the "Find Users" panel.
//!
//! A signed-in user opens a slide-out panel, sees a list of suggested users,
//! types a name or username, and picks a row to open that user's profile.
//! This crate holds everything except the pixels, so desktop, web and terminal
//! front ends share one behaviour.
//!
//! # Modules
//!
//! - [`store`] — Panel visibility with subscribe/notify
//! - [`debounce`] — Generation-counter debouncing
//! - [`session`] — Per-mount search state and transitions
//! - [`view`] — Pure derivation of what the panel shows
//! - [`controller`] — Debounced search, cancellation, suggestions, navigation
//! - [`directory`] — The `UserDirectory` trait
//! - [`http`] — reqwest-backed directory client (feature `http`)
//! - [`config`] — `.usersearch.toml` loading
//! - [`types`] — Wire types
//! - [`error`] — Fetch and config errors

pub mod config;
pub mod controller;
pub mod debounce;
pub mod directory;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use config::ClientConfig;
pub use controller::{Navigator, SearchController};
pub use directory::UserDirectory;
pub use error::{ConfigError, FetchError, GENERIC_SEARCH_ERROR};
#[cfg(feature = "http")]
pub use http::HttpDirectory;
pub use store::PanelStore;
pub use types::User;
pub use view::{PanelView, ResultList, UserRow};
