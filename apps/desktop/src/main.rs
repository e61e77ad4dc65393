//! UserSearch Desktop — Dioxus shell around the Find Users panel.

use std::sync::Mutex;

use dioxus::prelude::*;

mod app;
mod sheet;
mod state;

use app::App;
use state::AppState;

/// Pre-runtime storage — built before Dioxus launches, consumed on first render.
pub static INITIAL_STATE: Mutex<Option<AppState>> = Mutex::new(None);

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("usersearch=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    // Resolve config and build the directory client before the UI starts
    let initial_state = match AppState::from_cwd() {
        Ok(state) => state,
        Err(e) => {
            eprintln!("UserSearch: {e}");
            std::process::exit(1);
        }
    };
    *INITIAL_STATE.lock().unwrap() = Some(initial_state);

    #[cfg(feature = "desktop")]
    {
        use dioxus::desktop::{Config, LogicalSize, WindowBuilder};

        LaunchBuilder::new()
            .with_cfg(
                Config::default()
                    .with_menu(None)
                    .with_background_color((10, 10, 10, 255))
                    .with_disable_context_menu(true)
                    .with_window(
                        WindowBuilder::new()
                            .with_title("UserSearch")
                            .with_inner_size(LogicalSize::new(1100.0, 760.0))
                            .with_min_inner_size(LogicalSize::new(480.0, 400.0))
                            .with_resizable(true)
                            .with_decorations(true),
                    ),
            )
            .launch(App);
    }

    #[cfg(not(feature = "desktop"))]
    {
        dioxus::launch(App);
    }
}
