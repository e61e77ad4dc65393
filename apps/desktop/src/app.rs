//! Root application component — title bar, profile page, and the Find Users sheet.

use dioxus::prelude::*;
use usersearch_core::view::PROFILE_ROUTE_PREFIX;

use crate::sheet::SearchUserSheet;
use crate::state::*;
use crate::INITIAL_STATE;

static APP_CSS: Asset = asset!("/assets/styles/app.css");

#[component]
pub fn App() -> Element {
    let state = use_context_provider(|| {
        INITIAL_STATE
            .lock()
            .unwrap()
            .take()
            .expect("INITIAL_STATE is set in main before launch")
    });

    let session_controller = state.controller.clone();
    use_future(move || mirror_session(session_controller.clone()));
    let panel_store = state.controller.panel().clone();
    use_future(move || mirror_panel(panel_store.clone()));

    let opener = state.controller.panel().clone();

    rsx! {
        document::Stylesheet { href: APP_CSS }

        div {
            class: "app-shell",

            header {
                class: "titlebar",
                span { class: "titlebar-title", "UserSearch" }
                button {
                    class: "find-users-btn",
                    onclick: move |_| opener.open(),
                    svg {
                        width: "16",
                        height: "16",
                        view_box: "0 0 24 24",
                        fill: "none",
                        stroke: "currentColor",
                        stroke_width: "2",
                        circle { cx: "11", cy: "11", r: "8" }
                        line { x1: "21", y1: "21", x2: "16.65", y2: "16.65" }
                    }
                    span { "Find Users" }
                }
            }

            main {
                class: "content-area",
                ProfilePage {}
            }

            SearchUserSheet {}
        }
    }
}

/// Stand-in for the profile page the panel navigates to.
#[component]
fn ProfilePage() -> Element {
    let state = use_context::<AppState>();
    let route = ROUTE.read().clone();

    let Some(route) = route else {
        return rsx! {
            div {
                class: "content-empty",
                span { "Open Find Users to look someone up." }
            }
        };
    };

    let username = route.strip_prefix(PROFILE_ROUTE_PREFIX).unwrap_or(&route).to_string();
    rsx! {
        div {
            class: "profile-page",
            h1 { class: "profile-handle", "@{username}" }
            div { class: "profile-route", "{state.base_url}{route}" }
        }
    }
}
