//! Find Users sheet — slide-out overlay with search input and result list.

mod result_list;
mod search_input;
mod user_item;

use dioxus::prelude::*;
use result_list::ResultsPane;
use search_input::SearchInput;

use crate::state::*;

/// Always mounted; visibility follows [`PANEL_OPEN`]. Suggestions are fetched
/// once when the sheet mounts, not each time it opens.
#[component]
pub fn SearchUserSheet() -> Element {
    let state = use_context::<AppState>();

    let loader = state.controller.clone();
    use_future(move || {
        let controller = loader.clone();
        async move { controller.load_suggestions().await }
    });
    let teardown = state.controller.clone();
    use_drop(move || teardown.cancel_inflight());

    let open = *PANEL_OPEN.read();
    let overlay_panel = state.controller.panel().clone();
    let close_panel = state.controller.panel().clone();

    rsx! {
        div {
            class: if open { "sheet-overlay open" } else { "sheet-overlay" },
            onclick: move |_| overlay_panel.close(),
        }
        aside {
            class: if open { "sheet open" } else { "sheet" },

            div {
                class: "sheet-header",
                h2 { class: "sheet-title", "Find Users" }
                button {
                    class: "sheet-close",
                    title: "Close",
                    onclick: move |_| close_panel.close(),
                    "\u{00D7}"
                }
            }

            div {
                class: "sheet-body",
                SearchInput {}
                ResultsPane {}
            }
        }
    }
}
