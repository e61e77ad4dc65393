//! Search input with debounced commits.

use dioxus::prelude::*;

use crate::state::*;

#[component]
pub fn SearchInput() -> Element {
    let state = use_context::<AppState>();
    let query = QUERY.read();
    let has_query = !query.is_empty();

    let typing = state.controller.clone();
    let clearing = state.controller.clone();

    rsx! {
        div {
            class: if has_query { "search-field has-query" } else { "search-field" },

            svg {
                class: "search-icon",
                width: "16",
                height: "16",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "11", cy: "11", r: "8" }
                line { x1: "21", y1: "21", x2: "16.65", y2: "16.65" }
            }

            input {
                class: "search-input",
                r#type: "search",
                placeholder: "Search users...",
                value: "{query}",
                autofocus: true,
                oninput: move |e: Event<FormData>| {
                    let value = e.value();
                    *QUERY.write() = value.clone();

                    // Each keystroke restarts the window; only the last one commits
                    let ticket = typing.input(&value);
                    let controller = typing.clone();
                    spawn(async move {
                        controller.settle(ticket).await;
                    });
                },
            }

            if has_query {
                button {
                    class: "search-clear",
                    onclick: move |_| {
                        *QUERY.write() = String::new();
                        clearing.input("");
                        let controller = clearing.clone();
                        spawn(async move {
                            controller.commit("").await;
                        });
                    },
                    "\u{00D7}"
                }
            }
        }
    }
}
