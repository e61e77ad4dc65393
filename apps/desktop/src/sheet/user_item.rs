//! A single user row: avatar, display name, and handle.

use dioxus::prelude::*;
use usersearch_core::UserRow;

use crate::state::*;

/// Clicking navigates to the user's profile and closes the sheet.
#[component]
pub fn UserItem(row: UserRow) -> Element {
    let state = use_context::<AppState>();
    let controller = state.controller.clone();
    let target = row.clone();

    rsx! {
        div {
            class: "user-item",
            role: "link",
            title: "{row.route}",
            onclick: move |_| {
                controller.select(&target);
            },

            div {
                class: "avatar",
                {match &row.avatar_url {
                    Some(url) => rsx! {
                        img { class: "avatar-img", src: "{url}", alt: "{row.username}" }
                    },
                    None => rsx! {
                        span { class: "avatar-fallback", "{row.initial}" }
                    },
                }}
            }

            div {
                class: "user-text",
                p { class: "user-name", "{row.name}" }
                p { class: "user-handle", "{row.handle}" }
            }
        }
    }
}
