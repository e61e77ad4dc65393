//! Suggested users, search results, or "No users found", plus the error line.

use dioxus::prelude::*;
use usersearch_core::view::{ResultList, NO_USERS_FOUND};

use super::user_item::UserItem;
use crate::state::*;

#[component]
pub fn ResultsPane() -> Element {
    let view = VIEW.read().clone();
    let heading = view.list.heading();
    let error_text = view.error.clone().unwrap_or_default();

    rsx! {
        div {
            class: "scroll-area",
            h3 { class: "list-heading", "{heading}" }

            {match &view.list {
                ResultList::NoUsersFound => rsx! {
                    p { class: "list-empty", "{NO_USERS_FOUND}" }
                },
                list => rsx! {
                    div {
                        class: "user-list",
                        for row in list.rows().iter().cloned() {
                            UserItem { key: "{row.id}", row }
                        }
                    }
                },
            }}

            if view.loading {
                div { class: "search-loading", "Searching\u{2026}" }
            }
        }

        if view.error.is_some() {
            div { class: "search-error", "{error_text}" }
        }
    }
}
