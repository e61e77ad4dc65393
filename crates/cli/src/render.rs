//! Plain-text and JSON rendering of panel views and user lists.

use usersearch_core::view::{PanelView, ResultList, UserRow, NO_USERS_FOUND};
use usersearch_core::User;

/// One row per user: name, handle, profile route.
pub fn user_line(index: usize, row: &UserRow) -> String {
    let name = if row.name.is_empty() { "(no name)" } else { row.name.as_str() };
    format!("{:>3}. {:<28} {:<20} {}", index + 1, name, row.handle, row.route)
}

pub fn panel_text(view: &PanelView) -> String {
    let mut out = String::new();
    out.push_str(view.list.heading());
    out.push('\n');
    match &view.list {
        ResultList::NoUsersFound => {
            out.push_str("     ");
            out.push_str(NO_USERS_FOUND);
            out.push('\n');
        }
        list => {
            for (i, row) in list.rows().iter().enumerate() {
                out.push_str(&user_line(i, row));
                out.push('\n');
            }
        }
    }
    if view.loading {
        out.push_str("     searching...\n");
    }
    if let Some(err) = &view.error {
        out.push_str(&format!("  ! {err}\n"));
    }
    out
}

pub fn users_json(users: &[User]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = users
        .iter()
        .map(|u| {
            let row = UserRow::from(u);
            serde_json::json!({
                "id": u.id,
                "name": u.name,
                "username": u.username,
                "image": u.image,
                "route": row.route,
            })
        })
        .collect();
    serde_json::Value::Array(items)
}
