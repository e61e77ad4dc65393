//! Derived panel view: what the search sheet shows for a given session state.
//!
//! Everything here is a pure function of its inputs; front ends render the
//! resulting [`PanelView`] without making decisions of their own.

use crate::types::User;

pub const SUGGESTED_HEADING: &str = "Suggested Users";
pub const RESULTS_HEADING: &str = "Search Results";
pub const NO_USERS_FOUND: &str = "No users found";

/// Profile pages live at `/u/{username}`.
pub const PROFILE_ROUTE_PREFIX: &str = "/u/";

pub fn profile_route(username: &str) -> String {
    format!("{PROFILE_ROUTE_PREFIX}{username}")
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One clickable user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    /// `@username`
    pub handle: String,
    pub username: String,
    pub avatar_url: Option<String>,
    /// Shown when the avatar image is missing or fails to load.
    pub initial: String,
    pub route: String,
}

impl From<&User> for UserRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            handle: format!("@{}", user.username),
            username: user.username.clone(),
            avatar_url: user.image.clone().filter(|url| !url.is_empty()),
            initial: user.username.chars().next().map(String::from).unwrap_or_default(),
            route: profile_route(&user.username),
        }
    }
}

// ---------------------------------------------------------------------------
// Panel view
// ---------------------------------------------------------------------------

/// The three mutually exclusive list states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultList {
    Suggestions(Vec<UserRow>),
    Results(Vec<UserRow>),
    NoUsersFound,
}

impl ResultList {
    pub fn heading(&self) -> &'static str {
        match self {
            ResultList::Suggestions(_) => SUGGESTED_HEADING,
            ResultList::Results(_) | ResultList::NoUsersFound => RESULTS_HEADING,
        }
    }

    pub fn rows(&self) -> &[UserRow] {
        match self {
            ResultList::Suggestions(rows) | ResultList::Results(rows) => rows,
            ResultList::NoUsersFound => &[],
        }
    }

    pub fn is_suggestions(&self) -> bool {
        matches!(self, ResultList::Suggestions(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub list: ResultList,
    pub loading: bool,
    /// Inline error line under the list.
    pub error: Option<String>,
}

impl Default for PanelView {
    fn default() -> Self {
        Self { list: ResultList::Suggestions(Vec::new()), loading: false, error: None }
    }
}

/// Derive the visible panel.
///
/// An empty query always shows suggestions. Any leftover error from an earlier
/// search is hidden there too, so clearing the input gives a clean suggestion
/// list even before the cleared query is committed. Any other query, including
/// one made only of spaces, shows results or "No users found" when there are
/// none. The error line only appears once loading has finished.
pub fn render_panel(
    query: &str,
    suggestions: &[User],
    results: &[User],
    error: Option<&str>,
    loading: bool,
) -> PanelView {
    if query.is_empty() {
        return PanelView {
            list: ResultList::Suggestions(suggestions.iter().map(UserRow::from).collect()),
            loading: false,
            error: None,
        };
    }

    let list = if results.is_empty() {
        ResultList::NoUsersFound
    } else {
        ResultList::Results(results.iter().map(UserRow::from).collect())
    };
    let error = if loading { None } else { error.filter(|e| !e.is_empty()).map(str::to_string) };

    PanelView { list, loading, error }
}
