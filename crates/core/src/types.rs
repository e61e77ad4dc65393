//! Wire types shared across UserSearch: the user record returned by the
//! directory, the search and suggestion response envelopes, and the error
//! payload the search endpoint sends on failure.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// User record
// ---------------------------------------------------------------------------

/// A user as returned by the directory. Read-only from the panel's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    /// Display name. Accounts created without one come back as `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    pub username: String,
    /// Avatar image URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, username: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), username: username.into(), image: None }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Body of a successful `GET /api/search?q=...`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Body of the suggested-users endpoint. Accepts both the enveloped form and a
/// bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SuggestedResponse {
    Envelope { users: Vec<User> },
    List(Vec<User>),
}

impl SuggestedResponse {
    pub fn into_users(self) -> Vec<User> {
        match self {
            SuggestedResponse::Envelope { users } => users,
            SuggestedResponse::List(users) => users,
        }
    }
}

/// Error payload sent alongside a non-2xx status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_name_becomes_empty() {
        let user: User =
            serde_json::from_str(r#"{"id":"c1","name":null,"username":"ann","image":null}"#)
                .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.image, None);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let user: User = serde_json::from_str(
            r#"{"id":"c2","name":"Bo","username":"bo","email":"bo@example.com","createdAt":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(user, User::new("c2", "Bo", "bo"));
    }

    #[test]
    fn suggested_accepts_bare_array_and_envelope() {
        let bare: SuggestedResponse =
            serde_json::from_str(r#"[{"id":"1","name":"A","username":"a"}]"#).unwrap();
        assert_eq!(bare.into_users().len(), 1);

        let env: SuggestedResponse =
            serde_json::from_str(r#"{"users":[{"id":"1","name":"A","username":"a"},{"id":"2","name":"B","username":"b"}]}"#)
                .unwrap();
        assert_eq!(env.into_users().len(), 2);
    }
}
