//! Source of user records for the panel.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::User;

/// Anything that can list suggested users and search users by free text.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Default list shown while no query is active.
    async fn suggested_users(&self) -> Result<Vec<User>, FetchError>;

    /// Users matching `query` by name or username.
    async fn search_users(&self, query: &str) -> Result<Vec<User>, FetchError>;
}
