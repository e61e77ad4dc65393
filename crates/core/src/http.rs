//! HTTP-backed [`UserDirectory`].
//!
//! - `GET {base_url}{search_path}?q=<query>` → `{ "users": [...] }`
//! - `GET {base_url}{suggested_path}` → `{ "users": [...] }` or `[...]`
//!
//! Non-2xx responses are read for an `{ "error": "..." }` payload and turned
//! into [`FetchError::Status`].

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::ClientConfig;
use crate::directory::UserDirectory;
use crate::error::FetchError;
use crate::types::{ErrorBody, SearchResponse, SuggestedResponse, User};

#[derive(Clone)]
pub struct HttpDirectory {
    client: Client,
    search_url: reqwest::Url,
    suggested_url: reqwest::Url,
}

impl HttpDirectory {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::with_client(client, config)
    }

    /// Use a caller-built client (shared connection pool, custom headers).
    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self, FetchError> {
        let parse = |s: String| {
            reqwest::Url::parse(&s).map_err(|e| FetchError::InvalidUrl(format!("{s}: {e}")))
        };
        Ok(Self {
            client,
            search_url: parse(config.search_url())?,
            suggested_url: parse(config.suggested_url())?,
        })
    }

    fn search_url_for(&self, query: &str) -> reqwest::Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut().append_pair("q", query);
        url
    }
}

/// Turn a non-success response into a `Status` error carrying the server's message.
async fn check_status(res: Response) -> Result<Response, FetchError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
    Err(FetchError::Status { status: status.as_u16(), message })
}

#[async_trait]
impl UserDirectory for HttpDirectory {
    async fn suggested_users(&self) -> Result<Vec<User>, FetchError> {
        debug!(url = %self.suggested_url, "Fetching suggested users");
        let res = self.client.get(self.suggested_url.clone()).send().await?;
        let body: SuggestedResponse = check_status(res).await?.json().await?;
        Ok(body.into_users())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<User>, FetchError> {
        let url = self.search_url_for(query);
        debug!(%url, "Searching users");
        let res = self.client.get(url).send().await?;
        let body: SearchResponse = check_status(res).await?.json().await?;
        Ok(body.users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_percent_encoded() {
        let dir = HttpDirectory::new(&ClientConfig::default()).unwrap();
        let url = dir.search_url_for("ann & bo");
        assert_eq!(url.as_str(), "http://localhost:3000/api/search?q=ann+%26+bo");
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let config = ClientConfig { base_url: "http://exa mple.com".into(), ..ClientConfig::default() };
        assert!(matches!(HttpDirectory::new(&config), Err(FetchError::InvalidUrl(_))));
    }
}
