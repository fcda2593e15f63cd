//! Media portal HTTP client
//!
//! Every query is a single GET against `http://{host}/portal.php`, with
//! the category selected by the `type`/`action` parameters and the device
//! identified by its `mac`:
//!
//! | Category          | type           | action            |
//! |-------------------|----------------|-------------------|
//! | account info      | `account_info` | `get_main_info`   |
//! | live TV genres    | `itv`          | `get_genres`      |
//! | VOD categories    | `vod`          | `get_categories`  |
//! | series categories | `series`       | `get_categories`  |
//!
//! Responses wrap their payload under a top-level `"js"` key.

pub mod aggregate;
pub mod normalize;
pub mod types;

use crate::config::PortalSettings;
use crate::error::{PortalError, Result};
use anyhow::Context;
use reqwest::header::{ACCEPT, HOST, USER_AGENT};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

/// One independent kind of information a portal exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    AccountInfo,
    LiveGenres,
    VodCategories,
    SeriesCategories,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::AccountInfo,
        Category::LiveGenres,
        Category::VodCategories,
        Category::SeriesCategories,
    ];

    /// Value of the `type` query parameter
    pub fn query_type(self) -> &'static str {
        match self {
            Category::AccountInfo => "account_info",
            Category::LiveGenres => "itv",
            Category::VodCategories => "vod",
            Category::SeriesCategories => "series",
        }
    }

    /// Value of the `action` query parameter
    pub fn action(self) -> &'static str {
        match self {
            Category::AccountInfo => "get_main_info",
            Category::LiveGenres => "get_genres",
            Category::VodCategories | Category::SeriesCategories => "get_categories",
        }
    }

    /// Human-readable section title
    pub fn label(self) -> &'static str {
        match self {
            Category::AccountInfo => "Device info",
            Category::LiveGenres => "Live TV genres",
            Category::VodCategories => "VOD categories",
            Category::SeriesCategories => "Series categories",
        }
    }

    /// Reason reported when the portal answers with no data
    pub fn not_found_reason(self) -> &'static str {
        match self {
            Category::AccountInfo => "no device information found",
            Category::LiveGenres => "no genres found",
            Category::VodCategories => "no VOD genres found",
            Category::SeriesCategories => "no series genres found",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.query_type(), self.action())
    }
}

/// A single category request for one host/device pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalQuery {
    pub host: String,
    pub mac: String,
    pub category: Category,
}

impl PortalQuery {
    /// Build a query. A leading `http://` and trailing `/` on the host are
    /// tolerated and stripped; the MAC is passed through untouched.
    pub fn new(host: &str, mac: &str, category: Category) -> Self {
        let host = host.trim();
        let host = host.strip_prefix("http://").unwrap_or(host);
        Self {
            host: host.trim_end_matches('/').to_string(),
            mac: mac.to_string(),
            category,
        }
    }

    /// Endpoint URL, without query string
    pub fn url(&self) -> String {
        format!("http://{}/portal.php", self.host)
    }

    /// Query parameters in the order portals document them
    pub fn query_pairs(&self) -> [(&'static str, &str); 4] {
        [
            ("type", self.category.query_type()),
            ("action", self.category.action()),
            ("JsHttpRequest", "1-xml"),
            ("mac", self.mac.as_str()),
        ]
    }
}

/// Stateless portal client; cheap to clone, safe to share across tasks
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: Client,
    user_agent: String,
}

impl PortalClient {
    pub fn new(settings: &PortalSettings) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout())
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            user_agent: settings.user_agent.clone(),
        })
    }

    /// Issue one GET for `query` and parse the body as JSON
    ///
    /// Exactly one attempt is made. Failures are classified as
    /// [`PortalError::Unreachable`], [`PortalError::Timeout`],
    /// [`PortalError::HttpStatus`], [`PortalError::EmptyBody`] or
    /// [`PortalError::Parse`].
    pub async fn fetch(&self, query: &PortalQuery) -> Result<Value> {
        let url = query.url();
        debug!("GET {} ({}, mac={})", url, query.category, query.mac);

        let resp = self
            .http
            .get(&url)
            .query(&query.query_pairs())
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .header(HOST, &query.host)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PortalError::HttpStatus {
                code: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        if body.trim().is_empty() {
            return Err(PortalError::EmptyBody);
        }

        debug!("{}: {} bytes from {}", query.category, body.len(), query.host);
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_endpoints() {
        let pairs: Vec<_> = Category::ALL
            .iter()
            .map(|c| (c.query_type(), c.action()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("account_info", "get_main_info"),
                ("itv", "get_genres"),
                ("vod", "get_categories"),
                ("series", "get_categories"),
            ]
        );
    }

    #[test]
    fn test_query_url_and_params() {
        let query = PortalQuery::new("portal.example.com:8080", "00:1A:79:12:34:56", Category::VodCategories);
        assert_eq!(query.url(), "http://portal.example.com:8080/portal.php");
        assert_eq!(
            query.query_pairs(),
            [
                ("type", "vod"),
                ("action", "get_categories"),
                ("JsHttpRequest", "1-xml"),
                ("mac", "00:1A:79:12:34:56"),
            ]
        );
    }

    #[test]
    fn test_query_strips_scheme_and_slash() {
        let query = PortalQuery::new(" http://portal.example.com/ ", "m", Category::AccountInfo);
        assert_eq!(query.host, "portal.example.com");
        assert_eq!(query.url(), "http://portal.example.com/portal.php");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::LiveGenres.to_string(), "itv.get_genres");
        assert_eq!(Category::SeriesCategories.to_string(), "series.get_categories");
    }

    #[test]
    fn test_client_creation() {
        let client = PortalClient::new(&PortalSettings::default()).unwrap();
        assert_eq!(client.user_agent, "Mozilla/5.0");
    }
}
