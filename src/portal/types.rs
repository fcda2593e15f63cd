//! Normalized results of portal queries

use super::Category;
use crate::credentials::DeviceCredentials;
use crate::error::PortalError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Data successfully extracted for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Account info object (the `"js"` object, as sent)
    Object(Map<String, Value>),
    /// Genre/category titles, in portal order
    Titles(Vec<String>),
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Object(map) => {
                let pretty = serde_json::to_string_pretty(map).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
            Payload::Titles(titles) => f.write_str(&titles.join(", ")),
        }
    }
}

/// Outcome for one category: a payload or a failure, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CategoryResult {
    Ok { data: Payload },
    Failed { error: PortalError },
}

impl CategoryResult {
    pub fn ok(data: Payload) -> Self {
        CategoryResult::Ok { data }
    }

    pub fn failed(error: PortalError) -> Self {
        CategoryResult::Failed { error }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CategoryResult::Ok { .. })
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            CategoryResult::Ok { data } => Some(data),
            CategoryResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&PortalError> {
        match self {
            CategoryResult::Ok { .. } => None,
            CategoryResult::Failed { error } => Some(error),
        }
    }
}

impl From<crate::error::Result<Payload>> for CategoryResult {
    fn from(result: crate::error::Result<Payload>) -> Self {
        match result {
            Ok(data) => CategoryResult::ok(data),
            Err(error) => CategoryResult::failed(error),
        }
    }
}

/// Combined outcome of querying every category for one host/device pair
///
/// All four slots are always present. `has_error` is set iff at least one
/// slot failed.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub host: String,
    pub mac: String,
    pub credentials: DeviceCredentials,
    pub account_info: CategoryResult,
    pub live_genres: CategoryResult,
    pub vod_categories: CategoryResult,
    pub series_categories: CategoryResult,
    pub has_error: bool,
    pub fetched_at: DateTime<Utc>,
}

impl AggregateResult {
    /// Assemble from per-category results, in [`Category::ALL`] order
    pub fn new(host: &str, mac: &str, results: [CategoryResult; 4]) -> Self {
        let has_error = results.iter().any(|r| !r.is_ok());
        let [account_info, live_genres, vod_categories, series_categories] = results;

        Self {
            host: host.to_string(),
            mac: mac.to_string(),
            credentials: DeviceCredentials::derive(mac),
            account_info,
            live_genres,
            vod_categories,
            series_categories,
            has_error,
            fetched_at: Utc::now(),
        }
    }

    /// Every category failed with the same error (e.g. no HTTP client)
    pub fn all_failed(host: &str, mac: &str, error: PortalError) -> Self {
        Self::new(
            host,
            mac,
            Category::ALL.map(|_| CategoryResult::failed(error.clone())),
        )
    }

    pub fn get(&self, category: Category) -> &CategoryResult {
        match category {
            Category::AccountInfo => &self.account_info,
            Category::LiveGenres => &self.live_genres,
            Category::VodCategories => &self.vod_categories,
            Category::SeriesCategories => &self.series_categories,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &CategoryResult)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn failure_count(&self) -> usize {
        self.iter().filter(|(_, r)| !r.is_ok()).count()
    }
}
