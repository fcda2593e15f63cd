//! Query every category for one host/device pair and merge the outcomes

use super::normalize::normalize;
use super::types::{AggregateResult, CategoryResult};
use super::{Category, PortalClient, PortalQuery};
use crate::config::PortalSettings;
use crate::error::PortalError;
use tracing::{error, info, warn};

impl PortalClient {
    /// Query all four categories concurrently and collect the results
    ///
    /// Never fails: each category succeeds or fails on its own, and the
    /// returned value always holds all four slots. Dropping the future
    /// cancels any request still in flight.
    pub async fn aggregate(&self, host: &str, mac: &str) -> AggregateResult {
        info!("Querying portal {} for {}", host, mac);

        let (account_info, live_genres, vod_categories, series_categories) = tokio::join!(
            self.query_category(host, mac, Category::AccountInfo),
            self.query_category(host, mac, Category::LiveGenres),
            self.query_category(host, mac, Category::VodCategories),
            self.query_category(host, mac, Category::SeriesCategories),
        );

        let result = AggregateResult::new(
            host,
            mac,
            [account_info, live_genres, vod_categories, series_categories],
        );

        info!(
            "Portal {}: {}/{} categories retrieved",
            host,
            Category::ALL.len() - result.failure_count(),
            Category::ALL.len()
        );
        result
    }

    async fn query_category(&self, host: &str, mac: &str, category: Category) -> CategoryResult {
        let query = PortalQuery::new(host, mac, category);
        let result = match self.fetch(&query).await {
            Ok(json) => normalize(category, &json),
            Err(e) => CategoryResult::failed(e),
        };

        if let Some(e) = result.error() {
            warn!("{} from {} failed: {}", category, query.host, e);
        }
        result
    }
}

/// Query a portal with default settings
///
/// If the HTTP client cannot even be built, every category is reported
/// as unreachable.
pub async fn aggregate(host: &str, mac: &str) -> AggregateResult {
    match PortalClient::new(&PortalSettings::default()) {
        Ok(client) => client.aggregate(host, mac).await,
        Err(e) => {
            error!("Cannot create portal client: {:#}", e);
            AggregateResult::all_failed(host, mac, PortalError::Unreachable(format!("{:#}", e)))
        }
    }
}
