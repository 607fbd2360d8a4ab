use std::time::Duration;

use super::{get_with_timeout, parse_feed, Fetch, Payload, SourceError};
use crate::config::FeedsConfig;
use crate::news::category::CloudVendor;

/// Feed URL for a vendor, honouring configured overrides.
pub fn feed_url(config: &FeedsConfig, vendor: CloudVendor) -> &str {
    config
        .overrides
        .get(vendor.slug())
        .map(String::as_str)
        .unwrap_or_else(|| vendor.feed_url())
}

/// Fetches one vendor's blog feed. A fetch that outlives the configured
/// timeout is a failure; there is no retry.
#[tracing::instrument(skip(fetch, config), fields(vendor = vendor.slug()))]
pub async fn fetch_vendor(
    fetch: &dyn Fetch,
    config: &FeedsConfig,
    vendor: CloudVendor,
) -> Result<Payload, SourceError> {
    let body = get_with_timeout(
        fetch,
        feed_url(config, vendor),
        &[],
        Some(Duration::from_secs(config.timeout_secs)),
    )
    .await?;

    parse_feed(vendor.label(), &body)
}
