use std::time::Duration;

use super::{get_with_timeout, Fetch, Payload, SourceError};
use crate::config::{FeedsConfig, GoogleNewsConfig};

pub const LABEL: &str = "Google News";

/// Google News RSS search for `keyword`. Bounded by the feed timeout.
#[tracing::instrument(skip(fetch, config, feeds))]
pub async fn search(
    fetch: &dyn Fetch,
    config: &GoogleNewsConfig,
    feeds: &FeedsConfig,
    keyword: &str,
) -> Result<Payload, SourceError> {
    let body = get_with_timeout(
        fetch,
        &config.endpoint,
        &[("q", keyword), ("hl", "en-US"), ("gl", "US"), ("ceid", "US:en")],
        Some(Duration::from_secs(feeds.timeout_secs)),
    )
    .await?;

    rss::Channel::read_from(&body[..])
        .map(Payload::GoogleNews)
        .map_err(|e| SourceError::Parse(format!("google news feed: {e}")))
}
