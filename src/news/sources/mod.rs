use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

pub mod feeds;
pub mod google_news;
pub mod newsapi;

/// Why a provider produced nothing. These never reach the caller of the news
/// façade; they are logged and collapsed into an empty result.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("malformed payload: {0}")]
    Parse(String),
    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// HTTP GET returning the response body. Non-2xx responses are errors.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, SourceError>;
}

#[async_trait]
impl Fetch for reqwest::Client {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, SourceError> {
        let response = reqwest::Client::get(self, url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        Ok(response.bytes().await?)
    }
}

/// Runs a fetch, bounded by `limit` when one is given.
pub async fn get_with_timeout(
    fetch: &dyn Fetch,
    url: &str,
    query: &[(&str, &str)],
    limit: Option<Duration>,
) -> Result<Bytes, SourceError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fetch.get(url, query))
            .await
            .map_err(|_| SourceError::Timeout(limit))?,
        None => fetch.get(url, query).await,
    }
}

/// A provider response before normalization, one variant per wire shape.
#[derive(Debug)]
pub enum Payload {
    Search(newsapi::SearchResponse),
    Rss {
        label: String,
        channel: rss::Channel,
    },
    Atom {
        label: String,
        feed: atom_syndication::Feed,
    },
    GoogleNews(rss::Channel),
}

/// Parses a syndication document, trying RSS first and Atom second.
pub fn parse_feed(label: &str, body: &[u8]) -> Result<Payload, SourceError> {
    if let Ok(channel) = rss::Channel::read_from(body) {
        return Ok(Payload::Rss {
            label: label.to_string(),
            channel,
        });
    }

    atom_syndication::Feed::read_from(body)
        .map(|feed| Payload::Atom {
            label: label.to_string(),
            feed,
        })
        .map_err(|e| SourceError::Parse(format!("{label} feed is neither RSS nor Atom: {e}")))
}
