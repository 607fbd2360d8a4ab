use std::time::Duration;

use serde::Deserialize;

use super::{get_with_timeout, Fetch, Payload, SourceError};
use crate::config::NewsConfig;

/// Envelope of a keyword-search news API. newsapi.org returns `articles`;
/// compatible providers use `news` or `data` for the same list.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub articles: Option<Vec<SearchArticle>>,
    pub news: Option<Vec<SearchArticle>>,
    pub data: Option<Vec<SearchArticle>>,
}

impl SearchResponse {
    /// The first article list present, in `articles`, `news`, `data` order.
    pub fn into_articles(self) -> Vec<SearchArticle> {
        self.articles.or(self.news).or(self.data).unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchArticle {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    pub image: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    #[serde(rename = "published_at")]
    pub published_at_snake: Option<String>,
    pub date: Option<String>,
    pub source: Option<SourceField>,
    pub author: Option<String>,
}

/// `source` is an object on newsapi.org and a bare string elsewhere.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SourceField {
    Named { name: Option<String> },
    Plain(String),
}

impl SourceField {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named { name } => name.as_deref(),
            Self::Plain(name) => Some(name.as_str()),
        }
    }
}

/// Searches the news API for `keyword`, newest first.
#[tracing::instrument(skip(fetch, config))]
pub async fn search(
    fetch: &dyn Fetch,
    config: &NewsConfig,
    keyword: &str,
) -> Result<Payload, SourceError> {
    let api_key = config.api_key().ok_or(SourceError::NotConfigured("news API key"))?;

    let body = get_with_timeout(
        fetch,
        &config.endpoint,
        &[("q", keyword), ("sortBy", "publishedAt"), ("apiKey", api_key)],
        config.timeout_secs.map(Duration::from_secs),
    )
    .await?;

    let response: SearchResponse =
        serde_json::from_slice(&body).map_err(|e| SourceError::Parse(e.to_string()))?;

    if response.status.as_deref() == Some("error") {
        return Err(SourceError::Status {
            status: 200,
            message: response.message.unwrap_or_default(),
        });
    }

    Ok(Payload::Search(response))
}
