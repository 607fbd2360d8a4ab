use std::sync::Arc;

use crate::config::{Config, FeedsConfig, GoogleNewsConfig, NewsConfig, UnknownCategory};

pub mod aggregate;
pub mod article;
pub mod category;
pub mod normalize;
pub mod sources;
pub mod text;

pub use article::Article;
pub use category::{Category, CloudVendor};

use sources::{feeds, google_news, newsapi, Fetch, Payload, SourceError};

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

/// Which providers serve a category request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Keyword search, optionally merged with the Google News feed.
    Search { keyword: String },
    /// Vendor feeds first; keyword search only when every feed comes back empty.
    Feeds {
        vendors: Vec<CloudVendor>,
        fallback_keyword: String,
    },
    GoogleNews { keyword: String },
    Nothing,
}

/// Entry point for category browsing and free-text search.
#[derive(Clone)]
pub struct NewsService {
    fetch: Arc<dyn Fetch>,
    news: NewsConfig,
    google_news: GoogleNewsConfig,
    feeds: FeedsConfig,
}

impl NewsService {
    pub fn new(fetch: Arc<dyn Fetch>, config: &Config) -> Self {
        Self {
            fetch,
            news: config.news.clone(),
            google_news: config.google_news.clone(),
            feeds: config.feeds.clone(),
        }
    }

    pub fn search_configured(&self) -> bool {
        self.news.api_key().is_some()
    }

    /// Whether `category` cannot be served at all without a search API key.
    /// With Google News merged in, keyword categories still have a provider.
    pub fn needs_api_key(&self, category: &str) -> bool {
        matches!(self.plan(category), Plan::Search { .. }) && !self.google_news.merge
    }

    /// Resolves a category slug to the providers that serve it.
    pub fn plan(&self, category: &str) -> Plan {
        match Category::from_slug(category) {
            Some(Category::Headlines) => Plan::GoogleNews {
                keyword: Category::Headlines.keyword(),
            },
            Some(category) if category.is_cloud() => Plan::Feeds {
                vendors: category.vendors(),
                fallback_keyword: category.keyword(),
            },
            Some(category) => Plan::Search {
                keyword: category.keyword(),
            },
            None => match self.news.unknown_category {
                UnknownCategory::Technology => Plan::Search {
                    keyword: Category::FALLBACK_KEYWORD.to_string(),
                },
                UnknownCategory::Empty => Plan::Nothing,
            },
        }
    }

    /// Articles for a category, newest first. Never fails: every provider
    /// error collapses into an empty contribution.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_news_by_category(&self, category: &str) -> Vec<Article> {
        let articles = match self.plan(category) {
            Plan::Search { keyword } if self.google_news.merge => {
                let (search, google) =
                    tokio::join!(self.search(&keyword), self.google_news(&keyword));
                aggregate::merge([search, google])
            }
            Plan::Search { keyword } => self.search(&keyword).await,
            Plan::GoogleNews { keyword } => self.google_news(&keyword).await,
            Plan::Feeds {
                vendors,
                fallback_keyword,
            } => {
                let articles = self.fetch_cloud_feeds(&vendors).await;

                if articles.is_empty() && self.search_configured() {
                    tracing::warn!(category, "all vendor feeds empty, falling back to search");
                    self.search(&fallback_keyword).await
                } else {
                    articles
                }
            }
            Plan::Nothing => {
                tracing::debug!(category, "unknown category");
                Vec::new()
            }
        };

        tracing::debug!(category, count = articles.len(), "fetched category");
        articles
    }

    /// Free-text search, newest first. A blank query returns nothing without
    /// touching the network.
    #[tracing::instrument(skip(self))]
    pub async fn search_news(&self, query: &str) -> Vec<Article> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        self.search(query).await
    }

    /// Concurrently fetches the given vendor feeds and merges them.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_cloud_feeds(&self, vendors: &[CloudVendor]) -> Vec<Article> {
        aggregate::gather(vendors.iter().map(|vendor| self.vendor_feed(*vendor))).await
    }

    async fn search(&self, keyword: &str) -> Vec<Article> {
        let result = newsapi::search(self.fetch.as_ref(), &self.news, keyword).await;
        let mut articles = self.collect("search", result);
        aggregate::sort_by_published(&mut articles);
        articles
    }

    async fn google_news(&self, keyword: &str) -> Vec<Article> {
        let result =
            google_news::search(self.fetch.as_ref(), &self.google_news, &self.feeds, keyword).await;
        self.collect(google_news::LABEL, result)
    }

    async fn vendor_feed(&self, vendor: CloudVendor) -> Vec<Article> {
        let result = feeds::fetch_vendor(self.fetch.as_ref(), &self.feeds, vendor).await;
        self.collect(vendor.slug(), result)
    }

    fn collect(&self, provider: &str, result: Result<Payload, SourceError>) -> Vec<Article> {
        match result {
            Ok(payload) => payload.normalize(self.feeds.max_items),
            Err(SourceError::NotConfigured(what)) => {
                tracing::warn!(provider, "{what} is not configured");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(provider, error = %e, "provider failed");
                Vec::new()
            }
        }
    }
}
