use std::sync::Arc;

use anyhow::Context as _;

use crate::config::Config;
use crate::database::{ArticleView, MemoryViewStore, MongoViewStore, ViewStore};
use crate::mailer::Mailer;
use crate::news::sources::Fetch;
use crate::news::NewsService;
use crate::views::ViewCounter;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub struct Global {
    pub config: Config,
    pub news: NewsService,
    pub views: ViewCounter,
    pub mailer: Mailer,
    pub started_at: std::time::Instant,
}

impl Global {
    pub async fn init(config: Config) -> anyhow::Result<Arc<Self>> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("http client")?;

        let store: Arc<dyn ViewStore> = if config.database.enabled {
            let mongo = mongodb::Client::with_uri_str(&config.database.uri)
                .await
                .context("mongodb connect")?;

            tracing::info!("connected to mongodb");

            let db = mongo.database(&config.database.name);
            ArticleView::ensure_indexes(&db).await?;

            Arc::new(MongoViewStore::new(db))
        } else {
            tracing::warn!("database disabled, view counts are kept in memory");
            Arc::new(MemoryViewStore::new())
        };

        if config.news.api_key().is_none() {
            tracing::warn!("no news API key configured, keyword categories and search will be empty");
        }

        let fetch: Arc<dyn Fetch> = Arc::new(http_client.clone());

        Ok(Arc::new(Self::new(config, http_client, fetch, store)))
    }

    /// Wires the services from already-built parts.
    pub fn new(
        config: Config,
        http_client: reqwest::Client,
        fetch: Arc<dyn Fetch>,
        store: Arc<dyn ViewStore>,
    ) -> Self {
        Self {
            news: NewsService::new(fetch, &config),
            views: ViewCounter::new(store),
            mailer: Mailer::new(http_client, &config.mailer),
            config,
            started_at: std::time::Instant::now(),
        }
    }
}
