use std::collections::HashMap;
use std::net::SocketAddr;

use ::config::{Environment, File};
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub level: String,
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub news: NewsConfig,
    pub google_news: GoogleNewsConfig,
    pub feeds: FeedsConfig,
    pub mailer: MailerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// When disabled, view counts live in process memory.
    pub enabled: bool,
    pub uri: String,
    pub name: String,
}

/// What to do with a category that is not in the lookup table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownCategory {
    /// Search for the generic "technology" keyword.
    #[default]
    Technology,
    /// Return no articles.
    Empty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Request timeout for the search API. Unset leaves the transport default.
    pub timeout_secs: Option<u64>,
    pub unknown_category: UnknownCategory,
}

impl NewsConfig {
    /// The configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GoogleNewsConfig {
    pub endpoint: String,
    /// Merge the Google News feed into keyword categories.
    pub merge: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedsConfig {
    pub timeout_secs: u64,
    pub max_items: usize,
    /// Feed URL overrides keyed by vendor slug (e.g. `ibm`).
    pub overrides: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MailerConfig {
    /// Base URL of the welcome-email backend. Unset disables dispatch.
    pub backend_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            api: ApiConfig::default(),
            database: DatabaseConfig::default(),
            news: NewsConfig::default(),
            google_news: GoogleNewsConfig::default(),
            feeds: FeedsConfig::default(),
            mailer: MailerConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            cors_origins: Vec::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            uri: "mongodb://localhost:27017".to_string(),
            name: "segmento_pulse".to_string(),
        }
    }
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://newsapi.org/v2/everything".to_string(),
            api_key: None,
            timeout_secs: None,
            unknown_category: UnknownCategory::default(),
        }
    }
}

impl Default for GoogleNewsConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://news.google.com/rss/search".to_string(),
            merge: false,
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_items: 20,
            overrides: HashMap::new(),
        }
    }
}

impl Config {
    /// Loads `config.yaml` (or the file named by `PULSE_CONFIG`), then applies
    /// `PULSE_*` environment overrides such as `PULSE_NEWS__API_KEY`.
    pub fn load() -> anyhow::Result<Self> {
        let file = std::env::var("PULSE_CONFIG").unwrap_or_else(|_| "config".into());

        ::config::Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("PULSE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("building config")?
            .try_deserialize()
            .context("parsing config")
    }
}
