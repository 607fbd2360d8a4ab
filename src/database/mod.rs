use async_trait::async_trait;
use base64::Engine as _;

pub mod article_view;
pub mod memory;

pub use article_view::{ArticleView, MongoViewStore};
pub use memory::MemoryViewStore;

/// Persistence for per-article view counts.
#[async_trait]
pub trait ViewStore: Send + Sync {
	/// Current count, 0 when the article has never been viewed.
	async fn count(&self, url: &str) -> anyhow::Result<i64>;

	/// Atomically adds one view and returns the new total.
	async fn increment(&self, url: &str) -> anyhow::Result<i64>;
}

/// Document id for an article: its URL in base64 with every
/// non-alphanumeric character removed.
pub fn view_doc_id(url: &str) -> String {
	base64::engine::general_purpose::STANDARD
		.encode(url)
		.chars()
		.filter(|c| c.is_ascii_alphanumeric())
		.collect()
}
