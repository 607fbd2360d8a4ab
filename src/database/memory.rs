use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{view_doc_id, ViewStore};

/// Process-local view counts, used when no database is configured.
#[derive(Default)]
pub struct MemoryViewStore {
	counts: Mutex<HashMap<String, i64>>,
}

impl MemoryViewStore {
	pub fn new() -> Self {
		Self::default()
	}
}

#[async_trait]
impl ViewStore for MemoryViewStore {
	async fn count(&self, url: &str) -> anyhow::Result<i64> {
		Ok(self.counts.lock().await.get(&view_doc_id(url)).copied().unwrap_or(0))
	}

	async fn increment(&self, url: &str) -> anyhow::Result<i64> {
		let mut counts = self.counts.lock().await;
		let count = counts.entry(view_doc_id(url)).or_insert(0);
		*count += 1;
		Ok(*count)
	}
}
