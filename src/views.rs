use std::pin::Pin;
use std::sync::Arc;

use futures_util::future::join_all;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

use crate::database::ViewStore;

const UPDATE_CAPACITY: usize = 256;

pub type CountStream = Pin<Box<dyn Stream<Item = i64> + Send>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCount {
    pub url: String,
    pub view_count: i64,
}

/// Article view counting on top of a [`ViewStore`]. Store failures are logged
/// and reported as a count of 0; they never reach the caller.
#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<dyn ViewStore>,
    updates: broadcast::Sender<ViewCount>,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn ViewStore>) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CAPACITY);
        Self { store, updates }
    }

    #[tracing::instrument(skip(self))]
    pub async fn count(&self, url: &str) -> i64 {
        match self.store.count(url).await {
            Ok(count) => count,
            Err(e) => {
                tracing::error!(error = %e, "failed to read view count");
                0
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn increment(&self, url: &str) -> i64 {
        match self.store.increment(url).await {
            Ok(count) => {
                // No subscribers is not an error.
                let _ = self.updates.send(ViewCount {
                    url: url.to_string(),
                    view_count: count,
                });
                count
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to increment view count");
                0
            }
        }
    }

    /// Records one view for each URL concurrently. Returns how many were
    /// stored.
    #[tracing::instrument(skip_all, fields(urls = urls.len()))]
    pub async fn track_many(&self, urls: &[String]) -> usize {
        let counts = join_all(urls.iter().map(|url| self.increment(url))).await;
        counts.into_iter().filter(|count| *count > 0).count()
    }

    /// The current count for `url` followed by every later increment.
    /// A subscriber that falls behind skips the counts it missed.
    pub async fn subscribe(&self, url: &str) -> CountStream {
        let receiver = self.updates.subscribe();
        let current = self.count(url).await;
        let url = url.to_string();

        let updates = BroadcastStream::new(receiver).filter_map(move |update| match update {
            Ok(update) if update.url == url => Some(update.view_count),
            _ => None,
        });

        Box::pin(tokio_stream::once(current).chain(updates))
    }
}
