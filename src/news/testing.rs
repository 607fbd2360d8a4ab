//! Scripted transport and payload fixtures for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::sources::{Fetch, SourceError};

pub(crate) enum Reply {
    Body(String),
    Status(u16),
    /// Never answers; only a timeout ends the request.
    Hang,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Answers each URL with a canned reply and records every request.
/// Unscripted URLs answer 404.
#[derive(Default)]
pub(crate) struct ScriptedFetch {
    replies: HashMap<String, Reply>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedFetch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), reply);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, url: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.url == url).collect()
    }
}

#[async_trait]
impl Fetch for ScriptedFetch {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<Bytes, SourceError> {
        self.calls.lock().unwrap().push(Call {
            url: url.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        match self.replies.get(url) {
            Some(Reply::Body(body)) => Ok(Bytes::from(body.clone())),
            Some(Reply::Status(status)) => Err(SourceError::Status {
                status: *status,
                message: "scripted failure".to_string(),
            }),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(SourceError::Status {
                status: 404,
                message: format!("no script for {url}"),
            }),
        }
    }
}

pub(crate) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

/// An RSS 2.0 document with `count` items, one hour apart, newest first,
/// each `offset_minutes` older than [`base_time`].
pub(crate) fn rss_feed(prefix: &str, count: usize, offset_minutes: i64) -> String {
    let items: String = (0..count)
        .map(|i| {
            let published = base_time() - Duration::hours(i as i64) - Duration::minutes(offset_minutes);
            format!(
                "<item><title>{prefix} post {i}</title><link>https://blog.example.com/{prefix}/{i}</link>\
                 <description>&lt;p&gt;Post {i} from {prefix}&lt;/p&gt;</description>\
                 <pubDate>{}</pubDate></item>",
                published.to_rfc2822()
            )
        })
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>{prefix}</title><link>https://blog.example.com/{prefix}</link><description>{prefix} blog</description>{items}</channel></rss>"#
    )
}

/// A newsapi.org `everything` response with `count` articles.
pub(crate) fn search_response(prefix: &str, count: usize) -> String {
    let articles: Vec<_> = (0..count)
        .map(|i| {
            let image = if i % 2 == 0 {
                serde_json::Value::Null
            } else {
                format!("https://img.example.com/{i}.png").into()
            };

            serde_json::json!({
                "source": { "id": null, "name": "Wired" },
                "author": "Jane Doe",
                "title": format!("{prefix} {i}"),
                "description": format!("About {prefix}"),
                "url": format!("https://news.example.com/{prefix}/{i}"),
                "urlToImage": image,
                "publishedAt": (base_time() - Duration::hours(i as i64)).to_rfc3339(),
                "content": "Body text"
            })
        })
        .collect();

    serde_json::json!({ "status": "ok", "totalResults": count, "articles": articles }).to_string()
}
