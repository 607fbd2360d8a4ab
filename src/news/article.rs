use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No title";

/// Placeholder for search-API articles without an image.
pub const SEARCH_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=400&h=200&fit=crop";

/// Placeholder for feed items without an image.
pub const FEED_PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=400&h=200&fit=crop";

/// A normalized news item. Every field is always populated; see the
/// normalizers in [`super::normalize`] for the per-field defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: String,
    pub published_at: String,
    pub source: String,
    pub author: String,
}

impl Article {
    /// Parsed publish time, `None` when the stored string is not a date.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        parse_date(&self.published_at)
    }
}

/// Parses the date formats seen across feeds and news APIs.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"]
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|naive| naive.and_utc())
        })
}

pub fn format_date(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Picks the first non-blank candidate and re-emits it as RFC 3339 when it
/// parses. Unparseable strings are kept verbatim; no candidate means now.
pub fn published_at<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> String {
    match first_non_empty(candidates) {
        Some(raw) => parse_date(raw).map(format_date).unwrap_or_else(|| raw.to_string()),
        None => format_date(Utc::now()),
    }
}

pub fn first_non_empty<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}
