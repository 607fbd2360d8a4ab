//! Maps each provider payload onto [`Article`].
//!
//! Field fallbacks, first non-empty wins:
//!
//! - image: explicit image field, first `<img>` in the body, `media:thumbnail`,
//!   placeholder
//! - publishedAt: publish date, ISO/updated date, now
//! - author: creator, author, source label
//! - description: excerpt, body text cut to [`EXCERPT_CHARS`], summary, empty

use std::collections::BTreeMap;

use super::aggregate::sort_by_published;
use super::article::{
    first_non_empty, format_date, published_at, Article, FEED_PLACEHOLDER_IMAGE, NO_TITLE,
    SEARCH_PLACEHOLDER_IMAGE,
};
use super::sources::newsapi::{SearchArticle, SearchResponse, SourceField};
use super::sources::{google_news, Payload};
use super::text::{first_image_src, strip_html, truncate_chars};

pub const EXCERPT_CHARS: usize = 200;

impl Payload {
    /// Normalizes the payload. Feed payloads keep only their `feed_limit`
    /// most recent items.
    pub fn normalize(self, feed_limit: usize) -> Vec<Article> {
        match self {
            Payload::Search(response) => search_articles(response),
            Payload::Rss { label, channel } => {
                most_recent(rss_articles(&label, &channel), feed_limit)
            }
            Payload::Atom { label, feed } => most_recent(atom_articles(&label, &feed), feed_limit),
            Payload::GoogleNews(channel) => {
                most_recent(google_news_articles(&channel), feed_limit)
            }
        }
    }
}

fn most_recent(mut articles: Vec<Article>, limit: usize) -> Vec<Article> {
    sort_by_published(&mut articles);
    articles.truncate(limit);
    articles
}

fn text_of(html: Option<&str>) -> Option<String> {
    html.map(strip_html).filter(|text| !text.is_empty())
}

fn excerpt_of(html: Option<&str>) -> Option<String> {
    text_of(html).map(|text| truncate_chars(&text, EXCERPT_CHARS))
}

fn title_or_default(title: Option<&str>) -> String {
    first_non_empty([title]).unwrap_or(NO_TITLE).to_string()
}

pub fn search_articles(response: SearchResponse) -> Vec<Article> {
    response
        .into_articles()
        .into_iter()
        .map(search_article)
        .collect()
}

pub fn search_article(article: SearchArticle) -> Article {
    let content = article.content.as_deref();

    let image = first_non_empty([
        article.url_to_image.as_deref(),
        article.image.as_deref(),
        article.image_url.as_deref(),
    ])
    .map(str::to_string)
    .or_else(|| content.and_then(first_image_src))
    .unwrap_or_else(|| SEARCH_PLACEHOLDER_IMAGE.to_string());

    Article {
        title: title_or_default(article.title.as_deref()),
        description: text_of(article.description.as_deref())
            .or_else(|| excerpt_of(content))
            .unwrap_or_default(),
        url: first_non_empty([article.url.as_deref()]).unwrap_or_default().to_string(),
        image,
        published_at: published_at([
            article.published_at.as_deref(),
            article.published_at_snake.as_deref(),
            article.date.as_deref(),
        ]),
        source: first_non_empty([article.source.as_ref().and_then(SourceField::name)])
            .unwrap_or_default()
            .to_string(),
        author: first_non_empty([article.author.as_deref()]).unwrap_or_default().to_string(),
    }
}

pub fn rss_articles(label: &str, channel: &rss::Channel) -> Vec<Article> {
    channel.items().iter().map(|item| rss_article(label, item)).collect()
}

fn rss_link(item: &rss::Item) -> String {
    let permalink = item
        .guid()
        .filter(|guid| guid.is_permalink())
        .map(|guid| guid.value());

    first_non_empty([item.link(), permalink]).unwrap_or_default().to_string()
}

fn rss_image(item: &rss::Item) -> String {
    first_non_empty([item.enclosure().map(|e| e.url())])
        .map(str::to_string)
        .or_else(|| item.content().and_then(first_image_src))
        .or_else(|| item.description().and_then(first_image_src))
        .or_else(|| rss_media_image(item.extensions()))
        .unwrap_or_else(|| FEED_PLACEHOLDER_IMAGE.to_string())
}

fn rss_author(item: &rss::Item, label: &str) -> String {
    let creator = item
        .dublin_core_ext()
        .and_then(|dc| dc.creators().first())
        .map(String::as_str);

    first_non_empty([creator, item.author(), Some(label)])
        .unwrap_or_default()
        .to_string()
}

fn rss_published_at(item: &rss::Item) -> String {
    let iso_date = item
        .dublin_core_ext()
        .and_then(|dc| dc.dates().first())
        .map(String::as_str);

    published_at([item.pub_date(), iso_date])
}

pub fn rss_article(label: &str, item: &rss::Item) -> Article {
    Article {
        title: title_or_default(item.title()),
        description: text_of(item.description())
            .or_else(|| excerpt_of(item.content()))
            .unwrap_or_default(),
        url: rss_link(item),
        image: rss_image(item),
        published_at: rss_published_at(item),
        source: label.to_string(),
        author: rss_author(item, label),
    }
}

pub fn atom_articles(label: &str, feed: &atom_syndication::Feed) -> Vec<Article> {
    feed.entries().iter().map(|entry| atom_article(label, entry)).collect()
}

pub fn atom_article(label: &str, entry: &atom_syndication::Entry) -> Article {
    let content = entry.content().and_then(|c| c.value());
    let summary = entry.summary().map(|s| s.as_str());

    let url = entry
        .links()
        .iter()
        .find(|link| link.rel() == "alternate")
        .or_else(|| entry.links().first())
        .map(|link| link.href().to_string())
        .unwrap_or_default();

    let enclosure = entry
        .links()
        .iter()
        .find(|link| link.rel() == "enclosure")
        .map(|link| link.href());

    let image = first_non_empty([enclosure])
        .map(str::to_string)
        .or_else(|| content.and_then(first_image_src))
        .or_else(|| summary.and_then(first_image_src))
        .or_else(|| atom_media_image(entry.extensions()))
        .unwrap_or_else(|| FEED_PLACEHOLDER_IMAGE.to_string());

    // A missing <updated> parses as the epoch.
    let updated = Some(entry.updated()).filter(|dt| dt.timestamp() != 0);
    let published = entry
        .published()
        .or(updated)
        .map(|dt| format_date(dt.with_timezone(&chrono::Utc)));

    let author = entry.authors().first().map(|person| person.name());

    Article {
        title: title_or_default(Some(entry.title().as_str())),
        description: excerpt_of(content)
            .or_else(|| text_of(summary))
            .unwrap_or_default(),
        url,
        image,
        published_at: published_at([published.as_deref()]),
        source: label.to_string(),
        author: first_non_empty([author, Some(label)]).unwrap_or_default().to_string(),
    }
}

pub fn google_news_articles(channel: &rss::Channel) -> Vec<Article> {
    channel.items().iter().map(google_news_article).collect()
}

/// Google News items name the outlet in `<source>` and repeat it as a
/// `" - Outlet"` title suffix.
pub fn google_news_article(item: &rss::Item) -> Article {
    let outlet = first_non_empty([item.source().and_then(|s| s.title())]);
    let label = outlet.unwrap_or(google_news::LABEL);

    let mut article = rss_article(label, item);

    if let Some(outlet) = outlet {
        if let Some(title) = article.title.strip_suffix(&format!(" - {outlet}")) {
            article.title = title.trim_end().to_string();
        }
    }

    article
}

fn pick_media_url<'a>(
    thumbnails: impl Iterator<Item = &'a BTreeMap<String, String>>,
    contents: impl Iterator<Item = &'a BTreeMap<String, String>>,
) -> Option<String> {
    let images = contents.filter(|attrs| {
        attrs.get("medium").map(String::as_str) == Some("image")
            || attrs.get("type").is_some_and(|t| t.starts_with("image/"))
    });

    thumbnails
        .chain(images)
        .filter_map(|attrs| attrs.get("url"))
        .map(|url| url.trim())
        .find(|url| !url.is_empty())
        .map(str::to_string)
}

fn rss_media_image(extensions: &rss::extension::ExtensionMap) -> Option<String> {
    let media = extensions.get("media")?;

    pick_media_url(
        media.get("thumbnail").into_iter().flatten().map(|ext| ext.attrs()),
        media.get("content").into_iter().flatten().map(|ext| ext.attrs()),
    )
}

fn atom_media_image(extensions: &atom_syndication::extension::ExtensionMap) -> Option<String> {
    let media = extensions.get("media")?;

    pick_media_url(
        media.get("thumbnail").into_iter().flatten().map(|ext| ext.attrs()),
        media.get("content").into_iter().flatten().map(|ext| ext.attrs()),
    )
}
