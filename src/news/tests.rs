use std::collections::HashMap;
use std::sync::Arc;

use tracing_test::traced_test;

use super::article::SEARCH_PLACEHOLDER_IMAGE;
use super::testing::{rss_feed, search_response, Reply, ScriptedFetch};
use super::*;
use crate::config::{Config, UnknownCategory};

const SEARCH_URL: &str = "https://newsapi.org/v2/everything";
const GOOGLE_URL: &str = "https://news.google.com/rss/search";

fn config_with_key() -> Config {
    let mut config = Config::default();
    config.news.api_key = Some("test-key".to_string());
    config
}

fn service(fetch: &Arc<ScriptedFetch>, config: &Config) -> NewsService {
    NewsService::new(fetch.clone(), config)
}

fn assert_newest_first(articles: &[Article]) {
    for pair in articles.windows(2) {
        assert!(
            pair[0].published() >= pair[1].published(),
            "{} ({}) sorted before {} ({})",
            pair[0].title,
            pair[0].published_at,
            pair[1].title,
            pair[1].published_at
        );
    }
}

#[tokio::test]
async fn test_ai_category_searches_keyword() {
    let fetch = Arc::new(ScriptedFetch::new().reply(SEARCH_URL, Reply::Body(search_response("ai", 4))));
    let news = service(&fetch, &config_with_key());

    let articles = news.fetch_news_by_category("ai").await;

    let calls = fetch.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].param("q"), Some("artificial intelligence"));
    assert_eq!(calls[0].param("sortBy"), Some("publishedAt"));
    assert_eq!(calls[0].param("apiKey"), Some("test-key"));

    assert_eq!(articles.len(), 4);
    assert_newest_first(&articles);
    assert_eq!(articles[0].image, SEARCH_PLACEHOLDER_IMAGE);
    assert_eq!(articles[1].image, "https://img.example.com/1.png");
    assert!(articles.iter().all(|a| a.source == "Wired" && a.author == "Jane Doe"));
}

#[tokio::test(start_paused = true)]
#[traced_test]
async fn test_cloud_computing_survives_oracle_timeout() {
    let mut fetch = ScriptedFetch::new();
    for (offset, vendor) in CloudVendor::ALL.into_iter().enumerate() {
        let reply = match vendor {
            CloudVendor::Oracle => Reply::Hang,
            _ => Reply::Body(rss_feed(vendor.slug(), 25, offset as i64)),
        };
        fetch = fetch.reply(vendor.feed_url(), reply);
    }
    let fetch = Arc::new(fetch);
    let news = service(&fetch, &config_with_key());

    let articles = news.fetch_news_by_category("cloud-computing").await;

    for vendor in CloudVendor::ALL {
        assert_eq!(fetch.calls_to(vendor.feed_url()).len(), 1, "{vendor:?} not fetched once");
    }
    assert!(fetch.calls_to(SEARCH_URL).is_empty());

    let mut per_source: HashMap<&str, usize> = HashMap::new();
    for article in &articles {
        *per_source.entry(article.source.as_str()).or_default() += 1;
    }
    assert_eq!(per_source.len(), 5);
    assert!(per_source.values().all(|count| *count == 20));
    assert!(!per_source.contains_key("ORACLE"));

    // The newest 20 of each feed survive the cap.
    assert!(articles.iter().any(|a| a.title == "aws post 0"));
    assert!(articles.iter().any(|a| a.title == "aws post 19"));
    assert!(!articles.iter().any(|a| a.title == "aws post 20"));

    assert_newest_first(&articles);
    assert!(logs_contain("timed out"));
}

#[tokio::test]
async fn test_failing_provider_does_not_empty_result() {
    let fetch = Arc::new(
        ScriptedFetch::new()
            .reply(CloudVendor::Aws.feed_url(), Reply::Status(500))
            .reply(CloudVendor::Azure.feed_url(), Reply::Body("<html>maintenance</html>".into()))
            .reply(CloudVendor::Gcp.feed_url(), Reply::Body(rss_feed("gcp", 3, 0))),
    );
    let news = service(&fetch, &Config::default());

    let articles = news
        .fetch_cloud_feeds(&[CloudVendor::Aws, CloudVendor::Azure, CloudVendor::Gcp])
        .await;

    let expected = news.fetch_cloud_feeds(&[CloudVendor::Gcp]).await;
    assert_eq!(articles, expected);
    assert_eq!(articles.len(), 3);
}

#[tokio::test]
async fn test_single_vendor_category() {
    let fetch = Arc::new(
        ScriptedFetch::new().reply(CloudVendor::Digitalocean.feed_url(), Reply::Body(rss_feed("do", 2, 0))),
    );
    let news = service(&fetch, &config_with_key());

    let articles = news.fetch_news_by_category("cloud-digitalocean").await;

    assert_eq!(fetch.calls().len(), 1);
    assert_eq!(articles.len(), 2);
    assert!(articles.iter().all(|a| a.source == "DIGITALOCEAN"));
    assert!(articles.iter().all(|a| a.author == "DIGITALOCEAN"));
    assert_eq!(articles[0].description, "Post 0 from do");
}

#[tokio::test]
async fn test_cloud_falls_back_to_search_when_feeds_empty() {
    let fetch = Arc::new(ScriptedFetch::new().reply(SEARCH_URL, Reply::Body(search_response("cloud", 2))));
    let news = service(&fetch, &config_with_key());

    let articles = news.fetch_news_by_category("cloud-computing").await;

    let searches = fetch.calls_to(SEARCH_URL);
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0].param("q"), Some("cloud computing"));
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn test_cloud_fallback_skipped_without_key() {
    let fetch = Arc::new(ScriptedFetch::new());
    let news = service(&fetch, &Config::default());

    let articles = news.fetch_news_by_category("cloud-aws").await;

    assert!(articles.is_empty());
    assert!(fetch.calls_to(SEARCH_URL).is_empty());
}

#[tokio::test]
async fn test_search_blank_query_makes_no_call() {
    let fetch = Arc::new(ScriptedFetch::new().reply(SEARCH_URL, Reply::Body(search_response("x", 1))));
    let news = service(&fetch, &config_with_key());

    assert!(news.search_news("").await.is_empty());
    assert!(news.search_news("   \t").await.is_empty());
    assert!(fetch.calls().is_empty());
}

#[tokio::test]
async fn test_search_uses_literal_query() {
    let fetch = Arc::new(ScriptedFetch::new().reply(SEARCH_URL, Reply::Body(search_response("rust", 3))));
    let news = service(&fetch, &config_with_key());

    let articles = news.search_news("  rust async runtimes ").await;

    assert_eq!(fetch.calls()[0].param("q"), Some("rust async runtimes"));
    assert_eq!(articles.len(), 3);
    assert_newest_first(&articles);
}

#[tokio::test]
#[traced_test]
async fn test_search_without_key_is_empty() {
    let fetch = Arc::new(ScriptedFetch::new());
    let news = service(&fetch, &Config::default());

    assert!(!news.search_configured());
    assert!(news.search_news("rust").await.is_empty());
    assert!(fetch.calls().is_empty());
    assert!(logs_contain("is not configured"));
}

#[tokio::test]
async fn test_search_upstream_error_is_empty() {
    let fetch = Arc::new(ScriptedFetch::new().reply(
        SEARCH_URL,
        Reply::Body(r#"{"status":"error","code":"rateLimited","message":"slow down"}"#.into()),
    ));
    let news = service(&fetch, &config_with_key());

    assert!(news.search_news("rust").await.is_empty());
    assert!(news.fetch_news_by_category("blockchain").await.is_empty());
}

#[tokio::test]
async fn test_unknown_category_policies() {
    let fetch = Arc::new(ScriptedFetch::new().reply(SEARCH_URL, Reply::Body(search_response("tech", 1))));

    let news = service(&fetch, &config_with_key());
    assert_eq!(news.fetch_news_by_category("gardening").await.len(), 1);
    assert_eq!(fetch.calls()[0].param("q"), Some("technology"));

    let mut config = config_with_key();
    config.news.unknown_category = UnknownCategory::Empty;
    let fetch = Arc::new(ScriptedFetch::new());
    let news = service(&fetch, &config);

    assert_eq!(news.plan("gardening"), Plan::Nothing);
    assert!(news.fetch_news_by_category("gardening").await.is_empty());
    assert!(fetch.calls().is_empty());
}

#[test]
fn test_plans() {
    let news = NewsService::new(Arc::new(ScriptedFetch::new()), &Config::default());

    assert_eq!(
        news.plan("magazines"),
        Plan::Search {
            keyword: "technology magazine".to_string()
        }
    );
    assert!(news.needs_api_key("ai"));
    assert!(news.needs_api_key("gardening"));
    assert!(!news.needs_api_key("cloud-computing"));
    assert!(!news.needs_api_key("headlines"));

    let mut merged = Config::default();
    merged.google_news.merge = true;
    let news = NewsService::new(Arc::new(ScriptedFetch::new()), &merged);
    assert!(!news.needs_api_key("ai"));

    match news.plan("cloud-gcp") {
        Plan::Feeds {
            vendors,
            fallback_keyword,
        } => {
            assert_eq!(vendors, vec![CloudVendor::Gcp]);
            assert_eq!(fallback_keyword, "Google Cloud");
        }
        other => panic!("unexpected plan {other:?}"),
    }
}

fn google_news_feed() -> String {
    r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>Google News</title><link>https://news.google.com</link><description>Google News</description>
<item><title>Chip makers rally - Reuters</title><link>https://news.google.com/articles/1</link><pubDate>Fri, 01 Mar 2024 09:00:00 GMT</pubDate><description>&lt;a href="https://news.google.com/articles/1"&gt;Chip makers rally&lt;/a&gt;</description><source url="https://www.reuters.com">Reuters</source></item>
<item><title>Untitled outlet story</title><link>https://news.google.com/articles/2</link><pubDate>Fri, 01 Mar 2024 11:00:00 GMT</pubDate></item>
</channel></rss>"#
        .to_string()
}

#[tokio::test]
async fn test_headlines_use_google_news() {
    let fetch = Arc::new(ScriptedFetch::new().reply(GOOGLE_URL, Reply::Body(google_news_feed())));
    let news = service(&fetch, &Config::default());

    let articles = news.fetch_news_by_category("headlines").await;

    assert_eq!(fetch.calls()[0].param("q"), Some("technology"));
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Untitled outlet story");
    assert_eq!(articles[0].source, "Google News");
    assert_eq!(articles[1].title, "Chip makers rally");
    assert_eq!(articles[1].source, "Reuters");
    assert_eq!(articles[1].author, "Reuters");
}

#[tokio::test]
async fn test_google_news_merge() {
    let mut config = config_with_key();
    config.google_news.merge = true;

    let fetch = Arc::new(
        ScriptedFetch::new()
            .reply(SEARCH_URL, Reply::Body(search_response("ai", 2)))
            .reply(GOOGLE_URL, Reply::Body(google_news_feed())),
    );
    let news = service(&fetch, &config);

    let articles = news.fetch_news_by_category("ai").await;

    assert_eq!(fetch.calls_to(GOOGLE_URL)[0].param("q"), Some("artificial intelligence"));
    assert_eq!(articles.len(), 4);
    assert_newest_first(&articles);
}
