use std::cmp::Reverse;
use std::future::Future;

use futures_util::future::join_all;

use super::article::Article;

/// Newest first. Undated articles go last; ties keep their input order.
pub fn sort_by_published(articles: &mut [Article]) {
    articles.sort_by_cached_key(|article| Reverse(article.published()));
}

/// Concatenates per-provider results in provider order and sorts them.
pub fn merge(results: impl IntoIterator<Item = Vec<Article>>) -> Vec<Article> {
    let mut articles: Vec<Article> = results.into_iter().flatten().collect();
    sort_by_published(&mut articles);
    articles
}

/// Runs every provider concurrently and merges whatever each one produced.
/// Providers report failure as an empty list, so one slow or broken provider
/// never affects the others.
pub async fn gather<F>(providers: impl IntoIterator<Item = F>) -> Vec<Article>
where
    F: Future<Output = Vec<Article>>,
{
    merge(join_all(providers).await)
}
