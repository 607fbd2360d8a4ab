//! Runs one category or search query against the live providers and prints
//! the normalized articles. Needs no database.
//!
//! Run with: cargo run --bin test-feed -- <category|search> [query]
//! Examples:
//!   cargo run --bin test-feed -- cloud-computing
//!   cargo run --bin test-feed -- cloud-oracle
//!   PULSE_NEWS__API_KEY=... cargo run --bin test-feed -- ai
//!   PULSE_NEWS__API_KEY=... cargo run --bin test-feed -- search "rust async"

use std::sync::Arc;

use segmento_pulse::config::Config;
use segmento_pulse::news::{Article, NewsService, Plan};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <category|search> [query]", args[0]);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "segmento_pulse=debug".into()),
        )
        .init();

    let config = Config::load()?;
    let client = reqwest::Client::builder()
        .user_agent(concat!("test-feed/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let news = NewsService::new(Arc::new(client), &config);

    let started = std::time::Instant::now();

    let articles = match args[1].as_str() {
        "search" => {
            let query = args[2..].join(" ");
            println!("Searching for {query:?}...\n");
            news.search_news(&query).await
        }
        category => {
            let plan = news.plan(category);
            println!("Fetching {category} ({plan:?})...\n");
            if news.needs_api_key(category) && !news.search_configured() {
                eprintln!("warning: {category} needs PULSE_NEWS__API_KEY");
            }
            if plan == Plan::Nothing {
                eprintln!("warning: unknown category {category}");
            }
            news.fetch_news_by_category(category).await
        }
    };

    for (i, article) in articles.iter().enumerate() {
        print_article(i + 1, article);
    }

    println!(
        "\n{} articles in {:.1}s",
        articles.len(),
        started.elapsed().as_secs_f64()
    );

    Ok(())
}

fn print_article(n: usize, article: &Article) {
    println!("{n:>3}. [{}] {}", article.source, article.title);
    println!("     {} | {}", article.published_at, article.author);
    println!("     {}", article.url);
    println!("     image: {}", article.image);
    if !article.description.is_empty() {
        println!("     {}", article.description);
    }
}
