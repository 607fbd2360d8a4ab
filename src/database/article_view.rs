use anyhow::Context as _;
use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::IndexModel;
use serde::{Deserialize, Serialize};

use super::{view_doc_id, ViewStore};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleView {
	#[serde(rename = "_id")]
	pub id: String,
	pub url: String,
	pub view_count: i64,
	pub last_updated: bson::DateTime,
}

impl ArticleView {
	pub const COLLECTION: &'static str = "pulse_article_views";

	pub fn collection(db: &mongodb::Database) -> mongodb::Collection<Self> {
		db.collection(Self::COLLECTION)
	}

	#[tracing::instrument(skip(db))]
	pub async fn find(db: &mongodb::Database, url: &str) -> anyhow::Result<Option<Self>> {
		let view = Self::collection(db)
			.find_one(doc! { "_id": view_doc_id(url) })
			.await?;

		Ok(view)
	}

	/// Adds one view in a single upsert, creating the record on first view.
	#[tracing::instrument(skip(db))]
	pub async fn increment(db: &mongodb::Database, url: &str) -> anyhow::Result<Self> {
		let options = FindOneAndUpdateOptions::builder()
			.upsert(true)
			.return_document(ReturnDocument::After)
			.build();

		Self::collection(db)
			.find_one_and_update(
				doc! { "_id": view_doc_id(url) },
				doc! {
					"$inc": { "viewCount": 1_i64 },
					"$set": { "lastUpdated": bson::DateTime::now() },
					"$setOnInsert": { "url": url },
				},
			)
			.with_options(options)
			.await?
			.context("upsert returned no document")
	}

	pub async fn ensure_indexes(db: &mongodb::Database) -> anyhow::Result<()> {
		Self::collection(db)
			.create_index(
				IndexModel::builder()
					.keys(doc! { "viewCount": -1 })
					.options(IndexOptions::builder().name("viewCount_desc".to_string()).build())
					.build(),
			)
			.await
			.with_context(|| format!("creating viewCount index on {}", Self::COLLECTION))?;

		tracing::info!("ensured indexes on {}", Self::COLLECTION);
		Ok(())
	}
}

/// View counts stored in MongoDB.
#[derive(Clone)]
pub struct MongoViewStore {
	db: mongodb::Database,
}

impl MongoViewStore {
	pub fn new(db: mongodb::Database) -> Self {
		Self { db }
	}
}

#[async_trait]
impl ViewStore for MongoViewStore {
	async fn count(&self, url: &str) -> anyhow::Result<i64> {
		Ok(ArticleView::find(&self.db, url).await?.map_or(0, |view| view.view_count))
	}

	async fn increment(&self, url: &str) -> anyhow::Result<i64> {
		Ok(ArticleView::increment(&self.db, url).await?.view_count)
	}
}
