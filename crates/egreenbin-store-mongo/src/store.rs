//! [`MongoStore`] — the MongoDB implementation of [`DocumentStore`].

use std::time::Duration;

use egreenbin_core::{
  Document, DocumentId, Resource, document::now, store::DocumentStore,
};
use futures::TryStreamExt as _;
use mongodb::{
  Client, Collection, Database,
  bson::{Document as BsonDocument, doc},
  options::ClientOptions,
};

use crate::{
  Result,
  encode::{decode_document, encode_document, encode_id, encode_patch},
};

const APP_NAME: &str = "egreenbin";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A document store backed by one MongoDB database.
///
/// Cloning is cheap — the driver's connection pool is reference-counted.
#[derive(Clone)]
pub struct MongoStore {
  client:              Client,
  pub(crate) database: Database,
}

impl MongoStore {
  /// Connect to `uri`, select `database`, and ping the primary.
  ///
  /// `server_selection_timeout` bounds how long any operation, including
  /// this initial ping, waits for a usable server.
  pub async fn connect(
    uri: &str,
    database: &str,
    server_selection_timeout: Duration,
  ) -> Result<Self> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some(APP_NAME.to_owned());
    options.server_selection_timeout = Some(server_selection_timeout);

    let client = Client::with_options(options)?;
    let store = Self {
      database: client.database(database),
      client,
    };
    store.ping().await?;
    tracing::info!(database, "connected to MongoDB");
    Ok(store)
  }

  /// Round-trip a `ping` command to the server.
  pub async fn ping(&self) -> Result<()> {
    self.database.run_command(doc! { "ping": 1 }).await?;
    Ok(())
  }

  /// Close every pooled connection. Clones of this store become unusable.
  pub async fn shutdown(&self) {
    self.client.clone().shutdown().await;
    tracing::info!("MongoDB connections closed");
  }

  fn collection<R: Resource>(&self) -> Collection<BsonDocument> {
    self.database.collection(R::COLLECTION)
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for MongoStore {
  type Error = crate::Error;

  async fn list<R: Resource>(&self) -> Result<Vec<Document<R>>> {
    let raw: Vec<BsonDocument> = self
      .collection::<R>()
      .find(doc! {})
      .await?
      .try_collect()
      .await?;
    raw.into_iter().map(decode_document).collect()
  }

  async fn get<R: Resource>(
    &self,
    id: DocumentId,
  ) -> Result<Option<Document<R>>> {
    self
      .collection::<R>()
      .find_one(doc! { "_id": encode_id(id) })
      .await?
      .map(decode_document)
      .transpose()
  }

  async fn insert<R: Resource>(&self, fields: R) -> Result<Document<R>> {
    let document = Document::new(fields);
    self
      .collection::<R>()
      .insert_one(encode_document(&document)?)
      .await?;
    Ok(document)
  }

  async fn update<R: Resource>(
    &self,
    id: DocumentId,
    patch: R::Patch,
  ) -> Result<bool> {
    let stage = encode_patch::<R>(&patch, now())?;
    let result = self
      .collection::<R>()
      .update_one(doc! { "_id": encode_id(id) }, vec![stage])
      .await?;
    Ok(result.matched_count > 0)
  }

  async fn delete<R: Resource>(&self, id: DocumentId) -> Result<bool> {
    let result = self
      .collection::<R>()
      .delete_one(doc! { "_id": encode_id(id) })
      .await?;
    Ok(result.deleted_count > 0)
  }
}
