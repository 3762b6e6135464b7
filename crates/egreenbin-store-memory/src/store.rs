//! [`MemoryStore`] — the in-process implementation of [`DocumentStore`].

use std::{
  collections::{BTreeMap, HashMap},
  sync::Arc,
};

use egreenbin_core::{
  Document, DocumentId, Resource, store::DocumentStore,
};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{Error, Result};

type Collection = BTreeMap<DocumentId, Value>;

/// A document store held entirely in memory.
///
/// Cloning is cheap; clones share the same collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
  collections: Arc<RwLock<HashMap<&'static str, Collection>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl DocumentStore for MemoryStore {
  type Error = Error;

  async fn list<R: Resource>(&self) -> Result<Vec<Document<R>>> {
    let collections = self.collections.read().await;
    collections
      .get(R::COLLECTION)
      .into_iter()
      .flat_map(Collection::values)
      .map(|raw| serde_json::from_value(raw.clone()).map_err(Error::from))
      .collect()
  }

  async fn get<R: Resource>(
    &self,
    id: DocumentId,
  ) -> Result<Option<Document<R>>> {
    let collections = self.collections.read().await;
    collections
      .get(R::COLLECTION)
      .and_then(|c| c.get(&id))
      .map(|raw| serde_json::from_value(raw.clone()))
      .transpose()
      .map_err(Into::into)
  }

  async fn insert<R: Resource>(&self, fields: R) -> Result<Document<R>> {
    let document = Document::new(fields);
    let raw = serde_json::to_value(&document)?;

    self
      .collections
      .write()
      .await
      .entry(R::COLLECTION)
      .or_default()
      .insert(document.id, raw);
    Ok(document)
  }

  async fn update<R: Resource>(
    &self,
    id: DocumentId,
    patch: R::Patch,
  ) -> Result<bool> {
    let mut collections = self.collections.write().await;
    let Some(raw) = collections
      .get_mut(R::COLLECTION)
      .and_then(|c| c.get_mut(&id))
    else {
      return Ok(false);
    };

    let mut document: Document<R> = serde_json::from_value(raw.clone())?;
    document.apply(&patch);
    *raw = serde_json::to_value(&document)?;
    Ok(true)
  }

  async fn delete<R: Resource>(&self, id: DocumentId) -> Result<bool> {
    let mut collections = self.collections.write().await;
    Ok(
      collections
        .get_mut(R::COLLECTION)
        .and_then(|c| c.remove(&id))
        .is_some(),
    )
  }
}
