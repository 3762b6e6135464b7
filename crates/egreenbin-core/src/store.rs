//! The `DocumentStore` trait.
//!
//! Implemented by storage backends (`egreenbin-store-mongo`,
//! `egreenbin-store-memory`). The HTTP layer depends on this abstraction,
//! never on a concrete backend.

use std::future::Future;

use crate::{document::Document, id::DocumentId, resource::Resource};

/// Per-collection CRUD over any [`Resource`].
///
/// Every method is a single store round trip. The store, not the caller,
/// mints ids and assigns timestamps.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every document in `R`'s collection, in store-native order.
  fn list<R: Resource>(
    &self,
  ) -> impl Future<Output = Result<Vec<Document<R>>, Self::Error>> + Send + '_;

  /// Retrieve a document by id. Returns `None` if not found.
  fn get<R: Resource>(
    &self,
    id: DocumentId,
  ) -> impl Future<Output = Result<Option<Document<R>>, Self::Error>> + Send + '_;

  /// Persist `fields` as a new document with a fresh id and
  /// `date_created == date_updated == now`.
  fn insert<R: Resource>(
    &self,
    fields: R,
  ) -> impl Future<Output = Result<Document<R>, Self::Error>> + Send + '_;

  /// Merge `patch` into the document with `id` and advance its
  /// `date_updated`. Returns `false` if no document matched.
  fn update<R: Resource>(
    &self,
    id: DocumentId,
    patch: R::Patch,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove the document with `id`, if any. Returns whether one was removed.
  fn delete<R: Resource>(
    &self,
    id: DocumentId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
