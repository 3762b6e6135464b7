//! Generic handlers for `/{collection}` endpoints, shared by every
//! [`Resource`].
//!
//! | Method   | Path                | Notes |
//! |----------|---------------------|-------|
//! | `GET`    | `/{collection}`      | Every document, store order |
//! | `POST`   | `/{collection}`      | Body: resource fields; returns 201 + created document |
//! | `GET`    | `/{collection}/{id}` | 400 on malformed id, 404 if not found |
//! | `PUT`    | `/{collection}/{id}` | Body: patch; returns 204, 404 if not found |
//! | `DELETE` | `/{collection}/{id}` | Returns 204 whether or not the document existed |

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use egreenbin_core::{
  Document, DocumentId, Resource, store::DocumentStore,
};

use crate::{
  envelope::Envelope,
  error::ApiError,
  extract::{JsonBody, PathParam},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /{collection}`
pub async fn list<S, R>(
  State(store): State<Arc<S>>,
) -> Result<Json<Envelope<Vec<Document<R>>>>, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let documents = store
    .list::<R>()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let message = format!("Found {} {}.", documents.len(), R::COLLECTION);
  Ok(Json(Envelope::success(documents, message)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /{collection}/{id}`
pub async fn get_one<S, R>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<String>,
) -> Result<Json<Envelope<Document<R>>>, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let id = DocumentId::parse(&id)?;
  let document = store
    .get::<R>(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found::<R>(id))?;
  Ok(Json(Envelope::success(document, format!("{} found.", R::NAME))))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /{collection}` — returns 201 + the stored document.
///
/// The id and timestamps are assigned by the store; any such keys in the
/// body are ignored.
pub async fn create<S, R>(
  State(store): State<Arc<S>>,
  JsonBody(fields): JsonBody<R>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let document = store
    .insert(fields)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(collection = R::COLLECTION, id = %document.id, "created");

  let message = format!("{} has been created.", R::NAME);
  Ok((StatusCode::CREATED, Json(Envelope::success(document, message))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /{collection}/{id}` — body: [`Resource::Patch`]; returns 204.
pub async fn update<S, R>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<String>,
  JsonBody(patch): JsonBody<R::Patch>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let id = DocumentId::parse(&id)?;
  tracing::debug!(collection = R::COLLECTION, %id, ?patch, "updating");

  let matched = store
    .update::<R>(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !matched {
    return Err(not_found::<R>(id));
  }
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /{collection}/{id}` — returns 204 even if nothing was deleted.
pub async fn delete<S, R>(
  State(store): State<Arc<S>>,
  PathParam(id): PathParam<String>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore,
  R: Resource,
{
  let id = DocumentId::parse(&id)?;
  let deleted = store
    .delete::<R>(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  tracing::info!(collection = R::COLLECTION, %id, deleted, "deleted");
  Ok(StatusCode::NO_CONTENT)
}

fn not_found<R: Resource>(id: DocumentId) -> ApiError {
  ApiError::NotFound(format!("{} {id} not found", R::NAME))
}
