//! JSON REST API for eGreenBin.
//!
//! Exposes an axum [`Router`] backed by any
//! [`egreenbin_core::store::DocumentStore`]. Every resource gets the same five
//! routes from [`resource`]. Transport concerns (timeouts, tracing, panic
//! recovery) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", egreenbin_api::api_router(store.clone()))
//! ```

pub mod envelope;
pub mod error;
pub mod extract;
pub mod resource;

use std::sync::Arc;

use axum::{Router, routing::get};
use egreenbin_core::{
  Resource, comment::Comment, store::DocumentStore, student::Student,
};

pub use envelope::{Envelope, Status};
pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    .merge(resource_routes::<S, Comment>())
    .merge(resource_routes::<S, Student>())
    .with_state(store)
}

/// `/{collection}` and `/{collection}/{id}` for one resource.
fn resource_routes<S, R>() -> Router<Arc<S>>
where
  S: DocumentStore + 'static,
  R: Resource,
{
  let collection = format!("/{}", R::COLLECTION);
  let item = format!("/{}/{{id}}", R::COLLECTION);

  Router::new()
    .route(
      &collection,
      get(resource::list::<S, R>).post(resource::create::<S, R>),
    )
    .route(
      &item,
      get(resource::get_one::<S, R>)
        .put(resource::update::<S, R>)
        .delete(resource::delete::<S, R>),
    )
}

#[cfg(test)]
mod tests;
