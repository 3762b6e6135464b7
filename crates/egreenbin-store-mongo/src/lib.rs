//! MongoDB backend for the eGreenBin document store.
//!
//! One pooled [`mongodb::Client`] is shared by every request; each resource
//! maps to its own collection in a single database.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MongoStore;
