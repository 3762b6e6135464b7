//! In-process backend for the eGreenBin document store.
//!
//! Keeps each collection as serialized documents behind a single async
//! `RwLock`, with the same observable semantics as the MongoDB backend.
//! Used to exercise the HTTP layer without a database server.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
