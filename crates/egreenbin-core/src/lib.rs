//! Core types and trait definitions for the eGreenBin API.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! store backends and the HTTP layer all depend on it.

pub mod comment;
pub mod document;
pub mod error;
pub mod id;
pub mod resource;
pub mod store;
pub mod student;

pub use document::Document;
pub use error::{Error, Result};
pub use id::DocumentId;
pub use resource::Resource;
