//! Error type for `egreenbin-store-mongo`.

use mongodb::bson;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] mongodb::error::Error),

  #[error("bson encode error: {0}")]
  Encode(#[from] bson::ser::Error),

  #[error("bson decode error: {0}")]
  Decode(#[from] bson::de::Error),

  /// A stored document lacks a field every document must carry.
  #[error("document is missing `{0}`")]
  MissingField(&'static str),

  #[error("timestamp out of range: {0}ms")]
  Timestamp(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
