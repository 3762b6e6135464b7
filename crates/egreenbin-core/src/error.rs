//! Error types for `egreenbin-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid document id {0:?}: expected 24 hexadecimal characters")]
  InvalidId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
