//! The `{status, data, message}` wrapper around every JSON response body.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
  Success,
  Error,
}

/// A response body. Failures carry `data: null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
  pub status:  Status,
  pub data:    T,
  pub message: String,
}

impl<T> Envelope<T> {
  pub fn success(data: T, message: impl Into<String>) -> Self {
    Self {
      status: Status::Success,
      data,
      message: message.into(),
    }
  }
}

impl Envelope<()> {
  pub fn error(message: impl Into<String>) -> Self {
    Self {
      status:  Status::Error,
      data:    (),
      message: message.into(),
    }
  }
}
