//! [`DocumentId`] — the primary key of every stored document.
//!
//! A thin wrapper over the BSON object id. On the wire it is always 24
//! lowercase hex characters, never the extended-JSON `{"$oid": ...}` form.

use std::{fmt, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{Error, Result};

/// A 12-byte document identifier, minted server-side and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(ObjectId);

impl DocumentId {
  /// Mint a fresh identifier.
  pub fn generate() -> Self { Self(ObjectId::new()) }

  pub const fn object_id(&self) -> ObjectId { self.0 }

  /// Parse the 24-hex-character form. Either case is accepted.
  pub fn parse(s: &str) -> Result<Self> {
    ObjectId::parse_str(s)
      .map(Self)
      .map_err(|_| Error::InvalidId(s.to_owned()))
  }
}

impl From<ObjectId> for DocumentId {
  fn from(oid: ObjectId) -> Self { Self(oid) }
}

impl FromStr for DocumentId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl fmt::Display for DocumentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.to_hex())
  }
}

impl Serialize for DocumentId {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for DocumentId {
  fn deserialize<D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<Self, D::Error> {
    let s = String::deserialize(deserializer)?;
    Self::parse(&s).map_err(de::Error::custom)
  }
}
