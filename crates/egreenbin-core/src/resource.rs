//! The [`Resource`] trait — what the generic CRUD layer needs to know about a
//! record type.

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

/// A record type stored in its own collection and exposed under
/// `/api/{COLLECTION}`.
///
/// `Self` is the set of caller-supplied fields accepted on create. The
/// server-managed id and timestamps live in [`crate::Document`], never here.
pub trait Resource:
  Debug + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
  /// The allow-listed mutable fields, each optional. Only fields present in
  /// a patch are written; everything else in the stored document is kept.
  ///
  /// Must serialize absent fields by skipping them, so that a serialized
  /// patch contains exactly the keys to set.
  type Patch: Debug + Serialize + DeserializeOwned + Send + Sync + 'static;

  /// Collection name, also used as the URL path segment.
  const COLLECTION: &'static str;

  /// Human-readable singular name, e.g. `"Comment"`.
  const NAME: &'static str;

  /// Overwrite the fields that are present in `patch`.
  fn merge(&mut self, patch: &Self::Patch);
}
