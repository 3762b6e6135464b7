//! [`Document`] — a stored resource together with its server-managed fields.

use chrono::{DateTime, SubsecRound as _, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::{id::DocumentId, resource::Resource};

/// The current time at the store's native (millisecond) precision.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(3) }

/// A resource as persisted: the caller-supplied fields plus the id and
/// timestamps that only the store ever assigns.
///
/// The resource fields are flattened, so on the wire a comment reads
/// `{"id":..., "student":..., "content":..., "type":..., "dateCreated":..., "dateUpdated":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<R> {
  pub id:           DocumentId,
  #[serde(flatten)]
  pub fields:       R,
  pub date_created: DateTime<Utc>,
  pub date_updated: DateTime<Utc>,
}

impl<R: Resource> Document<R> {
  /// Wrap `fields` in a new document with a fresh id and
  /// `date_created == date_updated == now`.
  pub fn new(fields: R) -> Self {
    let at = now();
    Self {
      id: DocumentId::generate(),
      fields,
      date_created: at,
      date_updated: at,
    }
  }

  /// Merge the allow-listed fields of `patch` and refresh `date_updated`.
  pub fn apply(&mut self, patch: &R::Patch) {
    self.fields.merge(patch);
    self.date_updated = next_update_time(self.date_updated);
  }
}

/// The `date_updated` to record for a mutation of a document last updated at
/// `previous`: now, but always at least one millisecond after `previous`.
pub fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
  now().max(previous + TimeDelta::milliseconds(1))
}
