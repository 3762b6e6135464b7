//! Mapping between [`Document`] and its BSON form.
//!
//! Storage keeps the wire field names except for the id, which is stored as
//! an `ObjectId` under `_id`, and the timestamps, which are stored as BSON
//! datetimes.

use chrono::{DateTime, Utc};
use egreenbin_core::{Document, DocumentId, Resource};
use mongodb::bson::{self, Bson, Document as BsonDocument, doc, oid::ObjectId};

use crate::{Error, Result};

pub(crate) const ID: &str = "_id";
pub(crate) const DATE_CREATED: &str = "dateCreated";
pub(crate) const DATE_UPDATED: &str = "dateUpdated";

pub(crate) fn encode_id(id: DocumentId) -> ObjectId {
  id.object_id()
}

pub(crate) fn encode_dt(dt: DateTime<Utc>) -> bson::DateTime {
  bson::DateTime::from_millis(dt.timestamp_millis())
}

fn decode_dt(dt: bson::DateTime) -> Result<DateTime<Utc>> {
  let millis = dt.timestamp_millis();
  DateTime::from_timestamp_millis(millis).ok_or(Error::Timestamp(millis))
}

/// `{_id, ...fields, dateCreated, dateUpdated}`.
pub(crate) fn encode_document<R: Resource>(
  document: &Document<R>,
) -> Result<BsonDocument> {
  let mut raw = doc! { "_id": encode_id(document.id) };
  for (key, value) in bson::to_document(&document.fields)? {
    raw.insert(key, value);
  }
  raw.insert(DATE_CREATED, encode_dt(document.date_created));
  raw.insert(DATE_UPDATED, encode_dt(document.date_updated));
  Ok(raw)
}

/// Inverse of [`encode_document`].
///
/// Documents written by other clients may lack timestamps; `dateCreated`
/// then falls back to the time embedded in the object id and `dateUpdated`
/// to `dateCreated`.
pub(crate) fn decode_document<R: Resource>(
  mut raw: BsonDocument,
) -> Result<Document<R>> {
  let id = match raw.remove(ID) {
    Some(Bson::ObjectId(oid)) => oid,
    _ => return Err(Error::MissingField(ID)),
  };
  let date_created = match raw.remove(DATE_CREATED) {
    Some(Bson::DateTime(dt)) => dt,
    _ => id.timestamp(),
  };
  let date_updated = match raw.remove(DATE_UPDATED) {
    Some(Bson::DateTime(dt)) => dt,
    _ => date_created,
  };

  Ok(Document {
    id:           DocumentId::from(id),
    fields:       bson::from_document(raw)?,
    date_created: decode_dt(date_created)?,
    date_updated: decode_dt(date_updated)?,
  })
}

/// Build the `$set` stage of an aggregation-pipeline update.
///
/// Patch values are wrapped in `$literal` so user strings starting with `$`
/// are never read as field paths. `dateUpdated` becomes
/// `max(now, dateUpdated + 1ms)`, evaluated by the server against the stored
/// value in the same write.
pub(crate) fn encode_patch<R: Resource>(
  patch: &R::Patch,
  now: DateTime<Utc>,
) -> Result<BsonDocument> {
  let mut set = BsonDocument::new();
  for (key, value) in bson::to_document(patch)? {
    set.insert(key, doc! { "$literal": value });
  }
  set.insert(
    DATE_UPDATED,
    doc! {
      "$max": [
        encode_dt(now),
        { "$add": ["$dateUpdated", 1_i64] },
      ]
    },
  );
  Ok(doc! { "$set": set })
}
