//! Comments left about a student's recycling behaviour.

use serde::{Deserialize, Serialize};

use crate::{document::Document, resource::Resource};

/// The caller-supplied fields of a comment. Omitted fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Comment {
  /// The student the comment is about.
  pub student: String,
  pub content: String,
  /// Free-form category, e.g. `"praise"`.
  #[serde(rename = "type")]
  pub kind:    String,
}

/// Fields of a [`Comment`] that `PUT /comments/{id}` may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub student: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content: Option<String>,
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind:    Option<String>,
}

pub type CommentDocument = Document<Comment>;

impl Resource for Comment {
  type Patch = CommentPatch;

  const COLLECTION: &'static str = "comments";
  const NAME: &'static str = "Comment";

  fn merge(&mut self, patch: &CommentPatch) {
    if let Some(student) = &patch.student {
      self.student.clone_from(student);
    }
    if let Some(content) = &patch.content {
      self.content.clone_from(content);
    }
    if let Some(kind) = &patch.kind {
      self.kind.clone_from(kind);
    }
  }
}
