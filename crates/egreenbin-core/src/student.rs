//! Students whose sorting results are tracked by the bins.

use serde::{Deserialize, Serialize};

use crate::{document::Document, resource::Resource};

/// The caller-supplied fields of a student. Omitted fields default to their
/// zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Student {
  pub code:             String,
  pub name:             String,
  /// Items the student sorted into the right bin.
  pub num_of_correct:   i64,
  pub num_of_wrong:     i64,
  pub image_avatar_url: String,
  pub parent_email:     String,
  pub note:             String,
}

/// Fields of a [`Student`] that `PUT /students/{id}` may change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub code:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:             Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub num_of_correct:   Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub num_of_wrong:     Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_avatar_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent_email:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub note:             Option<String>,
}

pub type StudentDocument = Document<Student>;

impl Resource for Student {
  type Patch = StudentPatch;

  const COLLECTION: &'static str = "students";
  const NAME: &'static str = "Student";

  fn merge(&mut self, patch: &StudentPatch) {
    fn set<T: Clone>(field: &mut T, value: &Option<T>) {
      if let Some(v) = value {
        field.clone_from(v);
      }
    }

    set(&mut self.code, &patch.code);
    set(&mut self.name, &patch.name);
    set(&mut self.num_of_correct, &patch.num_of_correct);
    set(&mut self.num_of_wrong, &patch.num_of_wrong);
    set(&mut self.image_avatar_url, &patch.image_avatar_url);
    set(&mut self.parent_email, &patch.parent_email);
    set(&mut self.note, &patch.note);
  }
}
