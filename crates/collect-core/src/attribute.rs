//! Domain attributes and the records that own them.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Identifies the record a node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
  pub survey_id: i32,
  pub record_id: i32,
}

/// A leaf node of a survey record holding one typed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
  pub id:            i32,
  pub definition_id: i32,
  /// Enclosing entity; `None` for attributes directly under the record root.
  #[serde(default)]
  pub parent_id:     Option<i32>,
  /// `None` when the surveyor has not entered anything.
  #[serde(default)]
  pub value:         Option<Value>,
}

impl Attribute {
  pub fn new(id: i32, definition_id: i32, value: Option<Value>) -> Self {
    Self {
      id,
      definition_id,
      parent_id: None,
      value,
    }
  }
}

/// A survey record as loaded from, or about to be written to, the domain
/// layer. The record owns its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
  pub id:         i32,
  pub survey_id:  i32,
  #[serde(default)]
  pub attributes: Vec<Attribute>,
}

impl Record {
  pub fn reference(&self) -> RecordRef {
    RecordRef {
      survey_id: self.survey_id,
      record_id: self.id,
    }
  }

  /// Parse a record document.
  pub fn from_json(input: &str) -> crate::Result<Self> {
    Ok(serde_json::from_str(input)?)
  }
}
