//! `NodeDto`, the flat, storage-shaped form of a view-model attribute.
//!
//! One row per attribute. The identifying columns are always populated; the
//! value columns are all nullable and only those belonging to the row's kind
//! are ever written.

use serde::{Deserialize, Serialize};

use crate::AttributeKind;

/// Primary key of a persisted attribute row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey {
  pub survey_id: i32,
  pub record_id: i32,
  pub id:        i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDto {
  pub id:                   i32,
  pub definition_id:        i32,
  /// `None` only for attributes directly under the record root.
  pub parent_id:            Option<i32>,
  pub survey_id:            i32,
  pub record_id:            i32,
  pub kind:                 AttributeKind,
  pub record_key_attribute: bool,
  /// Name of the validation status; filled in by the registry, not by the
  /// individual converters.
  pub status:               Option<String>,

  // ── Value columns ───────────────────────────────────────────────────────
  pub text:                 Option<String>,
  pub year:                 Option<i32>,
  pub month:                Option<u32>,
  pub day:                  Option<u32>,
  pub hour:                 Option<u32>,
  pub minute:               Option<u32>,
  pub code:                 Option<String>,
  pub qualifier:            Option<String>,
  pub srs:                  Option<String>,
  pub x:                    Option<f64>,
  pub y:                    Option<f64>,
  pub file_name:            Option<String>,
  pub file_size:            Option<u64>,
  pub taxon_code:           Option<String>,
  pub scientific_name:      Option<String>,
  pub vernacular_name:      Option<String>,
  pub boolean:              Option<bool>,
  pub int_value:            Option<i64>,
  pub real_value:           Option<f64>,
  pub int_from:             Option<i64>,
  pub int_to:               Option<i64>,
  pub real_from:            Option<f64>,
  pub real_to:              Option<f64>,
  pub unit:                 Option<String>,
}

impl NodeDto {
  /// A row with its identifying columns set and every value column empty.
  pub fn new(
    key: NodeKey,
    definition_id: i32,
    parent_id: Option<i32>,
    kind: AttributeKind,
    record_key_attribute: bool,
  ) -> Self {
    Self {
      id: key.id,
      definition_id,
      parent_id,
      survey_id: key.survey_id,
      record_id: key.record_id,
      kind,
      record_key_attribute,
      status: None,
      text: None,
      year: None,
      month: None,
      day: None,
      hour: None,
      minute: None,
      code: None,
      qualifier: None,
      srs: None,
      x: None,
      y: None,
      file_name: None,
      file_size: None,
      taxon_code: None,
      scientific_name: None,
      vernacular_name: None,
      boolean: None,
      int_value: None,
      real_value: None,
      int_from: None,
      int_to: None,
      real_from: None,
      real_to: None,
      unit: None,
    }
  }

  pub fn key(&self) -> NodeKey {
    NodeKey {
      survey_id: self.survey_id,
      record_id: self.record_id,
      id:        self.id,
    }
  }
}
