//! View-model attributes: what the input layer edits.
//!
//! Free-text entries (numbers, range bounds, coordinate ordinates) are kept as
//! the text the surveyor typed; they are only parsed when the attribute is
//! converted back to a domain value. Date and time come from pickers and are
//! kept as their components.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::{
  AttributeKind, Error, Result,
  attribute::RecordRef,
  definition::AttributeDefinition,
  validation::FieldValidationError,
  value::{DateValue, TimeValue},
};

// ─── Status ──────────────────────────────────────────────────────────────────

/// Validation status shown next to an attribute.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UiStatus {
  Ok,
  #[default]
  Empty,
  /// Set by clients that evaluate survey-level checks. The converters never
  /// produce it; rows carrying it are rehydrated with it intact.
  ValidationWarning,
  ValidationError,
}

impl UiStatus {
  pub fn name(self) -> &'static str { self.into() }
}

// ─── Kind-specific representations ───────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiCode {
  pub code:      Option<String>,
  pub qualifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiCoordinate {
  pub srs: Option<String>,
  pub x:   Option<String>,
  pub y:   Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiFile {
  pub filename: Option<String>,
  pub size:     Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiTaxon {
  pub code:            Option<String>,
  pub scientific_name: Option<String>,
  pub vernacular_name: Option<String>,
}

/// A single number as typed, for both integer and real attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiNumber {
  pub text: Option<String>,
  pub unit: Option<String>,
}

/// Range bounds as typed, for both integer and real ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiRange {
  pub from: Option<String>,
  pub to:   Option<String>,
  pub unit: Option<String>,
}

/// The editable value of a view-model attribute. The variant is the
/// attribute's runtime kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiValue {
  Text(Option<String>),
  Date(DateValue),
  Time(TimeValue),
  Code(UiCode),
  Coordinate(UiCoordinate),
  File(UiFile),
  Taxon(UiTaxon),
  Boolean(Option<bool>),
  Integer(UiNumber),
  Real(UiNumber),
  IntegerRange(UiRange),
  RealRange(UiRange),
}

impl UiValue {
  /// An unset value of the given kind.
  pub fn empty(kind: AttributeKind) -> Self {
    match kind {
      AttributeKind::Text => Self::Text(None),
      AttributeKind::Date => Self::Date(DateValue::default()),
      AttributeKind::Time => Self::Time(TimeValue::default()),
      AttributeKind::Code => Self::Code(UiCode::default()),
      AttributeKind::Coordinate => Self::Coordinate(UiCoordinate::default()),
      AttributeKind::File => Self::File(UiFile::default()),
      AttributeKind::Taxon => Self::Taxon(UiTaxon::default()),
      AttributeKind::Boolean => Self::Boolean(None),
      AttributeKind::Integer => Self::Integer(UiNumber::default()),
      AttributeKind::Real => Self::Real(UiNumber::default()),
      AttributeKind::IntegerRange => Self::IntegerRange(UiRange::default()),
      AttributeKind::RealRange => Self::RealRange(UiRange::default()),
    }
  }

  pub fn kind(&self) -> AttributeKind {
    match self {
      Self::Text(_) => AttributeKind::Text,
      Self::Date(_) => AttributeKind::Date,
      Self::Time(_) => AttributeKind::Time,
      Self::Code(_) => AttributeKind::Code,
      Self::Coordinate(_) => AttributeKind::Coordinate,
      Self::File(_) => AttributeKind::File,
      Self::Taxon(_) => AttributeKind::Taxon,
      Self::Boolean(_) => AttributeKind::Boolean,
      Self::Integer(_) => AttributeKind::Integer,
      Self::Real(_) => AttributeKind::Real,
      Self::IntegerRange(_) => AttributeKind::IntegerRange,
      Self::RealRange(_) => AttributeKind::RealRange,
    }
  }

  /// True when nothing at all has been entered. Units alone do not count.
  pub fn is_empty(&self) -> bool {
    match self {
      Self::Text(t) => t.is_none(),
      Self::Date(d) => d.is_empty(),
      Self::Time(t) => t.is_empty(),
      Self::Code(c) => c.code.is_none() && c.qualifier.is_none(),
      Self::Coordinate(c) => c.srs.is_none() && c.x.is_none() && c.y.is_none(),
      Self::File(f) => f.filename.is_none() && f.size.is_none(),
      Self::Taxon(t) => {
        t.code.is_none()
          && t.scientific_name.is_none()
          && t.vernacular_name.is_none()
      }
      Self::Boolean(b) => b.is_none(),
      Self::Integer(n) | Self::Real(n) => n.text.is_none(),
      Self::IntegerRange(r) | Self::RealRange(r) => {
        r.from.is_none() && r.to.is_none()
      }
    }
  }
}

// ─── UiAttribute ─────────────────────────────────────────────────────────────

/// The UI-side counterpart of a domain attribute.
///
/// The kind is fixed when the attribute is created: the value can only ever
/// be replaced by another value of the same kind.
#[derive(Debug, Clone)]
pub struct UiAttribute {
  pub id:                i32,
  /// Enclosing entity, for navigating the UI tree. Never owned.
  pub parent_id:         Option<i32>,
  pub record:            RecordRef,
  pub definition:        Arc<AttributeDefinition>,
  pub status:            UiStatus,
  /// Errors from the last validation of this attribute.
  pub validation_errors: Vec<FieldValidationError>,
  value:                 UiValue,
}

impl UiAttribute {
  /// Create an attribute, checking that `value` matches the definition.
  pub fn new(
    id: i32,
    definition: Arc<AttributeDefinition>,
    record: RecordRef,
    parent_id: Option<i32>,
    value: UiValue,
  ) -> Result<Self> {
    let expected = definition.attribute_kind()?;
    if value.kind() != expected {
      return Err(Error::KindMismatch {
        attribute_id: id,
        expected,
        found: value.kind(),
      });
    }
    let status = if value.is_empty() {
      UiStatus::Empty
    } else {
      UiStatus::Ok
    };
    Ok(Self {
      id,
      parent_id,
      record,
      definition,
      status,
      validation_errors: Vec::new(),
      value,
    })
  }

  pub fn kind(&self) -> AttributeKind { self.value.kind() }

  pub fn value(&self) -> &UiValue { &self.value }

  /// Replace the value with one of the same kind, as the input layer does
  /// after an edit.
  pub fn set_value(&mut self, value: UiValue) -> Result<()> {
    if value.kind() != self.kind() {
      return Err(Error::KindMismatch {
        attribute_id: self.id,
        expected:     self.kind(),
        found:        value.kind(),
      });
    }
    self.value = value;
    Ok(())
  }

  pub fn is_record_key(&self) -> bool { self.definition.key }
}
