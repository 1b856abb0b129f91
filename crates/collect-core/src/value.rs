//! Domain values, the typed payload of a survey attribute.
//!
//! A value is always "set"; an attribute without a value holds `None` instead
//! of an empty or zeroed [`Value`].

use serde::{Deserialize, Serialize};

use crate::{AttributeKind, definition::FileType};

// ─── Temporal ────────────────────────────────────────────────────────────────

/// A calendar date whose components may be individually unknown.
///
/// Surveyors regularly record only a year (e.g. planting year) or a year and
/// month, so no component is implied by the others.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateValue {
  pub year:  Option<i32>,
  pub month: Option<u32>,
  pub day:   Option<u32>,
}

impl DateValue {
  pub fn ymd(year: i32, month: u32, day: u32) -> Self {
    Self {
      year:  Some(year),
      month: Some(month),
      day:   Some(day),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.year.is_none() && self.month.is_none() && self.day.is_none()
  }
}

/// A time of day; either component may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeValue {
  pub hour:   Option<u32>,
  pub minute: Option<u32>,
}

impl TimeValue {
  pub fn hm(hour: u32, minute: u32) -> Self {
    Self {
      hour:   Some(hour),
      minute: Some(minute),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.hour.is_none() && self.minute.is_none()
  }
}

// ─── Structured sub-types ────────────────────────────────────────────────────

/// An item picked from a code list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeValue {
  pub code:      String,
  /// Free text accompanying a "specify other" code.
  pub qualifier: Option<String>,
}

/// A point in a named spatial reference system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateValue {
  /// SRS identifier, e.g. `EPSG:4326`.
  pub srs: String,
  pub x:   f64,
  pub y:   f64,
}

/// A file stored next to the survey data; no binary data lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileValue {
  /// Path relative to the survey's file directory.
  pub filename:  String,
  pub size:      Option<u64>,
  pub file_type: FileType,
}

/// A taxon from the survey's taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonValue {
  pub code:            String,
  /// Overrides the taxonomy's scientific name, e.g. for unlisted species.
  pub scientific_name: Option<String>,
  pub vernacular_name: Option<String>,
}

/// A measured number with the unit it was measured in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberValue<N> {
  pub value: N,
  pub unit:  Option<String>,
}

/// A range where either bound may be unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeValue<N> {
  pub from: Option<N>,
  pub to:   Option<N>,
  pub unit: Option<String>,
}

// ─── Value ───────────────────────────────────────────────────────────────────

/// The typed payload of an attribute. The variant always matches the
/// [`AttributeKind`] of the attribute's definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Value {
  Text(String),
  Date(DateValue),
  Time(TimeValue),
  Code(CodeValue),
  Coordinate(CoordinateValue),
  File(FileValue),
  Taxon(TaxonValue),
  Boolean(bool),
  Integer(NumberValue<i64>),
  Real(NumberValue<f64>),
  IntegerRange(RangeValue<i64>),
  RealRange(RangeValue<f64>),
}

impl Value {
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
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn value_json_is_tagged_by_kind() {
    let value = Value::RealRange(RangeValue {
      from: Some(12.5),
      to:   None,
      unit: Some("cm".into()),
    });
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(json["type"], "real_range");
    assert_eq!(json["data"]["from"], 12.5);
    assert!(json["data"]["to"].is_null());

    let back: Value = serde_json::from_value(json).unwrap();
    assert_eq!(back, value);
    assert_eq!(back.kind(), AttributeKind::RealRange);
  }

  #[test]
  fn partial_date_is_not_empty() {
    let year_only = DateValue {
      year: Some(1998),
      ..DateValue::default()
    };
    assert!(!year_only.is_empty());
    assert!(DateValue::default().is_empty());
  }
}
