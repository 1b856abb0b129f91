//! One converter per attribute kind, plus the parsing helpers they share.

mod boolean;
mod code;
mod coordinate;
mod file;
mod numeric;
mod taxon;
mod temporal;
mod text;

pub use boolean::BooleanConverter;
pub use code::CodeConverter;
pub use coordinate::CoordinateConverter;
pub use file::FileConverter;
pub use numeric::{NumberConverter, Numeric, RangeConverter};
pub use taxon::TaxonConverter;
pub use temporal::{DateConverter, TimeConverter};
pub use text::TextConverter;

use collect_core::{
  definition::AttributeDefinition,
  validation::{FieldErrors, ValidationIssue},
};

/// Input fields treat an empty string the same as no input.
fn entered(s: &Option<String>) -> Option<&str> {
  s.as_deref().filter(|s| !s.is_empty())
}

/// Like [`entered`], but ignoring surrounding whitespace; for fields that are
/// parsed rather than kept verbatim.
fn entered_trimmed(s: &Option<String>) -> Option<&str> {
  s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn owned(s: &Option<String>) -> Option<String> { entered(s).map(str::to_owned) }

/// Owned form of [`entered_trimmed`]. Rows and domain values built from the
/// same field must agree, so both sides go through this.
fn owned_trimmed(s: &Option<String>) -> Option<String> {
  entered_trimmed(s).map(str::to_owned)
}

fn in_range<T>(value: T, min: i64, max: i64) -> Result<T, ValidationIssue>
where
  T: Into<i64> + Copy,
{
  let wide: i64 = value.into();
  if (min..=max).contains(&wide) {
    Ok(value)
  } else {
    Err(ValidationIssue::OutOfRange {
      value: wide,
      min,
      max,
    })
  }
}

/// Keep `unit` only if the definition declares it.
fn checked_unit(
  errors: &mut FieldErrors,
  definition: &AttributeDefinition,
  unit: &Option<String>,
) -> Option<String> {
  let unit = entered_trimmed(unit)?;
  let declared = definition
    .kind
    .numeric()
    .is_some_and(|n| n.declares_unit(unit));
  errors.check(
    "unit",
    if declared {
      Ok(unit.to_owned())
    } else {
      Err(ValidationIssue::UndeclaredUnit(unit.to_owned()))
    },
  )
}

#[cfg(test)]
pub(crate) mod test_helpers {
  use std::sync::Arc;

  use collect_core::{
    attribute::{Attribute, RecordRef},
    definition::{
      AttributeDefinition, DefinitionKind, FileType, NumericDefinition,
      NumericType,
    },
    ui::{UiAttribute, UiValue},
    value::Value,
  };

  pub(crate) const RECORD: RecordRef = RecordRef {
    survey_id: 1,
    record_id: 42,
  };

  pub(crate) fn definition(kind: DefinitionKind) -> Arc<AttributeDefinition> {
    Arc::new(AttributeDefinition {
      id: 5,
      name: "field".into(),
      label: None,
      key: false,
      kind,
    })
  }

  pub(crate) fn numeric(
    numeric_type: NumericType,
    units: &[&str],
  ) -> NumericDefinition {
    NumericDefinition {
      numeric_type,
      units: units.iter().map(|u| u.to_string()).collect(),
    }
  }

  pub(crate) fn code(allows_qualifier: bool) -> Arc<AttributeDefinition> {
    definition(DefinitionKind::Code {
      list: "species".into(),
      allows_qualifier,
    })
  }

  pub(crate) fn image() -> Arc<AttributeDefinition> {
    definition(DefinitionKind::File {
      file_type: FileType::Image,
    })
  }

  pub(crate) fn attribute(value: Option<Value>) -> Attribute {
    Attribute {
      id: 11,
      definition_id: 5,
      parent_id: Some(3),
      value,
    }
  }

  pub(crate) fn ui(
    definition: &Arc<AttributeDefinition>,
    value: UiValue,
  ) -> UiAttribute {
    UiAttribute::new(11, Arc::clone(definition), RECORD, Some(3), value)
      .expect("value kind matches definition")
  }

  pub(crate) fn text(s: &str) -> Option<String> { Some(s.to_string()) }
}
