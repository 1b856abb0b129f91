//! Attribute type bridge for Open Foris Collect.
//!
//! Converts survey attributes between their domain form ([`Attribute`]), the
//! editable view-model ([`UiAttribute`]) and the flat row they are persisted
//! as ([`NodeDto`]). Pure synchronous; no storage or UI dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use collect_convert::{to_dto, to_ui_attribute, validate};
//! use collect_core::{
//!   attribute::{Attribute, RecordRef},
//!   definition::{AttributeDefinition, DefinitionKind},
//!   value::Value,
//! };
//!
//! let definition = Arc::new(AttributeDefinition {
//!   id: 1,
//!   name: "remarks".into(),
//!   label: None,
//!   key: false,
//!   kind: DefinitionKind::Text,
//! });
//! let record = RecordRef { survey_id: 1, record_id: 7 };
//! let attribute = Attribute::new(10, 1, Some(Value::Text("steep".into())));
//!
//! let mut ui = to_ui_attribute(&definition, &attribute, record).unwrap();
//! let value = validate(&mut ui).unwrap();
//! let row = to_dto(&ui).unwrap();
//! println!("{value:?} -> {row:?}");
//! ```

pub mod converter;
pub mod converters;
pub mod registry;

use std::sync::Arc;

pub use collect_core::{Error, Result};
use collect_core::{
  attribute::{Attribute, RecordRef},
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiStatus},
  validation::{Conversion, FieldValidationError},
  value::Value,
};
pub use converter::Converter;

// ─── Public types
// ─────────────────────────────────────────────────────────────

/// The outcome of converting every attribute of a record on save.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordConversion {
  /// One entry per attribute, in input order: the attribute id and its
  /// best-effort value.
  pub values: Vec<(i32, Option<Value>)>,
  /// Every field error across the record.
  pub errors: Vec<FieldValidationError>,
}

impl RecordConversion {
  pub fn is_valid(&self) -> bool { self.errors.is_empty() }
}

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Build the view-model for a domain attribute of `record`.
pub fn to_ui_attribute(
  definition: &Arc<AttributeDefinition>,
  attribute: &Attribute,
  record: RecordRef,
) -> Result<UiAttribute> {
  registry::for_definition(definition)?.to_ui_attribute(
    definition,
    attribute,
    record,
  )
}

/// Rehydrate a view-model from a persisted row.
pub fn ui_attribute_from_dto(
  dto: &NodeDto,
  definition: &Arc<AttributeDefinition>,
) -> Result<UiAttribute> {
  registry::converter(dto.kind).ui_attribute_from_dto(dto, definition)
}

/// Flatten a view-model into a persisted row, including its status.
pub fn to_dto(attribute: &UiAttribute) -> Result<NodeDto> {
  let mut dto = registry::for_ui_value(attribute.value()).to_dto(attribute)?;
  dto.status = Some(attribute.status.name().to_owned());
  Ok(dto)
}

/// Parse a view-model's value without touching the attribute.
pub fn to_value(attribute: &UiAttribute) -> Result<Conversion<Value>> {
  registry::for_ui_value(attribute.value()).to_value(attribute)
}

/// Parse a view-model's value, attach the field errors to the attribute and
/// update its status. Returns the best-effort value.
pub fn validate(attribute: &mut UiAttribute) -> Result<Option<Value>> {
  let Conversion { value, errors } = to_value(attribute)?;
  for error in &errors {
    tracing::warn!(
      attribute = attribute.id,
      definition = %attribute.definition.name,
      field = error.field,
      "{}",
      error.issue
    );
  }
  attribute.status = if !errors.is_empty() {
    UiStatus::ValidationError
  } else if value.is_none() {
    UiStatus::Empty
  } else {
    UiStatus::Ok
  };
  attribute.validation_errors = errors;
  Ok(value)
}

/// Validate `attribute` and build the domain attribute it represents.
pub fn to_attribute(attribute: &mut UiAttribute) -> Result<Attribute> {
  let value = validate(attribute)?;
  Ok(Attribute {
    id: attribute.id,
    definition_id: attribute.definition.id,
    parent_id: attribute.parent_id,
    value,
  })
}

/// Validate every attribute of a record.
///
/// A field error on one attribute never affects its siblings. A schema
/// mismatch aborts the whole conversion.
pub fn convert_record(attributes: &mut [UiAttribute]) -> Result<RecordConversion> {
  let mut values = Vec::with_capacity(attributes.len());
  let mut errors = Vec::new();
  for attribute in attributes.iter_mut() {
    let value = validate(attribute)?;
    errors.extend(attribute.validation_errors.iter().cloned());
    values.push((attribute.id, value));
  }
  tracing::debug!(
    attributes = values.len(),
    errors = errors.len(),
    "converted record"
  );
  Ok(RecordConversion { values, errors })
}

// ─── Round-trip tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod roundtrip_tests {
  use collect_core::{
    AttributeKind,
    definition::{DefinitionKind, FileType},
    ui::{UiRange, UiValue},
    value::{
      CodeValue, CoordinateValue, DateValue, FileValue, NumberValue,
      RangeValue, TaxonValue, TimeValue,
    },
  };
  use strum::IntoEnumIterator;

  use super::{test_helpers::*, *};

  /// One valid value per kind, with the definition that declares it.
  fn samples() -> Vec<(Arc<AttributeDefinition>, Value)> {
    vec![
      (
        definition(1, DefinitionKind::Text),
        Value::Text("north-facing slope".into()),
      ),
      (
        definition(2, DefinitionKind::Date),
        Value::Date(DateValue {
          year:  Some(2019),
          month: Some(6),
          day:   None,
        }),
      ),
      (
        definition(3, DefinitionKind::Time),
        Value::Time(TimeValue::hm(7, 45)),
      ),
      (
        definition(4, DefinitionKind::Code {
          list:             "land_use".into(),
          allows_qualifier: true,
        }),
        Value::Code(CodeValue {
          code:      "99".into(),
          qualifier: Some("shifting cultivation".into()),
        }),
      ),
      (
        definition(5, DefinitionKind::Coordinate),
        Value::Coordinate(CoordinateValue {
          srs: "EPSG:32736".into(),
          x:   512_345.5,
          y:   9_123_456.25,
        }),
      ),
      (
        definition(6, DefinitionKind::File {
          file_type: FileType::Audio,
        }),
        Value::File(FileValue {
          filename:  "audio/bird-call-3.m4a".into(),
          size:      Some(88_000),
          file_type: FileType::Audio,
        }),
      ),
      (
        definition(7, DefinitionKind::Taxon { taxonomy: None }),
        Value::Taxon(TaxonValue {
          code:            "PIN/SYL".into(),
          scientific_name: None,
          vernacular_name: Some("Scots pine".into()),
        }),
      ),
      (definition(8, DefinitionKind::Boolean), Value::Boolean(false)),
      (
        definition(9, integer_number(&["trees"])),
        Value::Integer(NumberValue {
          value: 14,
          unit:  Some("trees".into()),
        }),
      ),
      (
        definition(10, real_number(&["m"])),
        Value::Real(NumberValue {
          value: 23.7,
          unit:  Some("m".into()),
        }),
      ),
      (
        definition(11, integer_range(&[])),
        Value::IntegerRange(RangeValue {
          from: Some(5),
          to:   Some(10),
          unit: None,
        }),
      ),
      (
        definition(12, real_range(&["cm"])),
        Value::RealRange(RangeValue {
          from: Some(12.5),
          to:   None,
          unit: Some("cm".into()),
        }),
      ),
    ]
  }

  #[test]
  fn samples_cover_every_kind() {
    let kinds: Vec<_> = samples().iter().map(|(_, v)| v.kind()).collect();
    assert_eq!(kinds, AttributeKind::iter().collect::<Vec<_>>());
  }

  #[test]
  fn domain_to_view_model_and_back() {
    for (def, value) in samples() {
      let attribute = domain(def.id, Some(value.clone()));
      let ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
      assert_eq!(ui.id, attribute.id);
      assert_eq!(ui.kind(), value.kind());
      assert_eq!(to_value(&ui).unwrap(), Conversion::valid(value));
    }
  }

  #[test]
  fn view_model_survives_persistence() {
    for (def, value) in samples() {
      let attribute = domain(def.id, Some(value.clone()));
      let mut ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
      validate(&mut ui).unwrap();

      let dto = to_dto(&ui).unwrap();
      assert_eq!(dto.kind, value.kind());
      assert_eq!(dto.status.as_deref(), Some("OK"));
      assert_eq!(dto.parent_id, Some(100));

      let rehydrated = ui_attribute_from_dto(&dto, &def).unwrap();
      assert_eq!(rehydrated.value(), ui.value(), "{}", value.kind());
      assert_eq!(rehydrated.status, UiStatus::Ok);
      assert_eq!(rehydrated.record, RECORD);
      assert_eq!(to_value(&rehydrated).unwrap().value, Some(value));
    }
  }

  #[test]
  fn unset_attributes_stay_unset() {
    for (def, _) in samples() {
      let attribute = domain(def.id, None);
      let mut ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
      assert!(ui.value().is_empty());
      assert_eq!(validate(&mut ui).unwrap(), None);
      assert_eq!(ui.status, UiStatus::Empty);

      let dto = to_dto(&ui).unwrap();
      let rehydrated = ui_attribute_from_dto(&dto, &def).unwrap();
      assert!(rehydrated.value().is_empty(), "{}", dto.kind);
    }
  }

  #[test]
  fn warning_status_from_another_client_survives_rehydration() {
    let (def, value) = samples().remove(0);
    let ui = to_ui_attribute(&def, &domain(def.id, Some(value)), RECORD).unwrap();
    let mut dto = to_dto(&ui).unwrap();
    dto.status = Some("VALIDATION_WARNING".into());

    let rehydrated = ui_attribute_from_dto(&dto, &def).unwrap();
    assert_eq!(rehydrated.status, UiStatus::ValidationWarning);
    assert_eq!(to_dto(&rehydrated).unwrap().status, dto.status);
  }

  #[test]
  fn root_attributes_have_no_parent_column() {
    let (def, value) = samples().remove(0);
    let mut attribute = domain(def.id, Some(value));
    attribute.parent_id = None;
    let ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
    assert_eq!(to_dto(&ui).unwrap().parent_id, None);
  }

  #[test]
  fn key_flag_comes_from_the_definition() {
    let def = Arc::new(AttributeDefinition {
      id:    1,
      name:  "plot_id".into(),
      label: None,
      key:   true,
      kind:  integer_number(&[]),
    });
    let attribute = domain(1, Some(Value::Integer(NumberValue {
      value: 7,
      unit:  None,
    })));
    let ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
    assert!(to_dto(&ui).unwrap().record_key_attribute);
  }

  #[test]
  fn domain_value_of_wrong_kind_is_a_schema_mismatch() {
    let def = definition(1, DefinitionKind::Text);
    let attribute = domain(1, Some(Value::Boolean(true)));
    let err = to_ui_attribute(&def, &attribute, RECORD).unwrap_err();
    assert!(err.is_schema_mismatch());
  }

  #[test]
  fn dto_of_wrong_kind_is_a_schema_mismatch() {
    let def = definition(1, DefinitionKind::Text);
    let attribute = domain(1, Some(Value::Text("x".into())));
    let ui = to_ui_attribute(&def, &attribute, RECORD).unwrap();
    let mut dto = to_dto(&ui).unwrap();
    dto.kind = AttributeKind::Boolean;
    let err = ui_attribute_from_dto(&dto, &def).unwrap_err();
    assert!(err.is_schema_mismatch());
  }

  #[test]
  fn one_bad_field_does_not_affect_siblings() {
    let date = definition(2, DefinitionKind::Date);
    let remarks = definition(1, DefinitionKind::Text);
    let height = definition(10, real_number(&["m"]));

    let mut attributes = vec![
      to_ui_attribute(
        &remarks,
        &domain(1, Some(Value::Text("ok".into()))),
        RECORD,
      )
      .unwrap(),
      to_ui_attribute(&date, &domain(2, None), RECORD).unwrap(),
      to_ui_attribute(
        &height,
        &domain(10, Some(Value::Real(NumberValue {
          value: 4.5,
          unit:  Some("m".into()),
        }))),
        RECORD,
      )
      .unwrap(),
    ];
    attributes[1]
      .set_value(UiValue::Date(DateValue::ymd(2024, 4, 31)))
      .unwrap();

    let result = convert_record(&mut attributes).unwrap();
    assert!(!result.is_valid());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].attribute_id, 2);
    assert_eq!(result.errors[0].field, "day");

    assert_eq!(result.values[0].1, Some(Value::Text("ok".into())));
    assert_eq!(
      result.values[2].1,
      Some(Value::Real(NumberValue {
        value: 4.5,
        unit:  Some("m".into()),
      }))
    );
    assert_eq!(attributes[0].status, UiStatus::Ok);
    assert_eq!(attributes[1].status, UiStatus::ValidationError);
    assert_eq!(attributes[1].validation_errors.len(), 1);
    assert_eq!(attributes[2].status, UiStatus::Ok);
  }

  #[test]
  fn to_attribute_copies_identity() {
    let def = definition(12, real_range(&["cm"]));
    let mut ui = to_ui_attribute(&def, &domain(12, None), RECORD).unwrap();
    ui.set_value(UiValue::RealRange(UiRange {
      from: Some("12.5".into()),
      to:   None,
      unit: Some("cm".into()),
    }))
    .unwrap();

    let attribute = to_attribute(&mut ui).unwrap();
    assert_eq!(attribute.id, 500);
    assert_eq!(attribute.definition_id, 12);
    assert_eq!(attribute.parent_id, Some(100));
    assert_eq!(
      attribute.value,
      Some(Value::RealRange(RangeValue {
        from: Some(12.5),
        to:   None,
        unit: Some("cm".into()),
      }))
    );
  }
}

// ─── Shared test helpers ──────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use std::sync::Arc;

  use collect_core::{
    attribute::{Attribute, RecordRef},
    definition::{
      AttributeDefinition, DefinitionKind, NumericDefinition, NumericType,
    },
    value::Value,
  };

  pub(crate) const RECORD: RecordRef = RecordRef {
    survey_id: 3,
    record_id: 77,
  };

  pub(crate) fn definition(
    id: i32,
    kind: DefinitionKind,
  ) -> Arc<AttributeDefinition> {
    Arc::new(AttributeDefinition {
      id,
      name: format!("attr_{id}"),
      label: None,
      key: false,
      kind,
    })
  }

  fn numeric(numeric_type: NumericType, units: &[&str]) -> NumericDefinition {
    NumericDefinition {
      numeric_type,
      units: units.iter().map(|u| u.to_string()).collect(),
    }
  }

  pub(crate) fn integer_number(units: &[&str]) -> DefinitionKind {
    DefinitionKind::Number(numeric(NumericType::Integer, units))
  }

  pub(crate) fn real_number(units: &[&str]) -> DefinitionKind {
    DefinitionKind::Number(numeric(NumericType::Real, units))
  }

  pub(crate) fn integer_range(units: &[&str]) -> DefinitionKind {
    DefinitionKind::Range(numeric(NumericType::Integer, units))
  }

  pub(crate) fn real_range(units: &[&str]) -> DefinitionKind {
    DefinitionKind::Range(numeric(NumericType::Real, units))
  }

  /// A domain attribute under entity 100. Attribute ids are the definition
  /// id plus 488 so the two are never confused in assertions.
  pub(crate) fn domain(definition_id: i32, value: Option<Value>) -> Attribute {
    Attribute {
      id: definition_id + 488,
      definition_id,
      parent_id: Some(100),
      value,
    }
  }
}
