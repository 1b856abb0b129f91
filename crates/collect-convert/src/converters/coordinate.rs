//! Coordinate converter.
//!
//! A coordinate is all-or-nothing: the SRS and both ordinates are written to
//! storage together or not at all.

use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiCoordinate, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{CoordinateValue, Value},
};

use super::{entered_trimmed, owned};
use crate::converter::{Converter, mismatch};

pub struct CoordinateConverter;

fn parse_ordinate(input: &str) -> Result<f64, ValidationIssue> {
  input
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite())
    .ok_or_else(|| ValidationIssue::Malformed {
      input:    input.to_owned(),
      expected: "ordinate",
    })
}

/// The complete coordinate, if every field is present and parses.
fn complete(ui: &UiCoordinate) -> Option<CoordinateValue> {
  Some(CoordinateValue {
    srs: entered_trimmed(&ui.srs)?.to_owned(),
    x:   parse_ordinate(entered_trimmed(&ui.x)?).ok()?,
    y:   parse_ordinate(entered_trimmed(&ui.y)?).ok()?,
  })
}

impl Converter for CoordinateConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Coordinate }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Coordinate(UiCoordinate::default())),
      Some(Value::Coordinate(c)) => Ok(UiValue::Coordinate(UiCoordinate {
        srs: Some(c.srs.clone()),
        x:   Some(c.x.to_string()),
        y:   Some(c.y.to_string()),
      })),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Coordinate(UiCoordinate {
      srs: owned(&dto.srs),
      x:   dto.x.map(|x| x.to_string()),
      y:   dto.y.map(|y| y.to_string()),
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Coordinate(ui) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    let coordinate = complete(ui);
    dto.srs = coordinate.as_ref().map(|c| c.srs.clone());
    dto.x = coordinate.as_ref().map(|c| c.x);
    dto.y = coordinate.as_ref().map(|c| c.y);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Coordinate(ui) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    let fields = [
      ("srs", entered_trimmed(&ui.srs)),
      ("x", entered_trimmed(&ui.x)),
      ("y", entered_trimmed(&ui.y)),
    ];
    let Some(&(present, _)) = fields.iter().find(|(_, v)| v.is_some()) else {
      return Ok(Conversion::unset());
    };

    let mut errors = FieldErrors::new(attribute.id);
    for &(name, value) in &fields {
      if value.is_none() {
        errors.push(name, ValidationIssue::Incomplete {
          missing: name,
          present,
        });
      }
    }
    if let Some(x) = fields[1].1 {
      errors.check("x", parse_ordinate(x));
    }
    if let Some(y) = fields[2].1 {
      errors.check("y", parse_ordinate(y));
    }

    let value = errors
      .is_empty()
      .then(|| complete(ui))
      .flatten()
      .map(Value::Coordinate);
    Ok(errors.finish(value))
  }
}
