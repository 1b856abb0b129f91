use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiValue},
  validation::Conversion,
  value::Value,
};

use crate::converter::{Converter, mismatch};

/// Tri-state: true, false, or not answered. Never defaulted.
pub struct BooleanConverter;

impl Converter for BooleanConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Boolean }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Boolean(None)),
      Some(Value::Boolean(b)) => Ok(UiValue::Boolean(Some(*b))),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Boolean(dto.boolean)
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Boolean(b) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.boolean = *b;
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Boolean(b) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    Ok(match b {
      Some(b) => Conversion::valid(Value::Boolean(*b)),
      None => Conversion::unset(),
    })
  }
}

#[cfg(test)]
mod tests {
  use collect_core::definition::DefinitionKind;

  use super::*;
  use crate::converters::test_helpers::{attribute, definition, ui};

  #[test]
  fn false_is_a_value_and_none_is_not() {
    let def = definition(DefinitionKind::Boolean);

    let no = ui(&def, UiValue::Boolean(Some(false)));
    assert_eq!(
      BooleanConverter.to_value(&no).unwrap(),
      Conversion::valid(Value::Boolean(false))
    );
    assert_eq!(BooleanConverter.to_dto(&no).unwrap().boolean, Some(false));

    let unanswered = BooleanConverter.ui_value(&def, &attribute(None)).unwrap();
    let unanswered = ui(&def, unanswered);
    assert!(BooleanConverter.to_value(&unanswered).unwrap().is_unset());
    assert_eq!(BooleanConverter.to_dto(&unanswered).unwrap().boolean, None);
  }
}
