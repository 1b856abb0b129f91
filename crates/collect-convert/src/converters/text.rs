use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiValue},
  validation::Conversion,
  value::Value,
};

use super::{entered, owned};
use crate::converter::{Converter, mismatch};

/// Free text. Kept verbatim; an empty string is the same as no value.
pub struct TextConverter;

impl Converter for TextConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Text }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Text(None)),
      Some(Value::Text(s)) => {
        Ok(UiValue::Text(Some(s.clone()).filter(|s| !s.is_empty())))
      }
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Text(owned(&dto.text))
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Text(text) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.text = owned(text);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Text(text) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    Ok(match entered(text) {
      Some(s) => Conversion::valid(Value::Text(s.to_owned())),
      None => Conversion::unset(),
    })
  }
}

#[cfg(test)]
mod tests {
  use collect_core::definition::DefinitionKind;

  use super::*;
  use crate::converters::test_helpers::{attribute, definition, text, ui};

  #[test]
  fn text_is_kept_verbatim() {
    let def = definition(DefinitionKind::Text);
    let attr = ui(&def, UiValue::Text(text("  plot near river ")));
    let value = TextConverter.to_value(&attr).unwrap();
    assert_eq!(value.value, Some(Value::Text("  plot near river ".into())));
  }

  #[test]
  fn empty_string_is_unset_both_ways() {
    let def = definition(DefinitionKind::Text);
    let from_domain = TextConverter
      .ui_value(&def, &attribute(Some(Value::Text(String::new()))))
      .unwrap();
    assert_eq!(from_domain, UiValue::Text(None));

    let attr = ui(&def, UiValue::Text(text("")));
    assert!(TextConverter.to_value(&attr).unwrap().is_unset());
    assert_eq!(TextConverter.to_dto(&attr).unwrap().text, None);
  }
}
