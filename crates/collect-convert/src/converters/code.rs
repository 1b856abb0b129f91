use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::{AttributeDefinition, DefinitionKind},
  dto::NodeDto,
  ui::{UiAttribute, UiCode, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{CodeValue, Value},
};

use super::{entered, entered_trimmed, owned, owned_trimmed};
use crate::converter::{Converter, mismatch};

/// A code list item, with the "specify other" qualifier when the list allows
/// one.
pub struct CodeConverter;

fn allows_qualifier(definition: &AttributeDefinition) -> bool {
  matches!(
    definition.kind,
    DefinitionKind::Code {
      allows_qualifier: true,
      ..
    }
  )
}

impl Converter for CodeConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Code }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Code(UiCode::default())),
      Some(Value::Code(c)) => Ok(UiValue::Code(UiCode {
        code:      Some(c.code.clone()),
        qualifier: c.qualifier.clone(),
      })),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Code(UiCode {
      code:      owned(&dto.code),
      qualifier: owned(&dto.qualifier),
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Code(code) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.code = owned_trimmed(&code.code);
    dto.qualifier = owned(&code.qualifier);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Code(ui_code) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    let mut errors = FieldErrors::new(attribute.id);
    let qualifier = entered(&ui_code.qualifier);

    let Some(code) = entered_trimmed(&ui_code.code) else {
      if qualifier.is_some() {
        errors.push("code", ValidationIssue::Incomplete {
          missing: "code",
          present: "qualifier",
        });
      }
      return Ok(errors.finish(None));
    };

    let qualifier = qualifier.and_then(|q| {
      errors.check(
        "qualifier",
        if allows_qualifier(&attribute.definition) {
          Ok(q.to_owned())
        } else {
          Err(ValidationIssue::QualifierNotAllowed)
        },
      )
    });

    Ok(errors.finish(Some(Value::Code(CodeValue {
      code: code.to_owned(),
      qualifier,
    }))))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::converters::test_helpers::{attribute, code, text, ui};

  #[test]
  fn code_with_qualifier_round_trips() {
    let def = code(true);
    let value = Value::Code(CodeValue {
      code:      "999".into(),
      qualifier: Some("Unlisted palm".into()),
    });
    let ui_value = CodeConverter
      .ui_value(&def, &attribute(Some(value.clone())))
      .unwrap();
    let attr = ui(&def, ui_value);
    assert_eq!(CodeConverter.to_value(&attr).unwrap(), Conversion::valid(value));

    let dto = CodeConverter.to_dto(&attr).unwrap();
    assert_eq!(dto.code.as_deref(), Some("999"));
    assert_eq!(dto.qualifier.as_deref(), Some("Unlisted palm"));
  }

  #[test]
  fn qualifier_rejected_when_list_disallows_it() {
    let def = code(false);
    let attr = ui(
      &def,
      UiValue::Code(UiCode {
        code:      text("12"),
        qualifier: text("other"),
      }),
    );
    let result = CodeConverter.to_value(&attr).unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].issue, ValidationIssue::QualifierNotAllowed);
    assert_eq!(
      result.value,
      Some(Value::Code(CodeValue {
        code:      "12".into(),
        qualifier: None,
      }))
    );
  }

  #[test]
  fn qualifier_without_code_is_incomplete() {
    let def = code(true);
    let attr = ui(
      &def,
      UiValue::Code(UiCode {
        code:      None,
        qualifier: text("other"),
      }),
    );
    let result = CodeConverter.to_value(&attr).unwrap();
    assert_eq!(result.value, None);
    assert_eq!(result.errors[0].field, "code");
  }

  #[test]
  fn row_and_value_agree_on_padded_code() {
    let def = code(false);
    let attr = ui(
      &def,
      UiValue::Code(UiCode {
        code:      text(" 12 "),
        qualifier: None,
      }),
    );
    let dto = CodeConverter.to_dto(&attr).unwrap();
    assert_eq!(dto.code.as_deref(), Some("12"));
    assert_eq!(
      CodeConverter.to_value(&attr).unwrap().value,
      Some(Value::Code(CodeValue {
        code:      "12".into(),
        qualifier: None,
      }))
    );
  }
}
