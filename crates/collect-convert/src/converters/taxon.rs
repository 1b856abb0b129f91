use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiTaxon, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{TaxonValue, Value},
};

use super::{entered_trimmed, owned, owned_trimmed};
use crate::converter::{Converter, mismatch};

pub struct TaxonConverter;

impl Converter for TaxonConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Taxon }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Taxon(UiTaxon::default())),
      Some(Value::Taxon(t)) => Ok(UiValue::Taxon(UiTaxon {
        code:            Some(t.code.clone()),
        scientific_name: t.scientific_name.clone(),
        vernacular_name: t.vernacular_name.clone(),
      })),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Taxon(UiTaxon {
      code:            owned(&dto.taxon_code),
      scientific_name: owned(&dto.scientific_name),
      vernacular_name: owned(&dto.vernacular_name),
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Taxon(taxon) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.taxon_code = owned_trimmed(&taxon.code);
    dto.scientific_name = owned(&taxon.scientific_name);
    dto.vernacular_name = owned(&taxon.vernacular_name);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Taxon(taxon) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    let scientific_name = owned(&taxon.scientific_name);
    let vernacular_name = owned(&taxon.vernacular_name);

    let Some(code) = entered_trimmed(&taxon.code) else {
      let mut errors = FieldErrors::new(attribute.id);
      let present = if scientific_name.is_some() {
        Some("scientific_name")
      } else if vernacular_name.is_some() {
        Some("vernacular_name")
      } else {
        None
      };
      if let Some(present) = present {
        errors.push("code", ValidationIssue::Incomplete {
          missing: "code",
          present,
        });
      }
      return Ok(errors.finish(None));
    };

    Ok(Conversion::valid(Value::Taxon(TaxonValue {
      code: code.to_owned(),
      scientific_name,
      vernacular_name,
    })))
  }
}
