//! The `Converter` trait implemented once per attribute kind.

use std::sync::Arc;

use collect_core::{
  AttributeKind, Error, Result,
  attribute::{Attribute, RecordRef},
  definition::AttributeDefinition,
  dto::{NodeDto, NodeKey},
  ui::{UiAttribute, UiValue},
  validation::Conversion,
  value::Value,
};

/// Conversion between the domain, view-model and persisted forms of one
/// attribute kind.
///
/// Implementors are zero-sized and stateless; every method is a pure
/// function of its arguments. Implementors provide the kind-specific halves,
/// and the provided methods handle identity, parent and record columns.
pub trait Converter: Send + Sync {
  fn kind(&self) -> AttributeKind;

  /// Editable representation of a domain attribute's value.
  fn ui_value(
    &self,
    definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue>;

  /// Editable representation of a persisted row's value columns.
  fn dto_ui_value(
    &self,
    dto: &NodeDto,
    definition: &AttributeDefinition,
  ) -> UiValue;

  /// Write the kind's value columns of `dto`.
  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()>;

  /// Parse the edited value back into a domain value.
  ///
  /// Bad input is reported in the returned [`Conversion`]; `Err` is reserved
  /// for values whose kind disagrees with the converter.
  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>>;

  // ── Provided ──────────────────────────────────────────────────────────

  /// Build the view-model for a domain attribute.
  fn to_ui_attribute(
    &self,
    definition: &Arc<AttributeDefinition>,
    attribute: &Attribute,
    record: RecordRef,
  ) -> Result<UiAttribute> {
    let value = self.ui_value(definition, attribute)?;
    UiAttribute::new(
      attribute.id,
      Arc::clone(definition),
      record,
      attribute.parent_id,
      value,
    )
  }

  /// Rehydrate the view-model from a persisted row.
  fn ui_attribute_from_dto(
    &self,
    dto: &NodeDto,
    definition: &Arc<AttributeDefinition>,
  ) -> Result<UiAttribute> {
    if dto.kind != self.kind() {
      return Err(mismatch(dto.id, self.kind(), dto.kind));
    }
    let value = self.dto_ui_value(dto, definition);
    let record = RecordRef {
      survey_id: dto.survey_id,
      record_id: dto.record_id,
    };
    let mut attribute = UiAttribute::new(
      dto.id,
      Arc::clone(definition),
      record,
      dto.parent_id,
      value,
    )?;
    if let Some(status) = dto.status.as_deref().and_then(|s| s.parse().ok()) {
      attribute.status = status;
    }
    Ok(attribute)
  }

  /// Flatten the view-model into a persisted row. The status column is left
  /// empty.
  fn to_dto(&self, attribute: &UiAttribute) -> Result<NodeDto> {
    let key = NodeKey {
      survey_id: attribute.record.survey_id,
      record_id: attribute.record.record_id,
      id:        attribute.id,
    };
    let mut dto = NodeDto::new(
      key,
      attribute.definition.id,
      attribute.parent_id,
      self.kind(),
      attribute.is_record_key(),
    );
    self.write_dto(attribute, &mut dto)?;
    Ok(dto)
  }
}

/// The error returned when a converter is handed a value of another kind.
pub(crate) fn mismatch(
  attribute_id: i32,
  expected: AttributeKind,
  found: AttributeKind,
) -> Error {
  Error::KindMismatch {
    attribute_id,
    expected,
    found,
  }
}
