//! The `import`, `show` and `validate` commands.
//!
//! Each command works on parsed documents and a [`NodeStore`] so it can be
//! driven from tests without touching the filesystem.

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context as _, bail};
use collect_convert::RecordConversion;
use collect_core::{
  attribute::{Record, RecordRef},
  definition::{AttributeDefinition, Survey},
  store::NodeStore,
  ui::UiAttribute,
};

/// Definitions of a survey, shared by every view-model built from them.
pub struct Schema {
  survey:      Survey,
  definitions: HashMap<i32, Arc<AttributeDefinition>>,
}

impl Schema {
  pub fn new(survey: Survey) -> Self {
    let definitions = survey
      .definitions
      .iter()
      .map(|d| (d.id, Arc::new(d.clone())))
      .collect();
    Self {
      survey,
      definitions,
    }
  }

  pub fn survey_id(&self) -> i32 { self.survey.id }

  fn definition(&self, id: i32) -> collect_core::Result<&Arc<AttributeDefinition>> {
    self
      .definitions
      .get(&id)
      .ok_or(collect_core::Error::DefinitionNotFound(id))
  }

  /// Build the view-models for every attribute of `record`.
  fn ui_attributes(&self, record: &Record) -> anyhow::Result<Vec<UiAttribute>> {
    if record.survey_id != self.survey.id {
      bail!(
        "record {} belongs to survey {}, not {}",
        record.id,
        record.survey_id,
        self.survey.id
      );
    }
    let reference = record.reference();
    record
      .attributes
      .iter()
      .map(|attribute| {
        let definition = self.definition(attribute.definition_id)?;
        collect_convert::to_ui_attribute(definition, attribute, reference)
          .with_context(|| format!("attribute {}", attribute.id))
      })
      .collect()
  }
}

/// Validate a record without storing it.
pub fn validate(schema: &Schema, record: &Record) -> anyhow::Result<RecordConversion> {
  let mut attributes = schema.ui_attributes(record)?;
  Ok(collect_convert::convert_record(&mut attributes)?)
}

/// Validate a record and store one row per attribute, replacing whatever the
/// record held before. Invalid fields are stored as entered with an error
/// status so they can be corrected later.
pub async fn import<S: NodeStore>(
  store: &S,
  schema: &Schema,
  record: &Record,
) -> anyhow::Result<RecordConversion> {
  let mut attributes = schema.ui_attributes(record)?;
  let conversion = collect_convert::convert_record(&mut attributes)?;
  let rows = attributes
    .iter()
    .map(collect_convert::to_dto)
    .collect::<Result<Vec<_>, _>>()?;

  let reference = record.reference();
  store
    .replace_record(reference.survey_id, reference.record_id, rows)
    .await
    .context("failed to store attribute rows")?;

  tracing::info!(
    record = record.id,
    attributes = attributes.len(),
    errors = conversion.errors.len(),
    "imported record"
  );
  Ok(conversion)
}

/// One line of `show` output.
#[derive(Debug, Clone, PartialEq)]
pub struct ShownAttribute {
  pub id:     i32,
  pub name:   String,
  pub status: String,
  /// The domain value as JSON, or `null` when unset.
  pub value:  String,
}

/// Rehydrate a stored record.
pub async fn show<S: NodeStore>(
  store: &S,
  schema: &Schema,
  record: RecordRef,
) -> anyhow::Result<Vec<ShownAttribute>> {
  let rows = store
    .load_record(record.survey_id, record.record_id)
    .await
    .context("failed to load record")?;
  if rows.is_empty() {
    bail!("record {} not found in survey {}", record.record_id, record.survey_id);
  }

  rows
    .iter()
    .map(|row| {
      let definition = schema.definition(row.definition_id)?;
      let attribute = collect_convert::ui_attribute_from_dto(row, definition)?;
      let value = collect_convert::to_value(&attribute)?.value;
      Ok(ShownAttribute {
        id:     attribute.id,
        name:   definition.display_name().to_string(),
        status: attribute.status.to_string(),
        value:  serde_json::to_string(&value)?,
      })
    })
    .collect()
}

/// True when `err` comes from the survey and the data disagreeing about
/// attribute kinds, rather than from a bad document or the store.
pub fn is_schema_mismatch(err: &anyhow::Error) -> bool {
  err.chain().any(|cause| {
    cause
      .downcast_ref::<collect_core::Error>()
      .is_some_and(collect_core::Error::is_schema_mismatch)
  })
}
