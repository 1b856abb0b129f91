//! Conversion between [`NodeDto`] and the column values stored in SQLite.
//!
//! Kinds are stored as their tags. Booleans are stored as 0/1 integers and
//! file sizes as signed integers, the only widths SQLite has.

use collect_core::{AttributeKind, dto::NodeDto};
use rusqlite::{Row, ToSql};

use crate::{Error, Result};

/// One `attribute_nodes` row, column for column.
pub struct RawNode {
  pub survey_id:            i32,
  pub record_id:            i32,
  pub id:                   i32,
  pub definition_id:        i32,
  pub parent_id:            Option<i32>,
  pub kind:                 String,
  pub record_key_attribute: bool,
  pub status:               Option<String>,
  pub text:                 Option<String>,
  pub year:                 Option<i32>,
  pub month:                Option<u32>,
  pub day:                  Option<u32>,
  pub hour:                 Option<u32>,
  pub minute:               Option<u32>,
  pub code:                 Option<String>,
  pub qualifier:            Option<String>,
  pub srs:                  Option<String>,
  pub x:                    Option<f64>,
  pub y:                    Option<f64>,
  pub file_name:            Option<String>,
  pub file_size:            Option<i64>,
  pub taxon_code:           Option<String>,
  pub scientific_name:      Option<String>,
  pub vernacular_name:      Option<String>,
  pub boolean:              Option<bool>,
  pub int_value:            Option<i64>,
  pub real_value:           Option<f64>,
  pub int_from:             Option<i64>,
  pub int_to:               Option<i64>,
  pub real_from:            Option<f64>,
  pub real_to:              Option<f64>,
  pub unit:                 Option<String>,
}

impl RawNode {
  /// Read a row selected with [`crate::schema::COLUMNS`].
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      survey_id:            row.get(0)?,
      record_id:            row.get(1)?,
      id:                   row.get(2)?,
      definition_id:        row.get(3)?,
      parent_id:            row.get(4)?,
      kind:                 row.get(5)?,
      record_key_attribute: row.get(6)?,
      status:               row.get(7)?,
      text:                 row.get(8)?,
      year:                 row.get(9)?,
      month:                row.get(10)?,
      day:                  row.get(11)?,
      hour:                 row.get(12)?,
      minute:               row.get(13)?,
      code:                 row.get(14)?,
      qualifier:            row.get(15)?,
      srs:                  row.get(16)?,
      x:                    row.get(17)?,
      y:                    row.get(18)?,
      file_name:            row.get(19)?,
      file_size:            row.get(20)?,
      taxon_code:           row.get(21)?,
      scientific_name:      row.get(22)?,
      vernacular_name:      row.get(23)?,
      boolean:              row.get(24)?,
      int_value:            row.get(25)?,
      real_value:           row.get(26)?,
      int_from:             row.get(27)?,
      int_to:               row.get(28)?,
      real_from:            row.get(29)?,
      real_to:              row.get(30)?,
      unit:                 row.get(31)?,
    })
  }

  /// Parameters in [`crate::schema::COLUMNS`] order.
  pub fn params(&self) -> [&dyn ToSql; 32] {
    [
      &self.survey_id,
      &self.record_id,
      &self.id,
      &self.definition_id,
      &self.parent_id,
      &self.kind,
      &self.record_key_attribute,
      &self.status,
      &self.text,
      &self.year,
      &self.month,
      &self.day,
      &self.hour,
      &self.minute,
      &self.code,
      &self.qualifier,
      &self.srs,
      &self.x,
      &self.y,
      &self.file_name,
      &self.file_size,
      &self.taxon_code,
      &self.scientific_name,
      &self.vernacular_name,
      &self.boolean,
      &self.int_value,
      &self.real_value,
      &self.int_from,
      &self.int_to,
      &self.real_from,
      &self.real_to,
      &self.unit,
    ]
  }

  pub fn from_dto(dto: NodeDto) -> Result<Self> {
    let file_size = dto
      .file_size
      .map(i64::try_from)
      .transpose()
      .map_err(|e| Error::Column {
        column: "file_size",
        reason: e.to_string(),
      })?;

    Ok(Self {
      survey_id: dto.survey_id,
      record_id: dto.record_id,
      id: dto.id,
      definition_id: dto.definition_id,
      parent_id: dto.parent_id,
      kind: dto.kind.tag().to_owned(),
      record_key_attribute: dto.record_key_attribute,
      status: dto.status,
      text: dto.text,
      year: dto.year,
      month: dto.month,
      day: dto.day,
      hour: dto.hour,
      minute: dto.minute,
      code: dto.code,
      qualifier: dto.qualifier,
      srs: dto.srs,
      x: dto.x,
      y: dto.y,
      file_name: dto.file_name,
      file_size,
      taxon_code: dto.taxon_code,
      scientific_name: dto.scientific_name,
      vernacular_name: dto.vernacular_name,
      boolean: dto.boolean,
      int_value: dto.int_value,
      real_value: dto.real_value,
      int_from: dto.int_from,
      int_to: dto.int_to,
      real_from: dto.real_from,
      real_to: dto.real_to,
      unit: dto.unit,
    })
  }

  /// Decode into a [`NodeDto`]. An unknown kind tag is a schema mismatch.
  pub fn into_dto(self) -> Result<NodeDto> {
    let kind = AttributeKind::from_tag(&self.kind)?;
    let file_size = self
      .file_size
      .map(u64::try_from)
      .transpose()
      .map_err(|e| Error::Column {
        column: "file_size",
        reason: e.to_string(),
      })?;

    Ok(NodeDto {
      id: self.id,
      definition_id: self.definition_id,
      parent_id: self.parent_id,
      survey_id: self.survey_id,
      record_id: self.record_id,
      kind,
      record_key_attribute: self.record_key_attribute,
      status: self.status,
      text: self.text,
      year: self.year,
      month: self.month,
      day: self.day,
      hour: self.hour,
      minute: self.minute,
      code: self.code,
      qualifier: self.qualifier,
      srs: self.srs,
      x: self.x,
      y: self.y,
      file_name: self.file_name,
      file_size,
      taxon_code: self.taxon_code,
      scientific_name: self.scientific_name,
      vernacular_name: self.vernacular_name,
      boolean: self.boolean,
      int_value: self.int_value,
      real_value: self.real_value,
      int_from: self.int_from,
      int_to: self.int_to,
      real_from: self.real_from,
      real_to: self.real_to,
      unit: self.unit,
    })
  }
}
