//! Date and time converters.
//!
//! Both kinds come from picker widgets, so the view-model holds components
//! rather than text. Components are validated individually and the value
//! keeps every component that passed; a missing component is never filled
//! in.

use chrono::NaiveDate;
use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{DateValue, TimeValue, Value},
};

use super::in_range;
use crate::converter::{Converter, mismatch};

/// Used to check day-of-month when the year is unknown; 29 February must
/// remain acceptable.
const LEAP_YEAR: i32 = 2000;

// ─── Date ────────────────────────────────────────────────────────────────────

pub struct DateConverter;

impl DateConverter {
  fn validate(attribute_id: i32, date: &DateValue) -> Conversion<DateValue> {
    if date.is_empty() {
      return Conversion::unset();
    }
    let mut errors = FieldErrors::new(attribute_id);
    let year = date
      .year
      .and_then(|y| errors.check("year", in_range(y, 1, 9999)));
    let month = date
      .month
      .and_then(|m| errors.check("month", in_range(m, 1, 12)));
    let mut day = date
      .day
      .and_then(|d| errors.check("day", in_range(d, 1, 31)));

    if let (Some(m), Some(d)) = (month, day)
      && NaiveDate::from_ymd_opt(year.unwrap_or(LEAP_YEAR), m, d).is_none()
    {
      errors.push("day", ValidationIssue::NoSuchDate);
      day = None;
    }

    let checked = DateValue { year, month, day };
    errors.finish((!checked.is_empty()).then_some(checked))
  }
}

impl Converter for DateConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Date }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Date(DateValue::default())),
      Some(Value::Date(d)) => Ok(UiValue::Date(*d)),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Date(DateValue {
      year:  dto.year,
      month: dto.month,
      day:   dto.day,
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Date(date) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    // Stored as entered; validation happens on the way to the domain.
    dto.year = date.year;
    dto.month = date.month;
    dto.day = date.day;
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Date(date) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    Ok(Self::validate(attribute.id, date).map(Value::Date))
  }
}

// ─── Time ────────────────────────────────────────────────────────────────────

pub struct TimeConverter;

impl Converter for TimeConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::Time }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::Time(TimeValue::default())),
      Some(Value::Time(t)) => Ok(UiValue::Time(*t)),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::Time(TimeValue {
      hour:   dto.hour,
      minute: dto.minute,
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::Time(time) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.hour = time.hour;
    dto.minute = time.minute;
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::Time(time) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    if time.is_empty() {
      return Ok(Conversion::unset());
    }
    let mut errors = FieldErrors::new(attribute.id);
    let hour = time
      .hour
      .and_then(|h| errors.check("hour", in_range(h, 0, 23)));
    let minute = time
      .minute
      .and_then(|m| errors.check("minute", in_range(m, 0, 59)));
    let checked = TimeValue { hour, minute };
    Ok(errors.finish((!checked.is_empty()).then_some(Value::Time(checked))))
  }
}
