//! Integer, real and range converters.
//!
//! Integer and real attributes differ only in how their text is parsed and in
//! which value variant and row columns they use, so one generic converter
//! covers both; [`Numeric`] supplies the per-type pieces. Ranges follow the
//! same split.

use std::{fmt::Display, marker::PhantomData, str::FromStr};

use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::AttributeDefinition,
  dto::NodeDto,
  ui::{UiAttribute, UiNumber, UiRange, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{NumberValue, RangeValue, Value},
};

use super::{checked_unit, entered_trimmed, owned};
use crate::converter::{Converter, mismatch};

// ─── Numeric ─────────────────────────────────────────────────────────────────

/// The per-type half of the number and range converters.
pub trait Numeric:
  Copy + PartialOrd + FromStr + Display + Send + Sync + 'static
{
  /// Used in validation messages.
  const NAME: &'static str;
  const KIND: AttributeKind;
  const RANGE_KIND: AttributeKind;

  fn is_acceptable(self) -> bool { true }

  fn number(value: &Value) -> Option<&NumberValue<Self>>;
  fn range(value: &Value) -> Option<&RangeValue<Self>>;
  fn wrap_number(value: NumberValue<Self>) -> Value;
  fn wrap_range(value: RangeValue<Self>) -> Value;

  fn ui_number(value: &UiValue) -> Option<&UiNumber>;
  fn ui_range(value: &UiValue) -> Option<&UiRange>;
  fn wrap_ui_number(value: UiNumber) -> UiValue;
  fn wrap_ui_range(value: UiRange) -> UiValue;

  fn dto_number(dto: &NodeDto) -> Option<Self>;
  fn set_dto_number(dto: &mut NodeDto, value: Option<Self>);
  fn dto_range(dto: &NodeDto) -> (Option<Self>, Option<Self>);
  fn set_dto_range(dto: &mut NodeDto, from: Option<Self>, to: Option<Self>);

  fn parse(input: &str) -> Result<Self, ValidationIssue> {
    input
      .parse::<Self>()
      .ok()
      .filter(|v| v.is_acceptable())
      .ok_or_else(|| ValidationIssue::Malformed {
        input:    input.to_owned(),
        expected: Self::NAME,
      })
  }
}

impl Numeric for i64 {
  const KIND: AttributeKind = AttributeKind::Integer;
  const NAME: &'static str = "integer";
  const RANGE_KIND: AttributeKind = AttributeKind::IntegerRange;

  fn number(value: &Value) -> Option<&NumberValue<Self>> {
    match value {
      Value::Integer(n) => Some(n),
      _ => None,
    }
  }

  fn range(value: &Value) -> Option<&RangeValue<Self>> {
    match value {
      Value::IntegerRange(r) => Some(r),
      _ => None,
    }
  }

  fn wrap_number(value: NumberValue<Self>) -> Value { Value::Integer(value) }

  fn wrap_range(value: RangeValue<Self>) -> Value { Value::IntegerRange(value) }

  fn ui_number(value: &UiValue) -> Option<&UiNumber> {
    match value {
      UiValue::Integer(n) => Some(n),
      _ => None,
    }
  }

  fn ui_range(value: &UiValue) -> Option<&UiRange> {
    match value {
      UiValue::IntegerRange(r) => Some(r),
      _ => None,
    }
  }

  fn wrap_ui_number(value: UiNumber) -> UiValue { UiValue::Integer(value) }

  fn wrap_ui_range(value: UiRange) -> UiValue { UiValue::IntegerRange(value) }

  fn dto_number(dto: &NodeDto) -> Option<Self> { dto.int_value }

  fn set_dto_number(dto: &mut NodeDto, value: Option<Self>) {
    dto.int_value = value;
  }

  fn dto_range(dto: &NodeDto) -> (Option<Self>, Option<Self>) {
    (dto.int_from, dto.int_to)
  }

  fn set_dto_range(dto: &mut NodeDto, from: Option<Self>, to: Option<Self>) {
    dto.int_from = from;
    dto.int_to = to;
  }
}

impl Numeric for f64 {
  const KIND: AttributeKind = AttributeKind::Real;
  const NAME: &'static str = "real number";
  const RANGE_KIND: AttributeKind = AttributeKind::RealRange;

  fn is_acceptable(self) -> bool { self.is_finite() }

  fn number(value: &Value) -> Option<&NumberValue<Self>> {
    match value {
      Value::Real(n) => Some(n),
      _ => None,
    }
  }

  fn range(value: &Value) -> Option<&RangeValue<Self>> {
    match value {
      Value::RealRange(r) => Some(r),
      _ => None,
    }
  }

  fn wrap_number(value: NumberValue<Self>) -> Value { Value::Real(value) }

  fn wrap_range(value: RangeValue<Self>) -> Value { Value::RealRange(value) }

  fn ui_number(value: &UiValue) -> Option<&UiNumber> {
    match value {
      UiValue::Real(n) => Some(n),
      _ => None,
    }
  }

  fn ui_range(value: &UiValue) -> Option<&UiRange> {
    match value {
      UiValue::RealRange(r) => Some(r),
      _ => None,
    }
  }

  fn wrap_ui_number(value: UiNumber) -> UiValue { UiValue::Real(value) }

  fn wrap_ui_range(value: UiRange) -> UiValue { UiValue::RealRange(value) }

  fn dto_number(dto: &NodeDto) -> Option<Self> { dto.real_value }

  fn set_dto_number(dto: &mut NodeDto, value: Option<Self>) {
    dto.real_value = value;
  }

  fn dto_range(dto: &NodeDto) -> (Option<Self>, Option<Self>) {
    (dto.real_from, dto.real_to)
  }

  fn set_dto_range(dto: &mut NodeDto, from: Option<Self>, to: Option<Self>) {
    dto.real_from = from;
    dto.real_to = to;
  }
}

/// Text the number would have been typed as. `Display` for floats is the
/// shortest form that parses back to the same value.
fn as_text<N: Numeric>(value: Option<N>) -> Option<String> {
  value.map(|v| v.to_string())
}

/// Parse text into a storable number, dropping anything that does not parse.
fn parsed<N: Numeric>(text: &Option<String>) -> Option<N> {
  entered_trimmed(text).and_then(|t| N::parse(t).ok())
}

// ─── Number ──────────────────────────────────────────────────────────────────

/// A single integer or real measurement, with its unit.
pub struct NumberConverter<N>(PhantomData<fn() -> N>);

impl<N> NumberConverter<N> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<N: Numeric> Converter for NumberConverter<N> {
  fn kind(&self) -> AttributeKind { N::KIND }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    let number = match &attribute.value {
      None => UiNumber::default(),
      Some(value) => {
        let n = N::number(value)
          .ok_or_else(|| mismatch(attribute.id, self.kind(), value.kind()))?;
        UiNumber {
          text: Some(n.value.to_string()),
          unit: n.unit.clone(),
        }
      }
    };
    Ok(N::wrap_ui_number(number))
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    N::wrap_ui_number(UiNumber {
      text: as_text(N::dto_number(dto)),
      unit: owned(&dto.unit),
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let number = N::ui_number(attribute.value())
      .ok_or_else(|| mismatch(attribute.id, self.kind(), attribute.kind()))?;
    N::set_dto_number(dto, parsed(&number.text));
    dto.unit = owned(&number.unit);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let number = N::ui_number(attribute.value())
      .ok_or_else(|| mismatch(attribute.id, self.kind(), attribute.kind()))?;
    let Some(text) = entered_trimmed(&number.text) else {
      // A unit on its own is not a value.
      return Ok(Conversion::unset());
    };

    let mut errors = FieldErrors::new(attribute.id);
    let value = errors.check("value", N::parse(text));
    let unit = checked_unit(&mut errors, &attribute.definition, &number.unit);
    Ok(errors.finish(value.map(|value| N::wrap_number(NumberValue { value, unit }))))
  }
}

// ─── Range ───────────────────────────────────────────────────────────────────

/// A from/to pair of integers or reals; each bound may be missing on its own.
pub struct RangeConverter<N>(PhantomData<fn() -> N>);

impl<N> RangeConverter<N> {
  pub const fn new() -> Self { Self(PhantomData) }
}

impl<N: Numeric> Converter for RangeConverter<N> {
  fn kind(&self) -> AttributeKind { N::RANGE_KIND }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    let range = match &attribute.value {
      None => UiRange::default(),
      Some(value) => {
        let r = N::range(value)
          .ok_or_else(|| mismatch(attribute.id, self.kind(), value.kind()))?;
        UiRange {
          from: as_text(r.from),
          to:   as_text(r.to),
          unit: r.unit.clone(),
        }
      }
    };
    Ok(N::wrap_ui_range(range))
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    let (from, to) = N::dto_range(dto);
    N::wrap_ui_range(UiRange {
      from: as_text(from),
      to:   as_text(to),
      unit: owned(&dto.unit),
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let range = N::ui_range(attribute.value())
      .ok_or_else(|| mismatch(attribute.id, self.kind(), attribute.kind()))?;
    N::set_dto_range(dto, parsed(&range.from), parsed(&range.to));
    dto.unit = owned(&range.unit);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let range = N::ui_range(attribute.value())
      .ok_or_else(|| mismatch(attribute.id, self.kind(), attribute.kind()))?;
    let from_text = entered_trimmed(&range.from);
    let to_text = entered_trimmed(&range.to);
    if from_text.is_none() && to_text.is_none() {
      return Ok(Conversion::unset());
    }

    let mut errors = FieldErrors::new(attribute.id);
    let from = from_text.and_then(|t| errors.check("from", N::parse(t)));
    let mut to = to_text.and_then(|t| errors.check("to", N::parse(t)));
    if let (Some(f), Some(t)) = (from, to)
      && f > t
    {
      errors.push("to", ValidationIssue::InvertedRange);
      to = None;
    }
    let unit = checked_unit(&mut errors, &attribute.definition, &range.unit);

    let value = (from.is_some() || to.is_some())
      .then(|| N::wrap_range(RangeValue { from, to, unit }));
    Ok(errors.finish(value))
  }
}
