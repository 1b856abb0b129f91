//! Converter lookup.
//!
//! Every lookup, whether it starts from a definition, a view-model value or a
//! persisted kind tag, first resolves an [`AttributeKind`] and then goes
//! through [`converter`]. There is no second table to keep in sync.

use collect_core::{
  AttributeKind, Result, definition::AttributeDefinition, ui::UiValue,
};
use strum::IntoEnumIterator;

use crate::{
  converter::Converter,
  converters::{
    BooleanConverter, CodeConverter, CoordinateConverter, DateConverter,
    FileConverter, NumberConverter, RangeConverter, TaxonConverter,
    TextConverter, TimeConverter,
  },
};

static TEXT: TextConverter = TextConverter;
static DATE: DateConverter = DateConverter;
static TIME: TimeConverter = TimeConverter;
static CODE: CodeConverter = CodeConverter;
static COORDINATE: CoordinateConverter = CoordinateConverter;
static FILE: FileConverter = FileConverter;
static TAXON: TaxonConverter = TaxonConverter;
static BOOLEAN: BooleanConverter = BooleanConverter;
static INTEGER: NumberConverter<i64> = NumberConverter::new();
static REAL: NumberConverter<f64> = NumberConverter::new();
static INTEGER_RANGE: RangeConverter<i64> = RangeConverter::new();
static REAL_RANGE: RangeConverter<f64> = RangeConverter::new();

/// The converter for `kind`.
pub fn converter(kind: AttributeKind) -> &'static dyn Converter {
  match kind {
    AttributeKind::Text => &TEXT,
    AttributeKind::Date => &DATE,
    AttributeKind::Time => &TIME,
    AttributeKind::Code => &CODE,
    AttributeKind::Coordinate => &COORDINATE,
    AttributeKind::File => &FILE,
    AttributeKind::Taxon => &TAXON,
    AttributeKind::Boolean => &BOOLEAN,
    AttributeKind::Integer => &INTEGER,
    AttributeKind::Real => &REAL,
    AttributeKind::IntegerRange => &INTEGER_RANGE,
    AttributeKind::RealRange => &REAL_RANGE,
  }
}

/// The converter for attributes declared by `definition`.
///
/// Fails when a number or range definition is neither integer nor real.
pub fn for_definition(
  definition: &AttributeDefinition,
) -> Result<&'static dyn Converter> {
  let kind = definition.attribute_kind()?;
  tracing::trace!(definition = definition.id, %kind, "converter by definition");
  Ok(converter(kind))
}

/// The converter for a value the UI already holds.
pub fn for_ui_value(value: &UiValue) -> &'static dyn Converter {
  converter(value.kind())
}

/// The converter for a persisted kind tag. Unknown tags are a schema
/// mismatch.
pub fn for_tag(tag: &str) -> Result<&'static dyn Converter> {
  Ok(converter(AttributeKind::from_tag(tag)?))
}

/// Every registered converter, in declaration order of [`AttributeKind`].
pub fn all() -> impl Iterator<Item = &'static dyn Converter> {
  AttributeKind::iter().map(converter)
}
