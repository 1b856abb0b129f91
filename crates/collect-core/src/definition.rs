//! Survey schema: attribute definitions and the survey that groups them.
//!
//! Definitions are shared by every record of a survey and never change once a
//! survey is published. Numeric and range definitions carry an explicit
//! numeric type instead of being separate definition kinds; the integer/real
//! split is resolved when the definition is mapped to an [`AttributeKind`].

use serde::{Deserialize, Serialize};

use crate::{AttributeKind, Error, Result};

// ─── Sub-types ───────────────────────────────────────────────────────────────

/// The numeric domain of a number or range definition.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum NumericType {
  Integer,
  Real,
  /// Present in some schema documents; such definitions cannot be converted.
  #[default]
  Unspecified,
}

/// What a file attribute is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
  Image,
  Audio,
  Video,
  Document,
}

/// Shared payload of number and range definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericDefinition {
  #[serde(default)]
  pub numeric_type: NumericType,
  /// Unit names the surveyor may pick from, e.g. `["cm", "m"]`.
  #[serde(default)]
  pub units:        Vec<String>,
}

impl NumericDefinition {
  pub fn is_integer(&self) -> bool {
    self.numeric_type == NumericType::Integer
  }

  pub fn is_real(&self) -> bool { self.numeric_type == NumericType::Real }

  pub fn declares_unit(&self, unit: &str) -> bool {
    self.units.iter().any(|u| u == unit)
  }
}

// ─── DefinitionKind ──────────────────────────────────────────────────────────

/// The schema-level kind of an attribute, with any kind-specific constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DefinitionKind {
  Text,
  Date,
  Time,
  Code {
    /// Name of the code list the values are drawn from.
    list:             String,
    /// Whether a free-text "specify other" qualifier may accompany the code.
    #[serde(default)]
    allows_qualifier: bool,
  },
  Coordinate,
  File {
    file_type: FileType,
  },
  Taxon {
    #[serde(default)]
    taxonomy: Option<String>,
  },
  Boolean,
  Number(NumericDefinition),
  Range(NumericDefinition),
}

impl DefinitionKind {
  /// The numeric payload of number and range definitions.
  pub fn numeric(&self) -> Option<&NumericDefinition> {
    match self {
      Self::Number(n) | Self::Range(n) => Some(n),
      _ => None,
    }
  }
}

// ─── AttributeDefinition ─────────────────────────────────────────────────────

/// The declaration of one attribute in a survey schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
  pub id:    i32,
  pub name:  String,
  #[serde(default)]
  pub label: Option<String>,
  /// Whether the attribute is one of the record's identifying attributes.
  #[serde(default)]
  pub key:   bool,
  pub kind:  DefinitionKind,
}

impl AttributeDefinition {
  /// Resolve the closed attribute kind for this definition.
  ///
  /// Number and range definitions must say whether they are integer or real;
  /// anything else is a schema the converters were not built for.
  pub fn attribute_kind(&self) -> Result<AttributeKind> {
    let kind = match &self.kind {
      DefinitionKind::Text => AttributeKind::Text,
      DefinitionKind::Date => AttributeKind::Date,
      DefinitionKind::Time => AttributeKind::Time,
      DefinitionKind::Code { .. } => AttributeKind::Code,
      DefinitionKind::Coordinate => AttributeKind::Coordinate,
      DefinitionKind::File { .. } => AttributeKind::File,
      DefinitionKind::Taxon { .. } => AttributeKind::Taxon,
      DefinitionKind::Boolean => AttributeKind::Boolean,
      DefinitionKind::Number(n) if n.is_integer() => AttributeKind::Integer,
      DefinitionKind::Number(n) if n.is_real() => AttributeKind::Real,
      DefinitionKind::Range(n) if n.is_integer() => AttributeKind::IntegerRange,
      DefinitionKind::Range(n) if n.is_real() => AttributeKind::RealRange,
      DefinitionKind::Number(_) | DefinitionKind::Range(_) => {
        return Err(Error::UnspecifiedNumericType {
          definition_id: self.id,
          name:          self.name.clone(),
        });
      }
    };
    Ok(kind)
  }

  /// The label shown to surveyors, falling back to the schema name.
  pub fn display_name(&self) -> &str {
    self.label.as_deref().unwrap_or(&self.name)
  }
}

// ─── Survey ──────────────────────────────────────────────────────────────────

/// A published survey schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Survey {
  pub id:          i32,
  pub name:        String,
  pub definitions: Vec<AttributeDefinition>,
}

impl Survey {
  /// Parse a survey schema document.
  pub fn from_json(input: &str) -> Result<Self> {
    Ok(serde_json::from_str(input)?)
  }
}
