use collect_core::{
  AttributeKind, Result,
  attribute::Attribute,
  definition::{AttributeDefinition, DefinitionKind},
  dto::NodeDto,
  ui::{UiAttribute, UiFile, UiValue},
  validation::{Conversion, FieldErrors, ValidationIssue},
  value::{FileValue, Value},
};

use super::{entered_trimmed, owned};
use crate::converter::{Converter, mismatch};

/// A reference to a captured or attached file. Reading and writing the file
/// itself is the caller's business.
pub struct FileConverter;

/// Sizes are persisted in signed 64-bit columns.
const MAX_SIZE: u64 = i64::MAX as u64;

/// File names must stay inside the survey's file directory. Names come from
/// devices of either family, so `/` and `\` both separate segments whatever
/// the host.
fn relative_path(name: &str) -> Result<&str, ValidationIssue> {
  let mut chars = name.chars();
  let drive = matches!(
    (chars.next(), chars.next()),
    (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
  );
  let escapes = name.starts_with(['/', '\\'])
    || drive
    || name.split(['/', '\\']).any(|segment| segment == "..");
  if escapes {
    Err(ValidationIssue::UnsafePath(name.to_owned()))
  } else {
    Ok(name)
  }
}

fn storable_size(size: u64) -> Result<u64, ValidationIssue> {
  if size <= MAX_SIZE {
    Ok(size)
  } else {
    Err(ValidationIssue::TooLarge {
      value: size,
      max:   MAX_SIZE,
    })
  }
}

impl Converter for FileConverter {
  fn kind(&self) -> AttributeKind { AttributeKind::File }

  fn ui_value(
    &self,
    _definition: &AttributeDefinition,
    attribute: &Attribute,
  ) -> Result<UiValue> {
    match &attribute.value {
      None => Ok(UiValue::File(UiFile::default())),
      Some(Value::File(f)) => Ok(UiValue::File(UiFile {
        filename: Some(f.filename.clone()),
        size:     f.size,
      })),
      Some(other) => Err(mismatch(attribute.id, self.kind(), other.kind())),
    }
  }

  fn dto_ui_value(&self, dto: &NodeDto, _: &AttributeDefinition) -> UiValue {
    UiValue::File(UiFile {
      filename: owned(&dto.file_name),
      size:     dto.file_size,
    })
  }

  fn write_dto(&self, attribute: &UiAttribute, dto: &mut NodeDto) -> Result<()> {
    let UiValue::File(file) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    dto.file_name = owned(&file.filename);
    dto.file_size = file.size.filter(|&size| size <= MAX_SIZE);
    Ok(())
  }

  fn to_value(&self, attribute: &UiAttribute) -> Result<Conversion<Value>> {
    let UiValue::File(file) = attribute.value() else {
      return Err(mismatch(attribute.id, self.kind(), attribute.kind()));
    };
    let DefinitionKind::File { file_type } = &attribute.definition.kind else {
      return Err(mismatch(
        attribute.id,
        attribute.definition.attribute_kind()?,
        self.kind(),
      ));
    };
    let mut errors = FieldErrors::new(attribute.id);

    let Some(name) = entered_trimmed(&file.filename) else {
      if file.size.is_some() {
        errors.push("filename", ValidationIssue::Incomplete {
          missing: "filename",
          present: "size",
        });
      }
      return Ok(errors.finish(None));
    };

    let size = file.size.and_then(|s| errors.check("size", storable_size(s)));
    let value = errors
      .check("filename", relative_path(name))
      .map(|filename| {
        Value::File(FileValue {
          filename: filename.to_owned(),
          size,
          file_type: *file_type,
        })
      });
    Ok(errors.finish(value))
  }
}

#[cfg(test)]
mod tests {
  use collect_core::definition::FileType;

  use super::*;
  use crate::converters::test_helpers::{attribute, image, text, ui};

  #[test]
  fn file_type_comes_from_the_definition() {
    let def = image();
    let attr = ui(
      &def,
      UiValue::File(UiFile {
        filename: text("photos/plot-12.jpg"),
        size:     Some(204_800),
      }),
    );
    assert_eq!(
      FileConverter.to_value(&attr).unwrap(),
      Conversion::valid(Value::File(FileValue {
        filename:  "photos/plot-12.jpg".into(),
        size:      Some(204_800),
        file_type: FileType::Image,
      }))
    );
  }

  #[test]
  fn paths_escaping_the_survey_directory_are_rejected() {
    let def = image();
    for bad in [
      "/etc/passwd",
      "../other/survey.jpg",
      "a/../../b.jpg",
      "\\\\server\\share\\x.jpg",
      "C:\\Windows\\x.jpg",
      "C:/data/x.jpg",
      "d:x.jpg",
      "..\\..\\etc\\x.jpg",
      "photos\\..\\..\\x.jpg",
    ] {
      let attr = ui(
        &def,
        UiValue::File(UiFile {
          filename: text(bad),
          size:     None,
        }),
      );
      let result = FileConverter.to_value(&attr).unwrap();
      assert_eq!(result.value, None, "{bad}");
      assert_eq!(
        result.errors[0].issue,
        ValidationIssue::UnsafePath(bad.to_string())
      );
    }
  }

  #[test]
  fn unset_file_has_no_columns() {
    let def = image();
    let ui_value = FileConverter.ui_value(&def, &attribute(None)).unwrap();
    let attr = ui(&def, ui_value);
    let dto = FileConverter.to_dto(&attr).unwrap();
    assert_eq!((dto.file_name, dto.file_size), (None, None));
    assert!(FileConverter.to_value(&attr).unwrap().is_unset());
  }

  #[test]
  fn dotted_names_inside_the_directory_are_accepted() {
    let def = image();
    for good in ["photos/plot..12.jpg", "a\\b\\c.jpg", ".hidden/x.jpg"] {
      let attr = ui(
        &def,
        UiValue::File(UiFile {
          filename: text(good),
          size:     None,
        }),
      );
      assert!(FileConverter.to_value(&attr).unwrap().is_valid(), "{good}");
    }
  }

  #[test]
  fn size_beyond_a_signed_column_is_reported() {
    let def = image();
    let attr = ui(
      &def,
      UiValue::File(UiFile {
        filename: text("photos/huge.jpg"),
        size:     Some(u64::MAX),
      }),
    );
    let result = FileConverter.to_value(&attr).unwrap();
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].field, "size");
    assert_eq!(
      result.value,
      Some(Value::File(FileValue {
        filename:  "photos/huge.jpg".into(),
        size:      None,
        file_type: FileType::Image,
      }))
    );
    // The row never carries a size the store cannot hold.
    let dto = FileConverter.to_dto(&attr).unwrap();
    assert_eq!(dto.file_size, None);
    assert_eq!(dto.file_name.as_deref(), Some("photos/huge.jpg"));
  }
}
