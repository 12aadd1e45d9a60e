//! Annotation lookup.
//!
//! Recognized keys decode into small typed structs at lookup time, so a
//! malformed value fails with [`CodegenError::InvalidAnnotation`] where it is
//! read rather than deep inside a generator.

use schemagen_ast::{Annotation, ScopedName};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{CodegenError, Result};

/// Find the value of the first annotation with the given key.
pub fn find_annotation<'a>(key: &ScopedName, annotations: &'a [Annotation]) -> Option<&'a Value> {
    annotations.iter().find(|a| a.key == *key).map(|a| &a.value)
}

/// An annotation value with a fixed key.
pub trait AnnotationValue: DeserializeOwned {
    /// `(module, name)` of the annotation key.
    const KEY: (&'static str, &'static str);

    fn key() -> ScopedName {
        ScopedName::new(Self::KEY.0, Self::KEY.1)
    }
}

/// Decode the annotation `T` if present.
///
/// `target` names the annotated item in error messages.
pub fn get_annotation<T: AnnotationValue>(
    annotations: &[Annotation],
    target: &str,
) -> Result<Option<T>> {
    let key = T::key();
    let Some(value) = find_annotation(&key, annotations) else {
        return Ok(None);
    };
    T::deserialize(value)
        .map(Some)
        .map_err(|e| CodegenError::InvalidAnnotation {
            key,
            target: target.to_string(),
            message: e.to_string(),
        })
}

/// Decode the annotation `T`, failing if it is absent.
pub fn require_annotation<T: AnnotationValue>(annotations: &[Annotation], target: &str) -> Result<T> {
    get_annotation(annotations, target)?.ok_or_else(|| CodegenError::MissingAnnotation {
        key: T::key(),
        target: target.to_string(),
    })
}

/// `sys.annotations.Doc`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Doc(String);

impl AnnotationValue for Doc {
    const KEY: (&'static str, &'static str) = ("sys.annotations", "Doc");
}

impl Doc {
    /// The text on a single line, trimmed.
    pub fn text(&self) -> String {
        self.0.replace('\n', " ").trim().to_string()
    }
}

/// The documentation comment of an annotated item, if any.
pub fn doc_comment(annotations: &[Annotation], target: &str) -> Result<Option<String>> {
    Ok(get_annotation::<Doc>(annotations, target)?
        .map(|doc| doc.text())
        .filter(|text| !text.is_empty()))
}

/// `common.db.DbTable`: marks a struct as a database table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DbTable {
    pub table_name: Option<String>,
    pub with_id_primary_key: bool,
    pub with_primary_key: Vec<String>,
    pub label: Vec<String>,
}

impl AnnotationValue for DbTable {
    const KEY: (&'static str, &'static str) = ("common.db", "DbTable");
}

/// `common.db.DbColumnName`: overrides the column name of a field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DbColumnName(pub String);

impl AnnotationValue for DbColumnName {
    const KEY: (&'static str, &'static str) = ("common.db", "DbColumnName");
}

/// `common.db.DbPrimaryKey`: marks the primary key field. Any value is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbPrimaryKey;

impl<'de> Deserialize<'de> for DbPrimaryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(DbPrimaryKey)
    }
}

impl AnnotationValue for DbPrimaryKey {
    const KEY: (&'static str, &'static str) = ("common.db", "DbPrimaryKey");
}

/// Placeholder in custom type names for the runtime module alias.
pub const STDLIB_MODULE_PLACEHOLDER: &str = "{{STDLIBMODULE}}";

/// `adlc.config.rust.RustCustomType`: binds a declaration to a hand-written
/// Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustCustomType {
    pub rustname: String,
    #[serde(default)]
    pub helpers: String,
    #[serde(default, alias = "generateOrigADLType")]
    pub generate_orig_adl_type: String,
}

impl AnnotationValue for RustCustomType {
    const KEY: (&'static str, &'static str) = ("adlc.config.rust", "RustCustomType");
}

impl RustCustomType {
    /// The Rust path with the runtime placeholder replaced.
    pub fn path(&self, runtime_alias: &str) -> String {
        self.rustname.replace(STDLIB_MODULE_PLACEHOLDER, runtime_alias)
    }
}
