//! Traits implemented by each target language.

use std::path::PathBuf;

use schemagen_ast::{Schema, ScopedName};
use schemagen_core::File;

use super::NamingConvention;
use crate::{error::Result, pipeline::Diagnostic, resolve::Primitive};

/// Renders decoded types in a target language's syntax.
pub trait TypeMapper {
    fn language(&self) -> &'static str;

    fn naming(&self) -> &NamingConvention;

    fn map_primitive(&self, primitive: Primitive) -> String;

    fn map_vector(&self, elem: &str) -> String;

    fn map_string_map(&self, elem: &str) -> String;

    fn map_nullable(&self, elem: &str) -> String;

    /// Qualify a declaration name with its module alias.
    fn qualify(&self, alias: &str, name: &str) -> String;

    /// Append generic arguments to a rendered name.
    fn apply_params(&self, name: &str, params: &[String]) -> String {
        if params.is_empty() {
            name.to_string()
        } else {
            format!("{}<{}>", name, params.join(", "))
        }
    }

    /// A native rendering for a declaration, bypassing imports.
    fn map_reference(&self, _name: &ScopedName) -> Option<String> {
        None
    }
}

/// One generated output file.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedArtifact {
    pub path: PathBuf,
    pub content: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl GeneratedArtifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            diagnostics: Vec::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Vec<Diagnostic>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn to_file(&self) -> File {
        File::new(&self.path, &self.content)
    }
}

/// A generator producing one artifact from the whole schema.
pub trait ArtifactGenerator {
    /// Short name used in logs (e.g. "tables", "service-client").
    fn name(&self) -> &'static str;

    fn generate(&self, schema: &Schema) -> Result<GeneratedArtifact>;
}
