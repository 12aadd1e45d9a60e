//! Rust struct builder.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::fns::doc_fragments;

/// Builder for public unit-like structs (`pub struct Name {}`).
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    doc: Option<String>,
}

impl Struct {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
        }
    }

    pub fn doc_opt(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Struct {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.doc.as_deref().map(doc_fragments).unwrap_or_default();
        fragments.push(CodeFragment::line(format!("pub struct {} {{}}", self.name)));
        fragments
    }
}
