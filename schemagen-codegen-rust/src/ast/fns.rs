//! Rust function builder.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

/// Builder for public associated functions without parameters.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    return_type: Option<String>,
    body: Vec<String>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc_opt(mut self, doc: Option<&str>) -> Self {
        self.doc = doc.map(str::to_string);
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    fn signature(&self) -> String {
        match &self.return_type {
            Some(ret) => format!("pub fn {}() -> {} {{", self.name, ret),
            None => format!("pub fn {}() {{", self.name),
        }
    }

    /// Build the function as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

/// One `///` line per line of text.
pub(crate) fn doc_fragments(doc: &str) -> Vec<CodeFragment> {
    doc.lines()
        .map(|line| CodeFragment::rust_doc(line.trim()))
        .collect()
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = self.doc.as_deref().map(doc_fragments).unwrap_or_default();
        fragments.push(CodeFragment::block(
            self.signature(),
            self.body.iter().map(CodeFragment::line).collect(),
            "}",
        ));
        fragments
    }
}
