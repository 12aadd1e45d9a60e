//! CodeFile abstraction for structured TypeScript file generation.
//!
//! Provides a high-level API for generating TypeScript files with
//! a header, grouped imports and body content.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::Import;

/// A structured representation of a TypeScript file.
///
/// Sections render in order: header lines, import groups separated by blank
/// lines, then body elements separated by blank lines.
///
/// # Example
///
/// ```ignore
/// let file = CodeFile::new()
///     .import(Import::new("./protoapp/db").namespace("db"))
///     .add(table_interface)
///     .render();
/// ```
#[derive(Default)]
pub struct CodeFile {
    header: Vec<String>,
    import_groups: Vec<Vec<Import>>,
    body: Vec<Vec<CodeFragment>>,
}

impl CodeFile {
    /// Create a new empty CodeFile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line above the imports (e.g. a lint directive).
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Add an import statement to the current group.
    pub fn import(mut self, import: Import) -> Self {
        match self.import_groups.last_mut() {
            Some(group) => group.push(import),
            None => self.import_groups.push(vec![import]),
        }
        self
    }

    /// Add imports from an iterator to the current group.
    pub fn imports(self, imports: impl IntoIterator<Item = Import>) -> Self {
        imports.into_iter().fold(self, |file, import| file.import(import))
    }

    /// Start a new import group, separated from the previous one by a blank line.
    pub fn import_group(mut self) -> Self {
        if self.import_groups.last().is_some_and(|g| !g.is_empty()) {
            self.import_groups.push(Vec::new());
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);

        for line in &self.header {
            builder.push_line(line);
        }

        let groups = self.import_groups.iter().filter(|g| !g.is_empty());
        for (i, group) in groups.enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for import in group {
                builder.emit(import);
            }
        }

        let has_imports = self.import_groups.iter().any(|g| !g.is_empty());
        if has_imports && !self.body.is_empty() {
            builder.push_blank();
        }

        for (i, fragments) in self.body.iter().enumerate() {
            if i > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
        }

        builder.build()
    }

    /// Check if the file is empty.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.import_groups.iter().all(Vec::is_empty)
            && self.body.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Interface;

    #[test]
    fn test_empty_file() {
        let file = CodeFile::new().import_group();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_import_groups_are_separated() {
        let file = CodeFile::new()
            .header("/* eslint-disable @typescript-eslint/no-unused-vars */")
            .import(Import::new("./types").named("PostFn"))
            .import(Import::new("./http").named("HttpFetch"))
            .import_group()
            .import(Import::new("./runtime/adl").named("DeclResolver"));

        assert_eq!(
            file.render(),
            "/* eslint-disable @typescript-eslint/no-unused-vars */\n\
             import { PostFn } from \"./types\";\n\
             import { HttpFetch } from \"./http\";\n\
             \n\
             import { DeclResolver } from \"./runtime/adl\";\n"
        );
    }

    #[test]
    fn test_blank_lines_between_body() {
        let file = CodeFile::new()
            .import(Import::new("./common").namespace("common"))
            .add(Interface::new("A").private())
            .add(Interface::new("B").private());

        assert_eq!(
            file.render(),
            "import * as common from \"./common\";\n\ninterface A {}\n\ninterface B {}\n"
        );
    }
}
