//! Indentation-aware text builder.

use super::{CodeFragment, Indent, Renderable};

/// Builds generated source text line by line.
///
/// # Example
///
/// ```
/// use schemagen_codegen::builder::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::typescript();
/// builder.emit(&vec![CodeFragment::block(
///     "interface AppUserTable {",
///     vec![CodeFragment::line("id: string;"), CodeFragment::line("email: string;")],
///     "}",
/// )]);
///
/// assert_eq!(builder.build(), "interface AppUserTable {\n  id: string;\n  email: string;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// A builder with 4-space indentation.
    pub fn rust() -> Self {
        Self::new(Indent::RUST)
    }

    /// A builder with 2-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    /// Add a line at the current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line. Blank lines never carry indentation.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    pub fn push_jsdoc(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("/** ");
        self.buffer.push_str(text);
        self.buffer.push_str(" */\n");
        self
    }

    pub fn push_rust_doc(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("/// ");
        self.buffer.push_str(text);
        self.buffer.push('\n');
        self
    }

    /// Emit every fragment of a renderable node.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Apply a single code fragment.
    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => {
                self.push_line(&s);
            }
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.push_indent();
                for f in body {
                    self.apply_fragment(f);
                }
                self.push_dedent();
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Indent(fragments) => {
                self.push_indent();
                for f in fragments {
                    self.apply_fragment(f);
                }
                self.push_dedent();
            }
            CodeFragment::JsDoc(text) => {
                self.push_jsdoc(&text);
            }
            CodeFragment::RustDoc(text) => {
                self.push_rust_doc(&text);
            }
        }
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::rust()
    }
}
