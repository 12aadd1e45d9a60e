//! Composable code fragments.
//!
//! Generators return fragments from each emission phase; the driver
//! concatenates them and applies the result to a [`CodeBuilder`].
//!
//! [`CodeBuilder`]: super::CodeBuilder

/// A piece of generated code, independent of indentation.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line; a newline is appended.
    Line(String),
    Blank,
    /// A header line, an indented body and an optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// Indent the contained fragments one level.
    Indent(Vec<CodeFragment>),
    /// A single-line `/** ... */` comment.
    JsDoc(String),
    /// A `/// ...` comment.
    RustDoc(String),
}

impl CodeFragment {
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    pub fn blank() -> Self {
        Self::Blank
    }

    pub fn block(header: impl Into<String>, body: Vec<CodeFragment>, close: impl Into<String>) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close: Some(close.into()),
        }
    }

    pub fn indent(fragments: Vec<CodeFragment>) -> Self {
        Self::Indent(fragments)
    }

    pub fn jsdoc(s: impl Into<String>) -> Self {
        Self::JsDoc(s.into())
    }

    pub fn rust_doc(s: impl Into<String>) -> Self {
        Self::RustDoc(s.into())
    }
}

/// Types that render to code fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl Renderable for [CodeFragment] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_vec()
    }
}

impl Renderable for Vec<CodeFragment> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_constructor_sets_close() {
        let block = CodeFragment::block("if (h.login) {", vec![CodeFragment::line("x;")], "}");
        assert_eq!(
            block,
            CodeFragment::Block {
                header: "if (h.login) {".to_string(),
                body: vec![CodeFragment::Line("x;".to_string())],
                close: Some("}".to_string()),
            }
        );
    }

    #[test]
    fn test_fragment_vec_is_renderable() {
        let fragments = vec![CodeFragment::blank(), CodeFragment::line("a")];
        assert_eq!(fragments.to_fragments(), fragments);
    }
}
