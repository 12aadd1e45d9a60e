//! Rust impl block builder.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Renderable};

use super::Fn;

/// Builder for Rust impl blocks.
///
/// Methods are separated by a blank line.
#[derive(Debug, Clone)]
pub struct Impl {
    type_name: String,
    methods: Vec<Fn>,
}

impl Impl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            methods: Vec::new(),
        }
    }

    pub fn methods(mut self, methods: impl IntoIterator<Item = Fn>) -> Self {
        self.methods.extend(methods);
        self
    }

    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::rust();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Impl {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self
            .methods
            .iter()
            .enumerate()
            .flat_map(|(i, method)| {
                let mut fragments = Vec::new();
                if i > 0 {
                    fragments.push(CodeFragment::blank());
                }
                fragments.extend(method.to_fragments());
                fragments
            })
            .collect();
        vec![CodeFragment::block(format!("impl {} {{", self.type_name), body, "}")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_impl() {
        assert_eq!(Impl::new("Foo").build(), "impl Foo {\n}\n");
    }

    #[test]
    fn test_methods_separated_by_blank_line() {
        let i = Impl::new("Message")
            .methods([
                Fn::new("table_str").returns("&'static str").body_line("\"message\""),
                Fn::new("message").returns("ColumnSpec<String>"),
            ])
            .build();
        assert_eq!(
            i,
            "impl Message {\n    pub fn table_str() -> &'static str {\n        \"message\"\n    }\n\n    pub fn message() -> ColumnSpec<String> {\n    }\n}\n"
        );
    }
}
