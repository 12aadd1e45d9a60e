//! Validation context and utilities for config parsing.

use miette::SourceSpan;

use crate::{Result, error::SourceContext};

/// Validation context carrying the source for error reporting and the path
/// of the section being validated.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "schemagen.toml");
/// ctx.push("services").push("0").require("api_name", &service.api_name)?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: self.source,
            path,
        }
    }

    /// The dotted path of `key` in this context, e.g. `services.0.api_name`.
    pub fn key_path(&self, key: &str) -> String {
        self.path
            .iter()
            .map(String::as_str)
            .chain([key])
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Fail if a string value is empty or whitespace.
    pub fn require(&self, key: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(self.source.validation_error_at(
                format!("{} must not be empty", self.key_path(key)),
                find_key_span(self.source.src(), key, value),
            ));
        }
        Ok(())
    }

    /// Fail if a list is empty.
    pub fn require_items<T>(&self, key: &str, items: &[T]) -> Result<()> {
        if items.is_empty() {
            return Err(self.source.validation_error_at(
                format!("{} must list at least one entry", self.key_path(key)),
                find_key_span(self.source.src(), key, ""),
            ));
        }
        Ok(())
    }
}

/// Find the span of `key = "value"` in the TOML source, falling back to the
/// first occurrence of the key at the start of a line.
pub(crate) fn find_key_span(src: &str, key: &str, value: &str) -> Option<SourceSpan> {
    for quote in ['"', '\''] {
        let pattern = format!("{} = {}{}{}", key, quote, value, quote);
        if let Some(pos) = src.find(&pattern) {
            return Some(SourceSpan::from((pos, pattern.len())));
        }
    }

    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}
