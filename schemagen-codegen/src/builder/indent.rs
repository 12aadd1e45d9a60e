//! Indentation styles.

/// Indentation unit for generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// A fixed number of spaces. Widths above 8 are clamped.
    Spaces(u8),
    Tab,
}

const SPACES: &str = "        ";

impl Indent {
    /// Four spaces, as rustfmt writes.
    pub const RUST: Self = Self::Spaces(4);

    /// Two spaces, as prettier writes.
    pub const TYPESCRIPT: Self = Self::Spaces(2);

    /// The text of one indentation level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spaces(width) => &SPACES[..usize::from(*width).min(SPACES.len())],
            Self::Tab => "\t",
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::RUST
    }
}
