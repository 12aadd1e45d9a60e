//! Code emission building blocks.
//!
//! - [`CodeBuilder`] - indentation-aware text builder with scoped blocks
//! - [`CodeFragment`] - intermediate representation for code pieces
//! - [`Renderable`] - trait for nodes that render to fragments
//! - [`Indent`] - indentation unit

mod code_builder;
mod indent;
mod renderable;

pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
