//! Rust AST builders for the structs, impls and functions of generated files.
//!
//! These provide a high-level API for constructing Rust syntax,
//! which can then be rendered via CodeBuilder.

mod fns;
mod impls;
mod structs;

pub use fns::Fn;
pub use impls::Impl;
pub use structs::Struct;
