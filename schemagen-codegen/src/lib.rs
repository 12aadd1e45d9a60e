//! Shared code generation machinery for schemagen targets.
//!
//! This crate holds everything the target back-ends have in common: type
//! resolution over the schema, import tracking, text emission and the
//! phased emission driver.
//!
//! # Module Organization
//!
//! - [`resolve`] - alias expansion, type decoding and annotation lookup
//! - [`generation`] - import tracking and module alias assignment
//! - [`builder`] - code emission building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - per-language abstractions (TypeMapper, NamingConvention, etc.)
//! - [`pipeline`] - four-phase emission and diagnostics
//! - [`testing`] - schema fixtures (feature-gated)

pub mod builder;
mod error;
pub mod generation;
pub mod language;
pub mod pipeline;
pub mod resolve;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::{CodegenError, Result};
