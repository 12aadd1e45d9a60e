//! Language-specific abstractions.
//!
//! - [`TypeMapper`] - renders decoded types in a target syntax
//! - [`NamingConvention`] - case conversion and reserved words
//! - [`ArtifactGenerator`] - a generator producing one output file
//! - [`GeneratedArtifact`] - path, content and diagnostics of one output

mod naming;
mod traits;

pub use naming::NamingConvention;
pub use traits::{ArtifactGenerator, GeneratedArtifact, TypeMapper};
