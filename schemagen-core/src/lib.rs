//! Core utilities for the schemagen code generator.
//!
//! Case conversion shared by every back-end, and writing generated files.

mod file;
mod utils;

pub use file::{File, WriteResult};
pub use utils::{to_camel_case, to_pascal_case, to_snake_case};
