//! Output assembly helpers.
//!
//! - [`ImportingHelper`] - cross-module reference tracking, alias and symbol name assignment
//! - [`ImportCollector`] - ordered module to symbol-set map

mod imports;

pub use imports::{ImportCollector, ImportStyle, ImportedSymbol, ImportingHelper, ModuleImport};
