//! TypeScript AST builders for imports, interfaces and functions.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod fns;
mod imports;
mod interface;

pub use fns::{Fn, Param};
pub use imports::{Import, module_path, symbol_import};
pub use interface::{Interface, InterfaceMember};
