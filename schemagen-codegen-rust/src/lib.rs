//! Rust back-end: sea-query column specifications for database tables.

mod columns;
mod naming;
mod rust_file;
mod type_mapper;

pub mod ast;

pub use columns::ColumnSchemaGenerator;
pub use naming::RUST_NAMING;
pub use rust_file::{RustFile, Use};
pub use type_mapper::RustTypeMapper;
