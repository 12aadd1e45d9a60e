//! Schema declaration model for the schemagen code generator.
//!
//! This crate holds the already-parsed declaration graph that every generator
//! consumes: scoped names, type expressions, declarations, annotations and the
//! module container. It performs no resolution of its own.
//!
//! # Architecture
//!
//! ```text
//! schema JSON → schemagen-config (loading) → schemagen-ast (model) → codegen
//! ```
//!
//! The JSON encoding follows the ADL AST layout: type references are
//! externally tagged (`{"primitive": "Int32"}`), declaration kinds use the
//! `struct_` / `union_` / `type_` / `newtype_` tags, and annotations are a list
//! of `{ "key": ScopedName, "value": <json> }` pairs.

mod decl;
mod schema;
mod types;

pub use decl::{Annotation, Decl, DeclType, Field, NewType, Struct, TypeDef, Union};
pub use schema::{Module, Schema};
pub use types::{ScopedName, TypeExpr, TypeRef, module_tail};
