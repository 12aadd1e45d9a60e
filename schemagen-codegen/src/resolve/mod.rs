//! Type resolution over the declaration graph.
//!
//! - [`Resolver`] - name to declaration lookup, injected into every component
//! - [`Decoder`] - type expression to [`DecodedType`]
//! - [`AliasExpander`] - head expansion of aliases and newtypes
//! - [`annotations`] - typed annotation lookup
//! - [`ResolvedField`] - a struct field ready for emission

pub mod annotations;
mod decode;
mod expand;
mod field;

use std::collections::HashMap;

pub use decode::{DeclKind, DecodedRef, DecodedType, Decoder, MAX_DEPTH, NewtypePolicy, Primitive};
pub use expand::{AliasExpander, MAX_EXPANSION_DEPTH};
pub use field::{ResolvedField, TableDecl, resolve_field, table_decls};
use schemagen_ast::{Decl, Schema, ScopedName};

/// Looks up declarations by scoped name.
pub trait Resolver {
    fn resolve(&self, name: &ScopedName) -> Option<&Decl>;
}

impl Resolver for Schema {
    fn resolve(&self, name: &ScopedName) -> Option<&Decl> {
        self.get(name)
    }
}

impl Resolver for HashMap<ScopedName, Decl> {
    fn resolve(&self, name: &ScopedName) -> Option<&Decl> {
        self.get(name)
    }
}

/// `sys.types.Maybe`, treated as nullable at field level.
pub fn sys_maybe() -> ScopedName {
    ScopedName::new("sys.types", "Maybe")
}

/// `common.Instant`, rendered natively by some targets.
pub fn common_instant() -> ScopedName {
    ScopedName::new("common", "Instant")
}
