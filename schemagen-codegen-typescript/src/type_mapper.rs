//! TypeScript type mapper implementation.

use std::collections::HashMap;

use schemagen_ast::ScopedName;
use schemagen_codegen::{
    language::{NamingConvention, TypeMapper},
    resolve::{Primitive, common_instant},
};

use crate::naming::TS_NAMING;

/// TypeScript type mapper implementation.
///
/// Declarations registered as natives render as a fixed TypeScript type and
/// are never imported.
#[derive(Debug, Clone, Default)]
pub struct TypeScriptTypeMapper {
    natives: HashMap<ScopedName, String>,
}

impl TypeScriptTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapper used for database row interfaces: `common.Instant` is a `Date`.
    pub fn for_tables() -> Self {
        Self::new().with_native(common_instant(), "Date")
    }

    pub fn with_native(mut self, name: ScopedName, ts_type: impl Into<String>) -> Self {
        self.natives.insert(name, ts_type.into());
        self
    }
}

impl TypeMapper for TypeScriptTypeMapper {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn naming(&self) -> &NamingConvention {
        &TS_NAMING
    }

    fn map_primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::Void => "null",
            Primitive::Bool => "boolean",
            Primitive::String => "string",
            Primitive::Int64 | Primitive::Word64 => "bigint",
            Primitive::Int8
            | Primitive::Int16
            | Primitive::Int32
            | Primitive::Word8
            | Primitive::Word16
            | Primitive::Word32
            | Primitive::Float
            | Primitive::Double => "number",
            Primitive::Json => "{}",
        }
        .to_string()
    }

    fn map_vector(&self, elem: &str) -> String {
        if elem.contains(' ') {
            format!("({})[]", elem)
        } else {
            format!("{}[]", elem)
        }
    }

    fn map_string_map(&self, elem: &str) -> String {
        format!("{{[key: string]: {}}}", elem)
    }

    fn map_nullable(&self, elem: &str) -> String {
        format!("{} | null", elem)
    }

    fn qualify(&self, alias: &str, name: &str) -> String {
        format!("{}.{}", alias, name)
    }

    fn map_reference(&self, name: &ScopedName) -> Option<String> {
        self.natives.get(name).cloned()
    }
}
