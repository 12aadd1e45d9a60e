//! Rust type mapper implementation.

use std::collections::HashMap;

use schemagen_ast::{Schema, ScopedName};
use schemagen_codegen::{
    Result,
    language::{NamingConvention, TypeMapper},
    resolve::{
        Primitive,
        annotations::{RustCustomType, get_annotation},
    },
};

use crate::naming::RUST_NAMING;

/// Rust type mapper implementation.
///
/// Declarations bound to a hand-written Rust type render as that type's path
/// and are never imported.
#[derive(Debug, Clone, Default)]
pub struct RustTypeMapper {
    custom_types: HashMap<ScopedName, String>,
}

impl RustTypeMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect every `RustCustomType` binding in the schema, with the runtime
    /// placeholder replaced by `runtime_alias`.
    pub fn from_schema(schema: &Schema, runtime_alias: &str) -> Result<Self> {
        let mut mapper = Self::new();
        for (name, decl) in schema.decls() {
            let target = name.to_string();
            if let Some(custom) = get_annotation::<RustCustomType>(&decl.annotations, &target)? {
                mapper = mapper.with_custom_type(name, custom.path(runtime_alias));
            }
        }
        Ok(mapper)
    }

    pub fn with_custom_type(mut self, name: ScopedName, path: impl Into<String>) -> Self {
        self.custom_types.insert(name, path.into());
        self
    }
}

impl TypeMapper for RustTypeMapper {
    fn language(&self) -> &'static str {
        "rust"
    }

    fn naming(&self) -> &NamingConvention {
        &RUST_NAMING
    }

    fn map_primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::Void => "()",
            Primitive::Bool => "bool",
            Primitive::String => "String",
            Primitive::Int8 => "i8",
            Primitive::Int16 => "i16",
            Primitive::Int32 => "i32",
            Primitive::Int64 => "i64",
            Primitive::Word8 => "u8",
            Primitive::Word16 => "u16",
            Primitive::Word32 => "u32",
            Primitive::Word64 => "u64",
            Primitive::Float => "f32",
            Primitive::Double => "f64",
            Primitive::Json => "serde_json::Value",
        }
        .to_string()
    }

    fn map_vector(&self, elem: &str) -> String {
        format!("std::vec::Vec<{}>", elem)
    }

    fn map_string_map(&self, elem: &str) -> String {
        format!("std::collections::HashMap<String, {}>", elem)
    }

    fn map_nullable(&self, elem: &str) -> String {
        format!("std::option::Option<{}>", elem)
    }

    fn qualify(&self, alias: &str, name: &str) -> String {
        format!("{}::{}", alias, name)
    }

    fn map_reference(&self, name: &ScopedName) -> Option<String> {
        self.custom_types.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use schemagen_codegen::testing::{protoapp_schema, sn};

    use super::*;

    #[test]
    fn test_rust_primitives() {
        let mapper = RustTypeMapper::new();

        assert_eq!(mapper.map_primitive(Primitive::Void), "()");
        assert_eq!(mapper.map_primitive(Primitive::Int8), "i8");
        assert_eq!(mapper.map_primitive(Primitive::Word64), "u64");
        assert_eq!(mapper.map_primitive(Primitive::Float), "f32");
        assert_eq!(mapper.map_primitive(Primitive::Json), "serde_json::Value");
    }

    #[test]
    fn test_rust_containers() {
        let mapper = RustTypeMapper::new();

        assert_eq!(mapper.map_vector("i32"), "std::vec::Vec<i32>");
        assert_eq!(
            mapper.map_string_map("bool"),
            "std::collections::HashMap<String, bool>"
        );
        assert_eq!(mapper.map_nullable("String"), "std::option::Option<String>");
        assert_eq!(mapper.qualify("db", "UserRole"), "db::UserRole");
    }

    #[test]
    fn test_custom_types_from_schema() {
        let mapper = RustTypeMapper::from_schema(&protoapp_schema(), "adlrt").unwrap();

        assert_eq!(
            mapper.map_reference(&sn("common.Instant")).as_deref(),
            Some("adlrt::Instant")
        );
        assert_eq!(
            mapper.map_reference(&sn("common.db.DbKey")).as_deref(),
            Some("crate::adl::custom::DbKey")
        );
        assert!(mapper.map_reference(&sn("protoapp.db.AppUser")).is_none());
    }
}
