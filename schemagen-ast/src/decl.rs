//! Declarations and annotations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ScopedName, TypeExpr};

/// An annotation attached to a declaration or field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub key: ScopedName,
    #[serde(default)]
    pub value: Value,
}

impl Annotation {
    pub fn new(key: ScopedName, value: Value) -> Self {
        Self { key, value }
    }
}

/// A struct field or union variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub serialized_name: Option<String>,
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub default: Option<Value>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_expr: TypeExpr) -> Self {
        Self {
            name: name.into(),
            serialized_name: None,
            type_expr,
            default: None,
            annotations: Vec::new(),
        }
    }

    pub fn annotated(mut self, key: ScopedName, value: Value) -> Self {
        self.annotations.push(Annotation::new(key, value));
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// A variant carries no payload when its type is `Void`.
    pub fn is_void(&self) -> bool {
        matches!(&self.type_expr.type_ref, crate::TypeRef::Primitive(p) if p == "Void")
            && self.type_expr.parameters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Union {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub fields: Vec<Field>,
}

impl Union {
    /// True when no variant carries a payload.
    pub fn is_enum(&self) -> bool {
        self.fields.iter().all(Field::is_void)
    }
}

/// A type alias body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
}

/// A newtype body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewType {
    #[serde(default)]
    pub type_params: Vec<String>,
    pub type_expr: TypeExpr,
    #[serde(default)]
    pub default: Option<Value>,
}

/// The kind-specific part of a declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeclType {
    #[serde(rename = "struct_")]
    Struct(Struct),
    #[serde(rename = "union_")]
    Union(Union),
    #[serde(rename = "type_")]
    Type(TypeDef),
    #[serde(rename = "newtype_")]
    Newtype(NewType),
}

impl DeclType {
    pub fn type_params(&self) -> &[String] {
        match self {
            DeclType::Struct(s) => &s.type_params,
            DeclType::Union(u) => &u.type_params,
            DeclType::Type(t) => &t.type_params,
            DeclType::Newtype(n) => &n.type_params,
        }
    }
}

/// A named declaration inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    #[serde(rename = "type_")]
    pub type_: DeclType,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Decl {
    pub fn new(name: impl Into<String>, type_: DeclType) -> Self {
        Self {
            name: name.into(),
            type_,
            annotations: Vec::new(),
        }
    }

    pub fn structure(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(
            name,
            DeclType::Struct(Struct {
                type_params: Vec::new(),
                fields,
            }),
        )
    }

    pub fn union(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self::new(
            name,
            DeclType::Union(Union {
                type_params: Vec::new(),
                fields,
            }),
        )
    }

    pub fn alias(name: impl Into<String>, type_params: Vec<String>, type_expr: TypeExpr) -> Self {
        Self::new(
            name,
            DeclType::Type(TypeDef {
                type_params,
                type_expr,
            }),
        )
    }

    pub fn newtype(name: impl Into<String>, type_params: Vec<String>, type_expr: TypeExpr) -> Self {
        Self::new(
            name,
            DeclType::Newtype(NewType {
                type_params,
                type_expr,
                default: None,
            }),
        )
    }

    pub fn annotated(mut self, key: ScopedName, value: Value) -> Self {
        self.annotations.push(Annotation::new(key, value));
        self
    }

    pub fn is_enum(&self) -> bool {
        matches!(&self.type_, DeclType::Union(u) if u.is_enum())
    }

    pub fn type_params(&self) -> &[String] {
        self.type_.type_params()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_like_union() {
        let status = Decl::union(
            "Status",
            vec![
                Field::new("active", TypeExpr::primitive("Void")),
                Field::new("disabled", TypeExpr::primitive("Void")),
            ],
        );
        assert!(status.is_enum());

        let result = Decl::union(
            "Result",
            vec![
                Field::new("ok", TypeExpr::primitive("String")),
                Field::new("none", TypeExpr::primitive("Void")),
            ],
        );
        assert!(!result.is_enum());
    }

    #[test]
    fn test_decl_json_encoding() {
        let json = r#"{
            "name": "IntList",
            "type_": {"type_": {
                "typeParams": [],
                "typeExpr": {"typeRef": {"primitive": "Vector"},
                             "parameters": [{"typeRef": {"primitive": "Int32"}}]}
            }},
            "annotations": [
                {"key": {"moduleName": "sys.annotations", "name": "Doc"}, "value": "A list"}
            ]
        }"#;
        let decl: Decl = serde_json::from_str(json).unwrap();
        assert_eq!(decl.name, "IntList");
        assert!(matches!(decl.type_, DeclType::Type(_)));
        assert_eq!(decl.annotations.len(), 1);
        assert_eq!(decl.annotations[0].value, Value::String("A list".into()));
    }
}
