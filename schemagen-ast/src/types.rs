//! Names and type expressions.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A declaration name qualified by its module, e.g. `protoapp.db.AppUser`.
///
/// Equality is structural. Ordering sorts by module first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopedName {
    pub module_name: String,
    pub name: String,
}

impl ScopedName {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            name: name.into(),
        }
    }

    /// Last segment of the module path (`protoapp.db` -> `db`).
    pub fn module_tail(&self) -> &str {
        module_tail(&self.module_name)
    }
}

/// Last segment of a dotted module name.
pub fn module_tail(module: &str) -> &str {
    module.rsplit('.').next().unwrap_or(module)
}

impl fmt::Display for ScopedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module_name, self.name)
    }
}

impl FromStr for ScopedName {
    type Err = String;

    /// Parse `module.path.Name`; the final segment is the declaration name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.rsplit_once('.') {
            Some((module, name)) if !module.is_empty() && !name.is_empty() => {
                Ok(ScopedName::new(module, name))
            }
            _ => Err(format!(
                "'{}' is not a scoped name (expected module.Name)",
                s
            )),
        }
    }
}

/// The head of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    /// A built-in kind such as `Int32`, `Vector` or `Nullable`.
    Primitive(String),
    /// A placeholder bound by the enclosing declaration's type params.
    TypeParam(String),
    /// A reference to another declaration.
    Reference(ScopedName),
}

/// A (possibly generic) type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeExpr {
    pub type_ref: TypeRef,
    #[serde(default)]
    pub parameters: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn new(type_ref: TypeRef, parameters: Vec<TypeExpr>) -> Self {
        Self {
            type_ref,
            parameters,
        }
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        Self::new(TypeRef::Primitive(name.into()), Vec::new())
    }

    pub fn type_param(name: impl Into<String>) -> Self {
        Self::new(TypeRef::TypeParam(name.into()), Vec::new())
    }

    pub fn reference(name: ScopedName) -> Self {
        Self::new(TypeRef::Reference(name), Vec::new())
    }

    /// Replace the parameter list.
    pub fn with_params(mut self, parameters: Vec<TypeExpr>) -> Self {
        self.parameters = parameters;
        self
    }

    /// `Vector<elem>`
    pub fn vector(elem: TypeExpr) -> Self {
        Self::new(TypeRef::Primitive("Vector".to_string()), vec![elem])
    }

    /// `Nullable<elem>`
    pub fn nullable(elem: TypeExpr) -> Self {
        Self::new(TypeRef::Primitive("Nullable".to_string()), vec![elem])
    }

    /// The referenced name, if the head is a reference.
    pub fn scoped_name(&self) -> Option<&ScopedName> {
        match &self.type_ref {
            TypeRef::Reference(sn) => Some(sn),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_ref {
            TypeRef::Primitive(name) | TypeRef::TypeParam(name) => write!(f, "{}", name)?,
            TypeRef::Reference(sn) => write!(f, "{}", sn)?,
        }
        if !self.parameters.is_empty() {
            let params: Vec<String> = self.parameters.iter().map(ToString::to_string).collect();
            write!(f, "<{}>", params.join(", "))?;
        }
        Ok(())
    }
}
