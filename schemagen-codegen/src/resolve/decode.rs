//! Canonical decoding of type expressions.

use std::collections::HashSet;

use schemagen_ast::{DeclType, ScopedName, TypeExpr, TypeRef};

use super::{AliasExpander, Resolver, annotations::find_annotation, expand::check_arity};
use crate::error::{CodegenError, Result};

/// Upper bound on nested decoding steps before giving up.
pub const MAX_DEPTH: usize = 32;

/// The closed set of scalar primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Void,
    Bool,
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Word8,
    Word16,
    Word32,
    Word64,
    Float,
    Double,
    Json,
}

impl Primitive {
    pub const ALL: [Primitive; 14] = [
        Primitive::Void,
        Primitive::Bool,
        Primitive::String,
        Primitive::Int8,
        Primitive::Int16,
        Primitive::Int32,
        Primitive::Int64,
        Primitive::Word8,
        Primitive::Word16,
        Primitive::Word32,
        Primitive::Word64,
        Primitive::Float,
        Primitive::Double,
        Primitive::Json,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Void => "Void",
            Primitive::Bool => "Bool",
            Primitive::String => "String",
            Primitive::Int8 => "Int8",
            Primitive::Int16 => "Int16",
            Primitive::Int32 => "Int32",
            Primitive::Int64 => "Int64",
            Primitive::Word8 => "Word8",
            Primitive::Word16 => "Word16",
            Primitive::Word32 => "Word32",
            Primitive::Word64 => "Word64",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
            Primitive::Json => "Json",
        }
    }
}

/// The kind of declaration a decoded reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Struct,
    Union,
    /// A union whose variants are all `Void`.
    Enum,
    Newtype,
    /// Only produced for aliases kept nominal by the decoder.
    TypeAlias,
}

/// A nominal reference that survived decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedRef {
    pub name: ScopedName,
    pub kind: DeclKind,
    pub parameters: Vec<DecodedType>,
}

/// Canonical form of a type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodedType {
    Primitive(Primitive),
    Vector(Box<DecodedType>),
    StringMap(Box<DecodedType>),
    Nullable(Box<DecodedType>),
    Reference(DecodedRef),
}

impl DecodedType {
    pub fn reference(&self) -> Option<&DecodedRef> {
        match self {
            DecodedType::Reference(r) => Some(r),
            _ => None,
        }
    }

    /// Visit every reference in the tree, outermost first.
    pub fn for_each_reference<'a>(&'a self, f: &mut dyn FnMut(&'a DecodedRef)) {
        match self {
            DecodedType::Primitive(_) => {}
            DecodedType::Vector(inner)
            | DecodedType::StringMap(inner)
            | DecodedType::Nullable(inner) => inner.for_each_reference(f),
            DecodedType::Reference(r) => {
                f(r);
                for p in &r.parameters {
                    p.for_each_reference(f);
                }
            }
        }
    }
}

/// Whether newtypes are replaced by their underlying type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NewtypePolicy {
    Expand,
    #[default]
    Nominal,
}

/// Decodes type expressions against a resolver.
///
/// Decoding is a pure function of the expression, the resolver and the
/// decoder's options.
pub struct Decoder<'r> {
    resolver: &'r dyn Resolver,
    newtypes: NewtypePolicy,
    nominal: HashSet<ScopedName>,
    custom_type_key: Option<ScopedName>,
}

impl<'r> Decoder<'r> {
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver,
            newtypes: NewtypePolicy::default(),
            nominal: HashSet::new(),
            custom_type_key: None,
        }
    }

    pub fn with_newtypes(mut self, policy: NewtypePolicy) -> Self {
        self.newtypes = policy;
        self
    }

    /// Keep these declarations as references even when they would expand.
    pub fn with_nominal(mut self, names: impl IntoIterator<Item = ScopedName>) -> Self {
        self.nominal.extend(names);
        self
    }

    /// Keep declarations carrying this annotation as references.
    pub fn with_custom_type_key(mut self, key: ScopedName) -> Self {
        self.custom_type_key = Some(key);
        self
    }

    pub fn resolver(&self) -> &'r dyn Resolver {
        self.resolver
    }

    /// An expander sharing this decoder's resolver and newtype policy.
    pub fn expander(&self) -> AliasExpander<'r> {
        AliasExpander::new(self.resolver).with_newtypes(self.newtypes)
    }

    pub fn decode(&self, te: &TypeExpr) -> Result<DecodedType> {
        self.decode_at(te, 0)
    }

    fn decode_at(&self, te: &TypeExpr, depth: usize) -> Result<DecodedType> {
        if depth > MAX_DEPTH {
            return Err(CodegenError::AliasCycle {
                name: te.to_string(),
                limit: MAX_DEPTH,
            });
        }
        match &te.type_ref {
            TypeRef::Primitive(name) => self.decode_primitive(name, &te.parameters, depth),
            TypeRef::TypeParam(name) => Err(CodegenError::unsupported(format!(
                "unbound type parameter '{}'",
                name
            ))),
            TypeRef::Reference(name) => self.decode_reference(te, name, depth),
        }
    }

    fn decode_primitive(&self, name: &str, params: &[TypeExpr], depth: usize) -> Result<DecodedType> {
        match name {
            "Vector" => Ok(DecodedType::Vector(Box::new(
                self.decode_single(name, params, depth)?,
            ))),
            "StringMap" => Ok(DecodedType::StringMap(Box::new(
                self.decode_single(name, params, depth)?,
            ))),
            "Nullable" => match self.decode_single(name, params, depth)? {
                nested @ DecodedType::Nullable(_) => Ok(nested),
                inner => Ok(DecodedType::Nullable(Box::new(inner))),
            },
            _ => {
                let primitive = Primitive::from_name(name)
                    .ok_or_else(|| CodegenError::unsupported(format!("primitive '{}'", name)))?;
                if !params.is_empty() {
                    return Err(CodegenError::unsupported(format!(
                        "'{}' takes no type arguments, {} supplied",
                        name,
                        params.len()
                    )));
                }
                Ok(DecodedType::Primitive(primitive))
            }
        }
    }

    fn decode_single(&self, name: &str, params: &[TypeExpr], depth: usize) -> Result<DecodedType> {
        match params {
            [inner] => self.decode_at(inner, depth + 1),
            _ => Err(CodegenError::unsupported(format!(
                "'{}' expects one type argument, {} supplied",
                name,
                params.len()
            ))),
        }
    }

    fn decode_reference(&self, te: &TypeExpr, name: &ScopedName, depth: usize) -> Result<DecodedType> {
        let decl = self
            .resolver
            .resolve(name)
            .ok_or_else(|| CodegenError::UnresolvedReference { name: name.clone() })?;

        let kind = match &decl.type_ {
            DeclType::Struct(_) => DeclKind::Struct,
            DeclType::Union(u) if u.is_enum() => DeclKind::Enum,
            DeclType::Union(_) => DeclKind::Union,
            DeclType::Type(_) => DeclKind::TypeAlias,
            DeclType::Newtype(_) => DeclKind::Newtype,
        };

        let nominal = self.nominal.contains(name)
            || self
                .custom_type_key
                .as_ref()
                .is_some_and(|key| find_annotation(key, &decl.annotations).is_some());
        if !nominal && let Some(expanded) = self.expander().expand_step(te)? {
            return self.decode_at(&expanded, depth + 1);
        }

        check_arity(name, decl.type_params().len(), te.parameters.len())?;
        let parameters = te
            .parameters
            .iter()
            .map(|p| self.decode_at(p, depth + 1))
            .collect::<Result<Vec<_>>>()?;

        Ok(DecodedType::Reference(DecodedRef {
            name: name.clone(),
            kind,
            parameters,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{generic, prim, protoapp_schema, reference, sn};

    fn prim_type(p: Primitive) -> DecodedType {
        DecodedType::Primitive(p)
    }

    #[test]
    fn test_primitives_decode_purely() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        for p in Primitive::ALL {
            let te = prim(p.name());
            let first = decoder.decode(&te).unwrap();
            let second = decoder.decode(&te).unwrap();
            assert_eq!(first, prim_type(p));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_unsupported_primitives_are_rejected() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        for name in ["ByteVector", "TypeToken", "Int128"] {
            let te = prim(name).with_params(if name == "TypeToken" {
                vec![prim("String")]
            } else {
                vec![]
            });
            let err = decoder.decode(&te).unwrap_err();
            assert!(matches!(err, CodegenError::UnsupportedTypeKind { .. }), "{name}");
        }
        let err = decoder.decode(&TypeExpr::type_param("T")).unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedTypeKind { .. }));
    }

    #[test]
    fn test_container_arity_is_checked() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let err = decoder
            .decode(&prim("Vector").with_params(vec![prim("Int32"), prim("Int32")]))
            .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedTypeKind { .. }));
    }

    #[test]
    fn test_enum_decodes_to_reference() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let decoded = decoder.decode(&reference("protoapp.db.UserRole")).unwrap();
        assert_eq!(
            decoded,
            DecodedType::Reference(DecodedRef {
                name: sn("protoapp.db.UserRole"),
                kind: DeclKind::Enum,
                parameters: vec![],
            })
        );
    }

    #[test]
    fn test_alias_decodes_after_expansion() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let decoded = decoder.decode(&reference("protoapp.db.IntList")).unwrap();
        assert_eq!(decoded, DecodedType::Vector(Box::new(prim_type(Primitive::Int32))));
    }

    #[test]
    fn test_expand_then_decode_is_equivalent() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);
        let expander = decoder.expander();

        for te in [
            reference("protoapp.db.IntList"),
            reference("protoapp.db.AppUserId"),
            generic("common.db.WithId", vec![reference("protoapp.db.AppUserId"), reference("protoapp.db.AppUser")]),
            TypeExpr::vector(reference("protoapp.db.IntList")),
        ] {
            let expanded = expander.expand(&te).unwrap();
            assert_eq!(decoder.decode(&te).unwrap(), decoder.decode(&expanded).unwrap());
        }
    }

    #[test]
    fn test_nested_nullable_collapses() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let te = TypeExpr::nullable(TypeExpr::nullable(prim("String")));
        assert_eq!(
            decoder.decode(&te).unwrap(),
            DecodedType::Nullable(Box::new(prim_type(Primitive::String)))
        );
    }

    #[test]
    fn test_newtype_policy() {
        let schema = protoapp_schema();
        let te = reference("common.Instant");

        let nominal = Decoder::new(&schema).decode(&te).unwrap();
        assert_eq!(
            nominal.reference().map(|r| r.kind),
            Some(DeclKind::Newtype)
        );

        let expanded = Decoder::new(&schema)
            .with_newtypes(NewtypePolicy::Expand)
            .decode(&te)
            .unwrap();
        assert_eq!(expanded, prim_type(Primitive::Int64));

        let pinned = Decoder::new(&schema)
            .with_newtypes(NewtypePolicy::Expand)
            .with_nominal([sn("common.Instant")])
            .decode(&te)
            .unwrap();
        assert_eq!(pinned, nominal);
    }

    #[test]
    fn test_custom_type_key_keeps_reference() {
        let schema = protoapp_schema();
        let decoded = Decoder::new(&schema)
            .with_newtypes(NewtypePolicy::Expand)
            .with_custom_type_key(sn("adlc.config.rust.RustCustomType"))
            .decode(&reference("protoapp.db.AppUserId"))
            .unwrap();
        assert_eq!(
            decoded,
            DecodedType::Reference(DecodedRef {
                name: sn("common.db.DbKey"),
                kind: DeclKind::Newtype,
                parameters: vec![DecodedType::Reference(DecodedRef {
                    name: sn("protoapp.db.AppUser"),
                    kind: DeclKind::Struct,
                    parameters: vec![],
                })],
            })
        );
    }

    #[test]
    fn test_generic_struct_parameters_are_decoded() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema).with_newtypes(NewtypePolicy::Expand);

        let te = generic("protoapp.apis.ui.Paginated", vec![reference("protoapp.db.AppUserId")]);
        let decoded = decoder.decode(&te).unwrap();
        assert_eq!(
            decoded,
            DecodedType::Reference(DecodedRef {
                name: sn("protoapp.apis.ui.Paginated"),
                kind: DeclKind::Struct,
                parameters: vec![prim_type(Primitive::String)],
            })
        );
    }

    #[test]
    fn test_missing_struct_arguments() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let err = decoder
            .decode(&reference("protoapp.apis.ui.Paginated"))
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::PartialApplication { expected: 1, supplied: 0, .. }
        ));
    }

    #[test]
    fn test_extra_type_arguments_are_rejected() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);

        let te = generic(
            "protoapp.apis.ui.Paginated",
            vec![prim("String"), prim("Int32"), prim("Bool")],
        );
        assert!(matches!(
            decoder.decode(&te).unwrap_err(),
            CodegenError::UnsupportedTypeKind { .. }
        ));

        let alias = generic("protoapp.db.AppUserId", vec![prim("String")]);
        assert!(matches!(
            decoder.decode(&alias).unwrap_err(),
            CodegenError::UnsupportedTypeKind { .. }
        ));
    }

    #[test]
    fn test_unresolved_reference() {
        let schema = protoapp_schema();
        let err = Decoder::new(&schema)
            .decode(&reference("protoapp.db.Nope"))
            .unwrap_err();
        assert!(matches!(
            err,
            CodegenError::UnresolvedReference { ref name } if *name == sn("protoapp.db.Nope")
        ));
    }

    #[test]
    fn test_self_referential_alias_terminates() {
        let schema = schemagen_ast::Schema::from_modules([schemagen_ast::Module::new("m").decl(
            schemagen_ast::Decl::alias("Rec", vec![], TypeExpr::vector(reference("m.Rec"))),
        )]);
        let err = Decoder::new(&schema).decode(&reference("m.Rec")).unwrap_err();
        assert!(matches!(err, CodegenError::AliasCycle { limit: MAX_DEPTH, .. }));
    }

    #[test]
    fn test_for_each_reference_order() {
        let schema = protoapp_schema();
        let decoded = Decoder::new(&schema)
            .decode(&generic(
                "common.db.WithId",
                vec![reference("protoapp.db.AppUserId"), reference("protoapp.db.AppUser")],
            ))
            .unwrap();
        let mut names = Vec::new();
        decoded.for_each_reference(&mut |r| names.push(r.name.to_string()));
        assert_eq!(
            names,
            vec!["common.db.WithId", "common.db.DbKey", "protoapp.db.AppUser", "protoapp.db.AppUser"]
        );
    }
}
