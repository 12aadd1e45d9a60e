//! Head expansion of type aliases and newtypes.

use schemagen_ast::{DeclType, ScopedName, TypeExpr, TypeRef};

use super::{NewtypePolicy, Resolver};
use crate::error::{CodegenError, Result};

/// Upper bound on consecutive head expansions.
pub const MAX_EXPANSION_DEPTH: usize = 32;

/// Expands the head of a type expression while it names a type alias, or a
/// newtype when the policy says so.
///
/// Nested parameters are left untouched; the decoder expands them as it
/// recurses.
#[derive(Clone, Copy)]
pub struct AliasExpander<'r> {
    resolver: &'r dyn Resolver,
    newtypes: NewtypePolicy,
}

impl<'r> AliasExpander<'r> {
    /// An expander for type aliases only.
    pub fn new(resolver: &'r dyn Resolver) -> Self {
        Self {
            resolver,
            newtypes: NewtypePolicy::Nominal,
        }
    }

    pub fn with_newtypes(mut self, policy: NewtypePolicy) -> Self {
        self.newtypes = policy;
        self
    }

    /// Expand the head until it is no longer an alias.
    ///
    /// Returns the input unchanged when the head is not expandable.
    pub fn expand(&self, te: &TypeExpr) -> Result<TypeExpr> {
        let mut current = te.clone();
        for _ in 0..MAX_EXPANSION_DEPTH {
            match self.expand_step(&current)? {
                Some(next) => current = next,
                None => return Ok(current),
            }
        }
        if self.expand_step(&current)?.is_some() {
            return Err(CodegenError::AliasCycle {
                name: te.to_string(),
                limit: MAX_EXPANSION_DEPTH,
            });
        }
        Ok(current)
    }

    /// Expand the head once, or `None` if it is not an alias.
    pub fn expand_step(&self, te: &TypeExpr) -> Result<Option<TypeExpr>> {
        let Some(name) = te.scoped_name() else {
            return Ok(None);
        };
        let decl = self
            .resolver
            .resolve(name)
            .ok_or_else(|| CodegenError::UnresolvedReference { name: name.clone() })?;

        let (type_params, body) = match &decl.type_ {
            DeclType::Type(alias) => (&alias.type_params, &alias.type_expr),
            DeclType::Newtype(newtype) if self.newtypes == NewtypePolicy::Expand => {
                (&newtype.type_params, &newtype.type_expr)
            }
            _ => return Ok(None),
        };
        check_arity(name, type_params.len(), te.parameters.len())?;
        substitute(name, type_params, &te.parameters, body).map(Some)
    }
}

/// Fail unless `supplied` type arguments match the `expected` count declared
/// by `name`.
pub(crate) fn check_arity(name: &ScopedName, expected: usize, supplied: usize) -> Result<()> {
    if supplied < expected {
        return Err(CodegenError::PartialApplication {
            name: name.clone(),
            expected,
            supplied,
        });
    }
    if supplied > expected {
        return Err(CodegenError::unsupported(format!(
            "'{}' takes {} type argument(s), {} supplied",
            name, expected, supplied
        )));
    }
    Ok(())
}

/// Replace the declaration's type params in `body` with `args`, by position.
fn substitute(
    name: &ScopedName,
    type_params: &[String],
    args: &[TypeExpr],
    body: &TypeExpr,
) -> Result<TypeExpr> {
    if let TypeRef::TypeParam(param) = &body.type_ref
        && let Some(index) = type_params.iter().position(|p| p == param)
    {
        if !body.parameters.is_empty() {
            return Err(CodegenError::unsupported(format!(
                "type parameter '{}' of '{}' is applied to arguments",
                param, name
            )));
        }
        return args
            .get(index)
            .cloned()
            .ok_or_else(|| CodegenError::PartialApplication {
                name: name.clone(),
                expected: type_params.len(),
                supplied: args.len(),
            });
    }

    let parameters = body
        .parameters
        .iter()
        .map(|p| substitute(name, type_params, args, p))
        .collect::<Result<Vec<_>>>()?;
    Ok(TypeExpr::new(body.type_ref.clone(), parameters))
}
