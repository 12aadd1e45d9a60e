//! Import tracking and module alias assignment.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexMap;
use schemagen_ast::{ScopedName, TypeExpr, TypeRef, module_tail};

use crate::{
    error::{CodegenError, Result},
    language::TypeMapper,
    resolve::{DecodedType, Primitive},
};

/// Tracks imported symbols per module.
///
/// Modules keep insertion order; symbols within a module are sorted.
#[derive(Debug, Clone, Default)]
pub struct ImportCollector {
    imports: IndexMap<String, BTreeSet<String>>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol import from a module.
    pub fn add(&mut self, module: &str, symbol: &str) {
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(symbol.to_string());
    }

    fn contains(&self, module: &str, symbol: &str) -> bool {
        self.imports
            .get(module)
            .is_some_and(|symbols| symbols.contains(symbol))
    }

    /// Iterate over all imports in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.imports.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }
}

/// How declarations from other modules are written in the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportStyle {
    /// `alias.Name`, with the module imported under its alias.
    #[default]
    Qualified,
    /// `Name`, with each symbol imported by name. A symbol whose name is
    /// already taken by an earlier module is imported under a suffixed name.
    Named,
}

/// One symbol of a [`ModuleImport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportedSymbol<'a> {
    pub name: &'a str,
    /// The name bound in the output file when it differs from `name`.
    pub rename: Option<&'a str>,
}

/// One imported module with its assigned alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleImport<'a> {
    pub module: &'a str,
    pub alias: &'a str,
    pub symbols: Vec<ImportedSymbol<'a>>,
}

#[derive(Debug, Default)]
struct Resolved {
    aliases: IndexMap<String, String>,
    /// (module, symbol) -> local name, for renamed named imports only.
    renames: HashMap<(String, String), String>,
}

/// Collects the type references of one output file and renders them as
/// they are written after the import block.
///
/// Use in two stages: register every type with `add_*`, call
/// [`resolve_imports`](Self::resolve_imports) once, then ask for names.
/// Each generation run owns its own helper.
pub struct ImportingHelper<M> {
    mapper: M,
    style: ImportStyle,
    local_module: Option<String>,
    collector: ImportCollector,
    resolved: Option<Resolved>,
}

impl<M: TypeMapper> ImportingHelper<M> {
    pub fn new(mapper: M) -> Self {
        Self {
            mapper,
            style: ImportStyle::default(),
            local_module: None,
            collector: ImportCollector::new(),
            resolved: None,
        }
    }

    pub fn with_style(mut self, style: ImportStyle) -> Self {
        self.style = style;
        self
    }

    /// Types declared in `module` are referenced unqualified and never imported.
    pub fn with_local_module(mut self, module: impl Into<String>) -> Self {
        self.local_module = Some(module.into());
        self
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Register a type expression and, recursively, its parameters.
    pub fn add_type(&mut self, te: &TypeExpr) -> Result<()> {
        self.add_type_with_helpers(te, &[])
    }

    /// Register a type expression plus helper symbols named `<prefix><Name>`
    /// from the head's module.
    pub fn add_type_with_helpers(&mut self, te: &TypeExpr, helpers: &[&str]) -> Result<()> {
        self.ensure_open("add_type")?;
        if let TypeRef::Reference(name) = &te.type_ref {
            self.register(name, helpers);
        }
        for p in &te.parameters {
            self.add_type(p)?;
        }
        Ok(())
    }

    /// Register every reference inside a decoded type.
    pub fn add_decoded(&mut self, ty: &DecodedType) -> Result<()> {
        self.ensure_open("add_decoded")?;
        ty.for_each_reference(&mut |r| self.register(&r.name, &[]));
        Ok(())
    }

    fn register(&mut self, name: &ScopedName, helpers: &[&str]) {
        if self.is_local(&name.module_name) || self.mapper.map_reference(name).is_some() {
            return;
        }
        self.collector.add(&name.module_name, &name.name);
        for prefix in helpers {
            self.collector
                .add(&name.module_name, &format!("{}{}", prefix, name.name));
        }
    }

    fn is_local(&self, module: &str) -> bool {
        self.local_module.as_deref() == Some(module)
    }

    fn ensure_open(&self, operation: &str) -> Result<()> {
        if self.is_resolved() {
            return Err(CodegenError::usage(format!(
                "{} called after resolve_imports",
                operation
            )));
        }
        Ok(())
    }

    /// Assign an alias to every registered module, and with
    /// [`ImportStyle::Named`] a local name to every symbol. Must be called
    /// exactly once.
    ///
    /// The first module with a given last segment keeps it; later ones get
    /// the smallest free numeric suffix starting at 2. Colliding symbol
    /// names are suffixed the same way.
    pub fn resolve_imports(&mut self) -> Result<()> {
        self.ensure_open("resolve_imports")?;

        let naming = self.mapper.naming();
        let mut resolved = Resolved::default();
        let mut taken_aliases = HashSet::new();
        let mut taken_symbols = HashSet::new();
        for (module, symbols) in self.collector.iter() {
            let tail = module_tail(module);
            let alias = first_free(&mut taken_aliases, tail, |n| naming.safe_name(n));
            resolved.aliases.insert(module.to_string(), alias);

            if self.style == ImportStyle::Named {
                for symbol in symbols {
                    let local = first_free(&mut taken_symbols, symbol, |n| n.to_string());
                    if local != *symbol {
                        resolved
                            .renames
                            .insert((module.to_string(), symbol.clone()), local);
                    }
                }
            }
        }
        self.resolved = Some(resolved);
        Ok(())
    }

    fn resolved(&self, operation: &str) -> Result<&Resolved> {
        self.resolved.as_ref().ok_or_else(|| {
            CodegenError::usage(format!("{} called before resolve_imports", operation))
        })
    }

    /// The alias assigned to a module.
    pub fn alias(&self, module: &str) -> Option<&str> {
        self.resolved
            .as_ref()
            .and_then(|r| r.aliases.get(module))
            .map(String::as_str)
    }

    /// Imports in first-reference order.
    pub fn imports(&self) -> Result<Vec<ModuleImport<'_>>> {
        let resolved = self.resolved("imports")?;
        Ok(self
            .collector
            .iter()
            .filter_map(|(module, symbols)| {
                resolved.aliases.get(module).map(|alias| ModuleImport {
                    module,
                    alias,
                    symbols: symbols
                        .iter()
                        .map(|name| ImportedSymbol {
                            name,
                            rename: resolved
                                .renames
                                .get(&(module.to_string(), name.clone()))
                                .map(String::as_str),
                        })
                        .collect(),
                })
            })
            .collect())
    }

    /// `symbol` from `module` as written in the output file.
    pub fn qualified_symbol(&self, module: &str, symbol: &str) -> Result<String> {
        let resolved = self.resolved("qualified_symbol")?;
        if self.is_local(module) {
            return Ok(symbol.to_string());
        }
        let alias = resolved.aliases.get(module).ok_or_else(|| {
            CodegenError::usage(format!("module '{}' was never registered", module))
        })?;
        match self.style {
            ImportStyle::Qualified => Ok(self.mapper.qualify(alias, symbol)),
            ImportStyle::Named if self.collector.contains(module, symbol) => Ok(resolved
                .renames
                .get(&(module.to_string(), symbol.to_string()))
                .cloned()
                .unwrap_or_else(|| symbol.to_string())),
            ImportStyle::Named => Err(CodegenError::usage(format!(
                "symbol '{}' was never registered for module '{}'",
                symbol, module
            ))),
        }
    }

    /// A helper symbol registered with [`add_type_with_helpers`](Self::add_type_with_helpers).
    pub fn helper_name(&self, name: &ScopedName, prefix: &str) -> Result<String> {
        self.qualified_symbol(&name.module_name, &format!("{}{}", prefix, name.name))
    }

    fn declaration_name(&self, name: &ScopedName) -> Result<String> {
        match self.mapper.map_reference(name) {
            Some(native) => {
                self.resolved("as_referenced_name")?;
                Ok(native)
            }
            None => self.qualified_symbol(&name.module_name, &name.name),
        }
    }

    /// The name of a type expression as written in the output file.
    ///
    /// Directly nested `Nullable`s render as one.
    pub fn as_referenced_name(&self, te: &TypeExpr) -> Result<String> {
        match &te.type_ref {
            TypeRef::Primitive(name) => {
                let single = || match te.parameters.as_slice() {
                    [inner] => self.as_referenced_name(inner),
                    params => Err(CodegenError::unsupported(format!(
                        "'{}' expects one type argument, {} supplied",
                        name,
                        params.len()
                    ))),
                };
                match name.as_str() {
                    "Vector" => Ok(self.mapper.map_vector(&single()?)),
                    "StringMap" => Ok(self.mapper.map_string_map(&single()?)),
                    "Nullable" if matches!(te.parameters.as_slice(), [inner] if is_nullable(inner)) => {
                        single()
                    }
                    "Nullable" => Ok(self.mapper.map_nullable(&single()?)),
                    _ => match Primitive::from_name(name) {
                        Some(p) if te.parameters.is_empty() => Ok(self.mapper.map_primitive(p)),
                        _ => Err(CodegenError::unsupported(format!("primitive '{}'", te))),
                    },
                }
            }
            TypeRef::TypeParam(name) if te.parameters.is_empty() => Ok(name.clone()),
            TypeRef::TypeParam(name) => Err(CodegenError::unsupported(format!(
                "type parameter '{}' applied to arguments",
                name
            ))),
            TypeRef::Reference(name) => {
                let base = self.declaration_name(name)?;
                let params = te
                    .parameters
                    .iter()
                    .map(|p| self.as_referenced_name(p))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.mapper.apply_params(&base, &params))
            }
        }
    }

    /// The name of a decoded type as written in the output file.
    pub fn decoded_name(&self, ty: &DecodedType) -> Result<String> {
        match ty {
            DecodedType::Primitive(p) => Ok(self.mapper.map_primitive(*p)),
            DecodedType::Vector(inner) => Ok(self.mapper.map_vector(&self.decoded_name(inner)?)),
            DecodedType::StringMap(inner) => {
                Ok(self.mapper.map_string_map(&self.decoded_name(inner)?))
            }
            DecodedType::Nullable(inner) if matches!(**inner, DecodedType::Nullable(_)) => {
                self.decoded_name(inner)
            }
            DecodedType::Nullable(inner) => Ok(self.mapper.map_nullable(&self.decoded_name(inner)?)),
            DecodedType::Reference(r) => {
                let base = self.declaration_name(&r.name)?;
                let params = r
                    .parameters
                    .iter()
                    .map(|p| self.decoded_name(p))
                    .collect::<Result<Vec<_>>>()?;
                Ok(self.mapper.apply_params(&base, &params))
            }
        }
    }
}

fn is_nullable(te: &TypeExpr) -> bool {
    matches!(&te.type_ref, TypeRef::Primitive(name) if name == "Nullable")
}

/// `base` if free, else `base2`, `base3`, ... Marks the result taken.
fn first_free(taken: &mut HashSet<String>, base: &str, make: impl Fn(&str) -> String) -> String {
    let mut name = make(base);
    let mut suffix = 2;
    while taken.contains(&name) {
        name = make(&format!("{}{}", base, suffix));
        suffix += 1;
    }
    taken.insert(name.clone());
    name
}
