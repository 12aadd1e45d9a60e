//! Modules and the loaded schema graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Annotation, Decl, ScopedName};

/// A schema module: an ordered set of declarations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub decls: IndexMap<String, Decl>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            imports: Vec::new(),
            decls: IndexMap::new(),
            annotations: Vec::new(),
        }
    }

    /// Add a declaration, keeping declaration order.
    pub fn decl(mut self, decl: Decl) -> Self {
        self.decls.insert(decl.name.clone(), decl);
        self
    }
}

/// Every module loaded for one generation run.
///
/// Loaded once and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    modules: IndexMap<String, Module>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modules(modules: impl IntoIterator<Item = Module>) -> Self {
        let mut schema = Self::new();
        for module in modules {
            schema.insert(module);
        }
        schema
    }

    /// Insert a module, replacing any previous module with the same name.
    pub fn insert(&mut self, module: Module) {
        self.modules.insert(module.name.clone(), module);
    }

    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn get(&self, name: &ScopedName) -> Option<&Decl> {
        self.modules
            .get(&name.module_name)
            .and_then(|m| m.decls.get(&name.name))
    }

    /// Modules sorted by name.
    pub fn modules_sorted(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self.modules.values().collect();
        modules.sort_by(|a, b| a.name.cmp(&b.name));
        modules
    }

    /// All declarations: modules sorted by name, declarations in declared order.
    pub fn decls(&self) -> impl Iterator<Item = (ScopedName, &Decl)> {
        self.modules_sorted().into_iter().flat_map(|m| {
            m.decls
                .values()
                .map(move |d| (ScopedName::new(&m.name, &d.name), d))
        })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
