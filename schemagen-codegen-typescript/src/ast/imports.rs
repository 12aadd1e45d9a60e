//! TypeScript import builder.

use schemagen_codegen::{
    builder::{CodeBuilder, CodeFragment, Renderable},
    generation::ModuleImport,
};

/// Builder for TypeScript import statements.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    default: Option<String>,
    namespace: Option<String>,
    named: Vec<String>,
    single_quoted: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            default: None,
            namespace: None,
            named: Vec::new(),
            single_quoted: false,
        }
    }

    /// Import a default export.
    pub fn default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }

    /// Import the whole module under an alias (`import * as alias`).
    pub fn namespace(mut self, alias: impl Into<String>) -> Self {
        self.namespace = Some(alias.into());
        self
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Import a named export under a local name (`name as local`).
    pub fn named_as(mut self, name: impl Into<String>, local: impl Into<String>) -> Self {
        self.named.push(format!("{} as {}", name.into(), local.into()));
        self
    }

    /// Quote the module path with `'` instead of `"`.
    pub fn single_quoted(mut self) -> Self {
        self.single_quoted = true;
        self
    }

    fn statement(&self) -> String {
        let from = if self.single_quoted {
            format!("'{}'", self.from)
        } else {
            format!("\"{}\"", self.from)
        };

        let mut clauses = Vec::new();
        if let Some(def) = &self.default {
            clauses.push(def.clone());
        }
        if let Some(alias) = &self.namespace {
            clauses.push(format!("* as {}", alias));
        }
        if !self.named.is_empty() {
            clauses.push(format!("{{ {} }}", self.named.join(", ")));
        }

        if clauses.is_empty() {
            format!("import {};", from)
        } else {
            format!("import {} from {};", clauses.join(", "), from)
        }
    }

    /// Build the import as a string.
    pub fn build(&self) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.emit(self);
        builder.build()
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.statement())]
    }
}

/// The import path of a schema module: `prefix/` followed by the module
/// name with dots replaced by slashes.
pub fn module_path(prefix: &str, module: &str) -> String {
    let path = module.replace('.', "/");
    if prefix.is_empty() {
        path
    } else if prefix.ends_with('/') {
        format!("{}{}", prefix, path)
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// Named imports of every symbol resolved for a schema module.
pub fn symbol_import(prefix: &str, import: &ModuleImport<'_>) -> Import {
    import
        .symbols
        .iter()
        .fold(Import::new(module_path(prefix, import.module)), |stmt, symbol| {
            match symbol.rename {
                Some(local) => stmt.named_as(symbol.name, local),
                None => stmt.named(symbol.name),
            }
        })
}
