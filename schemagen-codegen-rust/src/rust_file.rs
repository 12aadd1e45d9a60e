//! RustFile abstraction for structured Rust file generation.
//!
//! A file is a header comment, groups of `use` statements separated by
//! blank lines, and body items separated by blank lines.

use schemagen_codegen::builder::{CodeBuilder, CodeFragment, Indent, Renderable};

/// A Rust use statement.
#[derive(Debug, Clone)]
pub struct Use {
    path: String,
    symbols: Vec<String>,
    alias: Option<String>,
}

impl Use {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            symbols: Vec::new(),
            alias: None,
        }
    }

    /// Add a symbol to import from the path.
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbols.push(symbol.into());
        self
    }

    pub fn symbols(mut self, symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Bind the imported path under another name (`use a::b as c;`).
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    fn format(&self) -> String {
        let target = match self.symbols.as_slice() {
            [] => self.path.clone(),
            [single] => format!("{}::{}", self.path, single),
            many => format!("{}::{{{}}}", self.path, many.join(", ")),
        };
        match &self.alias {
            Some(alias) => format!("use {} as {};", target, alias),
            None => format!("use {};", target),
        }
    }
}

impl Renderable for Use {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::line(self.format())]
    }
}

/// A structured representation of a Rust file.
///
/// # Example
///
/// ```ignore
/// let file = RustFile::new()
///     .header("// This file is generated from the schema definition")
///     .use_stmt(Use::new("sea_query").symbols(["Alias", "DynIden"]))
///     .add(my_struct)
///     .add(my_impl)
///     .render();
/// ```
#[derive(Debug, Default)]
pub struct RustFile {
    header: Vec<String>,
    use_groups: Vec<Vec<Use>>,
    body: Vec<Vec<CodeFragment>>,
}

impl RustFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header comment line.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Add a use statement to the current group.
    pub fn use_stmt(mut self, use_stmt: Use) -> Self {
        match self.use_groups.last_mut() {
            Some(group) => group.push(use_stmt),
            None => self.use_groups.push(vec![use_stmt]),
        }
        self
    }

    pub fn use_stmts(self, uses: impl IntoIterator<Item = Use>) -> Self {
        uses.into_iter().fold(self, |file, u| file.use_stmt(u))
    }

    /// Start a new group of use statements.
    pub fn use_group(mut self) -> Self {
        if self.use_groups.last().is_none_or(|g| !g.is_empty()) {
            self.use_groups.push(Vec::new());
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        self.body.extend(nodes.into_iter().map(|n| n.to_fragments()));
        self
    }

    /// Render the file with Rust indentation (4 spaces).
    pub fn render(&self) -> String {
        let mut builder = CodeBuilder::new(Indent::RUST);
        let mut sections = 0;

        if !self.header.is_empty() {
            for line in &self.header {
                builder.push_line(line);
            }
            sections += 1;
        }

        for group in self.use_groups.iter().filter(|g| !g.is_empty()) {
            if sections > 0 {
                builder.push_blank();
            }
            for use_stmt in group {
                builder.emit(use_stmt);
            }
            sections += 1;
        }

        for fragments in &self.body {
            if sections > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            sections += 1;
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.use_groups.iter().all(Vec::is_empty) && self.body.is_empty()
    }
}
