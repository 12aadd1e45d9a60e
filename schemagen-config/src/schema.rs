//! Schema JSON loading.

use std::{collections::HashMap, path::{Path, PathBuf}};

use schemagen_ast::{Module, Schema};
use tracing::debug;

use crate::{Error, Result, error::SourceContext};

/// Parse one schema file: a module object or an array of modules.
pub fn parse_modules(content: &str, filename: &str) -> Result<Vec<Module>> {
    let source = SourceContext::new(content, filename);
    if content.trim_start().starts_with('[') {
        serde_json::from_str(content).map_err(|e| source.json_error(e))
    } else {
        serde_json::from_str(content)
            .map(|module| vec![module])
            .map_err(|e| source.json_error(e))
    }
}

/// Load schema files in order. A module defined in two files is an error.
pub fn load_schema(paths: &[PathBuf]) -> Result<Schema> {
    let mut schema = Schema::new();
    let mut origins: HashMap<String, &Path> = HashMap::new();

    for path in paths {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();
        let modules = parse_modules(&content, &filename)?;
        debug!(path = %filename, modules = modules.len(), "loaded schema file");

        for module in modules {
            if let Some(first) = origins.insert(module.name.clone(), path) {
                return Err(SourceContext::new(content, filename).validation_error(format!(
                    "module '{}' is already defined in '{}'",
                    module.name,
                    first.display()
                )));
            }
            schema.insert(module);
        }
    }
    Ok(schema)
}
