//! `schemagen.toml` types and parsing.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use schemagen_ast::Schema;
use serde::Deserialize;
use tracing::debug;

use crate::{
    Error, Result,
    error::SourceContext,
    schema::load_schema,
    validate::ParseContext,
};

/// Default config file name.
pub const CONFIG_FILE: &str = "schemagen.toml";

/// Root of `schemagen.toml`.
///
/// Every output section is optional; `[[services]]` and `[[endpoints]]` may
/// repeat.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub schema: SchemaConfig,

    #[serde(default)]
    pub tables: Option<TablesConfig>,

    #[serde(default)]
    pub columns: Option<ColumnsConfig>,

    #[serde(default)]
    pub services: Vec<ServiceConfig>,

    #[serde(default)]
    pub endpoints: Vec<EndpointsConfig>,

    /// Directory the config was loaded from; relative paths resolve against it.
    #[serde(skip)]
    root: PathBuf,
}

/// `[schema]`: the schema JSON files to load.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    pub files: Vec<PathBuf>,
}

/// `[tables]`: TypeScript row interfaces.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    pub output: PathBuf,
    pub import_prefix: Option<String>,
}

/// `[columns]`: Rust column specifications.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsConfig {
    pub output: PathBuf,
    pub runtime_alias: Option<String>,
    pub gen_module: Option<String>,
}

/// `[[services]]`: a TypeScript client class for one API struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub output: PathBuf,
    pub api_module: String,
    pub api_name: String,
    pub import_prefix: Option<String>,
    pub class_name: Option<String>,
}

/// `[[endpoints]]`: server handler registration for one API struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointsConfig {
    pub output: PathBuf,
    pub api_module: String,
    pub api_name: String,
    pub import_prefix: Option<String>,
}

impl FromStr for Config {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, CONFIG_FILE)
    }
}

impl Config {
    /// Parse a config file; relative paths resolve against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let mut config = parse_config(&content, &path.display().to_string())?;
        config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve relative paths against `root` instead of the config's directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `path` resolved against the config's directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn schema_files(&self) -> Vec<PathBuf> {
        self.schema.files.iter().map(|f| self.resolve(f)).collect()
    }

    /// Load every schema file into one schema.
    pub fn load_schema(&self) -> Result<Schema> {
        load_schema(&self.schema_files())
    }

    /// Number of configured outputs.
    pub fn output_count(&self) -> usize {
        usize::from(self.tables.is_some())
            + usize::from(self.columns.is_some())
            + self.services.len()
            + self.endpoints.len()
    }
}

/// Parse a config from content with the given filename for error reporting.
pub fn parse_config(content: &str, filename: &str) -> Result<Config> {
    let source = SourceContext::new(content, filename);
    let config: Config = toml::from_str(content).map_err(|e| source.parse_error(e))?;
    validate_config(&config, &ParseContext::new(&source))?;
    Ok(config)
}

fn validate_config(config: &Config, ctx: &ParseContext<'_>) -> Result<()> {
    ctx.push("schema").require_items("files", &config.schema.files)?;

    for (i, service) in config.services.iter().enumerate() {
        let ctx = ctx.push("services").push(i.to_string());
        ctx.require("api_module", &service.api_module)?;
        ctx.require("api_name", &service.api_name)?;
    }
    for (i, endpoints) in config.endpoints.iter().enumerate() {
        let ctx = ctx.push("endpoints").push(i.to_string());
        ctx.require("api_module", &endpoints.api_module)?;
        ctx.require("api_name", &endpoints.api_name)?;
    }
    Ok(())
}
