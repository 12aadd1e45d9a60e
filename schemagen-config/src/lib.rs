//! Configuration for schemagen: `schemagen.toml` parsing and schema loading.
//!
//! - [`Config`] - the parsed config with one section per output
//! - [`load_schema`] - schema JSON files into one [`Schema`](schemagen_ast::Schema)
//! - [`Error`] - miette diagnostics pointing into the offending file

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod schema;
mod validate;

pub use config::{
    CONFIG_FILE, ColumnsConfig, Config, EndpointsConfig, SchemaConfig, ServiceConfig, TablesConfig,
    parse_config,
};
pub use error::{Error, Result, SourceContext};
pub use schema::{load_schema, parse_modules};
