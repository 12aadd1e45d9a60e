//! TypeScript back-end for schemagen.
//!
//! This crate renders three kinds of TypeScript artifact from a schema:
//!
//! - [`TableInterfaceGenerator`] - row interfaces for every `DbTable` struct
//!   plus a `Database` interface keyed by table name
//! - [`ServiceClientGenerator`] - an `HttpServiceBase` subclass with one typed
//!   method per HTTP entry of an API struct
//! - [`ServerEndpointGenerator`] - an `Endpoints` handler interface and a
//!   `registerEndpoints` function for the same API struct
//!
//! # Usage
//!
//! ```ignore
//! use schemagen_codegen::language::ArtifactGenerator;
//! use schemagen_codegen_typescript::ServiceClientGenerator;
//!
//! let generator = ServiceClientGenerator::new("src/service/app-service.ts", "protoapp.apis.ui", "ApiRequests");
//! let artifact = generator.generate(&schema)?;
//! ```

mod code_file;
mod endpoints;
mod naming;
mod service;
mod tables;
mod type_mapper;

pub mod api;
pub mod ast;

pub use code_file::CodeFile;
pub use endpoints::ServerEndpointGenerator;
pub use naming::TS_NAMING;
pub use service::ServiceClientGenerator;
pub use tables::TableInterfaceGenerator;
pub use type_mapper::TypeScriptTypeMapper;
