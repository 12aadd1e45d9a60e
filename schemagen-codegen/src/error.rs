//! Errors raised while resolving types and emitting code.

use miette::Diagnostic;
use schemagen_ast::ScopedName;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

/// A fatal error for the artifact being generated.
#[derive(Debug, Error, Diagnostic)]
pub enum CodegenError {
    #[error("unresolved reference '{name}'")]
    #[diagnostic(
        code(schemagen::unresolved_reference),
        help("check that the module declaring '{name}' is listed in [schema] files")
    )]
    UnresolvedReference { name: ScopedName },

    #[error("expansion of '{name}' exceeded {limit} steps")]
    #[diagnostic(
        code(schemagen::alias_cycle),
        help("type aliases or newtypes probably refer to each other in a cycle")
    )]
    AliasCycle { name: String, limit: usize },

    #[error("'{name}' expects {expected} type argument(s), {supplied} supplied")]
    #[diagnostic(code(schemagen::partial_application))]
    PartialApplication {
        name: ScopedName,
        expected: usize,
        supplied: usize,
    },

    #[error("unsupported type kind: {kind}")]
    #[diagnostic(code(schemagen::unsupported_type))]
    UnsupportedTypeKind { kind: String },

    #[error("missing annotation '{key}' on {target}")]
    #[diagnostic(code(schemagen::missing_annotation))]
    MissingAnnotation { key: ScopedName, target: String },

    #[error("invalid annotation '{key}' on {target}: {message}")]
    #[diagnostic(code(schemagen::invalid_annotation))]
    InvalidAnnotation {
        key: ScopedName,
        target: String,
        message: String,
    },

    #[error("importing helper misuse: {message}")]
    #[diagnostic(code(schemagen::importing_helper))]
    ImportingHelperUsage { message: String },
}

impl CodegenError {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        CodegenError::UnsupportedTypeKind { kind: kind.into() }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        CodegenError::ImportingHelperUsage {
            message: message.into(),
        }
    }
}
