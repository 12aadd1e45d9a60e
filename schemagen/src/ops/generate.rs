//! Generate operation - run every configured generator.

use schemagen_ast::Schema;
use schemagen_codegen::language::ArtifactGenerator;
use schemagen_codegen_rust::ColumnSchemaGenerator;
use schemagen_codegen_typescript::{
    ServerEndpointGenerator, ServiceClientGenerator, TableInterfaceGenerator,
};
use schemagen_config::Config;
use schemagen_core::WriteResult;
use tracing::{error, info};

use crate::reports::{ArtifactReport, GenerateReport, Outcome};

/// What to do with each generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write artifacts to disk.
    Write,
    /// Keep the content for display.
    DryRun,
    /// Only report diagnostics and failures.
    Check,
}

/// Build the generators configured in `config`, in config order, with
/// output paths resolved against the config's directory.
pub fn generators(config: &Config) -> Vec<Box<dyn ArtifactGenerator>> {
    let mut generators: Vec<Box<dyn ArtifactGenerator>> = Vec::new();

    if let Some(tables) = &config.tables {
        let mut generator = TableInterfaceGenerator::new(config.resolve(&tables.output));
        if let Some(prefix) = &tables.import_prefix {
            generator = generator.with_import_prefix(prefix.clone());
        }
        generators.push(Box::new(generator));
    }

    if let Some(columns) = &config.columns {
        let mut generator = ColumnSchemaGenerator::new(config.resolve(&columns.output));
        if let Some(alias) = &columns.runtime_alias {
            generator = generator.with_runtime_alias(alias.clone());
        }
        if let Some(module) = &columns.gen_module {
            generator = generator.with_gen_module(module.clone());
        }
        generators.push(Box::new(generator));
    }

    for service in &config.services {
        let mut generator = ServiceClientGenerator::new(
            config.resolve(&service.output),
            service.api_module.clone(),
            service.api_name.clone(),
        );
        if let Some(prefix) = &service.import_prefix {
            generator = generator.with_import_prefix(prefix.clone());
        }
        if let Some(class_name) = &service.class_name {
            generator = generator.with_class_name(class_name.clone());
        }
        generators.push(Box::new(generator));
    }

    for endpoints in &config.endpoints {
        let mut generator = ServerEndpointGenerator::new(
            config.resolve(&endpoints.output),
            endpoints.api_module.clone(),
            endpoints.api_name.clone(),
        );
        if let Some(prefix) = &endpoints.import_prefix {
            generator = generator.with_import_prefix(prefix.clone());
        }
        generators.push(Box::new(generator));
    }

    generators
}

/// Run every configured generator.
///
/// A failing generator is recorded in the report and does not stop the
/// others.
pub fn generate(config: &Config, schema: &Schema, mode: Mode) -> GenerateReport {
    info!(outputs = config.output_count(), ?mode, "generating");
    let artifacts = generators(config)
        .iter()
        .map(|generator| run_one(generator.as_ref(), schema, mode))
        .collect();
    GenerateReport { mode, artifacts }
}

fn run_one(generator: &dyn ArtifactGenerator, schema: &Schema, mode: Mode) -> ArtifactReport {
    let name = generator.name();
    let artifact = match generator.generate(schema) {
        Ok(artifact) => artifact,
        Err(e) => {
            error!(generator = name, "{}", e);
            return ArtifactReport {
                generator: name,
                path: None,
                outcome: Outcome::Failed(format!("{:?}", miette::Report::new(e))),
                diagnostics: Vec::new(),
            };
        }
    };

    let outcome = match mode {
        Mode::Check => Outcome::Checked,
        Mode::DryRun => Outcome::Preview(artifact.content.clone()),
        Mode::Write => match artifact.to_file().write() {
            Ok(WriteResult::Written) => {
                info!(generator = name, path = %artifact.path.display(), "wrote artifact");
                Outcome::Written
            }
            Ok(WriteResult::Unchanged) => Outcome::Unchanged,
            Err(e) => {
                error!(generator = name, path = %artifact.path.display(), "{}", e);
                Outcome::Failed(format!("failed to write: {}", e))
            }
        },
    };

    ArtifactReport {
        generator: name,
        path: Some(artifact.path),
        outcome,
        diagnostics: artifact.diagnostics,
    }
}
