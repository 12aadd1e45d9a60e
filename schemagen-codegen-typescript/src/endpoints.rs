//! Server-side handler interface and router registration for an API struct.

use std::path::PathBuf;

use schemagen_ast::Schema;
use schemagen_codegen::{
    Result,
    builder::{CodeFragment, Renderable},
    generation::{ImportStyle, ImportingHelper},
    language::{ArtifactGenerator, GeneratedArtifact, TypeMapper},
    pipeline::{EmitContext, PhasedEmitter, PhasedGenerator},
    resolve::Primitive,
};
use tracing::debug;

use crate::{
    api::{ApiEntry, load_api},
    ast::{Fn, Import, InterfaceMember, Param, symbol_import},
    code_file::CodeFile,
    type_mapper::TypeScriptTypeMapper,
};

/// Generates an `Endpoints` interface with one handler per HTTP entry and a
/// `registerEndpoints` function wiring the provided handlers to a router.
///
/// Entries are collected the same way as for the service client; GET
/// handlers receive a `null` request.
#[derive(Debug, Clone)]
pub struct ServerEndpointGenerator {
    output: PathBuf,
    api_module: String,
    api_name: String,
    import_prefix: String,
}

impl ServerEndpointGenerator {
    pub fn new(output: impl Into<PathBuf>, api_module: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            api_module: api_module.into(),
            api_name: api_name.into(),
            import_prefix: "@protoapp/adl".to_string(),
        }
    }

    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }
}

impl PhasedGenerator for ServerEndpointGenerator {
    type Entry = ApiEntry;
    type Mapper = TypeScriptTypeMapper;

    fn collect(
        &self,
        entry: &ApiEntry,
        imports: &mut ImportingHelper<TypeScriptTypeMapper>,
        ctx: &mut EmitContext,
    ) -> Result<bool> {
        let Some(http) = &entry.http else {
            ctx.warn(
                &entry.location,
                format!("unrecognized API entry '{}' of type {}", entry.name, entry.type_expr),
            );
            return Ok(false);
        };
        if let Some(request) = &http.request {
            imports.add_type(request)?;
        }
        imports.add_type(&http.response)?;
        Ok(true)
    }

    fn decl(&self, entry: &ApiEntry, imports: &ImportingHelper<TypeScriptTypeMapper>) -> Result<Vec<CodeFragment>> {
        let Some(http) = &entry.http else {
            return Ok(Vec::new());
        };
        let request = match &http.request {
            Some(request) => imports.as_referenced_name(request)?,
            None => imports.mapper().map_primitive(Primitive::Void),
        };
        let response = imports.as_referenced_name(&http.response)?;

        let handler = InterfaceMember::Method {
            name: entry.name.clone(),
            params: vec![
                Param::new("ctx", format!("AContext<{}>", response)),
                Param::new("req", request),
            ],
            returns: "Promise<void>".to_string(),
        };
        Ok(handler.to_fragments())
    }

    fn implementation(
        &self,
        entry: &ApiEntry,
        _imports: &ImportingHelper<TypeScriptTypeMapper>,
    ) -> Result<Vec<CodeFragment>> {
        let name = &entry.name;
        Ok(vec![CodeFragment::block(
            format!("if (h.{}) {{", name),
            vec![CodeFragment::line(format!(
                "addReqHandler(r, RESOLVER, api.{}, h.{}.bind(h));",
                name, name
            ))],
            "}",
        )])
    }
}

impl ArtifactGenerator for ServerEndpointGenerator {
    fn name(&self) -> &'static str {
        "endpoints"
    }

    fn generate(&self, schema: &Schema) -> Result<GeneratedArtifact> {
        let api = load_api(schema, &self.api_module, &self.api_name)?;

        let mut imports = ImportingHelper::new(TypeScriptTypeMapper::new()).with_style(ImportStyle::Named);
        imports.add_type_with_helpers(&api.type_expr(), &["make"])?;
        let output = PhasedEmitter::new(self).run(&api.entries, &mut imports)?;
        debug!(
            api = %api.name,
            entries = output.accepted,
            skipped = output.diagnostics.len(),
            "rendered endpoints"
        );

        let interface = CodeFragment::block("export interface Endpoints {", output.decls, "}");
        let register = Fn::new("registerEndpoints")
            .param(Param::new("h", "Partial<Endpoints>"))
            .param(Param::new("r", "Router"))
            .body_line(format!(
                "const api = {}({{}});",
                imports.helper_name(&api.name, "make")?
            ))
            .body_fragments([CodeFragment::blank()])
            .body_fragments(output.impls);

        let content = CodeFile::new()
            .header("/* eslint-disable @typescript-eslint/no-unused-vars */")
            .imports(
                imports
                    .imports()?
                    .into_iter()
                    .map(|m| symbol_import(&self.import_prefix, &m)),
            )
            .import(
                Import::new("../server/adl-requests")
                    .named("AContext")
                    .named("addReqHandler")
                    .single_quoted(),
            )
            .import(Import::new(self.import_prefix.as_str()).named("RESOLVER").single_quoted())
            .import(Import::new("koa-router").default("Router").single_quoted())
            .add(vec![interface])
            .add(register)
            .render();

        Ok(GeneratedArtifact::new(&self.output, content).with_diagnostics(output.diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use schemagen_codegen::testing::{api_entry, generic, prim, protoapp_schema, reference, with_api_entries};
    use serde_json::json;

    use super::*;

    fn generator() -> ServerEndpointGenerator {
        ServerEndpointGenerator::new("endpoints.ts", "protoapp.apis.ui", "ApiRequests")
    }

    #[test]
    fn test_single_entry_file() {
        let schema = with_api_entries(
            protoapp_schema(),
            vec![api_entry(
                "login",
                generic(
                    "common.http.HttpPost",
                    vec![
                        reference("protoapp.apis.ui.LoginReq"),
                        reference("protoapp.apis.ui.LoginResp"),
                    ],
                ),
                "/login",
                json!("public"),
            )],
        );

        let artifact = generator().generate(&schema).unwrap();
        assert_eq!(
            artifact.content,
            "/* eslint-disable @typescript-eslint/no-unused-vars */\n\
             import { ApiRequests, LoginReq, LoginResp, makeApiRequests } from \"@protoapp/adl/protoapp/apis/ui\";\n\
             import { AContext, addReqHandler } from '../server/adl-requests';\n\
             import { RESOLVER } from '@protoapp/adl';\n\
             import Router from 'koa-router';\n\
             \n\
             export interface Endpoints {\n\
             \x20 login(ctx: AContext<LoginResp>, req: LoginReq): Promise<void>;\n\
             }\n\
             \n\
             export function registerEndpoints(h: Partial<Endpoints>, r: Router) {\n\
             \x20 const api = makeApiRequests({});\n\
             \n\
             \x20 if (h.login) {\n\
             \x20   addReqHandler(r, RESOLVER, api.login, h.login.bind(h));\n\
             \x20 }\n\
             }\n"
        );
    }

    #[test]
    fn test_get_entry_takes_null_request() {
        let schema = with_api_entries(
            protoapp_schema(),
            vec![
                api_entry("version", prim("String"), "/version", json!("public")),
                api_entry(
                    "healthy",
                    generic("common.http.HttpGet", vec![prim("Void")]),
                    "/",
                    json!("public"),
                ),
            ],
        );

        let artifact = generator().generate(&schema).unwrap();
        assert!(artifact
            .content
            .contains("  healthy(ctx: AContext<null>, req: null): Promise<void>;\n"));
        assert!(!artifact.content.contains("h.version"));
        assert_eq!(artifact.diagnostics.len(), 1);
    }
}
