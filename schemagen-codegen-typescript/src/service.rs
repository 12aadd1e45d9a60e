//! Typed HTTP client class for an API struct.

use std::path::PathBuf;

use schemagen_ast::Schema;
use schemagen_codegen::{
    Result,
    builder::{CodeFragment, Renderable},
    generation::{ImportStyle, ImportingHelper},
    language::{ArtifactGenerator, GeneratedArtifact},
    pipeline::{EmitContext, PhasedEmitter, PhasedGenerator},
};
use tracing::debug;

use crate::{
    api::{ApiEntry, HttpMethod, HttpRequest, load_api},
    ast::{Fn, Import, Param, module_path, symbol_import},
    code_file::CodeFile,
    naming::TS_NAMING,
    type_mapper::TypeScriptTypeMapper,
};

const CTOR_ARGS: [(&str, &str); 5] = [
    ("Fetcher over HTTP", "http: HttpFetch,"),
    ("Base URL of the API endpoints", "baseUrl: string,"),
    ("Resolver for ADL types", "resolver: DeclResolver,"),
    ("fn to get an auth token", "getAuthToken: ()=>AuthTokens,"),
    (
        "Error handler to allow for cross cutting concerns, e.g. authorization errors",
        "handleError: (error: HttpServiceError) => void",
    ),
];

/// `postLogin`, `getWhoAmI`: the class member holding the request function.
fn slot_name(entry: &ApiEntry, http: &HttpRequest) -> String {
    TS_NAMING.member_name(&format!("{} {}", http.method.prefix(), entry.name))
}

/// Generates a client class extending `HttpServiceBase` with one slot,
/// one constructor initializer and one async method per HTTP entry.
#[derive(Debug, Clone)]
pub struct ServiceClientGenerator {
    output: PathBuf,
    api_module: String,
    api_name: String,
    import_prefix: String,
    class_name: String,
}

impl ServiceClientGenerator {
    pub fn new(output: impl Into<PathBuf>, api_module: impl Into<String>, api_name: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            api_module: api_module.into(),
            api_name: api_name.into(),
            import_prefix: "@/adl-gen".to_string(),
            class_name: "AppService".to_string(),
        }
    }

    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }

    pub fn with_class_name(mut self, name: impl Into<String>) -> Self {
        self.class_name = name.into();
        self
    }

    fn render(&self, schema: &Schema) -> Result<GeneratedArtifact> {
        let api = load_api(schema, &self.api_module, &self.api_name)?;

        let mut imports = ImportingHelper::new(TypeScriptTypeMapper::new()).with_style(ImportStyle::Named);
        imports.add_type_with_helpers(&api.type_expr(), &["sn", "make"])?;
        let output = PhasedEmitter::new(self).run(&api.entries, &mut imports)?;
        debug!(
            class = %self.class_name,
            entries = output.accepted,
            skipped = output.diagnostics.len(),
            "rendered service client"
        );

        let annotated_api = format!(
            "const api = this.annotatedApi({}, {}({{}}));",
            imports.helper_name(&api.name, "sn")?,
            imports.helper_name(&api.name, "make")?
        );
        let mut ctor_body = vec![
            CodeFragment::line("super(http, baseUrl, resolver, getAuthToken, handleError);"),
            CodeFragment::line(annotated_api),
        ];
        ctor_body.extend(output.ctors);

        let ctor_args = CTOR_ARGS
            .iter()
            .flat_map(|(doc, arg)| [CodeFragment::jsdoc(*doc), CodeFragment::line(*arg)])
            .collect();

        let mut class_body = output.decls;
        class_body.push(CodeFragment::line("constructor("));
        class_body.push(CodeFragment::indent(ctor_args));
        class_body.push(CodeFragment::block(") {", ctor_body, "}"));
        class_body.extend(output.impls);

        let mut class = Vec::new();
        if let Some(doc) = &api.doc {
            class.push(CodeFragment::jsdoc(doc.clone()));
        }
        class.push(CodeFragment::block(
            format!("export class {} extends HttpServiceBase {{", self.class_name),
            class_body,
            "};",
        ));

        let content = CodeFile::new()
            .header("/* eslint-disable @typescript-eslint/no-unused-vars */")
            .imports(
                imports
                    .imports()?
                    .into_iter()
                    .map(|m| symbol_import(&self.import_prefix, &m)),
            )
            .import(
                Import::new("./http-service-base")
                    .named("AuthTokens")
                    .named("HttpServiceBase"),
            )
            .import(Import::new("./http-service-error").named("HttpServiceError"))
            .import(Import::new("./types").named("GetFn").named("PostFn"))
            .import(Import::new("./http").named("HttpFetch"))
            .import_group()
            .import(Import::new(module_path(&self.import_prefix, "runtime.adl")).named("DeclResolver"))
            .add(class)
            .render();

        Ok(GeneratedArtifact::new(&self.output, content).with_diagnostics(output.diagnostics))
    }
}

impl PhasedGenerator for ServiceClientGenerator {
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
        let response = imports.as_referenced_name(&http.response)?;
        let slot_type = match &http.request {
            Some(request) => format!("PostFn<{}, {}>", imports.as_referenced_name(request)?, response),
            None => format!("GetFn<{}>", response),
        };

        let mut fragments = Vec::new();
        if let Some(doc) = &entry.doc {
            fragments.push(CodeFragment::jsdoc(doc.clone()));
        }
        fragments.push(CodeFragment::line(format!(
            "private {}: {};",
            slot_name(entry, http),
            slot_type
        )));
        fragments.push(CodeFragment::blank());
        Ok(fragments)
    }

    fn ctor(&self, entry: &ApiEntry, _imports: &ImportingHelper<TypeScriptTypeMapper>) -> Result<Vec<CodeFragment>> {
        let Some(http) = &entry.http else {
            return Ok(Vec::new());
        };
        let factory = match (http.method, http.security.requires_token()) {
            (HttpMethod::Post, false) => "mkPostFn",
            (HttpMethod::Post, true) => "mkAuthPostFn",
            (HttpMethod::Get, false) => "mkGetFn",
            (HttpMethod::Get, true) => "mkAuthGetFn",
        };
        Ok(vec![CodeFragment::line(format!(
            "this.{} = this.{}(api.{});",
            slot_name(entry, http),
            factory,
            entry.name
        ))])
    }

    fn implementation(
        &self,
        entry: &ApiEntry,
        imports: &ImportingHelper<TypeScriptTypeMapper>,
    ) -> Result<Vec<CodeFragment>> {
        let Some(http) = &entry.http else {
            return Ok(Vec::new());
        };
        let slot = slot_name(entry, http);
        let mut method = Fn::method(&entry.name)
            .doc_opt(entry.doc.as_deref())
            .async_()
            .returns(format!("Promise<{}>", imports.as_referenced_name(&http.response)?));
        method = match &http.request {
            Some(request) => method
                .param(Param::new("req", imports.as_referenced_name(request)?))
                .body_line(format!("return this.{}.call(req);", slot)),
            None => method.body_line(format!("return this.{}.call();", slot)),
        };

        let mut fragments = vec![CodeFragment::blank()];
        fragments.extend(method.to_fragments());
        Ok(fragments)
    }
}

impl ArtifactGenerator for ServiceClientGenerator {
    fn name(&self) -> &'static str {
        "service-client"
    }

    fn generate(&self, schema: &Schema) -> Result<GeneratedArtifact> {
        self.render(schema)
    }
}
