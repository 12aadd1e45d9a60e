//! sea-query column specifications for every database table.

use std::path::PathBuf;

use schemagen_ast::{Schema, ScopedName};
use schemagen_codegen::{
    Result,
    generation::{ImportingHelper, ModuleImport},
    language::{ArtifactGenerator, GeneratedArtifact, TypeMapper},
    resolve::{
        DeclKind, DecodedRef, DecodedType, Decoder, ResolvedField, TableDecl,
        annotations::{AnnotationValue, RustCustomType, doc_comment},
        resolve_field, table_decls,
    },
};
use tracing::debug;

use crate::{
    ast::{Fn, Impl, Struct},
    naming::RUST_NAMING,
    rust_file::{RustFile, Use},
    type_mapper::RustTypeMapper,
};

const HEADER: &str = "// This file is generated from the schema definition";

/// Used for primary keys when the schema has no binding for `common.db.DbKey`.
const DEFAULT_DB_KEY: &str = "crate::adl::custom::DbKey";

fn db_key() -> ScopedName {
    ScopedName::new("common.db", "DbKey")
}

/// Emits a unit struct per table with `table_str()`, `table()` and one
/// `ColumnSpec<T>` accessor per column.
///
/// Newtypes stay nominal. Declarations bound with `RustCustomType` render as
/// their bound path; everything else is referenced through a `use` of its
/// generated module.
#[derive(Debug, Clone)]
pub struct ColumnSchemaGenerator {
    output: PathBuf,
    runtime_module: String,
    runtime_alias: String,
    gen_module: String,
}

impl ColumnSchemaGenerator {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            runtime_module: "crate::adl::rt".to_string(),
            runtime_alias: "adlrt".to_string(),
            gen_module: "crate::adl::gen".to_string(),
        }
    }

    /// Alias of the runtime module, substituted into custom type paths.
    pub fn with_runtime_alias(mut self, alias: impl Into<String>) -> Self {
        self.runtime_alias = alias.into();
        self
    }

    /// Root path of the generated schema types (default `crate::adl::gen`).
    pub fn with_gen_module(mut self, module: impl Into<String>) -> Self {
        self.gen_module = module.into();
        self
    }

    /// `crate::adl::gen::protoapp::db`, aliased when the tail is taken.
    fn module_use(&self, import: &ModuleImport<'_>) -> Use {
        let segments: Vec<String> = import
            .module
            .split('.')
            .map(|segment| RUST_NAMING.safe_name(segment))
            .collect();
        let path = format!("{}::{}", self.gen_module, segments.join("::"));
        let stmt = Use::new(path);
        if segments.last().map(String::as_str) == Some(import.alias) {
            stmt
        } else {
            stmt.alias(import.alias)
        }
    }

    /// Render the file contents.
    pub fn render(&self, schema: &Schema) -> Result<String> {
        let tables = table_decls(schema)?;
        let mapper = RustTypeMapper::from_schema(schema, &self.runtime_alias)?;
        let key_path = mapper
            .map_reference(&db_key())
            .unwrap_or_else(|| DEFAULT_DB_KEY.to_string());
        let decoder = Decoder::new(schema).with_custom_type_key(RustCustomType::key());
        let mut imports = ImportingHelper::new(mapper);

        let mut resolved: Vec<(DecodedType, Vec<ResolvedField>)> = Vec::with_capacity(tables.len());
        for table in &tables {
            let row = DecodedType::Reference(DecodedRef {
                name: table.name.clone(),
                kind: DeclKind::Struct,
                parameters: Vec::new(),
            });
            imports.add_decoded(&row)?;

            let fields = table
                .fields
                .iter()
                .map(|field| resolve_field(&decoder, &table.name, field))
                .collect::<Result<Vec<_>>>()?;
            for field in fields.iter().filter(|f| !f.primary_key) {
                imports.add_decoded(&field.decoded)?;
            }
            resolved.push((row, fields));
        }
        imports.resolve_imports()?;

        let mut items = Vec::with_capacity(tables.len());
        for (table, (row, fields)) in tables.iter().zip(&resolved) {
            let key_type = format!("{}<{}>", key_path, imports.decoded_name(row)?);
            items.push(self.table_items(table, fields, &key_type, &imports)?);
        }
        debug!(tables = items.len(), "rendered column schema");

        let file = RustFile::new()
            .header(HEADER)
            .use_stmt(Use::new("super::types").symbol("ColumnSpec"))
            .use_stmt(Use::new("sea_query").symbols(["Alias", "DynIden", "IntoIden"]))
            .use_group()
            .use_stmt(Use::new(self.runtime_module.as_str()).alias(self.runtime_alias.as_str()))
            .use_stmts(imports.imports()?.iter().map(|m| self.module_use(m)));

        let file = items
            .into_iter()
            .fold(file, |file, (unit, accessors)| file.add(unit).add(accessors));
        Ok(file.render())
    }

    fn table_items(
        &self,
        table: &TableDecl<'_>,
        fields: &[ResolvedField],
        key_type: &str,
        imports: &ImportingHelper<RustTypeMapper>,
    ) -> Result<(Struct, Impl)> {
        let table_name = table.table_name();
        let struct_name = RUST_NAMING.type_name(&table_name);
        let doc = doc_comment(&table.decl.annotations, &table.name.to_string())?;

        let mut methods = vec![
            Fn::new("table_str")
                .returns("&'static str")
                .body_line(format!("\"{}\"", table_name)),
            Fn::new("table")
                .returns("DynIden")
                .body_line("Alias::new(Self::table_str()).into_iden()"),
        ];

        let has_id_column = fields.iter().any(|f| f.column_name() == "id");
        if table.annotation.with_id_primary_key && !has_id_column {
            methods.push(column_accessor("id", "id", key_type, None));
        }
        for field in fields {
            let ty = if field.primary_key {
                key_type.to_string()
            } else {
                let ty = imports.decoded_name(&field.decoded)?;
                if field.nullable {
                    imports.mapper().map_nullable(&ty)
                } else {
                    ty
                }
            };
            methods.push(column_accessor(
                &RUST_NAMING.member_name(&field.name),
                &field.column_name(),
                &ty,
                field.doc.as_deref(),
            ));
        }

        Ok((
            Struct::new(struct_name.as_str()).doc_opt(doc.as_deref()),
            Impl::new(struct_name).methods(methods),
        ))
    }
}

fn column_accessor(name: &str, column: &str, ty: &str, doc: Option<&str>) -> Fn {
    Fn::new(name)
        .doc_opt(doc)
        .returns(format!("ColumnSpec<{}>", ty))
        .body_line(format!("ColumnSpec::new(Self::table_str(), \"{}\")", column))
}

impl ArtifactGenerator for ColumnSchemaGenerator {
    fn name(&self) -> &'static str {
        "columns"
    }

    fn generate(&self, schema: &Schema) -> Result<GeneratedArtifact> {
        Ok(GeneratedArtifact::new(&self.output, self.render(schema)?))
    }
}
