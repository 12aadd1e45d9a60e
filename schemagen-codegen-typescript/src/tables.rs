//! Row interfaces for every database table.

use std::path::PathBuf;

use schemagen_ast::Schema;
use schemagen_codegen::{
    Result,
    generation::ImportingHelper,
    language::{ArtifactGenerator, GeneratedArtifact, TypeMapper},
    resolve::{Decoder, NewtypePolicy, ResolvedField, common_instant, resolve_field, table_decls},
};
use schemagen_core::to_pascal_case;
use tracing::debug;

use crate::{
    ast::{Import, Interface, module_path},
    code_file::CodeFile,
    type_mapper::TypeScriptTypeMapper,
};

/// Emits one `interface <Table>Table` per table plus an exported
/// `Database` interface keyed by table name.
///
/// Newtypes and aliases are expanded to their underlying types; enums and
/// structs are referenced through namespace imports.
#[derive(Debug, Clone)]
pub struct TableInterfaceGenerator {
    output: PathBuf,
    import_prefix: String,
}

impl TableInterfaceGenerator {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            import_prefix: "./".to_string(),
        }
    }

    /// Prefix of the generated module paths (default `./`).
    pub fn with_import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = prefix.into();
        self
    }

    /// Render the file contents.
    pub fn render(&self, schema: &Schema) -> Result<String> {
        let tables = table_decls(schema)?;
        let decoder = Decoder::new(schema)
            .with_newtypes(NewtypePolicy::Expand)
            .with_nominal([common_instant()]);
        let mut imports = ImportingHelper::new(TypeScriptTypeMapper::for_tables());

        let mut resolved: Vec<Vec<ResolvedField>> = Vec::with_capacity(tables.len());
        for table in &tables {
            let fields = table
                .fields
                .iter()
                .map(|field| resolve_field(&decoder, &table.name, field))
                .collect::<Result<Vec<_>>>()?;
            for field in &fields {
                imports.add_decoded(&field.decoded)?;
            }
            resolved.push(fields);
        }
        imports.resolve_imports()?;

        let mut database = Interface::new("Database");
        let mut interfaces = Vec::with_capacity(tables.len());
        for (table, fields) in tables.iter().zip(&resolved) {
            let table_name = table.table_name();
            let mut interface = Interface::new(format!("{}Table", to_pascal_case(&table_name))).private();

            let has_id_column = fields.iter().any(|f| f.column_name() == "id");
            if table.annotation.with_id_primary_key && !has_id_column {
                interface = interface.field("id", "string");
            }
            for field in fields {
                let mut ty = imports.decoded_name(&field.decoded)?;
                if field.nullable {
                    ty = imports.mapper().map_nullable(&ty);
                }
                interface = interface.field(field.column_name(), ty);
            }

            database = database.field(table_name, interface.name().to_string());
            interfaces.push(interface);
        }
        debug!(tables = interfaces.len(), "rendered table interfaces");

        let file = CodeFile::new()
            .imports(
                imports
                    .imports()?
                    .into_iter()
                    .map(|m| Import::new(module_path(&self.import_prefix, m.module)).namespace(m.alias)),
            )
            .add_all(interfaces)
            .add(database);
        Ok(file.render())
    }
}

impl ArtifactGenerator for TableInterfaceGenerator {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn generate(&self, schema: &Schema) -> Result<GeneratedArtifact> {
        Ok(GeneratedArtifact::new(&self.output, self.render(schema)?))
    }
}

#[cfg(test)]
mod tests {
    use schemagen_ast::{Decl, Field, Module, TypeExpr};
    use schemagen_codegen::testing::sn;
    use serde_json::{Value, json};

    use super::*;

    fn users_schema(with_id: bool) -> Schema {
        Schema::from_modules([Module::new("app").decl(
            Decl::structure(
                "User",
                vec![
                    Field::new("id", TypeExpr::primitive("String"))
                        .annotated(sn("common.db.DbPrimaryKey"), Value::Null),
                    Field::new("email", TypeExpr::primitive("String")),
                ],
            )
            .annotated(sn("common.db.DbTable"), json!({"withIdPrimaryKey": with_id})),
        )])
    }

    #[test]
    fn test_id_primary_key_table() {
        let code = TableInterfaceGenerator::new("db.ts")
            .render(&users_schema(true))
            .unwrap();
        assert_eq!(
            code,
            "interface UserTable {\n  id: string;\n  email: string;\n}\n\n\
             export interface Database {\n  user: UserTable;\n}\n"
        );
    }

    #[test]
    fn test_synthetic_id_column() {
        let schema = Schema::from_modules([Module::new("app").decl(
            Decl::structure("Tag", vec![Field::new("label", TypeExpr::primitive("String"))])
                .annotated(sn("common.db.DbTable"), json!({"withIdPrimaryKey": true})),
        )]);
        let code = TableInterfaceGenerator::new("db.ts").render(&schema).unwrap();
        assert!(code.starts_with("interface TagTable {\n  id: string;\n  label: string;\n}\n"));
    }

    #[test]
    fn test_artifact_path() {
        let artifact = TableInterfaceGenerator::new("ts/adl-gen/database.ts")
            .generate(&users_schema(false))
            .unwrap();
        assert_eq!(artifact.path, PathBuf::from("ts/adl-gen/database.ts"));
        assert!(artifact.diagnostics.is_empty());
        assert!(artifact.content.contains("  id: string;\n  email: string;\n"));
    }
}
