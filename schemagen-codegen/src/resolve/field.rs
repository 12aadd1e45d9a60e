//! Table discovery and field resolution.

use schemagen_ast::{Decl, DeclType, Field, Schema, ScopedName};
use schemagen_core::to_snake_case;

use super::{
    DecodedType, Decoder,
    annotations::{
        AnnotationValue, DbColumnName, DbPrimaryKey, DbTable, doc_comment, find_annotation, get_annotation,
        require_annotation,
    },
    sys_maybe,
};
use crate::error::{CodegenError, Result};

/// A struct annotated as a database table.
#[derive(Debug, Clone)]
pub struct TableDecl<'s> {
    pub name: ScopedName,
    pub decl: &'s Decl,
    pub fields: &'s [Field],
    pub annotation: DbTable,
}

impl<'s> TableDecl<'s> {
    /// Wrap a declaration that must be a `DbTable` annotated, non-generic struct.
    pub fn new(name: ScopedName, decl: &'s Decl) -> Result<Self> {
        let target = name.to_string();
        let annotation = require_annotation::<DbTable>(&decl.annotations, &target)?;
        let fields = match &decl.type_ {
            DeclType::Struct(s) if s.type_params.is_empty() => &s.fields,
            _ => {
                return Err(CodegenError::InvalidAnnotation {
                    key: DbTable::key(),
                    target,
                    message: "tables must be non-generic structs".to_string(),
                });
            }
        };
        Ok(TableDecl {
            name,
            decl,
            fields,
            annotation,
        })
    }

    /// The table name: the annotation's override or the snake-cased struct name.
    pub fn table_name(&self) -> String {
        self.annotation
            .table_name
            .clone()
            .unwrap_or_else(|| to_snake_case(&self.decl.name))
    }
}

/// Every table in the schema, modules sorted by name and declarations in
/// declared order.
pub fn table_decls(schema: &Schema) -> Result<Vec<TableDecl<'_>>> {
    schema
        .decls()
        .filter(|(_, decl)| find_annotation(&DbTable::key(), &decl.annotations).is_some())
        .map(|(name, decl)| TableDecl::new(name, decl))
        .collect()
}

/// A struct field decoded for emission.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub column_override: Option<String>,
    /// The field type with any nullable wrappers removed.
    pub decoded: DecodedType,
    pub nullable: bool,
    pub primary_key: bool,
    pub doc: Option<String>,
}

impl ResolvedField {
    pub fn column_name(&self) -> String {
        self.column_override
            .clone()
            .unwrap_or_else(|| to_snake_case(&self.name))
    }
}

/// Decode a field of `owner`, collapsing `Nullable` and `sys.types.Maybe`
/// wrappers into the `nullable` flag.
pub fn resolve_field(decoder: &Decoder<'_>, owner: &ScopedName, field: &Field) -> Result<ResolvedField> {
    let target = format!("{}.{}", owner, field.name);
    let maybe = sys_maybe();

    let mut decoded = decoder.decode(&field.type_expr)?;
    let mut nullable = false;
    loop {
        match decoded {
            DecodedType::Nullable(inner) => decoded = *inner,
            DecodedType::Reference(ref r) if r.name == maybe && r.parameters.len() == 1 => {
                decoded = r.parameters[0].clone();
            }
            _ => break,
        }
        nullable = true;
    }

    Ok(ResolvedField {
        name: field.name.clone(),
        column_override: get_annotation::<DbColumnName>(&field.annotations, &target)?.map(|c| c.0),
        decoded,
        nullable,
        primary_key: get_annotation::<DbPrimaryKey>(&field.annotations, &target)?.is_some(),
        doc: doc_comment(&field.annotations, &target)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        resolve::{NewtypePolicy, Primitive},
        testing::{protoapp_schema, sn},
    };

    #[test]
    fn test_table_discovery_order() {
        let schema = protoapp_schema();
        let tables = table_decls(&schema).unwrap();
        let names: Vec<String> = tables.iter().map(|t| t.table_name()).collect();
        assert_eq!(names, vec!["app_user", "message", "audit_log"]);
        assert!(tables[0].annotation.with_id_primary_key);
    }

    #[test]
    fn test_nullable_and_maybe_collapse() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema).with_newtypes(NewtypePolicy::Expand);
        let owner = sn("protoapp.ops.AuditEvent");
        let tables = table_decls(&schema).unwrap();
        let audit = tables.iter().find(|t| t.name == owner).unwrap();

        let fields: Vec<ResolvedField> = audit
            .fields
            .iter()
            .map(|f| resolve_field(&decoder, &owner, f).unwrap())
            .collect();

        let actor = fields.iter().find(|f| f.name == "actor").unwrap();
        assert!(actor.nullable);
        assert_eq!(actor.decoded, DecodedType::Primitive(Primitive::String));

        let detail = fields.iter().find(|f| f.name == "detail").unwrap();
        assert!(detail.nullable);
        assert_eq!(detail.decoded, DecodedType::Primitive(Primitive::Json));

        let id = fields.iter().find(|f| f.name == "id").unwrap();
        assert!(id.primary_key);
        assert!(!id.nullable);
    }

    #[test]
    fn test_column_name_override() {
        let schema = protoapp_schema();
        let decoder = Decoder::new(&schema);
        let owner = sn("protoapp.ops.AuditEvent");
        let tables = table_decls(&schema).unwrap();
        let audit = tables.iter().find(|t| t.name == owner).unwrap();

        let columns: Vec<String> = audit
            .fields
            .iter()
            .map(|f| resolve_field(&decoder, &owner, f).unwrap().column_name())
            .collect();
        assert_eq!(
            columns,
            vec!["id", "occurred_at", "actor", "kind", "role", "detail", "tags"]
        );
    }

    #[test]
    fn test_table_requires_db_table_annotation() {
        let schema = protoapp_schema();
        let name = sn("protoapp.apis.ui.LoginReq");
        let decl = schema.get(&name).unwrap();

        let err = TableDecl::new(name, decl).unwrap_err();
        assert!(matches!(
            err,
            CodegenError::MissingAnnotation { ref target, .. } if target == "protoapp.apis.ui.LoginReq"
        ));
    }

    #[test]
    fn test_generic_table_is_rejected() {
        let mut schema = protoapp_schema();
        let mut module = schema.module("protoapp.apis.ui").unwrap().clone();
        let paginated = module.decls.get_mut("Paginated").unwrap();
        paginated.annotations.push(schemagen_ast::Annotation::new(
            sn("common.db.DbTable"),
            serde_json::json!({}),
        ));
        schema.insert(module);

        let err = table_decls(&schema).unwrap_err();
        assert!(matches!(err, CodegenError::InvalidAnnotation { .. }));
    }
}
