//! API struct loading shared by the service client and endpoint generators.
//!
//! An API struct is a non-generic struct whose fields describe HTTP
//! requests. Each field's type is alias-expanded at the head; fields that
//! end up as `common.http.HttpPost<I, O>` or `common.http.HttpGet<O>` are
//! HTTP entries, anything else is kept as an unrecognized entry so the
//! collect phase can report it.

use schemagen_ast::{DeclType, Field, Schema, ScopedName, TypeExpr};
use schemagen_codegen::{
    CodegenError, Result,
    resolve::{AliasExpander, annotations::doc_comment},
};
use serde::Deserialize;

const HTTP_MODULE: &str = "common.http";

/// Who may call an endpoint. Taken from the `security` member of the
/// field's default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Security {
    #[default]
    Public,
    Token,
    TokenWithRole(String),
}

impl Security {
    pub fn requires_token(&self) -> bool {
        !matches!(self, Security::Public)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RequestDefault {
    #[serde(default)]
    security: Security,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    /// Prefix for slot and factory names (`postLogin`, `mkPostFn`).
    pub fn prefix(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
        }
    }
}

/// A recognized HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// `None` for GET requests.
    pub request: Option<TypeExpr>,
    pub response: TypeExpr,
    pub security: Security,
}

/// One field of the API struct.
#[derive(Debug, Clone)]
pub struct ApiEntry {
    pub name: String,
    /// `module.Struct.field`, used in diagnostics.
    pub location: String,
    pub doc: Option<String>,
    /// The field type after alias expansion.
    pub type_expr: TypeExpr,
    pub http: Option<HttpRequest>,
}

/// The API struct with its entries in declared order.
#[derive(Debug, Clone)]
pub struct ApiStruct {
    pub name: ScopedName,
    pub doc: Option<String>,
    pub entries: Vec<ApiEntry>,
}

impl ApiStruct {
    pub fn type_expr(&self) -> TypeExpr {
        TypeExpr::reference(self.name.clone())
    }
}

/// Load `module.name` from the schema and classify its fields.
pub fn load_api(schema: &Schema, module: &str, name: &str) -> Result<ApiStruct> {
    let api_name = ScopedName::new(module, name);
    let decl = schema
        .get(&api_name)
        .ok_or_else(|| CodegenError::UnresolvedReference {
            name: api_name.clone(),
        })?;
    let fields = match &decl.type_ {
        DeclType::Struct(s) if s.type_params.is_empty() => &s.fields,
        _ => {
            return Err(CodegenError::unsupported(format!(
                "API '{}' must be a non-generic struct",
                api_name
            )));
        }
    };

    let expander = AliasExpander::new(schema);
    let entries = fields
        .iter()
        .map(|field| load_entry(&expander, &api_name, field))
        .collect::<Result<Vec<_>>>()?;

    Ok(ApiStruct {
        doc: doc_comment(&decl.annotations, &api_name.to_string())?,
        name: api_name,
        entries,
    })
}

fn load_entry(expander: &AliasExpander<'_>, owner: &ScopedName, field: &Field) -> Result<ApiEntry> {
    let location = format!("{}.{}", owner, field.name);
    let type_expr = expander.expand(&field.type_expr)?;
    let http = classify(&type_expr, field, &location)?;

    Ok(ApiEntry {
        name: field.name.clone(),
        doc: doc_comment(&field.annotations, &location)?,
        location,
        type_expr,
        http,
    })
}

fn classify(te: &TypeExpr, field: &Field, location: &str) -> Result<Option<HttpRequest>> {
    let Some(head) = te.scoped_name() else {
        return Ok(None);
    };
    if head.module_name != HTTP_MODULE {
        return Ok(None);
    }
    let (method, request, response) = match (head.name.as_str(), te.parameters.as_slice()) {
        ("HttpPost", [req, resp]) => (HttpMethod::Post, Some(req.clone()), resp.clone()),
        ("HttpGet", [resp]) => (HttpMethod::Get, None, resp.clone()),
        _ => return Ok(None),
    };

    let security = match &field.default {
        Some(value) => {
            serde_json::from_value::<RequestDefault>(value.clone())
                .map_err(|e| {
                    CodegenError::unsupported(format!("request default of {}: {}", location, e))
                })?
                .security
        }
        None => Security::Public,
    };

    Ok(Some(HttpRequest {
        method,
        request,
        response,
        security,
    }))
}

#[cfg(test)]
mod tests {
    use schemagen_codegen::testing::{api_entry, generic, prim, protoapp_schema, reference, with_api_entries};
    use serde_json::json;

    use super::*;

    #[test]
    fn test_entries_keep_declared_order() {
        let schema = protoapp_schema();
        let api = load_api(&schema, "protoapp.apis.ui", "ApiRequests").unwrap();

        let names: Vec<&str> = api.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "healthy",
                "login",
                "logout",
                "new_message",
                "recent_messages",
                "who_am_i",
                "update_user"
            ]
        );
        assert_eq!(api.doc.as_deref(), Some("API requests for the protoapp UI"));
        assert!(api.entries.iter().all(|e| e.http.is_some()));
    }

    #[test]
    fn test_alias_entry_is_expanded_to_post() {
        let schema = protoapp_schema();
        let api = load_api(&schema, "protoapp.apis.ui", "ApiRequests").unwrap();
        let update = api.entries.iter().find(|e| e.name == "update_user").unwrap();
        let http = update.http.as_ref().unwrap();

        assert_eq!(http.method, HttpMethod::Post);
        assert_eq!(http.security, Security::TokenWithRole("admin".into()));
        assert!(http.security.requires_token());
        assert_eq!(http.response, reference("common.http.Unit"));
        assert_eq!(
            update.type_expr.scoped_name().map(|n| n.to_string()).as_deref(),
            Some("common.http.HttpPost")
        );
    }

    #[test]
    fn test_get_entry_has_no_request_type() {
        let schema = protoapp_schema();
        let api = load_api(&schema, "protoapp.apis.ui", "ApiRequests").unwrap();
        let healthy = &api.entries[0];
        let http = healthy.http.as_ref().unwrap();

        assert_eq!(http.method, HttpMethod::Get);
        assert_eq!(http.request, None);
        assert_eq!(http.response, prim("Void"));
        assert_eq!(http.security, Security::Public);
        assert_eq!(healthy.doc, None);
    }

    #[test]
    fn test_non_http_entry_is_unrecognized() {
        let schema = with_api_entries(
            protoapp_schema(),
            vec![api_entry("version", prim("String"), "/version", json!("public"))],
        );
        let api = load_api(&schema, "protoapp.apis.ui", "ApiRequests").unwrap();
        assert!(api.entries[0].http.is_none());
        assert_eq!(api.entries[0].location, "protoapp.apis.ui.ApiRequests.version");
    }

    #[test]
    fn test_bad_security_is_an_error() {
        let schema = with_api_entries(
            protoapp_schema(),
            vec![api_entry(
                "login",
                generic("common.http.HttpGet", vec![prim("Void")]),
                "/",
                json!("everyone"),
            )],
        );
        assert!(load_api(&schema, "protoapp.apis.ui", "ApiRequests").is_err());
    }

    #[test]
    fn test_missing_api_struct() {
        let schema = protoapp_schema();
        let err = load_api(&schema, "protoapp.apis.ui", "Missing").unwrap_err();
        assert!(matches!(err, CodegenError::UnresolvedReference { .. }));
    }
}
