//! Test fixtures for generators.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use schemagen_ast::{Decl, Field, Module, Schema, ScopedName, TypeExpr};
use serde_json::{Value, json};

/// Parse `module.Name`.
///
/// # Panics
///
/// Panics if `s` has no module part.
pub fn sn(s: &str) -> ScopedName {
    s.parse().unwrap_or_else(|e| panic!("{}", e))
}

pub fn prim(name: &str) -> TypeExpr {
    TypeExpr::primitive(name)
}

pub fn reference(name: &str) -> TypeExpr {
    TypeExpr::reference(sn(name))
}

pub fn generic(name: &str, params: Vec<TypeExpr>) -> TypeExpr {
    reference(name).with_params(params)
}

fn param(name: &str) -> TypeExpr {
    TypeExpr::type_param(name)
}

fn doc(text: &str) -> (ScopedName, Value) {
    (sn("sys.annotations.Doc"), json!(text))
}

fn field(name: &str, type_expr: TypeExpr) -> Field {
    Field::new(name, type_expr)
}

fn generic_struct(name: &str, params: &[&str], fields: Vec<Field>) -> Decl {
    let mut decl = Decl::structure(name, fields);
    if let schemagen_ast::DeclType::Struct(s) = &mut decl.type_ {
        s.type_params = params.iter().map(|p| p.to_string()).collect();
    }
    decl
}

fn enumeration(name: &str, variants: &[&str]) -> Decl {
    Decl::union(
        name,
        variants.iter().map(|v| field(v, prim("Void"))).collect(),
    )
}

/// An API entry: an HTTP request field with its default.
pub fn api_entry(name: &str, type_expr: TypeExpr, path: &str, security: Value) -> Field {
    field(name, type_expr).with_default(json!({"path": path, "security": security}))
}

fn documented(field: Field, text: &str) -> Field {
    let (key, value) = doc(text);
    field.annotated(key, value)
}

fn sys_types() -> Module {
    Module::new("sys.types").decl(Decl::new(
        "Maybe",
        schemagen_ast::DeclType::Union(schemagen_ast::Union {
            type_params: vec!["T".into()],
            fields: vec![field("nothing", prim("Void")), field("just", param("T"))],
        }),
    ))
}

fn common() -> Module {
    Module::new("common").decl(
        Decl::newtype("Instant", vec![], prim("Int64")).annotated(
            sn("adlc.config.rust.RustCustomType"),
            json!({"rustname": "{{STDLIBMODULE}}::Instant", "helpers": "", "generateOrigADLType": ""}),
        ),
    )
}

fn common_db() -> Module {
    Module::new("common.db")
        .decl(
            Decl::newtype("DbKey", vec!["T".into()], prim("String")).annotated(
                sn("adlc.config.rust.RustCustomType"),
                json!({"rustname": "crate::adl::custom::DbKey", "helpers": "", "generateOrigADLType": ""}),
            ),
        )
        .decl(generic_struct(
            "WithId",
            &["I", "T"],
            vec![field("id", param("I")), field("value", param("T"))],
        ))
}

fn common_http() -> Module {
    Module::new("common.http")
        .decl(generic_struct(
            "HttpPost",
            &["I", "O"],
            vec![
                field("path", prim("String")),
                field("security", reference("common.http.HttpSecurity")),
                field("reqType", prim("TypeToken").with_params(vec![param("I")])),
                field("respType", prim("TypeToken").with_params(vec![param("O")])),
            ],
        ))
        .decl(generic_struct(
            "HttpGet",
            &["O"],
            vec![
                field("path", prim("String")),
                field("security", reference("common.http.HttpSecurity")),
                field("respType", prim("TypeToken").with_params(vec![param("O")])),
            ],
        ))
        .decl(Decl::union(
            "HttpSecurity",
            vec![
                field("public", prim("Void")),
                field("token", prim("Void")),
                field("tokenWithRole", prim("String")),
            ],
        ))
        .decl(Decl::structure("Unit", vec![]))
}

fn protoapp_db() -> Module {
    let table = |v: Value| (sn("common.db.DbTable"), v);
    let (app_user_key, app_user_value) = table(json!({"withIdPrimaryKey": true}));
    let (message_key, message_value) = table(json!({"withIdPrimaryKey": true}));

    Module::new("protoapp.db")
        .decl(Decl::alias(
            "AppUserId",
            vec![],
            generic("common.db.DbKey", vec![reference("protoapp.db.AppUser")]),
        ))
        .decl(
            Decl::structure(
                "AppUser",
                vec![
                    field("fullname", prim("String")),
                    field("email", prim("String")),
                    field("is_admin", prim("Bool")),
                    field("hashed_password", prim("String")),
                ],
            )
            .annotated(app_user_key, app_user_value),
        )
        .decl(Decl::alias(
            "MessageId",
            vec![],
            generic("common.db.DbKey", vec![reference("protoapp.db.Message")]),
        ))
        .decl(
            Decl::structure(
                "Message",
                vec![
                    field("posted_at", reference("common.Instant")),
                    field("posted_by", reference("protoapp.db.AppUserId")),
                    field("message", prim("String")),
                ],
            )
            .annotated(message_key, message_value),
        )
        .decl(enumeration("UserRole", &["user", "admin"]))
        .decl(Decl::alias("IntList", vec![], TypeExpr::vector(prim("Int32"))))
}

fn protoapp_ops() -> Module {
    Module::new("protoapp.ops")
        .decl(enumeration("AuditKind", &["login", "logout", "post"]))
        .decl(
            Decl::structure(
                "AuditEvent",
                vec![
                    field("id", prim("String")).annotated(sn("common.db.DbPrimaryKey"), Value::Null),
                    field("at", reference("common.Instant"))
                        .annotated(sn("common.db.DbColumnName"), json!("occurred_at")),
                    field("actor", TypeExpr::nullable(reference("protoapp.db.AppUserId"))),
                    field("kind", reference("protoapp.ops.AuditKind")),
                    field("role", reference("protoapp.db.UserRole")),
                    field("detail", generic("sys.types.Maybe", vec![prim("Json")])),
                    field("tags", TypeExpr::vector(prim("String"))),
                ],
            )
            .annotated(sn("common.db.DbTable"), json!({"tableName": "audit_log"})),
        )
}

fn protoapp_apis_ui() -> Module {
    let (doc_key, doc_value) = doc("\nAPI requests for the protoapp UI\n");
    let http_post = |i: TypeExpr, o: TypeExpr| generic("common.http.HttpPost", vec![i, o]);

    Module::new("protoapp.apis.ui")
        .decl(
            Decl::structure(
                "ApiRequests",
                vec![
                    api_entry(
                        "healthy",
                        generic("common.http.HttpGet", vec![prim("Void")]),
                        "/",
                        json!("public"),
                    ),
                    documented(
                        api_entry(
                            "login",
                            http_post(
                                reference("protoapp.apis.ui.LoginReq"),
                                reference("protoapp.apis.ui.LoginResp"),
                            ),
                            "/login",
                            json!("public"),
                        ),
                        "Login a user",
                    ),
                    documented(
                        api_entry(
                            "logout",
                            http_post(reference("common.http.Unit"), reference("common.http.Unit")),
                            "/logout",
                            json!("token"),
                        ),
                        "Logout",
                    ),
                    documented(
                        api_entry(
                            "new_message",
                            http_post(
                                reference("protoapp.apis.ui.NewMessageReq"),
                                reference("protoapp.db.MessageId"),
                            ),
                            "/messages/new",
                            json!("token"),
                        ),
                        "Post a message to the noticeboard",
                    ),
                    documented(
                        api_entry(
                            "recent_messages",
                            http_post(
                                reference("protoapp.apis.ui.RecentMessagesReq"),
                                generic(
                                    "protoapp.apis.ui.Paginated",
                                    vec![reference("protoapp.db.Message")],
                                ),
                            ),
                            "/messages/recent",
                            json!("token"),
                        ),
                        "Get recent noticeboard messages",
                    ),
                    documented(
                        api_entry(
                            "who_am_i",
                            generic(
                                "common.http.HttpGet",
                                vec![reference("protoapp.apis.ui.UserWithId")],
                            ),
                            "/whoami",
                            json!("token"),
                        ),
                        "Gets info about the logged in user",
                    ),
                    api_entry(
                        "update_user",
                        generic(
                            "protoapp.apis.ui.AdminReq",
                            vec![
                                generic(
                                    "common.db.WithId",
                                    vec![
                                        reference("protoapp.db.AppUserId"),
                                        reference("protoapp.apis.ui.UserDetails"),
                                    ],
                                ),
                                reference("common.http.Unit"),
                            ],
                        ),
                        "/users/update",
                        json!({"tokenWithRole": "admin"}),
                    ),
                ],
            )
            .annotated(doc_key, doc_value),
        )
        .decl(Decl::alias(
            "AdminReq",
            vec!["I".into(), "O".into()],
            http_post(param("I"), param("O")),
        ))
        .decl(Decl::structure(
            "LoginReq",
            vec![field("email", prim("String")), field("password", prim("String"))],
        ))
        .decl(Decl::structure(
            "LoginResp",
            vec![field("access_jwt", prim("String"))],
        ))
        .decl(Decl::structure(
            "NewMessageReq",
            vec![field("message", prim("String"))],
        ))
        .decl(Decl::structure(
            "RecentMessagesReq",
            vec![field("offset", prim("Int64")), field("count", prim("Int64"))],
        ))
        .decl(generic_struct(
            "Paginated",
            &["T"],
            vec![
                field("items", TypeExpr::vector(param("T"))),
                field("current_offset", prim("Int64")),
                field("total_count", prim("Int64")),
            ],
        ))
        .decl(Decl::structure(
            "UserDetails",
            vec![
                field("fullname", prim("String")),
                field("email", prim("String")),
                field("is_admin", prim("Bool")),
            ],
        ))
        .decl(Decl::structure(
            "UserWithId",
            vec![
                field("id", reference("protoapp.db.AppUserId")),
                field("value", reference("protoapp.apis.ui.UserDetails")),
            ],
        ))
}

/// A small application schema: a user table, a message table, an audit
/// table and a UI API with seven entries.
pub fn protoapp_schema() -> Schema {
    Schema::from_modules([
        sys_types(),
        common(),
        common_db(),
        common_http(),
        protoapp_db(),
        protoapp_ops(),
        protoapp_apis_ui(),
    ])
}

/// Replace the API struct's entries, keeping its annotations.
pub fn with_api_entries(mut schema: Schema, entries: Vec<Field>) -> Schema {
    let mut module = schema
        .module("protoapp.apis.ui")
        .cloned()
        .unwrap_or_else(protoapp_apis_ui);
    if let Some(decl) = module.decls.get_mut("ApiRequests")
        && let schemagen_ast::DeclType::Struct(s) = &mut decl.type_
    {
        s.fields = entries;
    }
    schema.insert(module);
    schema
}
