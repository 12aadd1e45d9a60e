//! Snapshot tests for TypeScript code generation.
//!
//! These tests verify that the generated TypeScript code matches expected output.
//! Run `cargo insta review` to update snapshots when making intentional changes.

use schemagen_codegen::{
    language::ArtifactGenerator,
    testing::{api_entry, generic, prim, protoapp_schema, reference, with_api_entries},
};
use schemagen_codegen_typescript::{ServerEndpointGenerator, ServiceClientGenerator, TableInterfaceGenerator};
use serde_json::json;

#[test]
fn test_protoapp_tables() {
    let code = TableInterfaceGenerator::new("ts/adl-gen/database.ts")
        .render(&protoapp_schema())
        .expect("tables failed");
    insta::assert_snapshot!("protoapp_tables", code);
}

#[test]
fn test_protoapp_service_client() {
    let artifact = ServiceClientGenerator::new("ts/ui/app-service.ts", "protoapp.apis.ui", "ApiRequests")
        .generate(&protoapp_schema())
        .expect("service client failed");

    assert!(artifact.diagnostics.is_empty());
    insta::assert_snapshot!("protoapp_service_client", artifact.content);
}

#[test]
fn test_protoapp_endpoints() {
    let artifact = ServerEndpointGenerator::new("ts/server/endpoints.ts", "protoapp.apis.ui", "ApiRequests")
        .generate(&protoapp_schema())
        .expect("endpoints failed");

    assert!(artifact.diagnostics.is_empty());
    insta::assert_snapshot!("protoapp_endpoints", artifact.content);
}

#[test]
fn test_output_is_deterministic() {
    let schema = protoapp_schema();
    let generator = ServiceClientGenerator::new("app-service.ts", "protoapp.apis.ui", "ApiRequests");

    let first = generator.generate(&schema).unwrap();
    let second = generator.generate(&schema).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_skipped_entry_is_reported_by_both_api_generators() {
    let schema = with_api_entries(
        protoapp_schema(),
        vec![
            api_entry(
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
            ),
            api_entry("build_info", prim("Json"), "/build", json!("public")),
        ],
    );

    let service = ServiceClientGenerator::new("s.ts", "protoapp.apis.ui", "ApiRequests")
        .generate(&schema)
        .unwrap();
    let endpoints = ServerEndpointGenerator::new("e.ts", "protoapp.apis.ui", "ApiRequests")
        .generate(&schema)
        .unwrap();

    for artifact in [&service, &endpoints] {
        assert_eq!(artifact.diagnostics.len(), 1);
        assert!(artifact.diagnostics[0].severity.is_warning());
        assert!(artifact.diagnostics[0].message.contains("build_info"));
        assert!(!artifact.content.contains("build_info"));
    }
    assert!(service.content.contains("async login(req: LoginReq)"));
    assert!(!service.content.contains("import * as"));
    assert!(endpoints.content.contains("if (h.login) {"));
}

#[test]
fn test_unknown_api_struct_fails() {
    let result = ServiceClientGenerator::new("s.ts", "protoapp.apis.ui", "NoSuchApi").generate(&protoapp_schema());
    assert!(result.is_err());
}
