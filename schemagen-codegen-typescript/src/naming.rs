//! TypeScript-specific naming conventions.

use schemagen_codegen::language::NamingConvention;
use schemagen_core::{to_camel_case, to_pascal_case};

fn escape_ts_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// TypeScript naming conventions.
///
/// Module aliases go through `safe_name`, so a module whose last segment is
/// a keyword (e.g. `app.delete`) is imported as `_delete`.
pub const TS_NAMING: NamingConvention = NamingConvention {
    // Types use PascalCase
    type_case: to_pascal_case,
    // Members and slots use camelCase
    member_case: to_camel_case,
    reserved_words: &[
        // JavaScript reserved words
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "let",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        // TypeScript reserved words
        "any",
        "as",
        "async",
        "await",
        "boolean",
        "constructor",
        "declare",
        "get",
        "implements",
        "interface",
        "module",
        "namespace",
        "never",
        "number",
        "object",
        "package",
        "private",
        "protected",
        "public",
        "readonly",
        "require",
        "set",
        "static",
        "string",
        "symbol",
        "type",
        "undefined",
        "unknown",
    ],
    escape_reserved: escape_ts_reserved,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_naming_type() {
        assert_eq!(TS_NAMING.type_name("app_user"), "AppUser");
        assert_eq!(TS_NAMING.type_name("audit_log"), "AuditLog");
    }

    #[test]
    fn test_ts_naming_member() {
        assert_eq!(TS_NAMING.member_name("post new_message"), "postNewMessage");
        assert_eq!(TS_NAMING.member_name("get who_am_i"), "getWhoAmI");
    }

    #[test]
    fn test_ts_reserved_words() {
        assert!(TS_NAMING.is_reserved("class"));
        assert!(TS_NAMING.is_reserved("async"));
        assert!(TS_NAMING.is_reserved("interface"));
        assert!(!TS_NAMING.is_reserved("db"));
    }

    #[test]
    fn test_ts_escape_reserved() {
        assert_eq!(TS_NAMING.safe_name("delete"), "_delete");
        assert_eq!(TS_NAMING.safe_name("http"), "http");
    }
}
