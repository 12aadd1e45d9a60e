//! Rust-specific naming conventions.

use schemagen_codegen::language::NamingConvention;
use schemagen_core::{to_pascal_case, to_snake_case};

/// Keywords that cannot be raw identifiers get a trailing underscore.
fn escape_rust_reserved(name: &str) -> String {
    match name {
        "crate" | "self" | "Self" | "super" => format!("{}_", name),
        _ => format!("r#{}", name),
    }
}

/// Rust naming conventions.
pub const RUST_NAMING: NamingConvention = NamingConvention {
    type_case: to_pascal_case,
    member_case: to_snake_case,
    reserved_words: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod",
        "move", "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super",
        "trait", "true", "type", "unsafe", "use", "where", "while", "abstract", "become", "box",
        "do", "final", "macro", "override", "priv", "try", "typeof", "unsized", "virtual", "yield",
    ],
    escape_reserved: escape_rust_reserved,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_naming_type() {
        assert_eq!(RUST_NAMING.type_name("app_user"), "AppUser");
        assert_eq!(RUST_NAMING.type_name("audit_log"), "AuditLog");
    }

    #[test]
    fn test_rust_naming_member() {
        assert_eq!(RUST_NAMING.member_name("postedAt"), "posted_at");
        assert_eq!(RUST_NAMING.member_name("is_admin"), "is_admin");
    }

    #[test]
    fn test_rust_escape_reserved() {
        assert_eq!(RUST_NAMING.safe_name("type"), "r#type");
        assert_eq!(RUST_NAMING.safe_name("gen"), "r#gen");
        assert_eq!(RUST_NAMING.safe_name("self"), "self_");
        assert_eq!(RUST_NAMING.safe_name("db"), "db");
    }
}
