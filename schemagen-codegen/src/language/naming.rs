//! Naming conventions for target languages.

/// Language-specific naming rules.
///
/// Defines how schema names become type and member names, and how reserved
/// words are escaped.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Schema name to type name (e.g., "app_user" -> "AppUser")
    pub type_case: fn(&str) -> String,
    /// Schema name to member name (e.g., "posted_at" -> "postedAt" in TS)
    pub member_case: fn(&str) -> String,
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "type" -> "r#type" in Rust)
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// The name itself, escaped if it is reserved.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }

    pub fn type_name(&self, name: &str) -> String {
        self.safe_name(&(self.type_case)(name))
    }

    pub fn member_name(&self, name: &str) -> String {
        self.safe_name(&(self.member_case)(name))
    }
}
