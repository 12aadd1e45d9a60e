//! Shared utility functions for code generation.

/// Split an identifier into lowercase words.
///
/// Separators are any non-alphanumeric character. A lowercase letter or digit
/// followed by an uppercase letter also starts a new word.
fn words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in s.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// Convert a string to PascalCase (e.g., "app_user" -> "AppUser")
pub fn to_pascal_case(s: &str) -> String {
    words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert a string to camelCase (e.g., "post new_message" -> "postNewMessage")
pub fn to_camel_case(s: &str) -> String {
    words(s)
        .iter()
        .enumerate()
        .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
        .collect()
}

/// Convert a string to snake_case (e.g., "postedAt" -> "posted_at")
pub fn to_snake_case(s: &str) -> String {
    words(s).join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("hello"), "Hello");
        assert_eq!(to_pascal_case("app_user"), "AppUser");
        assert_eq!(to_pascal_case("appUser"), "AppUser");
        assert_eq!(to_pascal_case("foo-bar baz"), "FooBarBaz");
        assert_eq!(to_pascal_case(""), "");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("post login"), "postLogin");
        assert_eq!(to_camel_case("post new_message"), "postNewMessage");
        assert_eq!(to_camel_case("get who_am_i"), "getWhoAmI");
        assert_eq!(to_camel_case("AppUser"), "appUser");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("Hello"), "hello");
        assert_eq!(to_snake_case("AppUser"), "app_user");
        assert_eq!(to_snake_case("postedAt"), "posted_at");
        assert_eq!(to_snake_case("hashed_password"), "hashed_password");
        assert_eq!(to_snake_case("hello-world"), "hello_world");
        assert_eq!(to_snake_case("utf8Name"), "utf8_name");
        assert_eq!(to_snake_case(""), "");
    }
}
