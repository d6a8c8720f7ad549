#![deny(missing_docs)]

//! # Naming Derivation
//!
//! Pure string functions producing every naming variant the downstream
//! generator consumes: PascalCase identifiers, snake_case, plural forms,
//! JSON keys and short aliases. All functions are deterministic and keep
//! no state; the same input always yields the same output, which is what
//! makes re-runs of the pipeline idempotent.

use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase};

/// Plural overrides applied to the generic pluralizer's output.
///
/// The generic rules treat "information" as uncountable; the downstream
/// generator expects the plural table name "informations".
const PLURAL_OVERRIDES: &[(&str, &str)] = &[
    ("information", "informations"),
    ("Information", "Informations"),
];

/// Words with no distinct plural form.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "police",
    "jeans",
];

/// Singular → plural pairs the suffix rules cannot produce.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("sex", "sexes"),
    ("move", "moves"),
];

/// Force-converts an arbitrary raw identifier (snake, kebab, spaced, mixed
/// casing) into a valid PascalCase identifier.
///
/// Leading characters that cannot start an identifier (digits, stray
/// punctuation) are stripped after conversion. Idempotent on its own output.
pub fn pascal_identifier(raw: &str) -> String {
    let pascal = raw.to_pascal_case();
    let trimmed = pascal.trim_start_matches(|c: char| !c.is_alphabetic());
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Converts a PascalCase identifier to snake_case.
pub fn snake_identifier(pascal: &str) -> String {
    pascal.to_snake_case()
}

/// Lowercases only the first character, leaving the rest untouched.
///
/// This is not a full re-casing: `lower_first("HTTPServer")` keeps the
/// remaining capitals as-is.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
    }
}

/// Pluralizes an English word, applying the mandatory override table on top
/// of the generic rules. Leading capitalization is preserved.
pub fn plural(word: &str) -> String {
    let out = pluralize(word);
    for (from, to) in PLURAL_OVERRIDES {
        if out == *from {
            return (*to).to_string();
        }
    }
    out
}

/// Derives the JSON key for a raw field key: lowerCamelCase, with a repair
/// for keys whose camel form ends in a lowercase `id` run (`"orderid"` →
/// `"orderId"`). A key that is exactly `"id"` is left alone, and a key
/// already ending in `"Id"` is never doubled.
pub fn json_key(raw: &str) -> String {
    let mut key = raw.to_lower_camel_case();
    if key.len() > 2 && key.ends_with("id") {
        key.truncate(key.len() - 2);
        key.push_str("Id");
    }
    key
}

/// Pluralizes a PascalCase identifier, repairing the `ids` artifact the
/// pluralizer leaves on identifiers ending in a lowercase `id` run
/// (`"Userid"` → `"UserIds"`, not `"Userids"`).
pub fn plural_identifier(pascal: &str) -> String {
    let mut out = plural(pascal);
    if out.ends_with("ids") {
        out.truncate(out.len() - 3);
        out.push_str("Ids");
    }
    out
}

/// Concatenates the uppercase letters of a PascalCase identifier and
/// lowercases the result (`"UserProfile"` → `"up"`).
///
/// Collisions between entities are not detected here; the alias is a
/// convenience for generated code and the caller owns disambiguation.
pub fn short_alias(pascal: &str) -> String {
    pascal
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect::<String>()
        .to_lowercase()
}

fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, to)) = IRREGULAR.iter().find(|(from, _)| *from == lower) {
        return copy_leading_case(word, to);
    }
    if ends_ci(word, "ss") || ends_ci(word, "sh") || ends_ci(word, "ch") || ends_ci(word, "x") || ends_ci(word, "z") || ends_ci(word, "us") {
        return format!("{word}es");
    }
    // any other trailing "s" is treated as already plural
    if ends_ci(word, "s") {
        return word.to_string();
    }
    if ends_ci(word, "y") {
        let stem = &word[..word.len() - 1];
        if let Some(prev) = stem.chars().last() {
            if prev.is_ascii_alphabetic() && !is_vowel(prev) {
                return format!("{stem}ies");
            }
        }
        return format!("{word}s");
    }
    if ends_ci(word, "fe") && !ends_ci(word, "ffe") {
        return format!("{}ves", &word[..word.len() - 2]);
    }
    if ends_ci(word, "lf") || ends_ci(word, "rf") {
        return format!("{}ves", &word[..word.len() - 1]);
    }
    if ends_ci(word, "o") {
        const OES_STEMS: [&str; 5] = ["buffalo", "tomato", "potato", "hero", "echo"];
        if OES_STEMS.iter().any(|stem| lower.ends_with(stem)) {
            return format!("{word}es");
        }
        return format!("{word}s");
    }
    format!("{word}s")
}

/// ASCII case-insensitive suffix check that never splits a UTF-8 character.
fn ends_ci(word: &str, suffix: &str) -> bool {
    word.len() >= suffix.len()
        && word.is_char_boundary(word.len() - suffix.len())
        && word[word.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn copy_leading_case(src: &str, replacement: &str) -> String {
    let capitalized = src.chars().next().is_some_and(char::is_uppercase);
    if !capitalized {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(chars.as_str());
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pascal_identifier_forces_valid_casing() {
        assert_eq!(pascal_identifier("user_id"), "UserId");
        assert_eq!(pascal_identifier("user id"), "UserId");
        assert_eq!(pascal_identifier("user-profile"), "UserProfile");
        assert_eq!(pascal_identifier("APIKey"), "ApiKey");
        assert_eq!(pascal_identifier("2fa_code"), "FaCode");
        assert_eq!(pascal_identifier(""), "");
    }

    #[test]
    fn test_pascal_identifier_idempotent() {
        for raw in ["order", "user_id", "list orders", "HTTPServer", "2fa"] {
            let once = pascal_identifier(raw);
            assert_eq!(pascal_identifier(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn test_snake_identifier() {
        assert_eq!(snake_identifier("UserProfile"), "user_profile");
        assert_eq!(snake_identifier("ListOrders"), "list_orders");
    }

    #[test]
    fn test_lower_first_only_touches_first_char() {
        assert_eq!(lower_first("UserProfile"), "userProfile");
        assert_eq!(lower_first("HTTPServer"), "hTTPServer");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_plural_generic_rules() {
        assert_eq!(plural("order"), "orders");
        assert_eq!(plural("category"), "categories");
        assert_eq!(plural("bus"), "buses");
        assert_eq!(plural("status"), "statuses");
        assert_eq!(plural("box"), "boxes");
        assert_eq!(plural("items"), "items");
        assert_eq!(plural("class"), "classes");
        assert_eq!(plural("knife"), "knives");
        assert_eq!(plural("shelf"), "shelves");
        assert_eq!(plural("potato"), "potatoes");
        assert_eq!(plural("photo"), "photos");
        assert_eq!(plural("day"), "days");
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("Person"), "People");
        assert_eq!(plural("fish"), "fish");
        assert_eq!(plural("ID"), "IDs");
        assert_eq!(plural(""), "");
    }

    #[test]
    fn test_plural_information_override() {
        assert_eq!(plural("information"), "informations");
        assert_eq!(plural("Information"), "Informations");
    }

    #[test]
    fn test_json_key() {
        assert_eq!(json_key("orderId"), "orderId");
        assert_eq!(json_key("order_id"), "orderId");
        assert_eq!(json_key("orderid"), "orderId");
        assert_eq!(json_key("user id"), "userId");
        assert_eq!(json_key("id"), "id");
        assert_eq!(json_key("name"), "name");
    }

    #[test]
    fn test_json_key_never_doubles_id_suffix() {
        for raw in ["orderId", "order_id", "orderid", "xxid"] {
            let key = json_key(raw);
            assert!(!key.ends_with("IdId"), "doubled suffix for {raw:?}: {key}");
            if key != "id" && key.to_lowercase().ends_with("id") {
                assert!(key.ends_with("Id"), "uncorrected suffix for {raw:?}: {key}");
            }
        }
    }

    #[test]
    fn test_plural_identifier_repairs_ids_run() {
        assert_eq!(plural_identifier("Userid"), "UserIds");
        assert_eq!(plural_identifier("OrderId"), "OrderIds");
        assert_eq!(plural_identifier("Order"), "Orders");
    }

    #[test]
    fn test_short_alias() {
        assert_eq!(short_alias("UserProfile"), "up");
        assert_eq!(short_alias("ID"), "id");
        assert_eq!(short_alias("Order"), "o");
        assert_eq!(short_alias("ListOrders"), "lo");
    }
}
