use once_cell::sync::Lazy;
use regex::Regex;

static AVRO_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());
static CAPITALIZED_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z][a-z0-9]*").unwrap());
static MIXED_WORDS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+|[A-Z][a-z0-9]*").unwrap());

/// Whether `name` is a valid Avro simple name.
pub fn is_avro_name(name: &str) -> bool {
    AVRO_NAME.is_match(name)
}

/// Whether `name` is a valid, possibly dotted, Avro full name or namespace.
pub fn is_avro_fullname(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(is_avro_name)
}

/// Convert string to PascalCase.
///
/// `user_name`, `user-name` and `userName` all become `UserName`; names that
/// are already PascalCase (including acronyms such as `HTTPHeader`) are kept.
pub fn pascal(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let startswith_under = input.starts_with('_');
    let words: Vec<&str> = if input.contains(['_', '-', ' ']) {
        input
            .split(['_', '-', ' '])
            .filter(|w| !w.is_empty())
            .collect()
    } else if input.starts_with(|c: char| c.is_uppercase()) {
        CAPITALIZED_WORDS
            .find_iter(input)
            .map(|m| m.as_str())
            .collect()
    } else {
        MIXED_WORDS.find_iter(input).map(|m| m.as_str()).collect()
    };

    let mut result = words.into_iter().map(capitalize).collect::<String>();
    if startswith_under {
        result = format!("_{result}");
    }
    result
}

/// Convert string to UPPER CASE, used for enum member names.
pub fn upper(input: &str) -> String {
    input.to_uppercase()
}

/// Capitalize first letter
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
