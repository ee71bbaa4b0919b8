//! Python literal rendering for JSON values.
use serde_json::Value;
use std::fmt::Write;

/// Render a double-quoted Python string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        push_escaped(&mut out, c, '"');
    }
    out.push('"');
    out
}

/// Render a `b"..."` literal from an Avro bytes default.
///
/// Avro encodes bytes defaults as strings whose code points are the byte
/// values, so any code point above `0xFF` makes the default unrepresentable.
pub fn bytes_literal(value: &str) -> Option<String> {
    let mut out = String::with_capacity(value.len() + 3);
    out.push_str("b\"");
    for c in value.chars() {
        let code = u32::from(c);
        if code > 0xFF {
            return None;
        }
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            _ => {
                let _ = write!(out, "\\x{code:02x}");
            }
        }
    }
    out.push('"');
    Some(out)
}

/// Render a JSON value the way Python's `repr` prints the equivalent object.
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => repr_str(s),
        Value::Array(items) => {
            let inner = items.iter().map(repr).collect::<Vec<_>>().join(", ");
            format!("[{inner}]")
        }
        Value::Object(map) => {
            let inner = map
                .iter()
                .map(|(k, v)| format!("{}: {}", repr_str(k), repr(v)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{{{inner}}}")
        }
    }
}

/// Python prefers single quotes and switches to double quotes only when
/// that avoids escaping.
fn repr_str(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for c in value.chars() {
        push_escaped(&mut out, c, quote);
    }
    out.push(quote);
    out
}

fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02x}", u32::from(c));
        }
        c => out.push(c),
    }
}

/// Render a list of strings as a Python list literal.
pub fn list_repr(items: &[String]) -> String {
    let inner = items
        .iter()
        .map(|item| repr_str(item))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{inner}]")
}
