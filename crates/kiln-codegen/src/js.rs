//! JavaScript literal printing.

use serde_json::{Number, Value};

/// Print a number the way a JavaScript engine does for ordinary magnitudes:
/// `16`, `0.5`, `-2`.
pub fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) => format_f64(f),
        None => n.to_string(),
    }
}

fn format_f64(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{:.0}", f)
    } else {
        format!("{}", f)
    }
}

/// A double-quoted, escaped string literal.
pub fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// Whether `s` can be written as a bare identifier or property name.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An object key: bare when possible, quoted otherwise.
pub fn property_key(key: &str) -> String {
    if is_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

/// `obj?.key`, or `obj?.["key"]` when the key is not an identifier.
pub fn optional_member(object: &str, key: &str) -> String {
    if is_identifier(key) {
        format!("{}?.{}", object, key)
    } else {
        format!("{}?.[{}]", object, quote(key))
    }
}

/// A JSON value as a JavaScript expression.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => quote(s),
        Value::Array(items) => format!("[{}]", items.iter().map(literal).collect::<Vec<_>>().join(", ")),
        Value::Object(map) => object(map.iter().map(|(k, v)| (k.as_str(), literal(v)))),
    }
}

/// `{ key: expr, ... }` from already-printed entries; `{}` when empty.
pub fn object<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, String)>) -> String {
    let body: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", property_key(k.as_ref()), v))
        .collect();
    if body.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", body.join(", "))
    }
}
