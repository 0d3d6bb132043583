use serde_json::Value;

/// Reads `key` from an object as text. Numbers are stringified; blank strings,
/// nulls, other shapes and non-object parents all read as missing.
pub(crate) fn text(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(as_text)
}

pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads `key` as a non-negative count, accepting numbers and numeric strings.
pub(crate) fn count(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_shapes() {
        let raw = json!({"a": "x", "b": "  ", "c": 12, "d": null, "e": {"f": 1}});
        assert_eq!(text(&raw, "a"), Some("x".to_string()));
        assert_eq!(text(&raw, "b"), None);
        assert_eq!(text(&raw, "c"), Some("12".to_string()));
        assert_eq!(text(&raw, "d"), None);
        assert_eq!(text(&raw, "e"), None);
        assert_eq!(text(&json!([1, 2]), "a"), None);
    }

    #[test]
    fn test_count_shapes() {
        let raw = json!({"n": 250, "s": " 40 ", "neg": -3, "bad": "many"});
        assert_eq!(count(&raw, "n"), Some(250));
        assert_eq!(count(&raw, "s"), Some(40));
        assert_eq!(count(&raw, "neg"), None);
        assert_eq!(count(&raw, "bad"), None);
        assert_eq!(count(&raw, "missing"), None);
    }
}
