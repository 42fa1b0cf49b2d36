//! Structural equality over session props.
//!
//! Decides whether an open request aimed at an existing session carries new
//! props. Props are plain JSON data, so there are no functions or cycles to
//! worry about: anything that is not data never makes it into a `Value`.

use serde_json::{Map, Number, Value};

/// Compares two optional props values.
///
/// - `None` and `Some(Value::Null)` both count as absent. Two absent values
///   are equal; exactly one absent value is not.
/// - Objects are equal when they have the same number of keys and every key
///   maps to an equal value. Key order is irrelevant.
/// - Arrays are equal when they have the same length and equal elements.
/// - Everything else compares strictly, with numbers compared by value.
///
/// ```
/// use opener::equality::props_equal;
/// use serde_json::json;
///
/// assert!(props_equal(None, None));
/// assert!(!props_equal(Some(&json!({})), None));
/// assert!(props_equal(Some(&json!({"a": 1})), Some(&json!({"a": 1}))));
/// ```
pub fn props_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (present(a), present(b)) {
        (None, None) => true,
        (Some(a), Some(b)) => values_equal(a, b),
        _ => false,
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => objects_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| values_equal(a, b))
        }
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn objects_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().all(|(key, left)| match b.get(key) {
        Some(right) => values_equal(left, right),
        None => false,
    })
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_values() {
        assert!(props_equal(None, None));
        assert!(props_equal(Some(&Value::Null), None));
        assert!(!props_equal(Some(&json!({})), None));
        assert!(!props_equal(None, Some(&json!({"a": 1}))));
    }

    #[test]
    fn nested_objects() {
        let a = json!({"a": 1, "b": {"c": 2}});
        let b = json!({"b": {"c": 2}, "a": 1});
        assert!(props_equal(Some(&a), Some(&b)));

        let c = json!({"a": 1, "b": {"c": 3}});
        assert!(!props_equal(Some(&a), Some(&c)));
    }

    #[test]
    fn key_count_mismatch() {
        assert!(!props_equal(Some(&json!({"a": 1})), Some(&json!({"a": 1, "b": 2}))));
        assert!(!props_equal(Some(&json!({"a": 1, "b": 2})), Some(&json!({"a": 1}))));
    }

    #[test]
    fn same_count_different_keys() {
        assert!(!props_equal(Some(&json!({"a": 1})), Some(&json!({"b": 1}))));
    }

    #[test]
    fn null_members() {
        assert!(props_equal(Some(&json!({"a": null})), Some(&json!({"a": null}))));
        assert!(!props_equal(Some(&json!({"a": null})), Some(&json!({"a": {}}))));
    }

    #[test]
    fn arrays_compare_by_position() {
        assert!(props_equal(Some(&json!({"xs": [1, 2]})), Some(&json!({"xs": [1, 2]}))));
        assert!(!props_equal(Some(&json!({"xs": [1, 2]})), Some(&json!({"xs": [2, 1]}))));
        assert!(!props_equal(Some(&json!({"xs": [1]})), Some(&json!({"xs": [1, 1]}))));
        assert!(!props_equal(Some(&json!({"xs": []})), Some(&json!({"xs": {}}))));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(props_equal(Some(&json!({"n": 1})), Some(&json!({"n": 1.0}))));
        assert!(!props_equal(Some(&json!({"n": 1})), Some(&json!({"n": "1"}))));
    }
}
