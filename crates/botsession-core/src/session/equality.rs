//! Structural equality over JSON values.
//!
//! Unlike `Value`'s `PartialEq`, numbers compare by numeric value, so `1`
//! and `1.0` are equal. Objects compare independent of key order.

use serde_json::{Number, Value};

/// Recursive structural equality between two values.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(field, l)| y.get(field).is_some_and(|r| deep_equal(l, r)))
        }
        _ => false,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!("a"), &json!("a")));
        assert!(!deep_equal(&json!("a"), &json!("b")));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(!deep_equal(&json!(false), &json!(null)));
        assert!(!deep_equal(&json!(0), &json!(false)));
        assert!(!deep_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!(-3), &json!(-3)));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
        assert!(!deep_equal(&json!(-1), &json!(u64::MAX)));
    }

    #[test]
    fn nested_objects_ignore_key_order() {
        let a = json!({"user": {"name": "Alice", "tags": ["x", "y"]}, "step": 2});
        let b = json!({"step": 2.0, "user": {"tags": ["x", "y"], "name": "Alice"}});
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn objects_with_different_keys_differ() {
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1}), &json!({"b": 1})));
    }

    #[test]
    fn arrays_are_ordered() {
        assert!(deep_equal(&json!([1, [2, {"c": 3}]]), &json!([1, [2, {"c": 3}]])));
        assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }
}
