use std::cmp::Ordering;

use serde_json::Value;

/// Short name of a JSON node's type, used in fault messages.
#[must_use]
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether a node is a scalar (anything but an array or object).
#[must_use]
pub(crate) fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

/// Array/object nesting of `value`; scalars are 0.
pub(crate) fn json_depth(value: &Value) -> usize {
    match value {
        Value::Array(items) => 1 + items.iter().map(json_depth).max().unwrap_or(0),
        Value::Object(map) => 1 + map.values().map(json_depth).max().unwrap_or(0),
        _ => 0,
    }
}

/// Equality used by every comparison in the engine.
///
/// Numbers compare by numeric value regardless of integer/float encoding,
/// so `1` equals `1.0`. Containers compare element-wise with the same rule.
#[must_use]
pub(crate) fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => {
            numeric_cmp(a, b).is_some_and(|ord| ord == Ordering::Equal)
        }
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Membership under [`values_equal`].
#[must_use]
pub(crate) fn contains_value(set: &[Value], needle: &Value) -> bool {
    set.iter().any(|v| values_equal(v, needle))
}

/// Numeric view of a node. Text that parses as a number is coerced.
#[must_use]
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Ordering between two nodes viewed as numbers.
/// Returns `None` when either side is not numeric or the comparison is
/// undefined (NaN).
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub(crate) fn numeric_cmp(a: &Value, b: &Value) -> Option<Ordering> {
    if let (Value::Number(x), Value::Number(y)) = (a, b) {
        if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
            return Some(x.cmp(&y));
        }
        if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
            return Some(x.cmp(&y));
        }
    }
    as_number(a)?.partial_cmp(&as_number(b)?)
}

/// Remove duplicates under [`values_equal`], keeping first occurrences.
#[must_use]
pub(crate) fn dedup_values(values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for value in values {
        if !contains_value(&out, &value) {
            out.push(value);
        }
    }
    out
}
