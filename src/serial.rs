//! Canonical JSON representation of rule trees.
//!
//! ## Canonical form
//!
//! Each node is an object whose keys appear in a fixed order:
//!
//! ```text
//! type, path, preoperation, defaultResult, <variant fields>
//! ```
//!
//! Composite nodes carry only `type` and `children` (`not` included, with a
//! single-element list). Booleans are always written; optional strings and
//! empty value lists are omitted. `defaultResult` is `null` when the node
//! propagates path-resolution failures instead of absorbing them.
//!
//! Parsing this output rebuilds an equal tree, so the representation is a
//! fixed point: `create(repr(r))` produces `repr(r)` again byte for byte.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::types::{NumericBound, Operand, PathTarget, ValueSource};
use crate::{Expression, PreOperation, PreOperationType, Rule};

/// Canonical JSON value of an expression tree.
#[must_use]
pub fn to_json(expr: &Expression) -> Value {
    let mut node = Map::new();
    node.insert("type".into(), expr.expression_type().tag().into());
    match expr {
        Expression::Equality(e) => {
            write_target(&mut node, e.target());
            write_operand(&mut node, e.operand());
        }
        Expression::Numeric(e) => {
            write_target(&mut node, e.target());
            match e.bound() {
                NumericBound::Compare(operand) => write_operand(&mut node, operand),
                NumericBound::Between { lower, upper } => {
                    node.insert("lowerBound".into(), lower.clone());
                    node.insert("upperBound".into(), upper.clone());
                }
            }
        }
        Expression::Collection(e) => {
            write_target(&mut node, e.target());
            match e.source() {
                ValueSource::Values(values) => {
                    if !values.is_empty() {
                        node.insert("values".into(), Value::Array(values.clone()));
                    }
                    node.insert("extractValues".into(), false.into());
                }
                ValueSource::Path(path) => {
                    node.insert("extractValues".into(), true.into());
                    node.insert("valuesPath".into(), path.as_str().into());
                }
            }
        }
        Expression::Presence(e) => write_target(&mut node, e.target()),
        Expression::StringMatch(e) => {
            write_target(&mut node, e.target());
            node.insert("value".into(), e.value().into());
            node.insert("ignoreCase".into(), e.ignore_case().into());
        }
        Expression::Existence(e) => {
            node.insert("path".into(), e.path().into());
        }
        Expression::Composite(e) => {
            node.insert(
                "children".into(),
                Value::Array(e.children().iter().map(to_json).collect()),
            );
        }
    }
    Value::Object(node)
}

/// Canonical JSON value of a pre-operation.
#[must_use]
pub fn preoperation_to_json(op: &PreOperation) -> Value {
    let mut node = Map::new();
    node.insert("operation".into(), op.operation().tag().into());
    match op.operation() {
        PreOperationType::SubStr => {
            if let Some((begin, end)) = op.bounds() {
                node.insert("beginIndex".into(), begin.into());
                node.insert("endIndex".into(), end.into());
            }
        }
        PreOperationType::SubStrBefore | PreOperationType::SubStrAfter => {
            if let Some(delimiter) = op.delimiter() {
                node.insert("delimiter".into(), delimiter.into());
            }
        }
    }
    node.insert(
        "suppressExceptions".into(),
        op.suppresses_exceptions().into(),
    );
    Value::Object(node)
}

fn write_target(node: &mut Map<String, Value>, target: &PathTarget) {
    node.insert("path".into(), target.path().into());
    if let Some(op) = target.preoperation() {
        node.insert("preoperation".into(), preoperation_to_json(op));
    }
    node.insert(
        "defaultResult".into(),
        target.default_result().map_or(Value::Null, Value::Bool),
    );
}

fn write_operand(node: &mut Map<String, Value>, operand: &Operand) {
    let (value, from_path) = match operand {
        Operand::Value(value) => (value.clone(), false),
        Operand::Path(path) => (Value::String(path.clone()), true),
    };
    node.insert("value".into(), value);
    node.insert("extractValueFromPath".into(), from_path.into());
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        to_json(self).serialize(serializer)
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}

impl Serialize for PreOperation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        preoperation_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        crate::parse::parse_value(&value).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Expression::deserialize(deserializer).map(Rule::new)
    }
}

impl<'de> Deserialize<'de> for PreOperation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        crate::parse::parse_preoperation(&value).map_err(D::Error::custom)
    }
}
