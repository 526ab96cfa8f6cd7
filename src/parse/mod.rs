mod error;
mod raw;

pub use error::ParseError;

use serde::Deserialize;
use serde_json::Value;

use raw::{RawExpression, RawPreOperation};

use crate::types::{
    CollectionExpression, CompositeExpression, EqualityExpression, NumericBound,
    NumericExpression, Operand, PresenceExpression, StringMatchExpression, ValueSource,
};
use crate::{
    path, BuildError, Expression, ExpressionFamily, ExpressionType, PreOperation,
    PreOperationType,
};

/// Parse rule JSON text into an [`Expression`] tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the input is not valid rule JSON.
pub fn parse(input: &str) -> Result<Expression, ParseError> {
    let raw: RawExpression = serde_json::from_str(input)?;
    build(raw)
}

/// Parse an already-decoded JSON value into an [`Expression`] tree.
///
/// # Errors
///
/// Returns [`ParseError`] if the value is not a valid rule.
pub fn parse_value(value: &Value) -> Result<Expression, ParseError> {
    let raw = RawExpression::deserialize(value)?;
    build(raw)
}

/// Parse a pre-operation object.
///
/// # Errors
///
/// Returns [`ParseError`] on an unknown `"operation"` tag or malformed input.
pub fn parse_preoperation(value: &Value) -> Result<PreOperation, ParseError> {
    let raw = RawPreOperation::deserialize(value)?;
    build_preoperation(raw)
}

/// Resolve the node's tag through the registry and construct the variant.
/// Children are built before their parent.
fn build(raw: RawExpression) -> Result<Expression, ParseError> {
    let ty = ExpressionType::from_tag(&raw.tag).ok_or_else(|| {
        ParseError::UnknownExpressionType {
            tag: raw.tag.clone(),
        }
    })?;
    match ty.family() {
        ExpressionFamily::Composite => build_composite(ty, raw),
        family => build_leaf(ty, family, raw),
    }
}

fn build_composite(ty: ExpressionType, raw: RawExpression) -> Result<Expression, ParseError> {
    let raw_children = match (raw.children, raw.child) {
        (Some(children), None) => children,
        (None, Some(child)) => vec![*child],
        (None, None) => Vec::new(),
        (Some(_), Some(_)) => {
            return Err(BuildError::InvalidField {
                expression: ty,
                field: "child",
                reason: "both 'child' and 'children' given".to_owned(),
            }
            .into())
        }
    };
    let children = raw_children
        .into_iter()
        .map(build)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Expression::Composite(CompositeExpression::new(ty, children)?))
}

fn build_leaf(
    ty: ExpressionType,
    family: ExpressionFamily,
    raw: RawExpression,
) -> Result<Expression, ParseError> {
    let subject = raw.path.ok_or(BuildError::MissingField {
        expression: ty,
        field: "path",
    })?;
    let mut target = path(&subject).with_default_result(raw.default_result);
    if let Some(op) = raw.preoperation {
        target = target.preoperation(build_preoperation(op)?);
    }

    let expr = match family {
        ExpressionFamily::Equality => {
            let operand = operand(ty, raw.value, raw.extract_value_from_path, false)?;
            Expression::Equality(EqualityExpression::new(ty, target, operand)?)
        }
        ExpressionFamily::Numeric => {
            let bound = if ty == ExpressionType::Between {
                NumericBound::Between {
                    lower: raw.lower_bound.ok_or(BuildError::MissingField {
                        expression: ty,
                        field: "lowerBound",
                    })?,
                    upper: raw.upper_bound.ok_or(BuildError::MissingField {
                        expression: ty,
                        field: "upperBound",
                    })?,
                }
            } else {
                NumericBound::Compare(operand(
                    ty,
                    raw.value,
                    raw.extract_value_from_path,
                    true,
                )?)
            };
            Expression::Numeric(NumericExpression::new(ty, target, bound)?)
        }
        ExpressionFamily::Collection => {
            let source = if raw.extract_values {
                ValueSource::Path(raw.values_path.ok_or(BuildError::MissingField {
                    expression: ty,
                    field: "valuesPath",
                })?)
            } else {
                ValueSource::Values(raw.values.unwrap_or_default())
            };
            Expression::Collection(CollectionExpression::new(ty, target, source)?)
        }
        ExpressionFamily::Presence => Expression::Presence(PresenceExpression::new(ty, target)?),
        ExpressionFamily::StringMatch => {
            let value = match raw.value {
                Some(Value::String(s)) => s,
                Some(_) => {
                    return Err(BuildError::InvalidField {
                        expression: ty,
                        field: "value",
                        reason: "expected a string".to_owned(),
                    }
                    .into())
                }
                None => {
                    return Err(BuildError::MissingField {
                        expression: ty,
                        field: "value",
                    }
                    .into())
                }
            };
            Expression::StringMatch(StringMatchExpression::new(
                ty,
                target,
                &value,
                raw.ignore_case,
            )?)
        }
        // composites never reach here; into_existence rejects any non-existence type
        ExpressionFamily::Existence | ExpressionFamily::Composite => {
            Expression::Existence(target.into_existence(ty)?)
        }
    };
    Ok(expr)
}

/// Right-hand operand from `value` + `extractValueFromPath`.
fn operand(
    ty: ExpressionType,
    value: Option<Value>,
    from_path: bool,
    required: bool,
) -> Result<Operand, BuildError> {
    match (value, from_path) {
        (Some(Value::String(p)), true) => Ok(Operand::Path(p)),
        (Some(_), true) => Err(BuildError::InvalidField {
            expression: ty,
            field: "value",
            reason: "expected a path string when extractValueFromPath is set".to_owned(),
        }),
        (None, true) => Err(BuildError::MissingField {
            expression: ty,
            field: "value",
        }),
        (Some(v), false) => Ok(Operand::Value(v)),
        (None, false) if required => Err(BuildError::MissingField {
            expression: ty,
            field: "value",
        }),
        (None, false) => Ok(Operand::Value(Value::Null)),
    }
}

fn build_preoperation(raw: RawPreOperation) -> Result<PreOperation, ParseError> {
    let ty = PreOperationType::from_tag(&raw.operation).ok_or_else(|| {
        ParseError::UnknownPreOperation {
            tag: raw.operation.clone(),
        }
    })?;
    let op = match ty {
        PreOperationType::SubStr => PreOperation::sub_str(
            raw.begin_index.unwrap_or(0),
            raw.end_index.unwrap_or(-1),
        ),
        PreOperationType::SubStrBefore => {
            PreOperation::sub_str_before(raw.delimiter.unwrap_or_default())
        }
        PreOperationType::SubStrAfter => {
            PreOperation::sub_str_after(raw.delimiter.unwrap_or_default())
        }
    };
    Ok(op.suppress_exceptions(raw.suppress_exceptions))
}
