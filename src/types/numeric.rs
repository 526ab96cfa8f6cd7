use std::cmp::Ordering;

use serde_json::Value;

use super::equality::Operand;
use super::target::{PathExpr, PathTarget, Resolved};
use super::value::{as_number, numeric_cmp, type_name};
use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

#[derive(Debug, Clone, PartialEq)]
pub enum NumericBound {
    /// Single-sided comparison against a literal or path operand.
    Compare(Operand),
    /// Exclusive range.
    Between { lower: Value, upper: Value },
}

/// `greater_than`, `greater_than_equals`, `less_than`, `less_than_equals`
/// and `between`.
///
/// Subjects that are not numbers (text is coerced when it parses) are a
/// no-match rather than a fault.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericExpression {
    expression_type: ExpressionType,
    target: PathTarget,
    bound: NumericBound,
}

impl NumericExpression {
    pub(crate) fn new(
        expression_type: ExpressionType,
        target: PathExpr,
        bound: NumericBound,
    ) -> Result<Self, BuildError> {
        debug_assert_eq!(expression_type.family(), ExpressionFamily::Numeric);
        match &bound {
            NumericBound::Compare(Operand::Value(value)) => {
                require_number(expression_type, "value", value)?;
            }
            NumericBound::Compare(Operand::Path(_)) => {}
            NumericBound::Between { lower, upper } => {
                require_number(expression_type, "lowerBound", lower)?;
                require_number(expression_type, "upperBound", upper)?;
                if numeric_cmp(lower, upper) != Some(Ordering::Less) {
                    return Err(BuildError::InvalidField {
                        expression: expression_type,
                        field: "upperBound",
                        reason: format!("{upper} is not greater than {lower}"),
                    });
                }
            }
        }
        let between = matches!(bound, NumericBound::Between { .. });
        if between != (expression_type == ExpressionType::Between) {
            return Err(BuildError::InvalidField {
                expression: expression_type,
                field: "value",
                reason: "bound shape does not match the expression type".to_owned(),
            });
        }
        Ok(Self {
            target: target.into_target(expression_type)?,
            expression_type,
            bound,
        })
    }

    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        self.expression_type
    }

    #[must_use]
    pub fn target(&self) -> &PathTarget {
        &self.target
    }

    #[must_use]
    pub fn bound(&self) -> &NumericBound {
        &self.bound
    }

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let subject = match self.target.resolve_subject(ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        match &self.bound {
            NumericBound::Compare(operand) => {
                let expected = match operand.resolve(&self.target, ctx)? {
                    Resolved::Node(node) => node,
                    Resolved::Absorbed(result) => return Ok(result),
                };
                let Some(ord) = numeric_cmp(&subject, &expected) else {
                    return Ok(false);
                };
                Ok(match self.expression_type {
                    ExpressionType::GreaterThan => ord == Ordering::Greater,
                    ExpressionType::GreaterThanEquals => ord != Ordering::Less,
                    ExpressionType::LessThan => ord == Ordering::Less,
                    _ => ord != Ordering::Greater,
                })
            }
            NumericBound::Between { lower, upper } => Ok(
                numeric_cmp(&subject, lower) == Some(Ordering::Greater)
                    && numeric_cmp(&subject, upper) == Some(Ordering::Less),
            ),
        }
    }
}

fn require_number(
    expression: ExpressionType,
    field: &'static str,
    value: &Value,
) -> Result<(), BuildError> {
    match value {
        Value::Number(_) if as_number(value).is_some() => Ok(()),
        other => Err(BuildError::InvalidField {
            expression,
            field,
            reason: format!("expected a number, got {}", type_name(other)),
        }),
    }
}
