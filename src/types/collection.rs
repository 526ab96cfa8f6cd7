use std::borrow::Cow;

use serde_json::Value;

use super::target::{PathExpr, PathTarget, Resolved};
use super::expr::{check_nesting, leaf_nesting};
use super::value::{contains_value, dedup_values, is_scalar, json_depth};
use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

/// Where the comparison set of a collection expression comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueSource {
    /// Literal values declared by the rule, duplicates removed,
    /// declaration order kept.
    Values(Vec<Value>),
    /// An array read from the document at this path.
    Path(String),
}

impl ValueSource {
    /// Nesting of the `values` array in canonical text; an empty list is
    /// omitted there.
    pub(crate) fn literal_depth(&self) -> usize {
        match self {
            ValueSource::Values(values) => values
                .iter()
                .map(json_depth)
                .max()
                .map_or(0, |deepest| deepest + 1),
            ValueSource::Path(_) => 0,
        }
    }
}

/// `in`, `not_in`, `contains_all` and `contains_any`.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionExpression {
    expression_type: ExpressionType,
    target: PathTarget,
    source: ValueSource,
}

impl CollectionExpression {
    pub(crate) fn new(
        expression_type: ExpressionType,
        target: PathExpr,
        source: ValueSource,
    ) -> Result<Self, BuildError> {
        if expression_type.family() != ExpressionFamily::Collection {
            return Err(BuildError::InvalidField {
                expression: expression_type,
                field: "values",
                reason: "not a collection expression".to_owned(),
            });
        }
        let source = match source {
            ValueSource::Values(values) => ValueSource::Values(dedup_values(values)),
            ValueSource::Path(path) if path.is_empty() => {
                return Err(BuildError::MissingField {
                    expression: expression_type,
                    field: "valuesPath",
                })
            }
            path @ ValueSource::Path(_) => path,
        };
        let target = target.into_target(expression_type)?;
        check_nesting(expression_type, leaf_nesting(&target, source.literal_depth()))?;
        Ok(Self {
            target,
            expression_type,
            source,
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
    pub fn source(&self) -> &ValueSource {
        &self.source
    }

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let subject = match self.target.resolve_subject(ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        let extracted: Cow<'_, Value>;
        let values: &[Value] = match &self.source {
            ValueSource::Values(values) => values,
            ValueSource::Path(path) => {
                extracted = match self.target.resolve_path(ctx, path)? {
                    Resolved::Node(node) => node,
                    Resolved::Absorbed(result) => return Ok(result),
                };
                match extracted.as_ref() {
                    Value::Array(values) => values,
                    _ => return Ok(false),
                }
            }
        };
        Ok(match self.expression_type {
            ExpressionType::In => is_scalar(&subject) && contains_value(values, &subject),
            ExpressionType::NotIn => !(is_scalar(&subject) && contains_value(values, &subject)),
            ExpressionType::ContainsAny => match subject.as_ref() {
                Value::Array(items) => items.iter().any(|item| contains_value(values, item)),
                _ => false,
            },
            // The subject array must be a subset of the declared values.
            _ => match subject.as_ref() {
                Value::Array(items) => items.iter().all(|item| contains_value(values, item)),
                _ => false,
            },
        })
    }
}
