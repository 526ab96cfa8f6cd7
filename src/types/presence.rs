use serde_json::Value;

use super::target::{PathExpr, PathTarget, Resolved};
use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

/// `empty` / `not_empty`.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceExpression {
    expression_type: ExpressionType,
    target: PathTarget,
}

impl PresenceExpression {
    pub(crate) fn new(expression_type: ExpressionType, target: PathExpr) -> Result<Self, BuildError> {
        debug_assert_eq!(expression_type.family(), ExpressionFamily::Presence);
        Ok(Self {
            target: target.into_target(expression_type)?,
            expression_type,
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

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let subject = match self.target.resolve_subject(ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        let empty = match subject.as_ref() {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(fields) => fields.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        };
        Ok(match self.expression_type {
            ExpressionType::NotEmpty => !empty,
            _ => empty,
        })
    }
}
