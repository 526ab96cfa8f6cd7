use serde_json::Value;

use super::target::{PathExpr, PathTarget, Resolved};
use super::expr::{check_nesting, leaf_nesting};
use super::value::{json_depth, values_equal};
use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// A literal value from the rule.
    Value(Value),
    /// A path whose node in the document is the comparison value.
    Path(String),
}

impl Operand {
    /// Resolve to a concrete value, absorbing a path miss through `target`.
    pub(crate) fn resolve<'a>(
        &'a self,
        target: &PathTarget,
        ctx: &EvaluationContext<'a>,
    ) -> Result<Resolved<'a>, EvaluationError> {
        match self {
            Operand::Value(value) => Ok(Resolved::Node(std::borrow::Cow::Borrowed(value))),
            Operand::Path(path) => target.resolve_path(ctx, path),
        }
    }
}

/// `equals` / `not_equals`.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualityExpression {
    expression_type: ExpressionType,
    target: PathTarget,
    operand: Operand,
}

impl EqualityExpression {
    pub(crate) fn new(
        expression_type: ExpressionType,
        target: PathExpr,
        operand: Operand,
    ) -> Result<Self, BuildError> {
        debug_assert_eq!(expression_type.family(), ExpressionFamily::Equality);
        let target = target.into_target(expression_type)?;
        if let Operand::Value(value) = &operand {
            check_nesting(expression_type, leaf_nesting(&target, json_depth(value)))?;
        }
        Ok(Self {
            target,
            expression_type,
            operand,
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
    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let subject = match self.target.resolve_subject(ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        let expected = match self.operand.resolve(&self.target, ctx)? {
            Resolved::Node(node) => node,
            Resolved::Absorbed(result) => return Ok(result),
        };
        let equal = values_equal(&subject, &expected);
        Ok(match self.expression_type {
            ExpressionType::NotEquals => !equal,
            _ => equal,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{path, EvaluationContext, EvaluationError, PreOperation};
    use serde_json::{json, Value};

    fn doc() -> Value {
        json!({"abcd": "Hello", "value": 20, "ratio": 20.0, "other": "Hello", "kid": null})
    }

    fn eval(expr: &crate::Expression) -> Result<bool, EvaluationError> {
        let doc = doc();
        expr.evaluate(&EvaluationContext::new(&doc))
    }

    #[test]
    fn literal_equals() {
        assert!(eval(&path("$.abcd").equals("Hello").unwrap()).unwrap());
        assert!(!eval(&path("$.abcd").equals("World").unwrap()).unwrap());
        assert!(eval(&path("$.value").equals(20).unwrap()).unwrap());
        assert!(eval(&path("$.value").equals(20.0).unwrap()).unwrap());
    }

    #[test]
    fn not_equals_negates() {
        assert!(!eval(&path("$.abcd").not_equals("Hello").unwrap()).unwrap());
        assert!(eval(&path("$.abcd").not_equals("World").unwrap()).unwrap());
    }

    #[test]
    fn null_equals_null() {
        assert!(eval(&path("$.kid").equals(Value::Null).unwrap()).unwrap());
    }

    #[test]
    fn compares_against_other_path() {
        assert!(eval(&path("$.abcd").equals_path("$.other").unwrap()).unwrap());
        assert!(eval(&path("$.value").equals_path("$.ratio").unwrap()).unwrap());
    }

    #[test]
    fn preoperation_only_touches_subject() {
        let expr = path("$.abcd")
            .preoperation(PreOperation::sub_str_after("H"))
            .not_equals_path("$.abcd")
            .unwrap();
        assert!(eval(&expr).unwrap());

        let expr = path("$.abcd")
            .preoperation(PreOperation::sub_str_after(""))
            .equals_path("$.abcd")
            .unwrap();
        assert!(eval(&expr).unwrap());
    }

    #[test]
    fn missing_subject_uses_variant_default() {
        assert!(!eval(&path("$.missing").equals(1).unwrap()).unwrap());
        assert!(eval(&path("$.missing").not_equals(1).unwrap()).unwrap());
    }

    #[test]
    fn missing_operand_path_uses_default() {
        let expr = path("$.abcd").default_result(true).equals_path("$.missing").unwrap();
        assert!(eval(&expr).unwrap());
    }

    #[test]
    fn missing_subject_propagates_when_configured() {
        let expr = path("$.missing").propagate_missing().equals(1).unwrap();
        assert!(eval(&expr).unwrap_err().is_path_failure());
    }

    #[test]
    fn preoperation_fault_is_not_absorbed_by_default_result() {
        let expr = path("$.value")
            .preoperation(PreOperation::sub_str_after("H"))
            .default_result(true)
            .equals(20)
            .unwrap();
        assert!(matches!(
            eval(&expr),
            Err(EvaluationError::UnsupportedOperation { found: "number", .. })
        ));
    }
}
