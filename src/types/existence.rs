use super::{BuildError, EvaluationContext, EvaluationError, ExpressionFamily, ExpressionType};

/// `exists` / `not_exists`: whether the path resolves at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistenceExpression {
    expression_type: ExpressionType,
    path: String,
}

impl ExistenceExpression {
    pub(crate) fn new(expression_type: ExpressionType, path: String) -> Result<Self, BuildError> {
        if expression_type.family() != ExpressionFamily::Existence {
            return Err(BuildError::InvalidField {
                expression: expression_type,
                field: "type",
                reason: "not an existence check".to_owned(),
            });
        }
        Ok(Self {
            expression_type,
            path,
        })
    }

    #[must_use]
    pub fn expression_type(&self) -> ExpressionType {
        self.expression_type
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn evaluate(&self, ctx: &EvaluationContext<'_>) -> Result<bool, EvaluationError> {
        let exists = match ctx.resolve(&self.path) {
            Ok(_) => true,
            Err(err) if err.is_path_failure() => false,
            Err(err) => return Err(err),
        };
        Ok(match self.expression_type {
            ExpressionType::NotExists => !exists,
            _ => exists,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{path, EvaluationContext, EvaluationError, Expression};
    use serde_json::json;

    fn eval(expr: &Expression) -> Result<bool, EvaluationError> {
        let doc = json!({"present": 1, "kid": null});
        expr.evaluate(&EvaluationContext::new(&doc))
    }

    #[test]
    fn present_and_absent() {
        assert!(eval(&path("$.present").exists().unwrap()).unwrap());
        assert!(eval(&path("$.kid").exists().unwrap()).unwrap());
        assert!(!eval(&path("$.missing").exists().unwrap()).unwrap());
        assert!(eval(&path("$.missing").not_exists().unwrap()).unwrap());
    }

    #[test]
    fn invalid_path_still_faults() {
        let err = eval(&path("$[").exists().unwrap()).unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidPath { .. }));
    }
}
