mod error;
mod evaluate;
pub mod parse;
pub mod path;
pub mod serial;
mod types;

pub use error::JsonRulesError;
pub use parse::ParseError;
pub use path::{JsonPathResolver, PathResolver};
pub use types::{
    path, BuildError, CollectionExpression, CompositeExpression, EqualityExpression,
    EvaluationContext, EvaluationError, ExistenceExpression, Expression, ExpressionFamily,
    ExpressionType, NumericBound, NumericExpression, Operand, PathExpr, PathTarget, PreOperation,
    PreOperationType, PresenceExpression, Rule, StringMatchExpression, UnknownExpressionType,
    UnknownPreOperation, ValueSource, MAX_NESTING,
};
