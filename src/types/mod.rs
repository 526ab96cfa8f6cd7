mod collection;
mod composite;
mod context;
mod equality;
mod error;
mod existence;
mod expr;
mod expression_type;
mod numeric;
mod preoperation;
mod presence;
mod rule;
mod string_match;
mod target;
mod value;

pub use collection::{CollectionExpression, ValueSource};
pub use composite::CompositeExpression;
pub use context::EvaluationContext;
pub use equality::{EqualityExpression, Operand};
pub use error::{BuildError, EvaluationError};
pub use existence::ExistenceExpression;
pub use expr::{Expression, MAX_NESTING};
pub use expression_type::{ExpressionFamily, ExpressionType, UnknownExpressionType};
pub use numeric::{NumericBound, NumericExpression};
pub use preoperation::{PreOperation, PreOperationType, UnknownPreOperation};
pub use presence::PresenceExpression;
pub use rule::Rule;
pub use string_match::StringMatchExpression;
pub use target::{path, PathExpr, PathTarget};
