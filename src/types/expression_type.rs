use std::fmt;
use std::str::FromStr;

/// Discriminator tag of every expression variant.
///
/// The tag is fixed when an expression is built and drives both dispatch
/// during parsing and the `"type"` field of the canonical representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpressionType {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    Between,
    In,
    NotIn,
    ContainsAll,
    ContainsAny,
    Empty,
    NotEmpty,
    StartsWith,
    EndsWith,
    Matches,
    Exists,
    NotExists,
    And,
    Or,
    Not,
}

/// Groups of variants that share one concrete representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionFamily {
    Equality,
    Numeric,
    Collection,
    Presence,
    StringMatch,
    Existence,
    Composite,
}

/// Tag registry, used in both directions: parsing looks tags up here and
/// serialization emits the tag stored next to the variant.
const REGISTRY: &[(&str, ExpressionType)] = &[
    ("equals", ExpressionType::Equals),
    ("not_equals", ExpressionType::NotEquals),
    ("greater_than", ExpressionType::GreaterThan),
    ("greater_than_equals", ExpressionType::GreaterThanEquals),
    ("less_than", ExpressionType::LessThan),
    ("less_than_equals", ExpressionType::LessThanEquals),
    ("between", ExpressionType::Between),
    ("in", ExpressionType::In),
    ("not_in", ExpressionType::NotIn),
    ("contains_all", ExpressionType::ContainsAll),
    ("contains_any", ExpressionType::ContainsAny),
    ("empty", ExpressionType::Empty),
    ("not_empty", ExpressionType::NotEmpty),
    ("starts_with", ExpressionType::StartsWith),
    ("ends_with", ExpressionType::EndsWith),
    ("matches", ExpressionType::Matches),
    ("exists", ExpressionType::Exists),
    ("not_exists", ExpressionType::NotExists),
    ("and", ExpressionType::And),
    ("or", ExpressionType::Or),
    ("not", ExpressionType::Not),
];

impl ExpressionType {
    /// Look up a variant by its JSON tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|&(_, ty)| ty)
    }

    /// The JSON tag emitted for this variant.
    #[must_use]
    pub fn tag(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|&&(_, ty)| ty == self)
            .map_or("", |&(name, _)| name)
    }

    /// Every registered variant, in registry order.
    pub fn all() -> impl Iterator<Item = ExpressionType> {
        REGISTRY.iter().map(|&(_, ty)| ty)
    }

    #[must_use]
    pub fn family(self) -> ExpressionFamily {
        match self {
            ExpressionType::Equals | ExpressionType::NotEquals => ExpressionFamily::Equality,
            ExpressionType::GreaterThan
            | ExpressionType::GreaterThanEquals
            | ExpressionType::LessThan
            | ExpressionType::LessThanEquals
            | ExpressionType::Between => ExpressionFamily::Numeric,
            ExpressionType::In
            | ExpressionType::NotIn
            | ExpressionType::ContainsAll
            | ExpressionType::ContainsAny => ExpressionFamily::Collection,
            ExpressionType::Empty | ExpressionType::NotEmpty => ExpressionFamily::Presence,
            ExpressionType::StartsWith | ExpressionType::EndsWith | ExpressionType::Matches => {
                ExpressionFamily::StringMatch
            }
            ExpressionType::Exists | ExpressionType::NotExists => ExpressionFamily::Existence,
            ExpressionType::And | ExpressionType::Or | ExpressionType::Not => {
                ExpressionFamily::Composite
            }
        }
    }

    /// Result substituted when the subject path fails to resolve and the
    /// expression was not told otherwise.
    #[must_use]
    pub fn default_result(self) -> bool {
        matches!(
            self,
            ExpressionType::NotEquals
                | ExpressionType::NotIn
                | ExpressionType::Empty
                | ExpressionType::NotExists
        )
    }

    /// Whether a pre-operation may be attached to this variant.
    #[must_use]
    pub fn accepts_preoperation(self) -> bool {
        !matches!(
            self,
            ExpressionType::ContainsAll
                | ExpressionType::ContainsAny
                | ExpressionType::Exists
                | ExpressionType::NotExists
                | ExpressionType::And
                | ExpressionType::Or
                | ExpressionType::Not
        )
    }
}

impl fmt::Display for ExpressionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string is not a registered expression tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown expression type '{0}'")]
pub struct UnknownExpressionType(pub String);

impl FromStr for ExpressionType {
    type Err = UnknownExpressionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownExpressionType(s.to_owned()))
    }
}
