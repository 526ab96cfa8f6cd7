use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use super::value::type_name;
use super::EvaluationError;

/// Tag of a pre-operation, emitted as `"operation"` in the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreOperationType {
    SubStr,
    SubStrBefore,
    SubStrAfter,
}

const REGISTRY: &[(&str, PreOperationType)] = &[
    ("sub_str", PreOperationType::SubStr),
    ("sub_str_before", PreOperationType::SubStrBefore),
    ("sub_str_after", PreOperationType::SubStrAfter),
];

impl PreOperationType {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(name, _)| *name == tag)
            .map(|&(_, ty)| ty)
    }

    #[must_use]
    pub fn tag(self) -> &'static str {
        REGISTRY
            .iter()
            .find(|&&(_, ty)| ty == self)
            .map_or("", |&(name, _)| name)
    }
}

impl fmt::Display for PreOperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string is not a registered pre-operation tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pre-operation '{0}'")]
pub struct UnknownPreOperation(pub String);

impl FromStr for PreOperationType {
    type Err = UnknownPreOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownPreOperation(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Transform {
    SubStr { begin_index: i64, end_index: i64 },
    SubStrBefore { delimiter: Option<String> },
    SubStrAfter { delimiter: Option<String> },
}

/// A single text transform applied to the subject node before comparison.
///
/// Failures are governed locally by `suppress_exceptions`: when set, a
/// non-text subject or an invalid transform yields an empty string instead
/// of a fault. This is independent of the owning expression's
/// `defaultResult`, which only covers path resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreOperation {
    transform: Transform,
    suppress_exceptions: bool,
}

impl PreOperation {
    /// A pre-operation of the given type with every parameter unset.
    #[must_use]
    pub fn new(operation: PreOperationType) -> Self {
        let transform = match operation {
            PreOperationType::SubStr => Transform::SubStr {
                begin_index: 0,
                end_index: -1,
            },
            PreOperationType::SubStrBefore => Transform::SubStrBefore { delimiter: None },
            PreOperationType::SubStrAfter => Transform::SubStrAfter { delimiter: None },
        };
        Self {
            transform,
            suppress_exceptions: false,
        }
    }

    /// Text preceding the first occurrence of `delimiter`.
    /// An empty delimiter counts as unset.
    #[must_use]
    pub fn sub_str_before(delimiter: impl Into<String>) -> Self {
        Self {
            transform: Transform::SubStrBefore {
                delimiter: non_empty(delimiter.into()),
            },
            suppress_exceptions: false,
        }
    }

    /// Text following the first occurrence of `delimiter`.
    /// An empty delimiter counts as unset.
    #[must_use]
    pub fn sub_str_after(delimiter: impl Into<String>) -> Self {
        Self {
            transform: Transform::SubStrAfter {
                delimiter: non_empty(delimiter.into()),
            },
            suppress_exceptions: false,
        }
    }

    /// Characters `[begin_index, end_index)` of the text.
    #[must_use]
    pub fn sub_str(begin_index: i64, end_index: i64) -> Self {
        Self {
            transform: Transform::SubStr {
                begin_index,
                end_index,
            },
            suppress_exceptions: false,
        }
    }

    #[must_use]
    pub fn suppress_exceptions(mut self, suppress: bool) -> Self {
        self.suppress_exceptions = suppress;
        self
    }

    #[must_use]
    pub fn operation(&self) -> PreOperationType {
        match self.transform {
            Transform::SubStr { .. } => PreOperationType::SubStr,
            Transform::SubStrBefore { .. } => PreOperationType::SubStrBefore,
            Transform::SubStrAfter { .. } => PreOperationType::SubStrAfter,
        }
    }

    /// The delimiter of `sub_str_before`/`sub_str_after`, if set.
    #[must_use]
    pub fn delimiter(&self) -> Option<&str> {
        match &self.transform {
            Transform::SubStrBefore { delimiter } | Transform::SubStrAfter { delimiter } => {
                delimiter.as_deref()
            }
            Transform::SubStr { .. } => None,
        }
    }

    /// The `(begin, end)` character bounds of `sub_str`.
    #[must_use]
    pub fn bounds(&self) -> Option<(i64, i64)> {
        match self.transform {
            Transform::SubStr {
                begin_index,
                end_index,
            } => Some((begin_index, end_index)),
            _ => None,
        }
    }

    #[must_use]
    pub fn suppresses_exceptions(&self) -> bool {
        self.suppress_exceptions
    }

    /// Apply the transform to `node`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::UnsupportedOperation`] when `node` is not text and
    /// [`EvaluationError::TransformFailed`] when `sub_str` bounds do not fit,
    /// unless exceptions are suppressed.
    pub fn compute(&self, node: &Value) -> Result<String, EvaluationError> {
        let result = match node {
            Value::String(text) => self.apply(text),
            other => Err(EvaluationError::UnsupportedOperation {
                operation: self.operation(),
                found: type_name(other),
            }),
        };
        match result {
            Err(err) if self.suppress_exceptions => {
                tracing::debug!(operation = %self.operation(), error = %err, "pre-operation fault suppressed");
                Ok(String::new())
            }
            other => other,
        }
    }

    fn apply(&self, text: &str) -> Result<String, EvaluationError> {
        match &self.transform {
            Transform::SubStrBefore { delimiter } => Ok(match delimiter {
                Some(d) => text.find(d.as_str()).map_or(text, |idx| &text[..idx]),
                None => text,
            }
            .to_owned()),
            Transform::SubStrAfter { delimiter } => Ok(match delimiter {
                Some(d) => text
                    .find(d.as_str())
                    .map_or(text, |idx| &text[idx + d.len()..]),
                None => text,
            }
            .to_owned()),
            Transform::SubStr {
                begin_index,
                end_index,
            } => {
                let len = text.chars().count();
                let bounds = usize::try_from(*begin_index)
                    .ok()
                    .zip(usize::try_from(*end_index).ok())
                    .filter(|&(begin, end)| begin < end && end <= len);
                match bounds {
                    Some((begin, end)) => Ok(text.chars().skip(begin).take(end - begin).collect()),
                    None => Err(EvaluationError::TransformFailed {
                        operation: PreOperationType::SubStr,
                        reason: format!(
                            "bounds [{begin_index}, {end_index}) do not fit text of length {len}"
                        ),
                    }),
                }
            }
        }
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
