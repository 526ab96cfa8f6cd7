use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One rule node as it appears in JSON, before the registry resolves its
/// `"type"` tag. Fields that a variant does not use are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawExpression {
    #[serde(rename = "type")]
    pub(crate) tag: String,
    #[serde(default)]
    pub(crate) path: Option<String>,
    /// Absent: variant default. `null`: propagate failures.
    #[serde(default, deserialize_with = "present")]
    pub(crate) default_result: Option<Option<bool>>,
    #[serde(default)]
    pub(crate) preoperation: Option<RawPreOperation>,
    #[serde(default)]
    pub(crate) value: Option<Value>,
    #[serde(default)]
    pub(crate) extract_value_from_path: bool,
    #[serde(default)]
    pub(crate) values: Option<Vec<Value>>,
    #[serde(default)]
    pub(crate) extract_values: bool,
    #[serde(default)]
    pub(crate) values_path: Option<String>,
    #[serde(default)]
    pub(crate) lower_bound: Option<Value>,
    #[serde(default)]
    pub(crate) upper_bound: Option<Value>,
    #[serde(default)]
    pub(crate) ignore_case: bool,
    #[serde(default)]
    pub(crate) children: Option<Vec<RawExpression>>,
    #[serde(default)]
    pub(crate) child: Option<Box<RawExpression>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPreOperation {
    pub(crate) operation: String,
    #[serde(default)]
    pub(crate) delimiter: Option<String>,
    #[serde(default)]
    pub(crate) begin_index: Option<i64>,
    #[serde(default)]
    pub(crate) end_index: Option<i64>,
    #[serde(default)]
    pub(crate) suppress_exceptions: bool,
}

/// Distinguishes an explicit `null` from an absent key.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
