//! Generic document tree, independent of the markup it was parsed from.

use indexmap::IndexMap;
use serde_json::Value;

/// A parsed document: objects keep their insertion order, scalars are text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValue {
    Object(IndexMap<String, TreeValue>),
    Array(Vec<TreeValue>),
    Scalar(String),
}

impl TreeValue {
    pub fn scalar(text: impl Into<String>) -> Self {
        TreeValue::Scalar(text.into())
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, TreeValue>> {
        match self {
            TreeValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            TreeValue::Scalar(text) => Some(text),
            _ => None,
        }
    }

    /// Look up a child of an object node.
    pub fn get(&self, key: &str) -> Option<&TreeValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Follow raw (unescaped) segments from this node, indexing arrays by number.
    ///
    /// ```
    /// use uixml::core::TreeValue;
    ///
    /// let tree = TreeValue::from_json(&serde_json::json!({"ROWS": [{"LBL": "a"}]}));
    /// assert_eq!(tree.pointer(&["ROWS", "0", "LBL"]).and_then(|v| v.as_scalar()), Some("a"));
    /// ```
    pub fn pointer(&self, segments: &[&str]) -> Option<&TreeValue> {
        segments.iter().try_fold(self, |node, segment| match node {
            TreeValue::Object(map) => map.get(*segment),
            TreeValue::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            TreeValue::Scalar(_) => None,
        })
    }

    /// Convert a JSON value, rendering non-string scalars as their JSON text.
    ///
    /// `null` becomes an empty scalar.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Object(map) => TreeValue::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), TreeValue::from_json(child)))
                    .collect(),
            ),
            Value::Array(items) => {
                TreeValue::Array(items.iter().map(TreeValue::from_json).collect())
            }
            Value::String(s) => TreeValue::Scalar(s.clone()),
            Value::Null => TreeValue::Scalar(String::new()),
            other => TreeValue::Scalar(other.to_string()),
        }
    }
}
