//! Record identifiers
//!
//! Ids are integers or strings. Foreign key attributes are read back into a
//! [`RecordId`] before comparison, so a JSON value that is neither an
//! integral number nor a string never matches anything.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier of a record within its owning collection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer id
    Int(i64),
    /// String id
    Str(String),
}

impl RecordId {
    /// Read an id out of an attribute value
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }

    /// Convert back into an attribute value
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(id) => Value::from(*id),
            RecordId::Str(id) => Value::from(id.as_str()),
        }
    }

    /// Extract as i64 if this is an integer id
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RecordId::Int(id) => Some(*id),
            RecordId::Str(_) => None,
        }
    }

    /// Extract as str if this is a string id
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RecordId::Str(id) => Some(id),
            RecordId::Int(_) => None,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Int(id) => write!(f, "{}", id),
            RecordId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        RecordId::Int(id as i64)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Str(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Str(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value() {
        assert_eq!(RecordId::from_value(&json!(3)), Some(RecordId::Int(3)));
        assert_eq!(RecordId::from_value(&json!("a")), Some(RecordId::from("a")));
        assert_eq!(RecordId::from_value(&json!(null)), None);
        assert_eq!(RecordId::from_value(&json!(1.5)), None);
        assert_eq!(RecordId::from_value(&json!({"id": 1})), None);
    }

    #[test]
    fn test_int_and_string_ids_are_distinct() {
        assert_ne!(RecordId::from(1), RecordId::from("1"));
    }

    #[test]
    fn test_serializes_untagged() {
        assert_eq!(serde_json::to_value(RecordId::from(7)).unwrap(), json!(7));
        assert_eq!(serde_json::to_value(RecordId::from("x")).unwrap(), json!("x"));
        assert_eq!(RecordId::from(7).to_value(), json!(7));
    }
}
