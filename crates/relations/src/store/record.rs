//! Records - identified attribute bags owned by a collection

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use super::id::RecordId;
use crate::error::{RelationError, RelationResult};
use crate::relationships::path;
use crate::relationships::registry::ModelType;
use crate::relationships::related::Related;

/// Attribute storage for records and collection options
pub type Attributes = serde_json::Map<String, Value>;

/// A uniquely identified record.
///
/// Records are always handed out as `Arc<Record>`; two records are the same
/// record only when they are the same allocation.
pub struct Record {
    id: RecordId,
    model: Arc<ModelType>,
    attributes: RwLock<Attributes>,
}

impl Record {
    pub(crate) fn new(id: RecordId, model: Arc<ModelType>, mut attributes: Attributes) -> Arc<Self> {
        attributes.remove("id");
        Arc::new(Self {
            id,
            model,
            attributes: RwLock::new(attributes),
        })
    }

    /// Stable identifier of this record
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Model type this record belongs to
    pub fn model(&self) -> &Arc<ModelType> {
        &self.model
    }

    /// Read an attribute; `"id"` yields the record id
    pub fn get(&self, attribute: &str) -> Option<Value> {
        if attribute == "id" {
            return Some(self.id.to_value());
        }
        self.attributes.read().get(attribute).cloned()
    }

    /// Set an attribute value
    pub fn set(&self, attribute: &str, value: impl Into<Value>) -> RelationResult<()> {
        if attribute == "id" {
            return Err(RelationError::ImmutableId);
        }
        self.attributes.write().insert(attribute.to_string(), value.into());
        Ok(())
    }

    /// Remove an attribute, returning its previous value
    pub fn unset(&self, attribute: &str) -> Option<Value> {
        self.attributes.write().remove(attribute)
    }

    /// Snapshot of all attributes, id included
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("id".to_string(), self.id.to_value());
        for (key, value) in self.attributes.read().iter() {
            attributes.insert(key.clone(), value.clone());
        }
        attributes
    }

    /// Serialize the record as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.attributes())
    }

    /// Identity comparison
    pub fn is(&self, other: &Record) -> bool {
        std::ptr::eq(self, other)
    }

    /// Resolve a dotted relation path starting at this record
    pub fn rel(self: &Arc<Self>, path: &str) -> RelationResult<Related> {
        path::resolve_record_path(self, path)
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("model", &self.model.name())
            .field("id", &self.id)
            .field("attributes", &*self.attributes.read())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::registry::ModelRegistry;
    use serde_json::json;

    fn record(attributes: Value) -> Arc<Record> {
        let registry = ModelRegistry::new();
        let model = registry.model("User");
        let attributes = match attributes {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        Record::new(RecordId::from(1), model, attributes)
    }

    #[test]
    fn test_get_and_set() {
        let user = record(json!({"id": 1, "project_id": 0}));
        assert_eq!(user.get("id"), Some(json!(1)));
        assert_eq!(user.get("project_id"), Some(json!(0)));
        assert_eq!(user.get("missing"), None);

        user.set("project_id", 2).unwrap();
        assert_eq!(user.get("project_id"), Some(json!(2)));

        assert_eq!(user.unset("project_id"), Some(json!(2)));
        assert_eq!(user.get("project_id"), None);
    }

    #[test]
    fn test_id_is_immutable() {
        let user = record(json!({"id": 1}));
        assert!(matches!(user.set("id", 5), Err(RelationError::ImmutableId)));
        assert_eq!(user.id(), &RecordId::from(1));
    }

    #[test]
    fn test_to_json_includes_id() {
        let user = record(json!({"id": 1, "name": "ada"}));
        assert_eq!(user.to_json(), json!({"id": 1, "name": "ada"}));
    }

    #[test]
    fn test_identity() {
        let a = record(json!({"id": 1}));
        let b = record(json!({"id": 1}));
        assert!(a.is(&a));
        assert!(!a.is(&b));
    }
}
