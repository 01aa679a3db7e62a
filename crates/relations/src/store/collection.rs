//! Collections - ordered, id-indexed sets of records of one model type

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use super::id::RecordId;
use super::record::{Attributes, Record};
use crate::error::{RelationError, RelationResult};
use crate::relationships::context::CollectionContext;
use crate::relationships::path;
use crate::relationships::registry::ModelType;
use crate::relationships::related::Related;

/// An ordered collection of records.
///
/// Insertion order is preserved by iteration and by every has-many result
/// computed against the collection. Options and the collection context are
/// captured at construction and never change afterwards.
pub struct Collection {
    model: Arc<ModelType>,
    records: RwLock<IndexMap<RecordId, Arc<Record>>>,
    options: Attributes,
    context: Option<Arc<CollectionContext>>,
}

impl Collection {
    /// Create an empty collection without options or context
    pub fn new(model: &Arc<ModelType>) -> Arc<Self> {
        Self::builder(model).build()
    }

    /// Start building a collection with construction-time options
    pub fn builder(model: &Arc<ModelType>) -> CollectionBuilder {
        CollectionBuilder {
            model: Arc::clone(model),
            options: Attributes::new(),
            context: None,
        }
    }

    /// Model type of the records held here
    pub fn model(&self) -> &Arc<ModelType> {
        &self.model
    }

    /// Collection-level relation declarations, if any
    pub fn context(&self) -> Option<&Arc<CollectionContext>> {
        self.context.as_ref()
    }

    /// Construction-time option value
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// All construction-time options
    pub fn options(&self) -> &Attributes {
        &self.options
    }

    /// Add a record built from a JSON object carrying an `id`.
    ///
    /// Adding an id that is already present returns the existing record
    /// untouched.
    pub fn add(&self, attributes: Value) -> RelationResult<Arc<Record>> {
        let attributes = match attributes {
            Value::Object(map) => map,
            other => {
                return Err(RelationError::InvalidRecord(format!(
                    "expected an object, got {}",
                    other
                )))
            }
        };

        let id = attributes
            .get("id")
            .and_then(RecordId::from_value)
            .ok_or_else(|| {
                RelationError::InvalidRecord(
                    "missing or non-identifier 'id' attribute".to_string(),
                )
            })?;

        let mut records = self.records.write();
        if let Some(existing) = records.get(&id) {
            debug!(
                "Record {} already present in '{}' collection, keeping existing",
                id,
                self.model.name()
            );
            return Ok(Arc::clone(existing));
        }

        let record = Record::new(id.clone(), Arc::clone(&self.model), attributes);
        records.insert(id, Arc::clone(&record));
        Ok(record)
    }

    /// Add several records in order
    pub fn add_all<I>(&self, records: I) -> RelationResult<Vec<Arc<Record>>>
    where
        I: IntoIterator<Item = Value>,
    {
        records.into_iter().map(|attributes| self.add(attributes)).collect()
    }

    /// Look up a record by id
    pub fn get(&self, id: &RecordId) -> Option<Arc<Record>> {
        self.records.read().get(id).cloned()
    }

    /// Look up a record by an id held in an attribute value
    pub fn get_by_value(&self, value: &Value) -> Option<Arc<Record>> {
        RecordId::from_value(value).and_then(|id| self.get(&id))
    }

    /// Remove a record, keeping the order of the remaining ones
    pub fn remove(&self, id: &RecordId) -> Option<Arc<Record>> {
        self.records.write().shift_remove(id)
    }

    /// Snapshot of the records in insertion order
    pub fn records(&self) -> Vec<Arc<Record>> {
        self.records.read().values().cloned().collect()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the collection holds no records
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Resolve a dotted relation path starting at this collection
    pub fn rel(self: &Arc<Self>, path: &str) -> RelationResult<Related> {
        path::resolve_collection_path(self, path)
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("model", &self.model.name())
            .field("len", &self.len())
            .field("options", &self.options)
            .field("has_context", &self.context.is_some())
            .finish()
    }
}

/// Builder for collections with construction-time options
pub struct CollectionBuilder {
    model: Arc<ModelType>,
    options: Attributes,
    context: Option<Arc<CollectionContext>>,
}

impl CollectionBuilder {
    /// Capture a single option
    pub fn option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.insert(key.to_string(), value.into());
        self
    }

    /// Capture a whole option map
    pub fn options(mut self, options: Attributes) -> Self {
        self.options.extend(options);
        self
    }

    /// Attach collection-level relation declarations
    pub fn context(mut self, context: Arc<CollectionContext>) -> Self {
        self.context = Some(context);
        self
    }

    /// Create the collection
    pub fn build(self) -> Arc<Collection> {
        Arc::new(Collection {
            model: self.model,
            records: RwLock::new(IndexMap::new()),
            options: self.options,
            context: self.context,
        })
    }
}
