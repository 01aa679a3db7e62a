//! Relationship Metadata - relation kinds and non-owning collection references

use std::fmt;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::Collection;

/// Defines the kind of a declared relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Many-to-one relationship (belongsTo)
    BelongsTo,
    /// One-to-many relationship (hasMany)
    HasMany,
}

impl RelationKind {
    /// Returns true if this relation resolves to a sequence of records
    pub fn is_collection(self) -> bool {
        matches!(self, Self::HasMany)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationKind::BelongsTo => write!(f, "belongs_to"),
            RelationKind::HasMany => write!(f, "has_many"),
        }
    }
}

/// Shared, non-owning reference to a relation's target collection.
///
/// Declarations never keep their targets alive, so types that point at each
/// other's collections do not form reference cycles.
#[derive(Clone)]
pub struct CollectionRef {
    collection: Weak<Collection>,
    model: String,
}

impl CollectionRef {
    /// Reference an existing collection
    pub fn new(collection: &Arc<Collection>) -> Self {
        Self {
            collection: Arc::downgrade(collection),
            model: collection.model().name().to_string(),
        }
    }

    /// Model name of the referenced collection
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Get the collection if it is still alive
    pub fn upgrade(&self) -> Option<Arc<Collection>> {
        self.collection.upgrade()
    }

    /// Get the collection for resolving `relation`, reporting a dropped target
    pub(crate) fn resolve(&self, relation: &str) -> Option<Arc<Collection>> {
        let collection = self.upgrade();
        if collection.is_none() {
            warn!(
                "Target '{}' collection of relation '{}' has been dropped",
                self.model, relation
            );
        }
        collection
    }
}

impl From<&Arc<Collection>> for CollectionRef {
    fn from(collection: &Arc<Collection>) -> Self {
        Self::new(collection)
    }
}

impl fmt::Debug for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRef")
            .field("model", &self.model)
            .field("alive", &(self.collection.strong_count() > 0))
            .finish()
    }
}
