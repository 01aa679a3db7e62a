//! BelongsTo Relationship - a source refers to at most one target record

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::metadata::CollectionRef;
use super::registry::ModelType;
use crate::error::RelationResult;
use crate::store::{Collection, Record};

/// Something a belongs-to relation can be resolved against.
///
/// Records expose their attributes as foreign keys; collections expose the
/// options captured when they were built.
pub trait RelationSource: Send + Sync {
    /// Model type whose configuration applies
    fn model_type(&self) -> &Arc<ModelType>;

    /// Value stored under a foreign key name, if any
    fn foreign_key_value(&self, key: &str) -> Option<Value>;
}

impl RelationSource for Record {
    fn model_type(&self) -> &Arc<ModelType> {
        self.model()
    }

    fn foreign_key_value(&self, key: &str) -> Option<Value> {
        self.get(key)
    }
}

impl RelationSource for Collection {
    fn model_type(&self) -> &Arc<ModelType> {
        self.model()
    }

    fn foreign_key_value(&self, key: &str) -> Option<Value> {
        self.option(key).cloned()
    }
}

/// Function computing a belongs-to target from its source
pub type ComputedFn<S> = Arc<dyn Fn(&Arc<S>) -> RelationResult<Option<Arc<Record>>> + Send + Sync>;

/// BelongsTo declaration for sources of type `S`
pub enum BelongsTo<S> {
    /// Look the target up by the `<relation>_id` foreign key
    DirectForeignKey(CollectionRef),
    /// Evaluate an arbitrary function against the source
    Computed(ComputedFn<S>),
}

impl<S> BelongsTo<S> {
    /// Declare a direct foreign key relation into `target`
    pub fn direct(target: &Arc<Collection>) -> Self {
        BelongsTo::DirectForeignKey(CollectionRef::new(target))
    }

    /// Declare a computed relation
    pub fn computed<F>(compute: F) -> Self
    where
        F: Fn(&Arc<S>) -> RelationResult<Option<Arc<Record>>> + Send + Sync + 'static,
    {
        BelongsTo::Computed(Arc::new(compute))
    }

    /// Target collection of a direct foreign key relation
    pub fn target(&self) -> Option<&CollectionRef> {
        match self {
            BelongsTo::DirectForeignKey(target) => Some(target),
            BelongsTo::Computed(_) => None,
        }
    }
}

impl<S: RelationSource> BelongsTo<S> {
    /// Resolve this relation for `source`.
    ///
    /// Computed functions run unguarded: whatever they return, error included,
    /// is handed back as is.
    pub fn resolve(&self, source: &Arc<S>, relation: &str) -> RelationResult<Option<Arc<Record>>> {
        match self {
            BelongsTo::DirectForeignKey(target) => {
                let key = source.model_type().config().foreign_key_for(relation);
                let value = match source.foreign_key_value(&key) {
                    Some(value) if !value.is_null() => value,
                    _ => return Ok(None),
                };

                Ok(target
                    .resolve(relation)
                    .and_then(|collection| collection.get_by_value(&value)))
            }
            BelongsTo::Computed(compute) => compute(source),
        }
    }
}

impl<S> Clone for BelongsTo<S> {
    fn clone(&self) -> Self {
        match self {
            BelongsTo::DirectForeignKey(target) => BelongsTo::DirectForeignKey(target.clone()),
            BelongsTo::Computed(compute) => BelongsTo::Computed(Arc::clone(compute)),
        }
    }
}

impl<S> fmt::Debug for BelongsTo<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BelongsTo::DirectForeignKey(target) => {
                f.debug_tuple("DirectForeignKey").field(target).finish()
            }
            BelongsTo::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}
