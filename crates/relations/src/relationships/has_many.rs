//! HasMany Relationship - a record is referenced by many target records

use std::fmt;
use std::sync::Arc;

use super::metadata::CollectionRef;
use crate::error::RelationResult;
use crate::store::{Collection, Record, RecordId};

/// Predicate deciding whether `candidate` is related to `source`
pub type PredicateFn = Arc<dyn Fn(&Arc<Record>, &Arc<Record>) -> RelationResult<bool> + Send + Sync>;

/// HasMany declaration
pub enum HasMany {
    /// Every target record whose `foreign_key` attribute equals the source id
    ForeignKeyMatch {
        target: CollectionRef,
        foreign_key: String,
    },
    /// Every target record accepted by `predicate(candidate, source)`
    PredicateMatch {
        target: CollectionRef,
        predicate: PredicateFn,
    },
}

impl HasMany {
    /// Declare a foreign key match relation
    pub fn foreign_key(target: &Arc<Collection>, foreign_key: &str) -> Self {
        HasMany::ForeignKeyMatch {
            target: CollectionRef::new(target),
            foreign_key: foreign_key.to_string(),
        }
    }

    /// Declare a predicate match relation
    pub fn filter<F>(target: &Arc<Collection>, predicate: F) -> Self
    where
        F: Fn(&Arc<Record>, &Arc<Record>) -> RelationResult<bool> + Send + Sync + 'static,
    {
        HasMany::PredicateMatch {
            target: CollectionRef::new(target),
            predicate: Arc::new(predicate),
        }
    }

    /// Target collection reference
    pub fn target(&self) -> &CollectionRef {
        match self {
            HasMany::ForeignKeyMatch { target, .. } | HasMany::PredicateMatch { target, .. } => target,
        }
    }

    /// Resolve this relation for `source`, in the target's insertion order.
    ///
    /// The target is snapshotted first so predicates may resolve further
    /// relations against any collection. A predicate error aborts the scan.
    pub fn resolve(&self, source: &Arc<Record>, relation: &str) -> RelationResult<Vec<Arc<Record>>> {
        let Some(target) = self.target().resolve(relation) else {
            return Ok(Vec::new());
        };

        match self {
            HasMany::ForeignKeyMatch { foreign_key, .. } => Ok(target
                .records()
                .into_iter()
                .filter(|candidate| {
                    candidate
                        .get(foreign_key)
                        .and_then(|value| RecordId::from_value(&value))
                        .as_ref()
                        == Some(source.id())
                })
                .collect()),
            HasMany::PredicateMatch { predicate, .. } => {
                let mut matched = Vec::new();
                for candidate in target.records() {
                    if predicate(&candidate, source)? {
                        matched.push(candidate);
                    }
                }
                Ok(matched)
            }
        }
    }
}

impl Clone for HasMany {
    fn clone(&self) -> Self {
        match self {
            HasMany::ForeignKeyMatch { target, foreign_key } => HasMany::ForeignKeyMatch {
                target: target.clone(),
                foreign_key: foreign_key.clone(),
            },
            HasMany::PredicateMatch { target, predicate } => HasMany::PredicateMatch {
                target: target.clone(),
                predicate: Arc::clone(predicate),
            },
        }
    }
}

impl fmt::Debug for HasMany {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HasMany::ForeignKeyMatch { target, foreign_key } => f
                .debug_struct("ForeignKeyMatch")
                .field("target", target)
                .field("foreign_key", foreign_key)
                .finish(),
            HasMany::PredicateMatch { target, .. } => f
                .debug_struct("PredicateMatch")
                .field("target", target)
                .finish_non_exhaustive(),
        }
    }
}
