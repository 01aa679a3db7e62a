//! Related - the value a relation or path resolves to

use std::sync::Arc;

use super::path;
use crate::error::{RelationError, RelationResult};
use crate::store::{Record, RecordId};

/// Result of resolving a relation or a relation path.
///
/// Equality is by record identity, never by attribute values.
#[derive(Debug, Clone, Default)]
pub enum Related {
    /// Nothing related
    #[default]
    None,
    /// A single record (belongs-to)
    One(Arc<Record>),
    /// An ordered sequence of records (has-many or flattened path)
    Many(Vec<Arc<Record>>),
}

impl Related {
    /// Check if this is `None`
    pub fn is_none(&self) -> bool {
        matches!(self, Related::None)
    }

    /// Check if this is a single record
    pub fn is_one(&self) -> bool {
        matches!(self, Related::One(_))
    }

    /// Check if this is a sequence
    pub fn is_many(&self) -> bool {
        matches!(self, Related::Many(_))
    }

    /// The single record, if this is one
    pub fn one(&self) -> Option<&Arc<Record>> {
        match self {
            Related::One(record) => Some(record),
            _ => None,
        }
    }

    /// Take the single record, if this is one
    pub fn into_one(self) -> Option<Arc<Record>> {
        match self {
            Related::One(record) => Some(record),
            _ => None,
        }
    }

    /// The sequence, if this is one
    pub fn many(&self) -> Option<&[Arc<Record>]> {
        match self {
            Related::Many(records) => Some(records),
            _ => None,
        }
    }

    /// All records as a vector; `None` is empty
    pub fn into_vec(self) -> Vec<Arc<Record>> {
        match self {
            Related::None => Vec::new(),
            Related::One(record) => vec![record],
            Related::Many(records) => records,
        }
    }

    /// Ids of all records in order
    pub fn ids(&self) -> Vec<RecordId> {
        match self {
            Related::None => Vec::new(),
            Related::One(record) => vec![record.id().clone()],
            Related::Many(records) => records.iter().map(|r| r.id().clone()).collect(),
        }
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Related::None => 0,
            Related::One(_) => 1,
            Related::Many(records) => records.len(),
        }
    }

    /// Check if no record is held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if this is exactly `record`
    pub fn is(&self, record: &Record) -> bool {
        self.one().map_or(false, |own| own.is(record))
    }

    /// Dereference the single record, failing when nothing is there.
    ///
    /// Computed relations and predicates use this for lookups that must not
    /// be null; the resulting error escapes the whole resolution.
    pub fn require_one(self, relation: &str) -> RelationResult<Arc<Record>> {
        match self {
            Related::One(record) => Ok(record),
            _ => Err(RelationError::null_dereference(relation)),
        }
    }

    /// Continue resolving `path` from this result. Null short-circuits to null.
    pub fn rel(&self, path: &str) -> RelationResult<Related> {
        path::continue_path(self, path)
    }
}

impl PartialEq for Related {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Related::None, Related::None) => true,
            (Related::One(a), Related::One(b)) => Arc::ptr_eq(a, b),
            (Related::Many(a), Related::Many(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| Arc::ptr_eq(x, y))
            }
            _ => false,
        }
    }
}

impl Eq for Related {}

impl From<Option<Arc<Record>>> for Related {
    fn from(record: Option<Arc<Record>>) -> Self {
        record.map_or(Related::None, Related::One)
    }
}

impl From<Arc<Record>> for Related {
    fn from(record: Arc<Record>) -> Self {
        Related::One(record)
    }
}

impl From<Vec<Arc<Record>>> for Related {
    fn from(records: Vec<Arc<Record>>) -> Self {
        Related::Many(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::registry::ModelRegistry;
    use crate::store::Collection;
    use serde_json::json;

    fn records() -> Vec<Arc<Record>> {
        let registry = ModelRegistry::new();
        let users = Collection::new(&registry.model("User"));
        users.add_all((0..3).map(|i| json!({"id": i}))).unwrap()
    }

    #[test]
    fn test_identity_equality() {
        let originals = records();
        let clones = records();

        assert_eq!(Related::from(originals[0].clone()), Related::One(originals[0].clone()));
        assert_ne!(Related::from(originals[0].clone()), Related::One(clones[0].clone()));
        assert_eq!(Related::from(originals.clone()), Related::Many(originals.clone()));
        assert_ne!(Related::from(originals.clone()), Related::Many(clones));
        assert_ne!(Related::None, Related::Many(Vec::new()));
    }

    #[test]
    fn test_accessors() {
        let records = records();
        let many = Related::from(records.clone());
        assert_eq!(many.len(), 3);
        assert_eq!(many.ids(), vec![RecordId::from(0), RecordId::from(1), RecordId::from(2)]);
        assert!(many.one().is_none());

        let one = Related::from(Some(records[1].clone()));
        assert!(one.is(&records[1]));
        assert_eq!(one.clone().into_vec().len(), 1);

        let none = Related::from(None);
        assert!(none.is_none());
        assert!(none.is_empty());
        assert!(none.into_vec().is_empty());
    }

    #[test]
    fn test_require_one() {
        let records = records();
        assert!(Related::from(records[0].clone()).require_one("user").is_ok());

        let err = Related::None.require_one("user").unwrap_err();
        assert!(err.is_null_dereference());
        assert!(Related::Many(records).require_one("user").is_err());
    }
}
