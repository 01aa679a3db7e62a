//! Error types for relation resolution
//!
//! Missing relations and missing values are not errors: they resolve to
//! `Related::None` or an empty sequence. The variants here cover substrate
//! misuse, registration mistakes and faults raised by caller-supplied
//! computed or predicate functions.

use thiserror::Error;

/// Result type alias for relation operations
pub type RelationResult<T> = Result<T, RelationError>;

/// Error types for relation operations
#[derive(Debug, Error)]
pub enum RelationError {
    /// A chained lookup dereferenced a relation that resolved to null
    #[error("Relation '{relation}' resolved to null and cannot be dereferenced")]
    NullDereference { relation: String },

    /// Attributes handed to a collection cannot form a record
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Attempt to overwrite a record's identifier
    #[error("Record id is immutable")]
    ImmutableId,

    /// A model type with this name is already registered
    #[error("Model '{0}' is already registered")]
    ModelAlreadyRegistered(String),

    /// Relations for a model type can only be declared once
    #[error("Relations for model '{0}' are already declared")]
    RelationsAlreadyDeclared(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Fault raised inside a computed belongs-to or a has-many predicate
    #[error("Computation failed: {0}")]
    Computation(#[from] anyhow::Error),
}

impl RelationError {
    /// Shorthand for an unguarded dereference of `relation`
    pub fn null_dereference(relation: impl Into<String>) -> Self {
        RelationError::NullDereference {
            relation: relation.into(),
        }
    }

    /// Check whether this error came from dereferencing a null relation
    pub fn is_null_dereference(&self) -> bool {
        matches!(self, RelationError::NullDereference { .. })
    }
}
