//! Model Registry - per-type relation declarations shared by every record
//!
//! Each model type is registered once and declares its relations once.
//! Declarations are read-only afterwards; resolution only ever reads them.

use std::fmt;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use super::belongs_to::BelongsTo;
use super::has_many::HasMany;
use super::metadata::RelationKind;
use crate::config::RelationConfig;
use crate::error::{RelationError, RelationResult};
use crate::store::Record;

/// Relations declared by a model type
#[derive(Debug, Clone, Default)]
pub struct ModelRelations {
    belongs_to: IndexMap<String, BelongsTo<Record>>,
    has_many: IndexMap<String, HasMany>,
}

impl ModelRelations {
    /// Create an empty declaration set
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a belongs-to relation
    pub fn belongs_to(mut self, name: &str, relation: BelongsTo<Record>) -> Self {
        self.belongs_to.insert(name.to_string(), relation);
        self
    }

    /// Declare a has-many relation
    pub fn has_many(mut self, name: &str, relation: HasMany) -> Self {
        self.has_many.insert(name.to_string(), relation);
        self
    }

    /// Get a belongs-to declaration
    pub fn get_belongs_to(&self, name: &str) -> Option<&BelongsTo<Record>> {
        self.belongs_to.get(name)
    }

    /// Get a has-many declaration
    pub fn get_has_many(&self, name: &str) -> Option<&HasMany> {
        self.has_many.get(name)
    }

    /// Kind a name resolves as; belongs-to is consulted first
    pub fn kind_of(&self, name: &str) -> Option<RelationKind> {
        if self.belongs_to.contains_key(name) {
            Some(RelationKind::BelongsTo)
        } else if self.has_many.contains_key(name) {
            Some(RelationKind::HasMany)
        } else {
            None
        }
    }

    /// Belongs-to names in declaration order
    pub fn belongs_to_names(&self) -> Vec<&str> {
        self.belongs_to.keys().map(String::as_str).collect()
    }

    /// Has-many names in declaration order
    pub fn has_many_names(&self) -> Vec<&str> {
        self.has_many.keys().map(String::as_str).collect()
    }

    /// All relation names, belongs-to first, without duplicates
    pub fn relation_names(&self) -> Vec<&str> {
        let mut names = self.belongs_to_names();
        for name in self.has_many.keys() {
            if !self.belongs_to.contains_key(name) {
                names.push(name);
            }
        }
        names
    }

    /// Total number of declarations
    pub fn len(&self) -> usize {
        self.belongs_to.len() + self.has_many.len()
    }

    /// Check if nothing is declared
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A registered model type
pub struct ModelType {
    name: String,
    config: Arc<RelationConfig>,
    relations: OnceCell<ModelRelations>,
}

impl ModelType {
    /// Model type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configuration inherited from the registry
    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Declare this type's relations. Allowed exactly once.
    pub fn declare(&self, relations: ModelRelations) -> RelationResult<()> {
        let count = relations.len();
        self.relations
            .set(relations)
            .map_err(|_| RelationError::RelationsAlreadyDeclared(self.name.clone()))?;
        debug!("Declared {} relations for model '{}'", count, self.name);
        Ok(())
    }

    /// Declared relations, if any
    pub fn relations(&self) -> Option<&ModelRelations> {
        self.relations.get()
    }

    /// Check if relations have been declared
    pub fn is_declared(&self) -> bool {
        self.relations.get().is_some()
    }

    /// Kind a relation name resolves as on records of this type
    pub fn kind_of(&self, name: &str) -> Option<RelationKind> {
        self.relations().and_then(|relations| relations.kind_of(name))
    }
}

impl fmt::Debug for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelType")
            .field("name", &self.name)
            .field("relations", &self.relations().map(|r| r.relation_names()))
            .finish()
    }
}

/// Thread-safe registry of model types
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    config: Arc<RelationConfig>,
    models: Arc<DashMap<String, Arc<ModelType>>>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self {
            config: Arc::new(RelationConfig::default()),
            models: Arc::new(DashMap::new()),
        }
    }

    /// Create a registry with a custom configuration
    pub fn with_config(config: RelationConfig) -> RelationResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            models: Arc::new(DashMap::new()),
        })
    }

    /// Configuration shared by every registered type
    pub fn config(&self) -> &RelationConfig {
        &self.config
    }

    /// Register a new model type
    pub fn register(&self, name: &str) -> RelationResult<Arc<ModelType>> {
        match self.models.entry(name.to_string()) {
            Entry::Occupied(_) => Err(RelationError::ModelAlreadyRegistered(name.to_string())),
            Entry::Vacant(entry) => {
                let model = self.create(name);
                entry.insert(Arc::clone(&model));
                Ok(model)
            }
        }
    }

    /// Get a model type, registering it on first use
    pub fn model(&self, name: &str) -> Arc<ModelType> {
        let entry = self
            .models
            .entry(name.to_string())
            .or_insert_with(|| self.create(name));
        Arc::clone(entry.value())
    }

    /// Get a registered model type
    pub fn get(&self, name: &str) -> Option<Arc<ModelType>> {
        self.models.get(name).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if a model type is registered
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Registered model names, sorted
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.models.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Get statistics about the registry
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total_models: self.models.len(),
            ..RegistryStats::default()
        };

        for entry in self.models.iter() {
            if let Some(relations) = entry.value().relations() {
                stats.declared_models += 1;
                stats.belongs_to_relations += relations.belongs_to.len();
                stats.has_many_relations += relations.has_many.len();
            }
        }

        stats
    }

    fn create(&self, name: &str) -> Arc<ModelType> {
        debug!("Registering model '{}'", name);
        Arc::new(ModelType {
            name: name.to_string(),
            config: Arc::clone(&self.config),
            relations: OnceCell::new(),
        })
    }
}

/// Statistics about the model registry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_models: usize,
    pub declared_models: usize,
    pub belongs_to_relations: usize,
    pub has_many_relations: usize,
}

impl RegistryStats {
    /// Total number of declared relations
    pub fn total_relations(&self) -> usize {
        self.belongs_to_relations + self.has_many_relations
    }
}
