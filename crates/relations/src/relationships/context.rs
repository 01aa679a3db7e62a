//! Collection Context - belongs-to relations answered by a whole collection
//!
//! A collection built with options (say `project_id`) can answer "which
//! project do I belong to" without any of its records carrying that key.
//! Contexts only hold belongs-to declarations; has-many relations are
//! resolved against individual records, never aggregated here.

use std::sync::Arc;

use indexmap::IndexMap;

use super::belongs_to::BelongsTo;
use crate::store::Collection;

/// Collection-level relation declarations
#[derive(Debug, Clone, Default)]
pub struct CollectionContext {
    belongs_to: IndexMap<String, BelongsTo<Collection>>,
}

impl CollectionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a collection-level belongs-to relation
    pub fn belongs_to(mut self, name: &str, relation: BelongsTo<Collection>) -> Self {
        self.belongs_to.insert(name.to_string(), relation);
        self
    }

    /// Finish declaring and share the context
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Get a belongs-to declaration
    pub fn get(&self, name: &str) -> Option<&BelongsTo<Collection>> {
        self.belongs_to.get(name)
    }

    /// Declared names in order
    pub fn names(&self) -> Vec<&str> {
        self.belongs_to.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relationships::registry::ModelRegistry;

    #[test]
    fn test_context_declarations() {
        let registry = ModelRegistry::new();
        let projects = Collection::new(&registry.model("Project"));
        let context = CollectionContext::new()
            .belongs_to("project", BelongsTo::direct(&projects))
            .belongs_to("first_project", BelongsTo::computed(|_| Ok(None)))
            .shared();

        assert_eq!(context.names(), vec!["project", "first_project"]);
        assert!(context.get("project").and_then(|r| r.target()).is_some());
        assert!(context.get("owned_projects").is_none());
    }
}
