//! # elif-relations: Declarative relations over in-memory collections
//!
//! Resolves belongs-to and has-many relations between collections of
//! uniquely identified records without a backing database. Every answer is
//! recomputed from the current collection contents, so mutations between
//! calls are visible on the next resolution.
//!
//! ```rust
//! use elif_relations::{BelongsTo, Collection, HasMany, ModelRegistry, ModelRelations};
//! use serde_json::json;
//!
//! let registry = ModelRegistry::new();
//! let users = Collection::new(&registry.model("User"));
//! let tasks = Collection::new(&registry.model("Task"));
//!
//! registry.model("User").declare(
//!     ModelRelations::new().has_many("tasks", HasMany::foreign_key(&tasks, "user_id")),
//! ).unwrap();
//! registry.model("Task").declare(
//!     ModelRelations::new().belongs_to("user", BelongsTo::direct(&users)),
//! ).unwrap();
//!
//! let ada = users.add(json!({"id": 1})).unwrap();
//! tasks.add(json!({"id": 10, "user_id": 1})).unwrap();
//!
//! assert_eq!(ada.rel("tasks").unwrap().len(), 1);
//! assert!(ada.rel("tasks.user").unwrap().many().unwrap()[0].is(&ada));
//! ```

pub mod config;
pub mod error;
pub mod relationships;
pub mod store;

// Re-export core types
pub use config::*;
pub use error::*;
pub use relationships::*;
pub use store::*;
