//! Relationships Module - declarations and on-demand resolution

pub mod metadata;
pub mod belongs_to;
pub mod has_many;
pub mod registry;
pub mod context;
pub mod related;
pub mod resolver;
pub mod path;

// Re-export main types
pub use metadata::*;
pub use belongs_to::*;
pub use has_many::*;
pub use registry::*;
pub use context::*;
pub use related::*;
pub use resolver::{resolve_hop, resolve_record_hop, resolve_collection_hop, Source};
pub use path::{resolve_path, resolve_record_path, resolve_collection_path};
