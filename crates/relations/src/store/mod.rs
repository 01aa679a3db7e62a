//! Store Module - In-memory records and collections that relations resolve against

pub mod id;
pub mod record;
pub mod collection;

pub use id::*;
pub use record::*;
pub use collection::*;
