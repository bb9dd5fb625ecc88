// ABOUTME: Tag association engine for backups and saves
// ABOUTME: Registry, association index and a transactional store over an injected persistence capability

pub mod error;
pub mod index;
pub mod persistence;
pub mod registry;
pub mod store;
pub mod target_key;
pub mod types;
pub mod validation;

// Re-export main types
pub use error::{PersistenceError, TagsError, TagsResult};
pub use index::AssociationIndex;
pub use persistence::{JsonFilePersistence, MemoryPersistence, TagsPersistence};
pub use registry::TagRegistry;
pub use store::TagStore;
pub use target_key::TargetKey;
pub use types::{Tag, TagAssociation, TagTarget, TagUpdateInput, TagsDatabase};
