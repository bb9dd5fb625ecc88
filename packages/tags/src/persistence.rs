// ABOUTME: Load/save capability for the tags database
// ABOUTME: JSON file backend for the app and an in-memory backend for tests and embedding

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use savevault_core::{path_exists, sibling_temp_path, tags_db_file_in};
use tokio::fs;
use tracing::debug;

use crate::error::PersistenceError;
use crate::types::TagsDatabase;

/// Where the tags database lives. Injected into [`crate::TagStore`].
#[async_trait]
pub trait TagsPersistence: Send + Sync {
    /// Load the stored database, or an empty one if nothing was stored yet
    async fn load(&self) -> Result<TagsDatabase, PersistenceError>;

    /// Replace the stored database with `db`
    async fn save(&self, db: &TagsDatabase) -> Result<(), PersistenceError>;
}

/// Pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `tags.json` inside the data directory `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(tags_db_file_in(dir))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TagsPersistence for JsonFilePersistence {
    async fn load(&self) -> Result<TagsDatabase, PersistenceError> {
        if !path_exists(&self.path).await {
            debug!("Tags database does not exist yet at {:?}", self.path);
            return Ok(TagsDatabase::default());
        }

        let content = fs::read_to_string(&self.path).await?;
        let db: TagsDatabase = serde_json::from_str(&content)?;

        debug!(
            "Loaded {} tags and {} associations from {:?}",
            db.tags.len(),
            db.associations.len(),
            self.path
        );
        Ok(db)
    }

    async fn save(&self, db: &TagsDatabase) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(db)?;

        // Readers only ever see a complete document
        let temp_path = sibling_temp_path(&self.path);
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(
            "Saved {} tags and {} associations to {:?}",
            db.tags.len(),
            db.associations.len(),
            self.path
        );
        Ok(())
    }
}

/// Keeps the database in process memory
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    stored: Mutex<TagsDatabase>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(db: TagsDatabase) -> Self {
        Self {
            stored: Mutex::new(db),
            ..Self::default()
        }
    }

    /// Make every following save fail until switched off again
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Copy of what was last saved successfully
    pub fn stored(&self) -> TagsDatabase {
        self.lock().clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TagsDatabase> {
        self.stored
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl TagsPersistence for MemoryPersistence {
    async fn load(&self) -> Result<TagsDatabase, PersistenceError> {
        Ok(self.stored())
    }

    async fn save(&self, db: &TagsDatabase) -> Result<(), PersistenceError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistenceError::Backend(
                "saves are disabled for this store".to_string(),
            ));
        }
        *self.lock() = db.clone();
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
