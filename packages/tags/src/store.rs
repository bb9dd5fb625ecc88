// ABOUTME: Transactional tag store over the registry and association index
// ABOUTME: Serializes writers, persists after every committed change, rolls back on save failure

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::{PersistenceError, TagsError, TagsResult};
use crate::index::AssociationIndex;
use crate::persistence::TagsPersistence;
use crate::registry::TagRegistry;
use crate::types::{Tag, TagTarget, TagUpdateInput, TagsDatabase};

#[derive(Debug, Clone, Default)]
struct TagState {
    registry: TagRegistry,
    index: AssociationIndex,
}

impl TagState {
    fn from_database(db: TagsDatabase) -> Self {
        let registry = TagRegistry::from_tags(db.tags);
        let index = AssociationIndex::from_associations(db.associations);

        for name in index.tag_names() {
            if !registry.exists(name) {
                warn!(
                    "Loaded association references unknown tag '{}'; it will be ignored",
                    name
                );
            }
        }

        Self { registry, index }
    }

    fn to_database(&self) -> TagsDatabase {
        TagsDatabase {
            tags: self.registry.to_vec(),
            associations: self.index.to_associations(),
        }
    }
}

/// Result of a mutation closure: whether there is anything to persist
enum Outcome<T> {
    Changed(T),
    Unchanged(T),
}

/// The only entry point into tag state.
///
/// Writers are serialized. Each mutation works on a copy of the current state, saves the
/// copy through the persistence capability and only then publishes it, so readers see
/// either the state before or after a mutation and a failed save changes nothing.
pub struct TagStore {
    state: Arc<RwLock<TagState>>,
    writer: Arc<Mutex<()>>,
    persistence: Arc<dyn TagsPersistence>,
}

impl TagStore {
    /// Load the database once and build the in-memory state from it
    pub async fn open(persistence: Arc<dyn TagsPersistence>) -> TagsResult<Self> {
        let state = TagState::from_database(persistence.load().await?);
        if state.registry.is_empty() {
            info!("Opened empty tag store");
        } else {
            info!(
                "Opened tag store with {} tags on {} targets",
                state.registry.len(),
                state.index.target_count()
            );
        }

        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            writer: Arc::new(Mutex::new(())),
            persistence,
        })
    }

    /// All defined tags in creation order
    pub async fn get_all_tags(&self) -> Vec<Tag> {
        self.state.read().await.registry.list_all().to_vec()
    }

    pub async fn create_tag(&self, name: &str, color: &str) -> TagsResult<Tag> {
        let tag = self
            .commit("create_tag", |state| {
                state.registry.create(name, color).map(Outcome::Changed)
            })
            .await?;

        info!("Created tag '{}' ({})", tag.name, tag.color);
        Ok(tag)
    }

    /// Delete a tag and detach it from every target in the same commit
    pub async fn delete_tag(&self, name: &str) -> TagsResult<()> {
        let detached = self
            .commit("delete_tag", |state| {
                state.registry.delete(name)?;
                Ok(Outcome::Changed(state.index.remove_tag_everywhere(name)))
            })
            .await?;

        info!("Deleted tag '{}' (detached from {} targets)", name, detached);
        Ok(())
    }

    pub async fn get_tag(&self, name: &str) -> TagsResult<Tag> {
        self.state
            .read()
            .await
            .registry
            .get(name)
            .cloned()
            .ok_or_else(|| TagsError::TagNotFound(name.to_string()))
    }

    /// Rename and/or recolor a tag in one commit. A rename rewrites every
    /// association that carries the old name.
    pub async fn update_tag(&self, name: &str, input: TagUpdateInput) -> TagsResult<Tag> {
        let tag = self
            .commit("update_tag", |state| {
                let mut tag = state
                    .registry
                    .get(name)
                    .cloned()
                    .ok_or_else(|| TagsError::TagNotFound(name.to_string()))?;
                let mut changed = false;

                if let Some(new_name) = input.name.as_deref().filter(|n| *n != name) {
                    tag = state.registry.rename(name, new_name)?;
                    state.index.rename_tag(name, new_name);
                    changed = true;
                }
                if let Some(color) = input.color.as_deref() {
                    let current = tag.name.clone();
                    let recolored = state.registry.set_color(&current, color)?;
                    changed |= recolored.color != tag.color;
                    tag = recolored;
                }

                Ok(if changed {
                    Outcome::Changed(tag)
                } else {
                    Outcome::Unchanged(tag)
                })
            })
            .await?;

        info!("Updated tag '{}' -> '{}' ({})", name, tag.name, tag.color);
        Ok(tag)
    }

    pub async fn rename_tag(&self, old_name: &str, new_name: &str) -> TagsResult<Tag> {
        let input = TagUpdateInput {
            name: Some(new_name.to_string()),
            color: None,
        };
        self.update_tag(old_name, input).await
    }

    pub async fn update_tag_color(&self, name: &str, color: &str) -> TagsResult<Tag> {
        let input = TagUpdateInput {
            name: None,
            color: Some(color.to_string()),
        };
        self.update_tag(name, input).await
    }

    /// Tags attached to `target`. Names missing from the registry are skipped.
    pub async fn get_tags_for(&self, target: &TagTarget) -> Vec<Tag> {
        let key = target.key();
        let state = self.state.read().await;

        state
            .index
            .tags_for(&key)
            .iter()
            .filter_map(|name| {
                let tag = state.registry.get(name).cloned();
                if tag.is_none() {
                    debug!("Skipping unknown tag '{}' on {}", name, key);
                }
                tag
            })
            .collect()
    }

    /// Attach every name to `target`, or nothing if any name is not a defined tag
    pub async fn add_tags_to_target(
        &self,
        target: &TagTarget,
        tag_names: &[String],
    ) -> TagsResult<()> {
        if tag_names.is_empty() {
            return Ok(());
        }

        let added = self
            .commit("add_tags_to_target", |state| {
                if let Some(missing) = tag_names.iter().find(|n| !state.registry.exists(n)) {
                    return Err(TagsError::TagNotFound(missing.clone()));
                }

                let mut added = 0;
                for name in tag_names {
                    if state.index.add(target, name) {
                        added += 1;
                    }
                }

                Ok(if added > 0 {
                    Outcome::Changed(added)
                } else {
                    Outcome::Unchanged(0)
                })
            })
            .await?;

        debug!("Attached {} new tags to {}", added, target.key());
        Ok(())
    }

    /// Detach every name from `target`. Absent pairs and unknown names are fine.
    pub async fn remove_tags_from_target(
        &self,
        target: &TagTarget,
        tag_names: &[String],
    ) -> TagsResult<()> {
        if tag_names.is_empty() {
            return Ok(());
        }

        let key = target.key();
        let removed = self
            .commit("remove_tags_from_target", |state| {
                let removed = tag_names
                    .iter()
                    .filter(|name| state.index.remove(&key, name))
                    .count();

                Ok(if removed > 0 {
                    Outcome::Changed(removed)
                } else {
                    Outcome::Unchanged(0)
                })
            })
            .await?;

        debug!("Detached {} tags from {}", removed, key);
        Ok(())
    }

    /// Every target carrying the tag `name`
    pub async fn get_targets_for_tag(&self, name: &str) -> TagsResult<Vec<TagTarget>> {
        let state = self.state.read().await;
        if !state.registry.exists(name) {
            return Err(TagsError::TagNotFound(name.to_string()));
        }
        Ok(state.index.targets_for(name))
    }

    /// Copy of the current database, as it would be persisted
    pub async fn snapshot(&self) -> TagsDatabase {
        self.state.read().await.to_database()
    }

    /// Run `mutate` against a copy of the state, persist the copy and publish it.
    ///
    /// Validation errors from `mutate` and persistence failures both leave the
    /// published state untouched.
    async fn commit<T, F>(&self, operation: &'static str, mutate: F) -> TagsResult<T>
    where
        F: FnOnce(&mut TagState) -> TagsResult<Outcome<T>>,
    {
        let writer = self.writer.clone().lock_owned().await;

        let mut next = self.state.read().await.clone();
        let value = match mutate(&mut next)? {
            Outcome::Changed(value) => value,
            Outcome::Unchanged(value) => {
                debug!("{}: nothing changed, skipping save", operation);
                return Ok(value);
            }
        };

        // Save and publish run to completion even if the caller is dropped.
        // The task keeps the writer guard until the new state is visible.
        let state = self.state.clone();
        let persistence = self.persistence.clone();
        let published = tokio::spawn(async move {
            let _writer = writer;
            persistence.save(&next.to_database()).await?;
            *state.write().await = next;
            Ok::<(), PersistenceError>(())
        });

        let result = match published.await {
            Ok(result) => result,
            Err(e) => Err(PersistenceError::Backend(format!("commit task failed: {}", e))),
        };
        if let Err(e) = result {
            error!("{}: failed to persist tags database, rolling back: {}", operation, e);
            return Err(TagsError::Persistence(e));
        }

        Ok(value)
    }
}
