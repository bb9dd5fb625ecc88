// ABOUTME: Named tag commands invoked by the UI layer
// ABOUTME: Validates arguments, builds targets and delegates to the tag store

use std::sync::Arc;

use savevault_tags::{Tag, TagStore, TagTarget, TagUpdateInput, TagsError, TagsResult};
use tracing::info;

/// Command surface over a shared [`TagStore`].
///
/// Every command completes (or fails) before returning; clients should refetch
/// after any mutating command rather than patch local copies.
#[derive(Clone)]
pub struct TagCommands {
    store: Arc<TagStore>,
}

impl TagCommands {
    pub fn new(store: Arc<TagStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_tags(&self) -> TagsResult<Vec<Tag>> {
        Ok(self.store.get_all_tags().await)
    }

    pub async fn create_tag(&self, name: &str, color: &str) -> TagsResult<Tag> {
        info!("Command: create tag '{}'", name);
        self.store.create_tag(name, color).await
    }

    pub async fn delete_tag(&self, name: &str) -> TagsResult<()> {
        info!("Command: delete tag '{}'", name);
        self.store.delete_tag(name).await
    }

    pub async fn get_tag(&self, name: &str) -> TagsResult<Tag> {
        self.store.get_tag(name).await
    }

    pub async fn update_tag(&self, name: &str, input: TagUpdateInput) -> TagsResult<Tag> {
        info!("Command: update tag '{}'", name);
        self.store.update_tag(name, input).await
    }

    pub async fn rename_tag(&self, old_name: &str, new_name: &str) -> TagsResult<Tag> {
        info!("Command: rename tag '{}' to '{}'", old_name, new_name);
        self.store.rename_tag(old_name, new_name).await
    }

    pub async fn update_tag_color(&self, name: &str, color: &str) -> TagsResult<Tag> {
        info!("Command: recolor tag '{}'", name);
        self.store.update_tag_color(name, color).await
    }

    pub async fn get_targets_for_tag(&self, name: &str) -> TagsResult<Vec<TagTarget>> {
        self.store.get_targets_for_tag(name).await
    }

    pub async fn get_backup_tags(
        &self,
        save_name: &str,
        backup_name: &str,
    ) -> TagsResult<Vec<Tag>> {
        let target = backup_target(save_name, backup_name)?;
        Ok(self.store.get_tags_for(&target).await)
    }

    pub async fn add_tags_to_backup(
        &self,
        save_name: &str,
        backup_name: &str,
        tag_names: &[String],
    ) -> TagsResult<()> {
        let target = backup_target(save_name, backup_name)?;
        info!("Command: add {:?} to backup {}/{}", tag_names, save_name, backup_name);
        self.store.add_tags_to_target(&target, tag_names).await
    }

    pub async fn remove_tags_from_backup(
        &self,
        save_name: &str,
        backup_name: &str,
        tag_names: &[String],
    ) -> TagsResult<()> {
        let target = backup_target(save_name, backup_name)?;
        info!("Command: remove {:?} from backup {}/{}", tag_names, save_name, backup_name);
        self.store.remove_tags_from_target(&target, tag_names).await
    }

    pub async fn get_save_tags(&self, relative_path: &str) -> TagsResult<Vec<Tag>> {
        let target = save_target(relative_path)?;
        Ok(self.store.get_tags_for(&target).await)
    }

    pub async fn add_tags_to_save(
        &self,
        relative_path: &str,
        tag_names: &[String],
    ) -> TagsResult<()> {
        let target = save_target(relative_path)?;
        info!("Command: add {:?} to save {}", tag_names, relative_path);
        self.store.add_tags_to_target(&target, tag_names).await
    }

    pub async fn remove_tags_from_save(
        &self,
        relative_path: &str,
        tag_names: &[String],
    ) -> TagsResult<()> {
        let target = save_target(relative_path)?;
        info!("Command: remove {:?} from save {}", tag_names, relative_path);
        self.store.remove_tags_from_target(&target, tag_names).await
    }
}

fn backup_target(save_name: &str, backup_name: &str) -> TagsResult<TagTarget> {
    require_field("saveName", save_name)?;
    require_field("backupName", backup_name)?;
    Ok(TagTarget::backup(save_name, backup_name))
}

fn save_target(relative_path: &str) -> TagsResult<TagTarget> {
    require_field("relativePath", relative_path)?;
    Ok(TagTarget::save(relative_path))
}

fn require_field(field: &str, value: &str) -> TagsResult<()> {
    if value.trim().is_empty() {
        return Err(TagsError::InvalidTarget(format!("{} cannot be empty", field)));
    }
    Ok(())
}
