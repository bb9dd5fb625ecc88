// ABOUTME: Registry of defined tags
// ABOUTME: Name-unique set of tags kept in insertion order

use tracing::warn;

use crate::error::{TagsError, TagsResult};
use crate::types::Tag;
use crate::validation::{validate_color, validate_tag_name};

/// The set of defined tags.
///
/// Names are matched exactly (case-sensitive). The registry knows nothing about
/// associations; cascading removal is the store's job.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: Vec<Tag>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted tags, keeping the first entry for any repeated name
    pub fn from_tags(tags: Vec<Tag>) -> Self {
        let mut registry = Self::new();
        for tag in tags {
            if registry.exists(&tag.name) {
                warn!("Dropping duplicate tag '{}' from loaded database", tag.name);
                continue;
            }
            registry.tags.push(tag);
        }
        registry
    }

    /// All tags in insertion order
    pub fn list_all(&self) -> &[Tag] {
        &self.tags
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Define a new tag. Never overwrites an existing one.
    pub fn create(&mut self, name: &str, color: &str) -> TagsResult<Tag> {
        validate_tag_name(name)?;
        validate_color(color)?;

        if self.exists(name) {
            return Err(TagsError::DuplicateTag(name.to_string()));
        }

        let tag = Tag {
            name: name.to_string(),
            color: color.to_string(),
        };
        self.tags.push(tag.clone());
        Ok(tag)
    }

    /// Remove a tag, returning the removed entry
    pub fn delete(&mut self, name: &str) -> TagsResult<Tag> {
        let position = self
            .position(name)
            .ok_or_else(|| TagsError::TagNotFound(name.to_string()))?;
        Ok(self.tags.remove(position))
    }

    /// Give a tag a new name, keeping its color and position
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> TagsResult<Tag> {
        validate_tag_name(new_name)?;

        let position = self
            .position(old_name)
            .ok_or_else(|| TagsError::TagNotFound(old_name.to_string()))?;

        if old_name != new_name && self.exists(new_name) {
            return Err(TagsError::DuplicateTag(new_name.to_string()));
        }

        let tag = &mut self.tags[position];
        tag.name = new_name.to_string();
        Ok(tag.clone())
    }

    pub fn set_color(&mut self, name: &str, color: &str) -> TagsResult<Tag> {
        validate_color(color)?;

        let position = self
            .position(name)
            .ok_or_else(|| TagsError::TagNotFound(name.to_string()))?;

        let tag = &mut self.tags[position];
        tag.color = color.to_string();
        Ok(tag.clone())
    }

    pub fn to_vec(&self) -> Vec<Tag> {
        self.tags.clone()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name == name)
    }
}
