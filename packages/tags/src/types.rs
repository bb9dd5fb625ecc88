// ABOUTME: Tag type definitions
// ABOUTME: Tags, tag targets and the persisted tags database document

use serde::{Deserialize, Serialize};

use crate::target_key::TargetKey;

/// A named, colored label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Unique, case-sensitive identity
    pub name: String,
    /// `#RGB` or `#RRGGBB`
    pub color: String,
}

/// Something a tag can be attached to.
///
/// Older databases used snake_case field names, which are still accepted on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum TagTarget {
    /// A specific backup of a specific save
    Backup {
        #[serde(alias = "save_name")]
        save_name: String,
        #[serde(alias = "backup_name")]
        backup_name: String,
    },
    /// A save directory, relative to the saves root
    Save {
        #[serde(alias = "relative_path")]
        relative_path: String,
    },
}

impl TagTarget {
    pub fn backup(save_name: impl Into<String>, backup_name: impl Into<String>) -> Self {
        TagTarget::Backup {
            save_name: save_name.into(),
            backup_name: backup_name.into(),
        }
    }

    pub fn save(relative_path: impl Into<String>) -> Self {
        TagTarget::Save {
            relative_path: relative_path.into(),
        }
    }

    pub fn key(&self) -> TargetKey {
        TargetKey::encode(self)
    }
}

/// One target and the tag names attached to it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TagAssociation {
    pub target: TagTarget,
    #[serde(default, alias = "tag_names")]
    pub tag_names: Vec<String>,
}

/// Changes to an existing tag; omitted fields are left alone
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagUpdateInput {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Aggregate of every tag and association; the unit of load and save
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagsDatabase {
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub associations: Vec<TagAssociation>,
}
