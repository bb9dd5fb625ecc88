// ABOUTME: Many-to-many index between targets and tag names
// ABOUTME: Forward (target -> names) and reverse (name -> targets) views kept in step

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::target_key::TargetKey;
use crate::types::{TagAssociation, TagTarget};

#[derive(Debug, Clone)]
struct TargetEntry {
    target: TagTarget,
    // Unique names, in the order they were attached
    tag_names: Vec<String>,
}

/// The association relation.
///
/// Pure relation: it never checks names against the registry. A target whose
/// last tag is removed is dropped from the index entirely.
#[derive(Debug, Clone, Default)]
pub struct AssociationIndex {
    by_target: BTreeMap<TargetKey, TargetEntry>,
    by_tag: HashMap<String, BTreeSet<TargetKey>>,
}

impl AssociationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted associations. Records for the same target are merged
    /// and repeated names collapse.
    pub fn from_associations(associations: Vec<TagAssociation>) -> Self {
        let mut index = Self::new();
        for association in associations {
            for name in &association.tag_names {
                index.add(&association.target, name);
            }
        }
        index
    }

    /// Tag names attached to `key`, empty if none
    pub fn tags_for(&self, key: &TargetKey) -> &[String] {
        self.by_target
            .get(key)
            .map(|entry| entry.tag_names.as_slice())
            .unwrap_or(&[])
    }

    /// Attach `name` to `target`. Returns false if it was already attached.
    pub fn add(&mut self, target: &TagTarget, name: &str) -> bool {
        let key = target.key();
        let entry = self
            .by_target
            .entry(key.clone())
            .or_insert_with(|| TargetEntry {
                target: target.clone(),
                tag_names: Vec::new(),
            });

        if entry.tag_names.iter().any(|n| n == name) {
            return false;
        }

        entry.tag_names.push(name.to_string());
        self.by_tag.entry(name.to_string()).or_default().insert(key);
        true
    }

    /// Detach `name` from `key`. Returns false if it was not attached.
    pub fn remove(&mut self, key: &TargetKey, name: &str) -> bool {
        let Some(entry) = self.by_target.get_mut(key) else {
            return false;
        };

        let before = entry.tag_names.len();
        entry.tag_names.retain(|n| n != name);
        if entry.tag_names.len() == before {
            return false;
        }

        if entry.tag_names.is_empty() {
            self.by_target.remove(key);
        }
        self.unlink_reverse(name, key);
        true
    }

    /// Remove `name` from every target. Returns the number of targets touched.
    pub fn remove_tag_everywhere(&mut self, name: &str) -> usize {
        let Some(keys) = self.by_tag.remove(name) else {
            return 0;
        };

        for key in &keys {
            if let Some(entry) = self.by_target.get_mut(key) {
                entry.tag_names.retain(|n| n != name);
                if entry.tag_names.is_empty() {
                    self.by_target.remove(key);
                }
            }
        }

        debug!("Removed tag '{}' from {} targets", name, keys.len());
        keys.len()
    }

    /// Replace `old_name` with `new_name` on every target carrying it.
    /// Returns the number of targets touched.
    pub fn rename_tag(&mut self, old_name: &str, new_name: &str) -> usize {
        if old_name == new_name {
            return 0;
        }
        let Some(keys) = self.by_tag.remove(old_name) else {
            return 0;
        };

        for key in &keys {
            let Some(entry) = self.by_target.get_mut(key) else {
                continue;
            };
            if entry.tag_names.iter().any(|n| n == new_name) {
                entry.tag_names.retain(|n| n != old_name);
            } else if let Some(slot) = entry
                .tag_names
                .iter_mut()
                .find(|n| n.as_str() == old_name)
            {
                *slot = new_name.to_string();
            }
        }

        self.by_tag
            .entry(new_name.to_string())
            .or_default()
            .extend(keys.iter().cloned());
        keys.len()
    }

    /// Every target carrying `name`, ordered by target key
    pub fn targets_for(&self, name: &str) -> Vec<TagTarget> {
        self.by_tag
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|key| self.by_target.get(key))
            .map(|entry| entry.target.clone())
            .collect()
    }

    /// Number of targets with at least one tag
    pub fn target_count(&self) -> usize {
        self.by_target.len()
    }

    /// Distinct tag names referenced by any target
    pub fn tag_names(&self) -> impl Iterator<Item = &str> {
        self.by_tag.keys().map(String::as_str)
    }

    /// Persisted view, ordered by target key
    pub fn to_associations(&self) -> Vec<TagAssociation> {
        self.by_target
            .values()
            .map(|entry| TagAssociation {
                target: entry.target.clone(),
                tag_names: entry.tag_names.clone(),
            })
            .collect()
    }

    fn unlink_reverse(&mut self, name: &str, key: &TargetKey) {
        if let Some(keys) = self.by_tag.get_mut(name) {
            keys.remove(key);
            if keys.is_empty() {
                self.by_tag.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backup() -> TagTarget {
        TagTarget::backup("Survival", "backup1.zip")
    }

    fn save() -> TagTarget {
        TagTarget::save("Survival/MySave")
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = AssociationIndex::new();
        assert!(index.add(&backup(), "important"));
        let once = index.to_associations();

        assert!(!index.add(&backup(), "important"));
        assert_eq!(index.to_associations(), once);
        assert_eq!(index.tags_for(&backup().key()), ["important".to_string()]);
    }

    #[test]
    fn test_tags_for_unknown_target_is_empty() {
        let index = AssociationIndex::new();
        assert!(index.tags_for(&save().key()).is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");

        assert!(!index.remove(&save().key(), "b"));
        assert!(!index.remove(&backup().key(), "a"));
        assert_eq!(index.tags_for(&save().key()), ["a".to_string()]);
    }

    #[test]
    fn test_remove_last_tag_drops_target() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");

        assert!(index.remove(&save().key(), "a"));
        assert_eq!(index.target_count(), 0);
        assert!(index.targets_for("a").is_empty());
        assert!(index.to_associations().is_empty());
    }

    #[test]
    fn test_remove_tag_everywhere() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");
        index.add(&save(), "b");
        index.add(&backup(), "a");

        assert_eq!(index.remove_tag_everywhere("a"), 2);
        assert!(index.targets_for("a").is_empty());
        assert_eq!(index.tags_for(&save().key()), ["b".to_string()]);
        assert!(index.tags_for(&backup().key()).is_empty());
        assert_eq!(index.target_count(), 1);
        assert_eq!(index.remove_tag_everywhere("a"), 0);
    }

    #[test]
    fn test_targets_for_reverse_view() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");
        index.add(&backup(), "a");
        index.add(&backup(), "b");

        let targets = index.targets_for("a");
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&save()));
        assert!(targets.contains(&backup()));
        assert_eq!(index.targets_for("b"), vec![backup()]);
    }

    #[test]
    fn test_rename_tag_rewrites_in_place() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");
        index.add(&save(), "b");
        index.add(&backup(), "a");

        assert_eq!(index.rename_tag("a", "z"), 2);
        assert_eq!(
            index.tags_for(&save().key()),
            ["z".to_string(), "b".to_string()]
        );
        assert!(index.targets_for("a").is_empty());
        assert_eq!(index.targets_for("z").len(), 2);
    }

    #[test]
    fn test_rename_onto_existing_name_merges() {
        let mut index = AssociationIndex::new();
        index.add(&save(), "a");
        index.add(&save(), "b");

        index.rename_tag("a", "b");
        assert_eq!(index.tags_for(&save().key()), ["b".to_string()]);
        assert_eq!(index.targets_for("b"), vec![save()]);
    }

    #[test]
    fn test_from_associations_merges_records() {
        let index = AssociationIndex::from_associations(vec![
            TagAssociation {
                target: save(),
                tag_names: vec!["a".into(), "a".into()],
            },
            TagAssociation {
                target: save(),
                tag_names: vec!["b".into()],
            },
            TagAssociation {
                target: backup(),
                tag_names: vec![],
            },
        ]);

        assert_eq!(index.target_count(), 1);
        assert_eq!(
            index.tags_for(&save().key()),
            ["a".to_string(), "b".to_string()]
        );
    }
}
