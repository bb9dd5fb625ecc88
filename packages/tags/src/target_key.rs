// ABOUTME: Stable string keys for tag targets
// ABOUTME: Length-prefixed encoding so distinct targets never share a key

use std::fmt;

use crate::types::TagTarget;

/// Index key derived from a [`TagTarget`].
///
/// Backups encode as `backup:<len>:<save_name>:<backup_name>` where `<len>` is the byte
/// length of `save_name`, so a `:` inside either name cannot shift the field boundary.
/// Saves encode as `save:<relative_path>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey(String);

impl TargetKey {
    pub fn encode(target: &TagTarget) -> Self {
        match target {
            TagTarget::Backup {
                save_name,
                backup_name,
            } => TargetKey(format!(
                "backup:{}:{}:{}",
                save_name.len(),
                save_name,
                backup_name
            )),
            TagTarget::Save { relative_path } => TargetKey(format!("save:{}", relative_path)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
