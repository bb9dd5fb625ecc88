// ABOUTME: Error types for the tag engine
// ABOUTME: Validation failures and persistence failures surfaced to callers

use serde::Serialize;
use thiserror::Error;

/// Failure reported by a persistence capability
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Error type for tag operations
#[derive(Error, Debug)]
pub enum TagsError {
    #[error("Tag name cannot be empty")]
    EmptyName,
    #[error("Invalid color format: {0}")]
    InvalidColor(String),
    #[error("Tag already exists: {0}")]
    DuplicateTag(String),
    #[error("Tag not found: {0}")]
    TagNotFound(String),
    #[error("Invalid target: {0}")]
    InvalidTarget(String),
    #[error("Failed to persist tags database: {0}")]
    Persistence(#[from] PersistenceError),
}

impl TagsError {
    /// True for errors detected before any mutation was attempted
    pub fn is_validation(&self) -> bool {
        !matches!(self, TagsError::Persistence(_))
    }
}

// UI layers receive the message, not the structure
impl Serialize for TagsError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type TagsResult<T> = Result<T, TagsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_classification() {
        assert!(TagsError::EmptyName.is_validation());
        assert!(TagsError::TagNotFound("x".into()).is_validation());
        let err = TagsError::from(PersistenceError::Backend("disk full".into()));
        assert!(!err.is_validation());
    }

    #[test]
    fn test_serializes_as_message() {
        let json = serde_json::to_string(&TagsError::DuplicateTag("Boss".into())).unwrap();
        assert_eq!(json, "\"Tag already exists: Boss\"");
    }
}
