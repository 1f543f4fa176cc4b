//! Error types for fileicons
//!
//! The resolution core never fails; these errors come from the layers around
//! it (configuration, icon tables, cache persistence, the CLI).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for fileicons operations
pub type FileIconsResult<T> = Result<T, FileIconsError>;

/// All errors that can occur in fileicons
#[derive(Error, Debug)]
pub enum FileIconsError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Icon table errors
    #[error("Invalid icon table: {reason}")]
    TableInvalid { reason: String },

    #[error("Invalid match pattern {pattern:?} for {class}: {source}")]
    PatternInvalid {
        class: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // Cache errors
    #[error("Failed to read icon cache {path}: {reason}")]
    CacheRead { path: PathBuf, reason: String },

    #[error("Icon cache is frozen, refusing to modify {0}")]
    CacheFrozen(PathBuf),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not tracked: {0}")]
    NotTracked(String),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl FileIconsError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an icon table error
    pub fn table(reason: impl Into<String>) -> Self {
        Self::TableInvalid {
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } => Some("Run: fileicons config init --force"),
            Self::CacheRead { .. } => Some("Run: fileicons cache clear"),
            Self::CacheFrozen(_) => Some("Set cache.frozen = false in the configuration"),
            Self::PatternInvalid { .. } => Some("Match patterns use Rust regex syntax"),
            Self::NotTracked(_) => Some("Track the path before linking it"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FileIconsError::PathNotFound(PathBuf::from("/nope"));
        assert!(err.to_string().contains("Path not found: /nope"));
    }

    #[test]
    fn error_hint() {
        let err = FileIconsError::CacheFrozen(PathBuf::from("/tmp/icons.json"));
        assert_eq!(
            err.hint(),
            Some("Set cache.frozen = false in the configuration")
        );
        assert_eq!(FileIconsError::table("empty").hint(), None);
    }

    #[test]
    fn table_error_reason() {
        let err = FileIconsError::table("icon class must not be empty");
        assert!(err.to_string().contains("icon class must not be empty"));
    }
}
