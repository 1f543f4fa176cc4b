//! Filesystem resources being decorated with icons

use crate::error::{FileIconsError, FileIconsResult};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::path::Path;

/// Version-control status of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsStatus {
    Modified,
    Added,
    Deleted,
    Renamed,
    Untracked,
    Ignored,
}

impl fmt::Display for VcsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Modified => "modified",
            Self::Added => "added",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Untracked => "untracked",
            Self::Ignored => "ignored",
        };
        write!(f, "{}", name)
    }
}

/// A file or directory.
///
/// Everything except the VCS status is fixed at construction; the status is
/// updated by whoever tracks the repository.
#[derive(Debug)]
pub struct Resource {
    path: String,
    is_directory: bool,
    symlink: bool,
    vcs_status: Cell<Option<VcsStatus>>,
}

impl Resource {
    /// A regular file
    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, false, false)
    }

    /// A directory
    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, true, false)
    }

    pub fn new(path: impl Into<String>, is_directory: bool, symlink: bool) -> Self {
        Self {
            path: path.into(),
            is_directory,
            symlink,
            vcs_status: Cell::new(None),
        }
    }

    /// Mark this resource as a symbolic link
    pub fn with_symlink(mut self, symlink: bool) -> Self {
        self.symlink = symlink;
        self
    }

    /// Describe an existing path on disk without following a final symlink.
    ///
    /// For symlinks, `is_directory` describes the link target.
    pub fn from_path(path: &Path) -> FileIconsResult<Self> {
        let meta = std::fs::symlink_metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileIconsError::PathNotFound(path.to_path_buf())
            } else {
                FileIconsError::io(format!("reading metadata for {}", path.display()), e)
            }
        })?;

        let symlink = meta.file_type().is_symlink();
        // Dangling links are treated as files
        let is_directory = if symlink {
            path.is_dir()
        } else {
            meta.is_dir()
        };

        Ok(Self::new(path.to_string_lossy(), is_directory, symlink))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path component
    pub fn name(&self) -> &str {
        let trimmed = self.path.trim_end_matches('/');
        trimmed.rsplit('/').next().unwrap_or(trimmed)
    }

    pub fn is_directory(&self) -> bool {
        self.is_directory
    }

    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    pub fn vcs_status(&self) -> Option<VcsStatus> {
        self.vcs_status.get()
    }

    pub fn set_vcs_status(&self, status: Option<VcsStatus>) {
        self.vcs_status.set(status);
    }
}
