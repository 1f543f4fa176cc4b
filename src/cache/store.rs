//! Keyed store of resolved icons, persisted as JSON

use super::entry::CacheEntry;
use crate::error::{FileIconsError, FileIconsResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, warn};

/// Bumped whenever the on-disk layout changes
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    saved_at: DateTime<Utc>,
    entries: BTreeMap<String, CacheEntry>,
}

/// Path → [`CacheEntry`] map with a read-only gate.
///
/// While frozen, `set` and `delete` do nothing and `save` leaves the file
/// untouched.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: HashMap<String, CacheEntry>,
    frozen: bool,
    dirty: bool,
    saved_at: Option<DateTime<Utc>>,
}

impl IconCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for `path`
    pub fn get(&self, path: &str) -> Option<&CacheEntry> {
        self.entries.get(path)
    }

    /// Store an entry. Returns false if the cache is frozen.
    pub fn set(&mut self, path: &str, entry: CacheEntry) -> bool {
        if self.frozen {
            return false;
        }
        if self.entries.get(path) != Some(&entry) {
            self.entries.insert(path.to_string(), entry);
            self.dirty = true;
        }
        true
    }

    /// Remove the entry for `path`. Returns false if the cache is frozen.
    pub fn delete(&mut self, path: &str) -> bool {
        if self.frozen {
            return false;
        }
        if self.entries.remove(path).is_some() {
            self.dirty = true;
        }
        true
    }

    /// Remove every entry. Returns false if the cache is frozen.
    pub fn clear(&mut self) -> bool {
        if self.frozen {
            return false;
        }
        if !self.entries.is_empty() {
            self.entries.clear();
            self.dirty = true;
        }
        true
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Whether there are writes not yet saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// When the loaded file was last saved
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// Entries sorted by path
    pub fn entries(&self) -> Vec<(&str, &CacheEntry)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(path, entry)| (path.as_str(), entry))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a cache file. A missing file gives an empty cache, as does a file
    /// written by an incompatible version.
    pub async fn load(path: &Path) -> FileIconsResult<Self> {
        if !path.exists() {
            debug!("Icon cache not found at {}, starting empty", path.display());
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            FileIconsError::io(format!("reading icon cache {}", path.display()), e)
        })?;

        let file: CacheFile =
            serde_json::from_str(&content).map_err(|e| FileIconsError::CacheRead {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if file.version != CACHE_VERSION {
            warn!(
                "Ignoring icon cache {} (version {}, expected {})",
                path.display(),
                file.version,
                CACHE_VERSION
            );
            return Ok(Self::new());
        }

        debug!(
            "Loaded {} cached icon(s) from {}",
            file.entries.len(),
            path.display()
        );
        Ok(Self {
            entries: file.entries.into_iter().collect(),
            frozen: false,
            dirty: false,
            saved_at: Some(file.saved_at),
        })
    }

    /// Write the cache to `path`. Returns false without touching the file if
    /// the cache is frozen.
    pub async fn save(&mut self, path: &Path) -> FileIconsResult<bool> {
        if self.frozen {
            debug!("Icon cache is frozen, not saving");
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FileIconsError::io("creating cache directory", e))?;
        }

        let saved_at = Utc::now();
        let file = CacheFile {
            version: CACHE_VERSION,
            saved_at,
            entries: self
                .entries
                .iter()
                .map(|(path, entry)| (path.clone(), entry.clone()))
                .collect(),
        };

        let content = serde_json::to_string_pretty(&file)?;
        fs::write(path, content).await.map_err(|e| {
            FileIconsError::io(format!("writing icon cache {}", path.display()), e)
        })?;

        self.dirty = false;
        self.saved_at = Some(saved_at);
        info!("Saved {} cached icon(s) to {}", file.entries.len(), path.display());
        Ok(true)
    }
}
