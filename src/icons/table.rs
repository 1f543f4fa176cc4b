//! Ordered, index-stable icon tables
//!
//! Tables are defined in TOML:
//!
//! ```toml
//! [[files]]
//! class = "icon-js"
//! colours = ["medium-yellow", "dark-yellow"]
//! priority = 1
//! match = ['\.js$']
//! ```

use super::icon::{Icon, IconRules};
use crate::error::{FileIconsError, FileIconsResult};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;
use tokio::fs;
use tracing::debug;

const BUILTIN_TABLE: &str = include_str!("builtin.toml");

/// Which table an icon lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Files,
    Directories,
}

impl TableKind {
    /// Table for a resource
    pub fn for_directory(is_directory: bool) -> Self {
        if is_directory {
            Self::Directories
        } else {
            Self::Files
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TableDef {
    files: Vec<IconDef>,
    directories: Vec<IconDef>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IconDef {
    class: String,
    #[serde(default)]
    colours: Vec<String>,
    #[serde(default = "default_priority")]
    priority: u32,
    #[serde(default, rename = "match")]
    names: Vec<String>,
    #[serde(default)]
    match_path: Vec<String>,
}

fn default_priority() -> u32 {
    1
}

/// One ordered sequence of icons
#[derive(Debug, Default)]
pub struct IconTable {
    icons: Vec<Rc<Icon>>,
}

impl IconTable {
    fn build(defs: Vec<IconDef>) -> FileIconsResult<Self> {
        let icons = defs
            .into_iter()
            .enumerate()
            .map(|(index, def)| compile_icon(index, def).map(Rc::new))
            .collect::<FileIconsResult<Vec<_>>>()?;
        Ok(Self { icons })
    }

    /// Icon at `index`
    pub fn get(&self, index: usize) -> Option<&Rc<Icon>> {
        self.icons.get(index)
    }

    /// Position of `icon` in this table, by identity
    pub fn index_of(&self, icon: &Rc<Icon>) -> Option<usize> {
        self.icons.iter().position(|i| Rc::ptr_eq(i, icon))
    }

    /// First icon with the given class name
    pub fn find(&self, class_name: &str) -> Option<&Rc<Icon>> {
        self.icons.iter().find(|i| i.class_name() == class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Icon>> {
        self.icons.iter()
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

/// File and directory icon tables
#[derive(Debug, Default)]
pub struct IconTables {
    files: IconTable,
    directories: IconTable,
}

impl IconTables {
    /// Parse and validate a TOML table definition
    pub fn from_toml_str(source: &str) -> FileIconsResult<Self> {
        let def: TableDef = toml::from_str(source)?;
        let tables = Self {
            files: IconTable::build(def.files)?,
            directories: IconTable::build(def.directories)?,
        };
        debug!(
            "Loaded icon tables: {} file icons, {} directory icons",
            tables.files.len(),
            tables.directories.len()
        );
        Ok(tables)
    }

    /// The table compiled into the binary
    pub fn builtin() -> FileIconsResult<Self> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Load a table definition from disk
    pub async fn load(path: &Path) -> FileIconsResult<Self> {
        if !path.exists() {
            return Err(FileIconsError::PathNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            FileIconsError::io(format!("reading icon table {}", path.display()), e)
        })?;
        Self::from_toml_str(&content)
    }

    pub fn files(&self) -> &IconTable {
        &self.files
    }

    pub fn directories(&self) -> &IconTable {
        &self.directories
    }

    /// Table for the given kind
    pub fn table(&self, kind: TableKind) -> &IconTable {
        match kind {
            TableKind::Files => &self.files,
            TableKind::Directories => &self.directories,
        }
    }
}

fn compile_icon(index: usize, def: IconDef) -> FileIconsResult<Icon> {
    if def.class.trim().is_empty() {
        return Err(FileIconsError::table(format!(
            "icon #{} has an empty class name",
            index
        )));
    }
    if def.colours.len() > 2 {
        return Err(FileIconsError::table(format!(
            "{} lists {} colours, at most 2 (dark, light) are allowed",
            def.class,
            def.colours.len()
        )));
    }

    let rules = IconRules {
        names: compile_patterns(&def.class, &def.names)?,
        paths: compile_patterns(&def.class, &def.match_path)?,
    };
    Ok(Icon::new(index, def.class, def.colours, def.priority, rules))
}

fn compile_patterns(class: &str, patterns: &[String]) -> FileIconsResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|source| FileIconsError::PatternInvalid {
                class: class.to_string(),
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}
