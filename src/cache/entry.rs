//! Cached icon identity for one path

use serde::{Deserialize, Serialize};

/// What a delegate last resolved for its path.
///
/// Stored as `[priority, icon_index, class_name, [colours...]]`. The class
/// name is kept alongside the index so a reordered or edited icon table can be
/// detected when the entry is read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEntry", into = "RawEntry")]
pub struct CacheEntry {
    pub priority: u32,
    pub icon_index: usize,
    pub class_name: String,
    pub colours: Vec<String>,
}

#[derive(Serialize, Deserialize)]
struct RawEntry(u32, usize, String, #[serde(default)] Vec<String>);

impl From<RawEntry> for CacheEntry {
    fn from(RawEntry(priority, icon_index, class_name, colours): RawEntry) -> Self {
        Self {
            priority,
            icon_index,
            class_name,
            colours,
        }
    }
}

impl From<CacheEntry> for RawEntry {
    fn from(entry: CacheEntry) -> Self {
        RawEntry(
            entry.priority,
            entry.icon_index,
            entry.class_name,
            entry.colours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_tuple() {
        let entry = CacheEntry {
            priority: 10,
            icon_index: 0,
            class_name: "icon-js".to_string(),
            colours: vec!["medium-yellow".to_string(), "dark-yellow".to_string()],
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"[10,0,"icon-js",["medium-yellow","dark-yellow"]]"#);
    }

    #[test]
    fn colours_are_optional() {
        let entry: CacheEntry = serde_json::from_str(r#"[2,5,"icon-text"]"#).unwrap();
        assert_eq!(entry.priority, 2);
        assert_eq!(entry.icon_index, 5);
        assert!(entry.colours.is_empty());
    }
}
