//! A single icon and its colour variants

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colour variant selected for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    /// Never colour icons
    None,
    /// Variant for dark themes
    #[default]
    Dark,
    /// Variant for light themes
    Light,
}

impl ColourMode {
    /// Position of this mode's class in an icon's colour list
    fn variant(self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Dark => Some(0),
            Self::Light => Some(1),
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Dark => "dark",
            Self::Light => "light",
        };
        write!(f, "{}", name)
    }
}

/// Path rules that make a strategy claim this icon
#[derive(Debug, Default)]
pub(crate) struct IconRules {
    /// Patterns tested against the file name
    pub names: Vec<Regex>,
    /// Patterns tested against the full path
    pub paths: Vec<Regex>,
}

/// An entry in an icon table.
///
/// Icons are shared as `Rc<Icon>` and compared by identity only; two icons
/// with the same class name in different tables are different icons.
#[derive(Debug)]
pub struct Icon {
    index: usize,
    class_name: String,
    colours: Vec<String>,
    priority: u32,
    rules: IconRules,
}

impl Icon {
    pub(crate) fn new(
        index: usize,
        class_name: String,
        colours: Vec<String>,
        priority: u32,
        rules: IconRules,
    ) -> Self {
        Self {
            index,
            class_name,
            colours,
            priority,
            rules,
        }
    }

    /// Position of this icon in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Base class name, e.g. `icon-js`
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Colour classes, dark variant first
    pub fn colours(&self) -> &[String] {
        &self.colours
    }

    /// Priority a path strategy registers this icon at
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Display classes: the base class, then the colour class for `mode` if any
    pub fn classes(&self, mode: ColourMode) -> Vec<String> {
        let mut classes = vec![self.class_name.clone()];
        if let Some(colour) = mode.variant().and_then(|i| self.colours.get(i)) {
            classes.push(colour.clone());
        }
        classes
    }

    /// Whether any of this icon's rules match
    pub fn matches(&self, name: &str, path: &str) -> bool {
        self.rules.names.iter().any(|re| re.is_match(name))
            || self.rules.paths.iter().any(|re| re.is_match(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js_icon() -> Icon {
        Icon::new(
            3,
            "icon-js".to_string(),
            vec!["medium-yellow".to_string(), "dark-yellow".to_string()],
            1,
            IconRules {
                names: vec![Regex::new(r"\.js$").unwrap()],
                paths: vec![],
            },
        )
    }

    #[test]
    fn classes_follow_colour_mode() {
        let icon = js_icon();
        assert_eq!(icon.classes(ColourMode::None), vec!["icon-js"]);
        assert_eq!(icon.classes(ColourMode::Dark), vec!["icon-js", "medium-yellow"]);
        assert_eq!(icon.classes(ColourMode::Light), vec!["icon-js", "dark-yellow"]);
    }

    #[test]
    fn missing_colour_variant_is_skipped() {
        let icon = Icon::new(0, "icon-x".to_string(), vec![], 1, IconRules::default());
        assert_eq!(icon.classes(ColourMode::Light), vec!["icon-x"]);
    }

    #[test]
    fn matches_name_rules() {
        let icon = js_icon();
        assert!(icon.matches("main.js", "/src/main.js"));
        assert!(!icon.matches("main.json", "/src/main.json"));
    }

    #[test]
    fn colour_mode_display() {
        assert_eq!(ColourMode::Dark.to_string(), "dark");
        assert_eq!(ColourMode::default(), ColourMode::Dark);
    }
}
