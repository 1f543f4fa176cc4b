//! Icon tables
//!
//! Icons live in two ordered tables, one for files and one for directories.
//! An icon's position in its table is stable and is what the resolved-icon
//! cache records, together with the class name used to detect stale entries.

pub mod icon;
pub mod table;

pub use icon::{ColourMode, Icon};
pub use table::{IconTable, IconTables, TableKind};
