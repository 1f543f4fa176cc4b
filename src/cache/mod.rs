//! Resolved-icon cache
//!
//! Remembers which icon each path resolved to so a fresh session can show
//! icons before any strategy has run.
//!
//! # Validation
//!
//! Entries record the icon's table index and its class name. An entry is only
//! trusted when the icon currently at that index still has that class name;
//! anything else is discarded and the path is resolved again.
//!
//! # Frozen caches
//!
//! | Operation | Live | Frozen |
//! |-----------|------|--------|
//! | get | yes | yes |
//! | set / delete / clear | yes | no-op |
//! | save | writes file | no-op |

pub mod entry;
pub mod store;

pub use entry::CacheEntry;
pub use store::{IconCache, CACHE_VERSION};
