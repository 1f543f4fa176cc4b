//! CLI command implementations

pub mod cache;
pub mod config;
pub mod icons;
pub mod resolve;

pub use cache::execute as cache;
pub use config::execute as config;
pub use icons::execute as icons;
pub use resolve::execute as resolve;

use crate::config::Config;
use crate::error::FileIconsResult;
use crate::icons::IconTables;
use tracing::debug;

/// Icon tables named by the configuration, or the built-in ones
pub(crate) async fn load_tables(config: &Config) -> FileIconsResult<IconTables> {
    match &config.icons.table {
        Some(path) => {
            debug!("Loading icon table from {}", path.display());
            IconTables::load(path).await
        }
        None => IconTables::builtin(),
    }
}
