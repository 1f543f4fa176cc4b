//! Cache command - inspect or clear the resolved-icon cache

use crate::cache::IconCache;
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, ConfigManager};
use crate::error::{FileIconsError, FileIconsResult};
use crate::ui::{self, UiContext};
use console::style;
use std::collections::BTreeMap;
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> FileIconsResult<()> {
    let path = ConfigManager::cache_path(config);

    match args.action {
        CacheAction::Show { format } => show_cache(&path, format).await,
        CacheAction::Clear => clear_cache(&path, config).await,
        CacheAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn show_cache(path: &Path, format: OutputFormat) -> FileIconsResult<()> {
    let cache = IconCache::load(path).await?;

    match format {
        OutputFormat::Json => {
            let entries: BTreeMap<_, _> = cache.entries().into_iter().collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            for (path, entry) in cache.entries() {
                println!("{}\t{}", path, entry.class_name);
            }
        }
        OutputFormat::Table => {
            if cache.is_empty() {
                let ctx = UiContext::detect();
                ui::step_info(&ctx, "Icon cache is empty");
                return Ok(());
            }

            println!(
                "{:<50} {:<28} {:<9} {}",
                style("PATH").bold(),
                style("ICON").bold(),
                style("PRIORITY").bold(),
                style("INDEX").bold()
            );
            println!("{}", "-".repeat(95));
            for (path, entry) in cache.entries() {
                println!(
                    "{:<50} {:<28} {:<9} {}",
                    path, entry.class_name, entry.priority, entry.icon_index
                );
            }

            println!();
            let saved = cache
                .saved_at()
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string());
            println!("{} cached icon(s), saved {}", cache.len(), saved);
        }
    }

    Ok(())
}

async fn clear_cache(path: &Path, config: &Config) -> FileIconsResult<()> {
    let ctx = UiContext::detect();

    if config.cache.frozen {
        return Err(FileIconsError::CacheFrozen(path.to_path_buf()));
    }

    let mut cache = IconCache::load(path).await?;
    let count = cache.len();
    cache.clear();
    cache.save(path).await?;

    ui::step_ok_detail(
        &ctx,
        &format!("Removed {} cached icon(s)", count),
        &path.display().to_string(),
    );
    Ok(())
}
