//! Resolve command - print the icon classes of paths

use super::load_tables;
use crate::cache::IconCache;
use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{FileIconsError, FileIconsResult};
use crate::registry::IconRegistry;
use crate::resource::{Resource, VcsStatus};
use crate::services::IconServices;
use crate::strategy::PathStrategy;
use console::style;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tokio::fs;
use tracing::{debug, info};

/// Upper bound on scheduler turns spent settling cached entries
const MAX_SETTLE_TURNS: usize = 8;

#[derive(Debug, Serialize)]
struct Resolved {
    path: String,
    icon: Option<String>,
    priority: Option<u32>,
    classes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> FileIconsResult<()> {
    let cache_path = ConfigManager::cache_path(config);
    let mut cache = if config.cache.enabled {
        IconCache::load(&cache_path).await?
    } else {
        debug!("Icon cache disabled");
        IconCache::new()
    };
    cache.set_frozen(config.cache.frozen);

    let services = IconServices::new(config.display.clone(), cache);
    let mut registry = IconRegistry::new(services.clone());

    // Track first: cached entries wait on the scheduler until tables exist
    let mut paths = Vec::with_capacity(args.paths.len());
    for path in &args.paths {
        let (resource, target) = describe(path).await?;
        if args.changed {
            resource.set_vcs_status(Some(VcsStatus::Modified));
        }
        let path = resource.path().to_string();
        registry.track(resource);

        if let Some(target) = &target {
            let target_resource = Resource::from_path(target)?;
            let target_path = target_resource.path().to_string();
            registry.track(target_resource);
            registry.link(&path, &target_path)?;
        }
        paths.push((path, target));
    }

    let tables = Rc::new(load_tables(config).await?);
    services.install_tables(Rc::clone(&tables));
    services.set_strategy(Rc::new(PathStrategy::new(tables)));
    let turns = services.scheduler().run_until_idle(MAX_SETTLE_TURNS);
    debug!("Settled after {} scheduler turn(s)", turns);

    let mut rows = Vec::with_capacity(paths.len());
    for (path, target) in paths {
        let Some(delegate) = registry.get(&path) else {
            continue;
        };
        let classes = delegate.get_classes().unwrap_or_default();
        let icon = delegate.get_current_icon();
        rows.push(Resolved {
            path,
            icon: icon.as_ref().map(|i| i.class_name().to_string()),
            priority: delegate
                .master()
                .map_or_else(|| delegate.current_priority(), |m| m.current_priority()),
            classes,
            target: target.map(|t| t.display().to_string()),
        });
    }

    match args.format {
        OutputFormat::Table => print_table(&rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Plain => {
            for row in &rows {
                println!("{}\t{}", row.path, row.classes.join(" "));
            }
        }
    }

    // Take the cache before teardown: destroying a target makes its links
    // fall back to their own slots and rewrite their entries
    let mut cache = std::mem::take(&mut *services.cache_mut());
    drop(registry);
    if config.cache.enabled && cache.is_dirty() && cache.save(&cache_path).await? {
        info!("Icon cache updated");
    }

    Ok(())
}

/// Resource for `path` and, for symlinks, the canonical target
async fn describe(path: &Path) -> FileIconsResult<(Resource, Option<PathBuf>)> {
    let absolute = std::path::absolute(path)
        .map_err(|e| FileIconsError::io(format!("resolving {}", path.display()), e))?;
    let resource = Resource::from_path(&absolute)?;

    if !resource.is_symlink() {
        return Ok((resource, None));
    }
    match fs::canonicalize(&absolute).await {
        Ok(target) => Ok((resource, Some(target))),
        Err(e) => {
            debug!("{}: dangling symlink ({})", absolute.display(), e);
            Ok((resource, None))
        }
    }
}

fn print_table(rows: &[Resolved]) {
    println!(
        "{:<40} {:<28} {}",
        style("PATH").bold(),
        style("ICON").bold(),
        style("CLASSES").bold()
    );
    println!("{}", "-".repeat(90));

    for row in rows {
        let icon = match &row.icon {
            Some(icon) => style(icon.clone()).green(),
            None => style("-".to_string()).dim(),
        };
        let path = match &row.target {
            Some(target) => format!("{} -> {}", row.path, target),
            None => row.path.clone(),
        };
        println!("{:<40} {:<28} {}", path, icon, row.classes.join(" "));
    }

    println!();
    println!("{} path(s)", rows.len());
}
