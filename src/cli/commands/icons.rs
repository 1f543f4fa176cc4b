//! Icons command - list the active icon table

use super::load_tables;
use crate::cli::args::{IconsArgs, OutputFormat};
use crate::config::Config;
use crate::error::FileIconsResult;
use crate::icons::{Icon, TableKind};
use console::style;
use serde::Serialize;
use std::rc::Rc;

/// Execute the icons command
pub async fn execute(args: IconsArgs, config: &Config) -> FileIconsResult<()> {
    let tables = load_tables(config).await?;
    let table = tables.table(TableKind::for_directory(args.directories));
    let icons: Vec<&Rc<Icon>> = table.iter().collect();

    match args.format {
        OutputFormat::Table => print_table(&icons),
        OutputFormat::Json => print_json(&icons)?,
        OutputFormat::Plain => {
            for icon in &icons {
                println!("{}", icon.class_name());
            }
        }
    }

    Ok(())
}

fn print_table(icons: &[&Rc<Icon>]) {
    println!(
        "{:<6} {:<28} {:<9} {}",
        style("INDEX").bold(),
        style("CLASS").bold(),
        style("PRIORITY").bold(),
        style("COLOURS").bold()
    );
    println!("{}", "-".repeat(70));

    for icon in icons {
        println!(
            "{:<6} {:<28} {:<9} {}",
            icon.index(),
            icon.class_name(),
            icon.priority(),
            icon.colours().join(", ")
        );
    }

    println!();
    println!("{} icon(s)", icons.len());
}

fn print_json(icons: &[&Rc<Icon>]) -> FileIconsResult<()> {
    #[derive(Serialize)]
    struct IconJson<'a> {
        index: usize,
        class: &'a str,
        priority: u32,
        colours: &'a [String],
    }

    let rows: Vec<IconJson<'_>> = icons
        .iter()
        .map(|icon| IconJson {
            index: icon.index(),
            class: icon.class_name(),
            priority: icon.priority(),
            colours: icon.colours(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
