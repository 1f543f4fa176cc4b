//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fileicons - resolve icons for files and directories
///
/// Matches paths against an icon table, remembers the result in a cache and
/// gives symlinks the icon of their target.
#[derive(Parser, Debug)]
#[command(name = "fileicons")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FILEICONS_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the icon classes of one or more paths
    Resolve(ResolveArgs),

    /// List the icons of the active table
    Icons(IconsArgs),

    /// Inspect or clear the resolved-icon cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Paths to resolve
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,

    /// Treat every path as changed in version control (enables colours)
    #[arg(long)]
    pub changed: bool,
}

/// Arguments for the icons command
#[derive(Parser, Debug)]
pub struct IconsArgs {
    /// List directory icons instead of file icons
    #[arg(short, long)]
    pub directories: bool,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listing commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// List cached icons
    Show {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Remove every cached icon
    Clear,

    /// Show the cache file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_resolve() {
        let cli = Cli::parse_from(["fileicons", "resolve", "a.js", "src", "--format", "json"]);
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("a.js"), PathBuf::from("src")]);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(!args.changed);
            }
            _ => panic!("expected Resolve command"),
        }
    }

    #[test]
    fn cli_resolve_requires_paths() {
        assert!(Cli::try_parse_from(["fileicons", "resolve"]).is_err());
    }

    #[test]
    fn cli_parses_icons_directories() {
        let cli = Cli::parse_from(["fileicons", "icons", "--directories"]);
        match cli.command {
            Commands::Icons(args) => {
                assert!(args.directories);
                assert_eq!(args.format, OutputFormat::Table);
            }
            _ => panic!("expected Icons command"),
        }
    }

    #[test]
    fn cli_parses_cache_clear() {
        let cli = Cli::parse_from(["fileicons", "cache", "clear"]);
        assert!(matches!(
            cli.command,
            Commands::Cache(CacheArgs {
                action: CacheAction::Clear
            })
        ));
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["fileicons", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(args) => {
                assert!(matches!(args.action, Some(ConfigAction::Init { force: true })));
            }
            _ => panic!("expected Config command"),
        }
    }

    #[test]
    fn cli_counts_verbosity() {
        let cli = Cli::parse_from(["fileicons", "-vv", "config"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
