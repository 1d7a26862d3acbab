//! Core CLI definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zonebuilder")]
#[command(about = "Zone archive builder", long_about = None)]
pub struct Cli {
    /// Increase log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a zone from its source file
    #[command(visible_alias = "b")]
    Build {
        /// Zone name (reads zone_source/<zone>.csv, writes <zone>.ff)
        zone: String,

        /// Zone source file (defaults to <assets>/zone_source/<zone>.csv)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Asset directory (uses configured default if not provided)
        #[arg(short, long, env = "ZONEBUILDER_ASSETS")]
        assets: Option<PathBuf>,

        /// Output directory (uses configured default if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the asset list of a fastfile
    #[command(visible_alias = "i")]
    Info {
        /// Path to .ff file
        input: PathBuf,
    },

    /// List the asset type table
    #[command(visible_alias = "t")]
    Types,

    /// Verify encoder record sizes against the engine layout
    Check,

    /// Load zones through the loader, list their assets, then release them
    #[command(visible_alias = "l")]
    Load {
        /// Zone names, loaded in order
        #[arg(required = true)]
        zones: Vec<String>,

        /// Group the zones are loaded under
        #[arg(short, long, default_value_t = 1)]
        group: u32,

        /// Directory containing .ff files (uses configured default if not provided)
        #[arg(short, long)]
        zone_dir: Option<PathBuf>,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set default asset directory
        #[arg(long)]
        asset_dir: Option<PathBuf>,

        /// Set default output directory
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Set default zone directory for loading
        #[arg(long)]
        zone_dir: Option<PathBuf>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build() {
        let cli = Cli::try_parse_from(["zonebuilder", "-v", "build", "mp_test", "-o", "out"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Build { zone, output, .. } => {
                assert_eq!(zone, "mp_test");
                assert_eq!(output, Some(PathBuf::from("out")));
            }
            _ => panic!("expected build"),
        }
    }

    #[test]
    fn test_load_requires_zones() {
        assert!(Cli::try_parse_from(["zonebuilder", "load"]).is_err());

        let cli = Cli::try_parse_from(["zonebuilder", "load", "a", "b", "-g", "4"]).unwrap();
        match cli.command {
            Commands::Load { zones, group, .. } => {
                assert_eq!(zones, vec!["a", "b"]);
                assert_eq!(group, 4);
            }
            _ => panic!("expected load"),
        }
    }
}
