mod cli;
mod commands;
mod config;
mod zone_loader;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use cli::*;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "zonebuilder=info,zonebuilder_cli=info",
        1 => "zonebuilder=debug,zonebuilder_cli=debug",
        _ => "zonebuilder=trace,zonebuilder_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            zone,
            source,
            assets,
            output,
        } => {
            commands::build::handle(&zone, source, assets, output)?;
        }

        Commands::Info { input } => {
            commands::info::handle(&input)?;
        }

        Commands::Types => {
            commands::types::list();
        }

        Commands::Check => {
            commands::types::check()?;
        }

        Commands::Load {
            zones,
            group,
            zone_dir,
        } => {
            commands::load::handle(&zones, group, zone_dir)?;
        }

        Commands::Configure {
            asset_dir,
            output_dir,
            zone_dir,
            show,
        } => {
            commands::configure::handle(asset_dir, output_dir, zone_dir, show)?;
        }
    }

    Ok(())
}
