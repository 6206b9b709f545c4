//! Squad CLI
//!
//! Inspect formation, tactic and player catalogs from the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "squad")]
#[command(about = "Inspect formations, tactics and squad ratings", long_about = None)]
struct Cli {
    /// Catalog file (JSON or YAML); built-in formations only when omitted
    #[arg(long, global = true, env = "SQUAD_CATALOG")]
    catalog: Option<PathBuf>,

    /// Engine config file; overrides SQUAD_CONFIG_PATH
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List formations
    Formations {
        #[arg(long)]
        squad_size: Option<u8>,
    },

    /// Resolve a tactic through its inheritance chain and print it as JSON
    Resolve {
        #[arg(long)]
        tactic: String,
    },

    /// List tactics available to a team
    Tactics {
        #[arg(long)]
        team: String,

        #[arg(long)]
        age_group: String,

        #[arg(long)]
        club: String,

        /// Defaults to the configured squad size
        #[arg(long)]
        squad_size: Option<u8>,
    },

    /// Team ratings for the given players, or every catalog player
    Ratings {
        #[arg(long = "player")]
        players: Vec<String>,
    },

    /// Check catalog integrity
    Validate,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = squad_cli::load_config(cli.config.as_deref())?;
    let bundle = squad_cli::load_catalog(cli.catalog.as_deref())?;
    debug!(?config, tactics = bundle.tactics.len(), "catalog ready");

    match cli.command {
        Commands::Formations { squad_size } => {
            print!("{}", squad_cli::formations_report(&bundle, squad_size));
        }

        Commands::Resolve { tactic } => {
            println!("{}", squad_cli::resolve_report(&bundle, &tactic)?);
        }

        Commands::Tactics { team, age_group, club, squad_size } => {
            let squad_size = squad_size.unwrap_or(config.lineup.default_squad_size);
            print!("{}", squad_cli::tactics_report(&bundle, &team, &age_group, &club, squad_size));
        }

        Commands::Ratings { players } => {
            print!("{}", squad_cli::ratings_report(&bundle, &players)?);
        }

        Commands::Validate => {
            let (ok, report) = squad_cli::validate_report(&bundle);
            print!("{report}");
            if !ok {
                anyhow::bail!("Catalog validation failed");
            }
        }
    }

    Ok(())
}
