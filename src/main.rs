use anyhow::Result;
use clap::{Parser, Subcommand};

use courtvault::cli::{conflicts, import, snapshots, status};
use courtvault::config::Config;
use courtvault::store::ArchiveStore;

#[derive(Parser)]
#[command(name = "courtvault")]
#[command(about = "Archival importer for simulated basketball league exports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "courtvault.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a league export file into the archive
    Import {
        /// Path to the export JSON file
        file: String,
    },

    /// Show the active snapshot and archive row counts
    Status,

    /// List imported snapshots
    Snapshots,

    /// List quarantined game-id conflicts
    Conflicts,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = Config::load(&cli.config).unwrap_or_default();

    // Initialize store
    let mut store = ArchiveStore::open(&config.database_path())?;

    match cli.command {
        Commands::Import { file } => {
            import::run(&mut store, &config, &file)?;
        }
        Commands::Status => {
            status::run(&store)?;
        }
        Commands::Snapshots => {
            snapshots::run(&store)?;
        }
        Commands::Conflicts => {
            conflicts::run(&store)?;
        }
    }

    Ok(())
}
