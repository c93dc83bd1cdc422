use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pe_tracker_lib::{import_file, save_import, Db, ImportConfig};

/// Import a fund-tracker workbook and print what was extracted as JSON.
#[derive(Parser, Debug)]
#[command(name = "import_funds", version, about)]
struct Cli {
    /// Workbook to import (.xlsx or .xls)
    file: PathBuf,

    /// Also persist the result to the local snapshot store
    #[arg(long)]
    save: bool,

    /// Snapshot database path (defaults to PE_TRACKER_DB or the user data dir)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ImportConfig::from_env();
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    let report = import_file(&cli.file, &config)
        .with_context(|| format!("Failed to import {}", cli.file.display()))?;

    if cli.save {
        let db = Db::new(config.database_path.clone())
            .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
        save_import(&db, &report).context("Failed to save import")?;
        tracing::info!(path = %config.database_path.display(), "snapshot written");
    }

    let json = if cli.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);
    Ok(())
}
