use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pe_tracker_lib::excel::{column_letter, decode_workbook, describe};
use pe_tracker_lib::ImportConfig;

/// Print each sheet's headers (with column letters) and first rows.
#[derive(Parser, Debug)]
#[command(name = "dump_excel", version, about)]
struct Cli {
    file: PathBuf,

    /// Data rows to print per sheet
    #[arg(long)]
    rows: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ImportConfig::from_env();
    let bytes = std::fs::read(&cli.file).with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let sheets = decode_workbook(&bytes, &config)?;

    for preview in describe(&sheets, cli.rows.unwrap_or(config.preview_rows)) {
        println!("=== {} ({} rows) ===", preview.sheet_name, preview.row_count);
        for (i, header) in preview.headers.iter().enumerate() {
            if !header.is_empty() {
                println!("  {}: {}", column_letter(i), header);
            }
        }
        for row in &preview.sample_rows {
            let cells: Vec<String> = row
                .cells()
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.trim().is_empty())
                .map(|(i, c)| format!("{}={}", column_letter(i), c.trim()))
                .collect();
            println!("  row {}: {}", row.number, cells.join(" | "));
        }
    }
    Ok(())
}
