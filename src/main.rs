//! # Inventory Seed CLI (`inventory-seed`)
//!
//! Reads `inventory_source.txt`, writes `categories.csv` and `items.csv`,
//! and packs both into `inventory_seed_data.zip` in the current directory.
//! Every flag is optional; with none, the run uses the built-in defaults
//! (or `./inventory-seed.toml` when present).
//!
//! ## Examples
//!
//! ```bash
//! # Convert with defaults
//! inventory-seed
//!
//! # Read a different outline and write into ./seed
//! inventory-seed --input catalog.txt --output-dir seed
//!
//! # Show counts only
//! inventory-seed --dry-run --progress human
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use inventory_seed::config;
use inventory_seed::convert::{self, ConvertOptions};
use inventory_seed::progress::ProgressMode;

/// Convert a category outline into CSV seed tables and a zip archive.
#[derive(Parser)]
#[command(
    name = "inventory-seed",
    version,
    about = "Convert a category outline into CSV seed tables bundled as a zip archive",
    long_about = "Lines starting with \"* \" declare a category; every other non-blank line is \
    an item of the most recent category. Produces categories.csv and items.csv (UTF-8 with BOM) \
    and packs them into a deflate zip archive."
)]
struct Cli {
    /// Path to a TOML configuration file.
    ///
    /// Defaults to `./inventory-seed.toml` if it exists, otherwise
    /// built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Outline file to read (overrides `input.path`).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory for the CSV files and archive (overrides `output.dir`).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Build the tables and report counts without writing files.
    #[arg(long)]
    dry_run: bool,

    /// Check the staged archive against the tables before it replaces the output.
    #[arg(long)]
    verify: bool,

    /// Progress output on stderr. Defaults to `human` on a terminal,
    /// `off` otherwise.
    #[arg(long, value_enum)]
    progress: Option<ProgressMode>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(input) = cli.input {
        cfg.input.path = input;
    }
    if let Some(dir) = cli.output_dir {
        cfg.output.dir = dir;
    }

    let mode = cli.progress.unwrap_or_else(ProgressMode::default_for_tty);
    let reporter = mode.reporter();
    let options = ConvertOptions {
        dry_run: cli.dry_run,
        verify: cli.verify,
    };

    let summary = convert::run_convert(&cfg, options, reporter.as_ref())?;

    match summary.archive {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            println!("✅ Created {} (UTF-8 encoded).", name);
        }
        None => {
            println!("dry-run");
            println!("  categories: {}", summary.report.categories);
            println!("  items: {}", summary.report.items);
            println!("  orphans dropped: {}", summary.report.orphans_dropped);
        }
    }

    Ok(())
}
