//! mailmerge - inspect merge-field resolution against XML data documents

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mailmerge_format::MergeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "mailmerge")]
#[command(version)]
#[command(about = "Resolve and format mail-merge fields against XML data", long_about = None)]
struct Cli {
    /// Merge configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log lookups and formatting decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve keys against the first record of the root range
    Lookup {
        /// Data document
        data: PathBuf,

        /// Keys to resolve
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Run the full per-field pipeline for one field
    Field {
        /// Data document
        data: PathBuf,

        /// Field name, with any parameters and modifiers
        field: String,

        /// Field instruction text (defaults to `MERGEFIELD <FIELD>`)
        #[arg(long)]
        instruction: Option<String>,

        /// Resolve the field inside the first record of this range
        #[arg(long)]
        range: Option<String>,
    },

    /// Report the watermark path and its size on a page
    Watermark {
        /// Data document
        data: PathBuf,

        /// Page width in points
        #[arg(long)]
        page_width: f64,

        /// Page height in points
        #[arg(long)]
        page_height: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "mailmerge=debug"
    } else {
        "mailmerge=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => MergeConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => MergeConfig::default(),
    };
    tracing::debug!(?config, "configuration");

    let lines = match cli.command {
        Commands::Lookup { data, keys } => {
            let doc = commands::load_data(&data)?;
            commands::lookup::execute(&doc, &keys)
        }
        Commands::Field {
            data,
            field,
            instruction,
            range,
        } => {
            let doc = commands::load_data(&data)?;
            commands::field::execute(
                &doc,
                config,
                &field,
                instruction.as_deref(),
                range.as_deref(),
            )?
        }
        Commands::Watermark {
            data,
            page_width,
            page_height,
        } => {
            let doc = commands::load_data(&data)?;
            commands::watermark::execute(&doc, &config, page_width, page_height)?
        }
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
