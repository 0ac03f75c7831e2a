use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use cv_forms::{validate_document, CvData};

#[derive(Parser)]
#[command(name = "cvforma")]
#[command(about = "Validate CV form documents against the section schemas")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a CV JSON snapshot and print per-field findings
    Validate {
        file: PathBuf,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print an empty CV document skeleton as JSON
    Skeleton,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate { file, json } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read CV file: {}", file.display()))?;
            let data: CvData = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse CV JSON: {}", file.display()))?;

            let report = validate_document(&data);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print_report(&data);
            }

            if !report.is_valid() {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Skeleton => {
            println!("{}", serde_json::to_string_pretty(&CvData::default())?);
            Ok(())
        }
    }
}
