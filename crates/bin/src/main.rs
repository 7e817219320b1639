//! Leakscan CLI binary.
//!
//! File-to-file batch transform: reads a raw transaction ledger, writes the
//! enriched and risk-scored record set.

use clap::{Parser, Subcommand};
use leakscan::{ExportFormat, Exporter, Pipeline, PipelineConfig, REQUIRED_COLUMNS};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "leakscan")]
#[command(about = "Revenue-leakage scoring for billing ledgers", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a transaction ledger and write the enriched artifact
    Process {
        /// Input CSV of raw transactions
        #[arg(long)]
        input: PathBuf,

        /// Output CSV for the enriched, scored records
        #[arg(long)]
        output: PathBuf,

        /// Also write the run summary to this path
        #[arg(long)]
        summary: Option<PathBuf>,

        /// Summary format (csv, json or pretty-json)
        #[arg(long, default_value = "json")]
        summary_format: String,

        /// Suppress the console summary
        #[arg(long)]
        quiet: bool,
    },

    /// Print the required input columns
    Schema,
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            summary,
            summary_format,
            quiet,
        } => {
            // Reject a bad format before the batch runs, not after.
            let format: ExportFormat = summary_format.parse()?;

            let report = Pipeline::new(PipelineConfig { input, output }).run()?;
            log::info!("processed {} records", report.records);

            if !quiet {
                print!("{}", report.summary);
            }
            if let Some(path) = summary {
                report.summary.export_to_file(&path, format)?;
                println!("Summary written to {}", path.display());
            }
            println!("Scored ledger written to {}", report.output.display());
        }
        Commands::Schema => {
            for column in REQUIRED_COLUMNS {
                println!("{}", column);
            }
        }
    }

    Ok(())
}
