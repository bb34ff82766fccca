//! SPD Harvest - Signal-peptide dataset builder

use anyhow::Result;
use clap::Parser;
use spd_common::logging::{init_logging, LogConfig, LogLevel};
use spd_harvest::client::UniProtClient;
use spd_harvest::dataset::harvest;
use spd_harvest::extract::{DatasetRow, Extractor, NegativeExtractor, PositiveExtractor};
use spd_harvest::output::{write_fasta, write_tsv};
use spd_harvest::queries;
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "spd-harvest")]
#[command(author, version, about = "Signal-peptide dataset harvester")]
struct Cli {
    /// Dataset to harvest
    #[command(subcommand)]
    dataset: Dataset,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Dataset {
    /// Harvest the positive dataset (experimentally verified signal peptides)
    Positive {
        /// Output directory
        #[arg(short, long, default_value = "./data")]
        output: String,
    },

    /// Harvest the negative dataset (secreted, no signal peptide)
    Negative {
        /// Output directory
        #[arg(short, long, default_value = "./data")]
        output: String,
    },

    /// Harvest both datasets
    All {
        /// Output directory
        #[arg(short, long, default_value = "./data")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Environment variables configure logging; the verbose flag wins
    let mut log_config = LogConfig::from_env()?;
    log_config.log_file_prefix = "spd-harvest".to_string();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }

    init_logging(&log_config)?;

    let client = UniProtClient::with_defaults()?;

    match cli.dataset {
        Dataset::Positive { output } => {
            run_dataset(
                &client,
                queries::POSITIVE_SEARCH_URL,
                &PositiveExtractor,
                &output,
                "positive_dataset_sp_cleavage",
            )
            .await?;
        },
        Dataset::Negative { output } => {
            run_dataset(
                &client,
                queries::NEGATIVE_SEARCH_URL,
                &NegativeExtractor,
                &output,
                "negative_dataset",
            )
            .await?;
        },
        Dataset::All { output } => {
            run_dataset(
                &client,
                queries::POSITIVE_SEARCH_URL,
                &PositiveExtractor,
                &output,
                "positive_dataset_sp_cleavage",
            )
            .await?;
            run_dataset(
                &client,
                queries::NEGATIVE_SEARCH_URL,
                &NegativeExtractor,
                &output,
                "negative_dataset",
            )
            .await?;
        },
    }

    info!("Harvest complete");
    Ok(())
}

/// Harvest one dataset and write its TSV and FASTA artifacts
async fn run_dataset<E: Extractor>(
    client: &UniProtClient,
    search_url: &str,
    extractor: &E,
    output_dir: &str,
    stem: &str,
) -> Result<()> {
    let output_path = Path::new(output_dir);
    std::fs::create_dir_all(output_path)?;

    info!(dataset = stem, "Harvesting dataset");
    let result = harvest(client, search_url, extractor).await?;

    write_tsv(&output_path.join(format!("{stem}.tsv")), &result.rows)?;

    // A FASTA write failure is reported but does not abort the run; the
    // metadata file has already been written at this point.
    let fasta_path = output_path.join(format!("{stem}.fasta"));
    if let Err(e) = write_fasta(&fasta_path, &result.sequences) {
        error!(error = %e, path = %fasta_path.display(), "Failed to write FASTA file");
    }

    info!(
        dataset = stem,
        retained = result.rows.len(),
        seen = result.seen,
        "Dataset complete"
    );

    info!(dataset = stem, header = E::Row::TSV_HEADER, "First rows");
    for line in result.head(10) {
        info!(dataset = stem, row = %line, "First rows");
    }

    for (kingdom, count) in result.kingdom_counts() {
        info!(dataset = stem, kingdom = %kingdom, count, "Kingdom distribution");
    }

    Ok(())
}
