//! SPD Harvest Library
//!
//! Builds machine-learning-ready signal-peptide datasets from the UniProtKB
//! REST API.
//!
//! The pipeline has three parts:
//!
//! - **Fetch**: a paginated HTTP client with bounded retry ([`client`])
//! - **Extract**: per-record field extraction and filtering under a
//!   dataset-specific policy ([`extract`])
//! - **Materialize**: TSV metadata and FASTA sequence output ([`output`])
//!
//! # Example
//!
//! ```no_run
//! use spd_harvest::client::UniProtClient;
//! use spd_harvest::dataset::harvest;
//! use spd_harvest::extract::PositiveExtractor;
//! use spd_harvest::queries;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = UniProtClient::with_defaults()?;
//!     let result = harvest(&client, queries::POSITIVE_SEARCH_URL, &PositiveExtractor).await?;
//!     println!("{} records retained", result.rows.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dataset;
pub mod error;
pub mod extract;
pub mod output;
pub mod progress;
pub mod queries;
pub mod record;

pub use error::{HarvestError, Result};
