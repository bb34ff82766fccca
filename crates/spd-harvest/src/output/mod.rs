//! Output artifact serialization
//!
//! Two artifacts per dataset: a tab-separated metadata file and a FASTA
//! sequence file.

pub mod fasta;
pub mod tsv;

pub use fasta::{read_fasta, write_fasta, FASTA_LINE_WIDTH};
pub use tsv::write_tsv;
