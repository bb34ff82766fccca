//! FASTA sequence output
//!
//! One entry per accession in the sequence map, sequence wrapped at a fixed
//! line width. The reader exists for verification and downstream tooling.

use crate::dataset::SequenceMap;
use crate::error::Result;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Standard FASTA sequence line width
pub const FASTA_LINE_WIDTH: usize = 60;

/// Write a sequence map to a FASTA file
///
/// Entries come out in first-encounter order, one per accession, sequence
/// wrapped at [`FASTA_LINE_WIDTH`] columns.
pub fn write_fasta(path: &Path, sequences: &SequenceMap) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for (accession, sequence) in sequences.iter() {
        writeln!(writer, ">{}", accession)?;
        // Sequences are ASCII amino-acid codes, so byte chunks are safe
        for chunk in sequence.as_bytes().chunks(FASTA_LINE_WIDTH) {
            writer.write_all(chunk)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;

    info!(entries = sequences.len(), path = %path.display(), "Saved sequences");
    Ok(())
}

/// Read a FASTA file back into (accession, sequence) pairs, in file order
///
/// Wrapped sequence lines are joined; case is preserved. Lines before the
/// first header are ignored.
pub fn read_fasta(path: &Path) -> Result<Vec<(String, String)>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut entries: Vec<(String, String)> = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            entries.push((header.to_string(), String::new()));
        } else if let Some((_, sequence)) = entries.last_mut() {
            sequence.push_str(line.trim_end());
        }
    }

    Ok(entries)
}
