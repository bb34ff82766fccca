//! Tab-separated metadata output
//!
//! Header line followed by one line per retained row, in encounter order.
//! Duplicate accessions are not deduplicated here; the FASTA side is.

use crate::error::Result;
use crate::extract::DatasetRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Write rows to a TSV file with the dataset's header line
pub fn write_tsv<R: DatasetRow>(path: &Path, rows: &[R]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", R::TSV_HEADER)?;
    for row in rows {
        writeln!(writer, "{}", row.tsv_line())?;
    }
    writer.flush()?;

    info!(rows = rows.len(), path = %path.display(), "Saved metadata");
    Ok(())
}
