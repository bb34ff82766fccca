//! Dataset assembly
//!
//! Drives the paginated fetch client, applies an extraction policy to every
//! record of every page, and accumulates the retained rows together with an
//! accession-to-sequence map for FASTA output.

use crate::client::UniProtClient;
use crate::error::Result;
use crate::extract::{DatasetRow, Extraction, Extractor, Kingdom};
use crate::progress;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Accession-to-sequence map preserving first-encounter order
///
/// A duplicate accession overwrites the stored sequence in place
/// (last-write-wins), while the tabular rows keep every occurrence. The
/// resulting count mismatch is inherited behavior; the overwrite is logged
/// so it stays visible.
#[derive(Debug, Default)]
pub struct SequenceMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl SequenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the sequence for an accession
    pub fn insert(&mut self, accession: String, sequence: String) {
        if let Some(&i) = self.index.get(&accession) {
            warn!(%accession, "Duplicate accession, overwriting stored sequence");
            self.entries[i].1 = sequence;
        } else {
            self.index.insert(accession.clone(), self.entries.len());
            self.entries.push((accession, sequence));
        }
    }

    /// The sequence stored for an accession
    pub fn get(&self, accession: &str) -> Option<&str> {
        self.index
            .get(accession)
            .map(|&i| self.entries[i].1.as_str())
    }

    /// Iterate entries in first-encounter order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(acc, seq)| (acc.as_str(), seq.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulated output of one harvest run
#[derive(Debug)]
pub struct DatasetResult<R> {
    /// Retained rows in encounter order, duplicates included
    pub rows: Vec<R>,

    /// Deduplicated accession-to-sequence map for FASTA output
    pub sequences: SequenceMap,

    /// Total records seen across all pages, retained or not
    pub seen: u64,
}

impl<R: DatasetRow> DatasetResult<R> {
    /// TSV-formatted preview of the first `n` retained rows
    pub fn head(&self, n: usize) -> Vec<String> {
        self.rows.iter().take(n).map(|row| row.tsv_line()).collect()
    }

    /// Kingdom distribution of the retained rows, most frequent first
    pub fn kingdom_counts(&self) -> Vec<(Kingdom, usize)> {
        let mut counts: HashMap<Kingdom, usize> = HashMap::new();
        for row in &self.rows {
            *counts.entry(row.kingdom()).or_default() += 1;
        }

        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));
        counts
    }
}

/// Fetch every page of a search and run each record through the extractor
///
/// Fetch errors abort the whole run; exclusions are counted and logged at
/// debug level but never abort.
pub async fn harvest<E: Extractor>(
    client: &UniProtClient,
    search_url: &str,
    extractor: &E,
) -> Result<DatasetResult<E::Row>> {
    let mut pager = client.fetch_pages(search_url);

    let mut rows = Vec::new();
    let mut sequences = SequenceMap::new();
    let mut seen: u64 = 0;
    let mut excluded: u64 = 0;
    let mut bar = None;

    while let Some(page) = pager.next_page().await? {
        if bar.is_none() && page.total > 0 {
            bar = Some(progress::create_progress_bar(
                page.total,
                "Processing entries",
            ));
        }

        for entry in &page.results {
            seen += 1;
            match extractor.extract(entry) {
                Extraction::Included(row) => {
                    sequences.insert(row.accession().to_string(), row.sequence().to_string());
                    rows.push(row);
                },
                Extraction::Excluded(reason) => {
                    excluded += 1;
                    debug!(accession = %entry.primary_accession, %reason, "Record excluded");
                },
            }
        }

        if let Some(ref bar) = bar {
            bar.set_position(seen);
        }
        info!(processed = seen, total = page.total, "Processed batch");
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    info!(
        retained = rows.len(),
        excluded, seen, "Finished processing search results"
    );

    Ok(DatasetResult {
        rows,
        sequences,
        seen,
    })
}
