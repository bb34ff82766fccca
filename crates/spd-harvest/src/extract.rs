//! Per-record field extraction and filtering
//!
//! Converts one raw [`ProteinEntry`] into a dataset row or an inspectable
//! exclusion reason, under one of two policies:
//!
//! - [`PositiveExtractor`]: proteins with an experimentally verified signal
//!   peptide; derives the cleavage site and filters out annotated,
//!   undetermined, or short signal peptides.
//! - [`NegativeExtractor`]: secreted proteins without a signal peptide;
//!   flags an N-terminal transmembrane helix and never filters.
//!
//! Extraction is pure and stateless; it consumes no network state.

use crate::record::ProteinEntry;

/// Minimum signal-peptide length for a usable positive example
pub const MIN_SIGNAL_LEN: u32 = 14;

/// A transmembrane helix starting at or before this residue counts as
/// N-terminal (1-based numbering)
pub const TMH_N_TERMINUS_CUTOFF: u32 = 90;

/// Coarse taxonomic grouping derived from an organism's lineage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kingdom {
    Metazoa,
    Fungi,
    Plants,
    Other,
}

impl Kingdom {
    /// Derive the kingdom from a full lineage, checked in fixed priority
    /// order; the first match wins
    pub fn from_lineage(lineage: &[String]) -> Self {
        if lineage.iter().any(|taxon| taxon == "Metazoa") {
            return Kingdom::Metazoa;
        }
        if lineage.iter().any(|taxon| taxon == "Fungi") {
            return Kingdom::Fungi;
        }
        // Viridiplantae is the taxonomic group for green plants
        if lineage.iter().any(|taxon| taxon == "Viridiplantae") {
            return Kingdom::Plants;
        }
        Kingdom::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Kingdom::Metazoa => "Metazoa",
            Kingdom::Fungi => "Fungi",
            Kingdom::Plants => "Plants",
            Kingdom::Other => "Other",
        }
    }
}

impl std::fmt::Display for Kingdom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record was filtered out of the positive dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExcludeReason {
    /// The signal feature carries free-text annotation, so the boundary is
    /// not a clean experimental cleavage site
    AnnotatedSignal,
    /// The signal end position is the "?" placeholder or missing
    UnknownCleavageEnd,
    /// The signal peptide is shorter than [`MIN_SIGNAL_LEN`]
    ShortSignal { len: u32 },
}

impl std::fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExcludeReason::AnnotatedSignal => write!(f, "annotated signal"),
            ExcludeReason::UnknownCleavageEnd => write!(f, "unknown cleavage end"),
            ExcludeReason::ShortSignal { len } => write!(f, "short signal ({} residues)", len),
        }
    }
}

/// Result of applying an extraction policy to one record
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction<R> {
    /// The record survives filtering and contributes a row
    Included(R),
    /// The record is dropped, with the reason kept inspectable
    Excluded(ExcludeReason),
}

impl<R> Extraction<R> {
    /// The row, if the record was included
    pub fn included(self) -> Option<R> {
        match self {
            Extraction::Included(row) => Some(row),
            Extraction::Excluded(_) => None,
        }
    }
}

/// One retained record, ready for TSV and FASTA serialization
pub trait DatasetRow {
    /// TSV header line for this dataset variant
    const TSV_HEADER: &'static str;

    fn accession(&self) -> &str;
    fn kingdom(&self) -> Kingdom;
    fn sequence(&self) -> &str;

    /// The tab-separated scalar fields of this row (sequence excluded)
    fn tsv_line(&self) -> String;
}

/// An extraction policy: raw record in, row or exclusion out
pub trait Extractor {
    type Row: DatasetRow;

    fn extract(&self, entry: &ProteinEntry) -> Extraction<Self::Row>;
}

// ============================================================================
// Positive dataset: experimentally verified signal peptides
// ============================================================================

/// Row of the positive (signal peptide) dataset
#[derive(Debug, Clone, PartialEq)]
pub struct PositiveRow {
    pub accession: String,
    pub organism: String,
    pub kingdom: Kingdom,
    pub protein_length: u32,
    /// Cleavage-site position; 0 when the record has no Signal feature
    pub cleavage_site: u32,
    pub sequence: String,
}

impl DatasetRow for PositiveRow {
    const TSV_HEADER: &'static str = "Accession\tOrganism\tKingdom\tProtein_Length\tCleavage_Site";

    fn accession(&self) -> &str {
        &self.accession
    }

    fn kingdom(&self) -> Kingdom {
        self.kingdom
    }

    fn sequence(&self) -> &str {
        &self.sequence
    }

    fn tsv_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.accession, self.organism, self.kingdom, self.protein_length, self.cleavage_site
        )
    }
}

/// Extraction policy for the positive dataset
pub struct PositiveExtractor;

impl Extractor for PositiveExtractor {
    type Row = PositiveRow;

    fn extract(&self, entry: &ProteinEntry) -> Extraction<PositiveRow> {
        // No Signal feature is fine: the record stays with cleavage site 0.
        let mut cleavage_site = 0;

        // Only the first Signal feature is consulted.
        if let Some(signal) = entry
            .features
            .iter()
            .find(|f| f.feature_type == "Signal")
        {
            if !signal.description.is_empty() {
                return Extraction::Excluded(ExcludeReason::AnnotatedSignal);
            }
            if signal.location.end.is_unknown() {
                return Extraction::Excluded(ExcludeReason::UnknownCleavageEnd);
            }

            let (Some(start), Some(end)) = (
                signal.location.start.residue(),
                signal.location.end.residue(),
            ) else {
                return Extraction::Excluded(ExcludeReason::UnknownCleavageEnd);
            };

            let cleavage_len = end.saturating_sub(start) + 1;
            if cleavage_len < MIN_SIGNAL_LEN {
                return Extraction::Excluded(ExcludeReason::ShortSignal { len: cleavage_len });
            }
            cleavage_site = cleavage_len;
        }

        Extraction::Included(PositiveRow {
            accession: entry.primary_accession.clone(),
            organism: entry.organism.scientific_name.clone(),
            kingdom: Kingdom::from_lineage(&entry.organism.lineage),
            protein_length: entry.sequence.length,
            cleavage_site,
            sequence: entry.sequence.value.clone(),
        })
    }
}

// ============================================================================
// Negative dataset: secreted proteins without a signal peptide
// ============================================================================

/// Row of the negative (no signal peptide) dataset
#[derive(Debug, Clone, PartialEq)]
pub struct NegativeRow {
    pub accession: String,
    pub organism: String,
    pub kingdom: Kingdom,
    pub protein_length: u32,
    /// Whether the first transmembrane helix starts within the N-terminal
    /// region (first [`TMH_N_TERMINUS_CUTOFF`] residues)
    pub has_tmh_n_terminus: bool,
    pub sequence: String,
}

impl DatasetRow for NegativeRow {
    const TSV_HEADER: &'static str =
        "Accession\tOrganism\tKingdom\tProtein_Length\tTransmembrane_Helix_N_Terminus";

    fn accession(&self) -> &str {
        &self.accession
    }

    fn kingdom(&self) -> Kingdom {
        self.kingdom
    }

    fn sequence(&self) -> &str {
        &self.sequence
    }

    fn tsv_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            self.accession,
            self.organism,
            self.kingdom,
            self.protein_length,
            self.has_tmh_n_terminus
        )
    }
}

/// Extraction policy for the negative dataset; never filters a record
pub struct NegativeExtractor;

impl Extractor for NegativeExtractor {
    type Row = NegativeRow;

    fn extract(&self, entry: &ProteinEntry) -> Extraction<NegativeRow> {
        // Only the first Transmembrane feature is consulted.
        let has_tmh_n_terminus = entry
            .features
            .iter()
            .find(|f| f.feature_type == "Transmembrane")
            .and_then(|f| f.location.start.residue())
            .is_some_and(|start| start <= TMH_N_TERMINUS_CUTOFF);

        Extraction::Included(NegativeRow {
            accession: entry.primary_accession.clone(),
            organism: entry.organism.scientific_name.clone(),
            kingdom: Kingdom::from_lineage(&entry.organism.lineage),
            protein_length: entry.sequence.length,
            has_tmh_n_terminus,
            sequence: entry.sequence.value.clone(),
        })
    }
}
