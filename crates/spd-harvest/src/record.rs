//! Raw UniProtKB record model
//!
//! Serde types mirroring the subset of the UniProtKB search JSON this
//! pipeline consumes. Unknown fields are ignored so API additions do not
//! break deserialization.

use serde::{Deserialize, Serialize};

/// One page of search results, as returned by the API body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    /// Ordered batch of protein entries
    #[serde(default)]
    pub results: Vec<ProteinEntry>,
}

/// One raw protein entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinEntry {
    pub primary_accession: String,
    pub organism: Organism,
    pub sequence: Sequence,
    #[serde(default)]
    pub features: Vec<Feature>,
}

/// Source organism with full taxonomic lineage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organism {
    pub scientific_name: String,
    #[serde(default)]
    pub lineage: Vec<String>,
}

/// Amino-acid sequence and its length
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    pub value: String,
    pub length: u32,
}

/// One annotated sequence feature (e.g. "Signal", "Transmembrane")
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(rename = "type")]
    pub feature_type: String,
    #[serde(default)]
    pub description: String,
    pub location: Location,
}

/// Feature location as start/end residue positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub start: Position,
    pub end: Position,
}

/// One end of a feature location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub value: Option<Coordinate>,
}

impl Position {
    /// The residue number, if the position is numeric and known
    pub fn residue(&self) -> Option<u32> {
        match self.value {
            Some(Coordinate::Residue(n)) => Some(n),
            _ => None,
        }
    }

    /// True when the API reports the position as the "?" placeholder
    pub fn is_unknown(&self) -> bool {
        matches!(self.value, Some(Coordinate::Marker(ref m)) if m == "?") || self.value.is_none()
    }
}

/// A residue coordinate: either a 1-based number or a textual placeholder
/// such as "?" for experimentally undetermined positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Residue(u32),
    Marker(String),
}
