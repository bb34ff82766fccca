//! Fixed UniProtKB search queries
//!
//! Both searches are restricted to reviewed, non-fragment eukaryotic
//! proteins of at least 40 residues with protein-level existence evidence,
//! fetched 500 entries per page. Query parameters are pre-encoded.

/// Positive dataset: proteins with an experimentally verified signal peptide
pub const POSITIVE_SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search?format=json&query=%28%28fragment%3Afalse%29+AND+%28taxonomy_id%3A2759%29+AND+%28length%3A%5B40+TO+*%5D%29+AND+%28reviewed%3Atrue%29+AND+%28existence%3A1%29+AND+%28ft_signal_exp%3A*%29%29&size=500";

/// Negative dataset: proteins experimentally located in secretory
/// compartments (or membranes) but without any signal peptide annotation
pub const NEGATIVE_SEARCH_URL: &str = "https://rest.uniprot.org/uniprotkb/search?format=json&query=%28%28fragment%3Afalse%29+AND+%28reviewed%3Atrue%29+AND+%28existence%3A1%29+AND+%28taxonomy_id%3A2759%29+AND+%28length%3A%5B40+TO+*%5D%29+AND+%28%28cc_scl_term_exp%3ASL-0091%29+OR+%28cc_scl_term_exp%3ASL-0191%29+OR+%28cc_scl_term_exp%3ASL-0173%29+OR+%28cc_scl_term_exp%3ASL-0209%29+OR+%28cc_scl_term_exp%3ASL-0204%29+OR+%28cc_scl_term_exp%3ASL-0039%29%29+NOT+%28ft_signal%3A*%29%29&size=500";
