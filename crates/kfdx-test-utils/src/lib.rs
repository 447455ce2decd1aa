//! Shared fixtures for kfdx tests.

use std::fs;
use std::path::{Path, PathBuf};

use kfdx_common::{Druggability, GeneSignatureEntry, Pathway, PhaseRelevance};

/// The curated gene signature shipped in `data/`.
pub const KFD_SIGNATURE_CSV: &str = include_str!("../../../data/gene_signature.csv");

/// Header of a gene-signature table.
pub const SIGNATURE_HEADER: &str = "Gene,Symbol,Pathway,Phase_Relevance,PubMed_Count,Druggability";

/// Build a single entry; `Gene` is derived from the symbol.
pub fn entry(
    symbol: &str,
    pathway: Pathway,
    phase_relevance: PhaseRelevance,
    pubmed_count: u64,
    druggability: Druggability,
) -> GeneSignatureEntry {
    GeneSignatureEntry {
        gene: format!("{symbol} gene"),
        symbol: symbol.to_string(),
        pathway,
        phase_relevance,
        pubmed_count,
        druggability,
    }
}

/// Parse the shipped signature without going through the ranker's loader.
pub fn kfd_signature() -> Vec<GeneSignatureEntry> {
    csv::Reader::from_reader(KFD_SIGNATURE_CSV.as_bytes())
        .deserialize()
        .collect::<Result<Vec<GeneSignatureEntry>, _>>()
        .expect("shipped gene signature must parse")
}

/// Render entries as a gene-signature CSV.
pub fn signature_csv(entries: &[GeneSignatureEntry]) -> String {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for e in entries {
        wtr.serialize(e).expect("serialize entry");
    }
    String::from_utf8(wtr.into_inner().expect("flush csv")).expect("utf8 csv")
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

/// A scratch directory holding the shipped signature as `gene_signature.csv`.
pub fn scratch_with_signature() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = write_file(dir.path(), "gene_signature.csv", KFD_SIGNATURE_CSV);
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_signature_parses() {
        let entries = kfd_signature();
        assert_eq!(entries.len(), 35);
        assert!(entries.iter().any(|e| e.symbol == "F3" && e.pubmed_count == 380));
        assert_eq!(entries.iter().map(|e| e.pubmed_count).max(), Some(1250));
    }

    #[test]
    fn test_signature_csv_has_header() {
        let csv = signature_csv(&kfd_signature()[..1]);
        assert_eq!(csv.lines().next(), Some(SIGNATURE_HEADER));
    }
}
