//! Gene-signature loading and ranked-table output.
//!
//! The loader validates every row before anything is scored: a missing
//! column, an out-of-enumeration category or a bad count aborts the load.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use kfdx_common::error::UnknownCategory;
use kfdx_common::{Druggability, GeneSignatureEntry, KfdxError, Pathway, PhaseRelevance, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::scorer::{validate_entries, RankedTarget};

/// Columns every gene-signature table must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Gene",
    "Symbol",
    "Pathway",
    "Phase_Relevance",
    "PubMed_Count",
    "Druggability",
];

/// Columns of the ranked-target table, in output order.
pub const RANKED_COLUMNS: [&str; 8] = [
    "Rank",
    "Gene",
    "Symbol",
    "Pathway",
    "Phase_Relevance",
    "PubMed_Count",
    "Druggability",
    "Composite_Score",
];

/// Positions of the required columns within a particular file's header.
struct ColumnIndex([usize; 6]);

impl ColumnIndex {
    fn resolve(headers: &StringRecord, table: &str) -> Result<Self> {
        let mut idx = [0usize; 6];
        for (slot, column) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| KfdxError::MissingColumn {
                    column: column.to_string(),
                    table: table.to_string(),
                })?;
        }
        Ok(Self(idx))
    }

    fn field<'r>(&self, record: &'r StringRecord, col: usize, line: u64) -> Result<&'r str> {
        let value = record.get(self.0[col]).unwrap_or("");
        if value.is_empty() {
            return Err(KfdxError::EmptyField {
                line,
                column: REQUIRED_COLUMNS[col],
            });
        }
        Ok(value)
    }
}

fn parse_row(index: &ColumnIndex, record: &StringRecord, line: u64) -> Result<GeneSignatureEntry> {
    let category = |source: UnknownCategory| KfdxError::InvalidCategory { line, source };

    let gene = index.field(record, 0, line)?.to_string();
    let symbol = index.field(record, 1, line)?.to_string();
    let pathway = index.field(record, 2, line)?.parse::<Pathway>().map_err(category)?;
    let phase_relevance = index
        .field(record, 3, line)?
        .parse::<PhaseRelevance>()
        .map_err(category)?;
    let raw_count = index.field(record, 4, line)?;
    let pubmed_count = raw_count.parse::<u64>().map_err(|_| KfdxError::InvalidCount {
        line,
        value: raw_count.to_string(),
    })?;
    let druggability = index
        .field(record, 5, line)?
        .parse::<Druggability>()
        .map_err(category)?;

    Ok(GeneSignatureEntry {
        gene,
        symbol,
        pathway,
        phase_relevance,
        pubmed_count,
        druggability,
    })
}

/// Read a gene-signature table from any reader. `table` names the source in
/// error messages.
pub fn read_gene_signature<R: Read>(reader: R, table: &str) -> Result<Vec<GeneSignatureEntry>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let index = ColumnIndex::resolve(reader.headers()?, table)?;

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        entries.push(parse_row(&index, &record, line)?);
    }

    validate_entries(&entries)?;
    debug!("Parsed {} gene-signature rows from {}", entries.len(), table);
    Ok(entries)
}

/// Load the gene-signature CSV at `path`.
pub fn load_gene_signature(path: &Path) -> Result<Vec<GeneSignatureEntry>> {
    let file = File::open(path)?;
    let entries = read_gene_signature(file, &path.display().to_string())?;
    info!("Loaded gene signature: {} targets from {:?}", entries.len(), path);
    Ok(entries)
}

/// One row of the ranked-target table. Downstream reporting reads exactly
/// these columns and must not recompute scores.
#[derive(Debug, Serialize)]
struct RankedRow<'a> {
    #[serde(rename = "Rank")]
    rank: usize,
    #[serde(rename = "Gene")]
    gene: &'a str,
    #[serde(rename = "Symbol")]
    symbol: &'a str,
    #[serde(rename = "Pathway")]
    pathway: &'a str,
    #[serde(rename = "Phase_Relevance")]
    phase_relevance: &'a str,
    #[serde(rename = "PubMed_Count")]
    pubmed_count: u64,
    #[serde(rename = "Druggability")]
    druggability: &'a str,
    #[serde(rename = "Composite_Score")]
    composite_score: f64,
}

impl<'a> From<&'a RankedTarget> for RankedRow<'a> {
    fn from(t: &'a RankedTarget) -> Self {
        Self {
            rank: t.rank,
            gene: &t.entry.gene,
            symbol: &t.entry.symbol,
            pathway: t.entry.pathway.as_str(),
            phase_relevance: t.entry.phase_relevance.as_str(),
            pubmed_count: t.entry.pubmed_count,
            druggability: t.entry.druggability.as_str(),
            composite_score: t.composite_score,
        }
    }
}

/// Write the ranked-target table, ordered by rank ascending.
pub fn write_ranked_targets<W: Write>(writer: W, targets: &[RankedTarget]) -> Result<()> {
    let mut sorted: Vec<&RankedTarget> = targets.iter().collect();
    sorted.sort_by_key(|t| t.rank);

    let mut wtr = WriterBuilder::new().from_writer(writer);
    for target in sorted {
        wtr.serialize(RankedRow::from(target))?;
    }
    wtr.flush()?;
    Ok(())
}
