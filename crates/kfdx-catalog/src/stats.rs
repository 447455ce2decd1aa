//! Catalog breakdowns consumed by the reporting side.

use std::collections::BTreeMap;

use crate::catalog::CompoundCatalog;

/// Number of compounds per evidence label, most frequent first; ties by label.
pub fn evidence_breakdown(catalog: &CompoundCatalog) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in catalog.records() {
        *counts.entry(r.evidence.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, n)| (label.to_string(), n))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

/// Best pChEMBL per related gene, highest first. Records without a potency
/// value (pChEMBL 0) are skipped.
pub fn max_potency_by_gene(catalog: &CompoundCatalog) -> Vec<(String, f64)> {
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();
    for r in catalog.records().iter().filter(|r| r.has_potency()) {
        best.entry(r.related_gene.as_str())
            .and_modify(|p| *p = p.max(r.pchembl))
            .or_insert(r.pchembl);
    }
    let mut out: Vec<(String, f64)> = best
        .into_iter()
        .map(|(gene, p)| (gene.to_string(), p))
        .collect();
    out.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}
