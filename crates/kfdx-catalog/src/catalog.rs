//! The authored compound catalog and its consistency check.

use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use csv::WriterBuilder;
use kfdx_common::{CompoundRecord, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Columns of the compound table, in output order.
pub const COMPOUND_COLUMNS: [&str; 6] = ["Drug", "Target", "Related_Gene", "pChEMBL", "Phase", "Evidence"];

/// Development-phase marker carried by every authored record.
pub const APPROVED_PHASE: u8 = 4;

/// (Drug, Target, Related_Gene, pChEMBL, Evidence), in authoring order.
const AUTHORED: [(&str, &str, &str, f64, &str); 25] = [
    // Endothelial stabilisation
    ("Atorvastatin",         "Endothelium",    "ANGPT2", 8.5, "Vascular protection"),
    ("Simvastatin",          "HMGCR",          "ANGPT2", 8.3, "Endothelial benefit"),
    ("Bosentan",             "EDNRA/B",        "EDN1",   8.8, "Endothelin antagonist"),
    // Cytokine modulation
    ("Tocilizumab",          "IL6R",           "IL6",    9.0, "IL-6R blockade"),
    ("Anakinra",             "IL1R1",          "IL1B",   8.5, "IL-1 receptor antagonist"),
    ("Etanercept",           "TNF",            "TNF",    9.1, "TNF inhibitor"),
    ("Pentoxifylline",       "PDE/TNF",        "TNF",    6.2, "TNF reduction"),
    ("Dexamethasone",        "GR",             "IL6",    8.0, "Anti-inflammatory"),
    // Coagulation
    ("Tranexamic acid",      "Plasmin",        "PLAT",   6.5, "Antifibrinolytic"),
    ("Fresh frozen plasma",  "Coag factors",   "F2",     0.0, "Replacement"),
    ("Vitamin K",            "VKORC1",         "F2",     5.0, "Coagulation support"),
    // Platelet support
    ("Platelet transfusion", "Platelets",      "ITGA2B", 0.0, "Standard care"),
    ("Eltrombopag",          "THPO",           "ITGA2B", 8.5, "TPO agonist"),
    ("Romiplostim",          "THPO",           "ITGA2B", 9.0, "TPO agonist"),
    // Antiviral
    ("Ribavirin",            "RNA polymerase", "IFNA1",  6.0, "Broad antiviral"),
    ("Interferon-alpha",     "IFNAR",          "IFNA1",  8.0, "Antiviral cytokine"),
    ("Favipiravir",          "RdRp",           "IFNA1",  6.5, "Broad antiviral"),
    // Neuroprotection
    ("Erythropoietin",       "EPOR",           "EPO",    9.5, "Neuroprotection"),
    ("Mannitol",             "Osmotic",        "AQP4",   4.5, "Cerebral edema"),
    // Antioxidant
    ("N-Acetylcysteine",     "GSH",            "HMOX1",  5.5, "Antioxidant"),
    ("Vitamin C",            "Antioxidant",    "SOD2",   4.0, "Antioxidant"),
    // Supportive
    ("IV fluids",            "Volume",         "VWF",    0.0, "Supportive care"),
    ("Antipyretics",         "COX",            "TNF",    5.5, "Fever control"),
    // Investigational
    ("Baricitinib",          "JAK1/2",         "STAT1",  8.5, "JAK inhibitor"),
    ("Ruxolitinib",          "JAK1/2",         "STAT1",  9.0, "JAK inhibitor"),
];

/// A compound whose related gene is absent from the ranked target set.
/// Reported to the operator; never fails a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAdvisory {
    pub drug: String,
    pub related_gene: String,
}

impl fmt::Display for CatalogAdvisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compound '{}' references gene '{}' which is not in the target ranking",
            self.drug, self.related_gene
        )
    }
}

/// The curated compound list.
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundCatalog {
    records: Vec<CompoundRecord>,
}

impl CompoundCatalog {
    /// The authored catalog, in authoring order.
    pub fn authored() -> Self {
        let records = AUTHORED
            .iter()
            .map(|&(drug, target, related_gene, pchembl, evidence)| CompoundRecord {
                drug: drug.to_string(),
                target: target.to_string(),
                related_gene: related_gene.to_string(),
                pchembl,
                phase: APPROVED_PHASE,
                evidence: evidence.to_string(),
            })
            .collect();
        Self { records }
    }

    pub fn records(&self) -> &[CompoundRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cross-check each record's `Related_Gene` against the ranked symbols.
    pub fn check_related_genes<'a, I>(&self, symbols: I) -> Vec<CatalogAdvisory>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let known: HashSet<&str> = symbols.into_iter().collect();
        let advisories: Vec<CatalogAdvisory> = self
            .records
            .iter()
            .filter(|r| !known.contains(r.related_gene.as_str()))
            .map(|r| CatalogAdvisory {
                drug: r.drug.clone(),
                related_gene: r.related_gene.clone(),
            })
            .collect();

        for advisory in &advisories {
            warn!("{}", advisory);
        }
        if advisories.is_empty() {
            info!("All {} compounds reference ranked targets", self.records.len());
        }
        advisories
    }

    /// Write the catalog table in authoring order.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        for record in &self.records {
            wtr.serialize(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_authored_count_and_unique_drugs() {
        let catalog = CompoundCatalog::authored();
        assert_eq!(catalog.len(), 25);
        let drugs: HashSet<&str> = catalog.records().iter().map(|r| r.drug.as_str()).collect();
        assert_eq!(drugs.len(), catalog.len(), "drug names must be unique");
        assert!(catalog.records().iter().all(|r| r.phase == APPROVED_PHASE));
    }

    #[test]
    fn test_authoring_order_is_preserved() {
        let catalog = CompoundCatalog::authored();
        assert_eq!(catalog.records().first().unwrap().drug, "Atorvastatin");
        assert_eq!(catalog.records().last().unwrap().drug, "Ruxolitinib");
    }

    #[test]
    fn test_non_pharmacological_entries_have_no_potency() {
        let catalog = CompoundCatalog::authored();
        let without: Vec<&str> = catalog
            .records()
            .iter()
            .filter(|r| !r.has_potency())
            .map(|r| r.drug.as_str())
            .collect();
        assert_eq!(without, vec!["Fresh frozen plasma", "Platelet transfusion", "IV fluids"]);
    }

    #[test]
    fn test_missing_related_gene_is_advisory() {
        let catalog = CompoundCatalog::authored();
        let symbols = ["ANGPT2", "EDN1", "IL6", "IL1B", "TNF", "PLAT", "F2", "ITGA2B", "IFNA1",
                       "EPO", "AQP4", "HMOX1", "SOD2", "VWF"];
        let advisories = catalog.check_related_genes(symbols);
        assert_eq!(
            advisories,
            vec![
                CatalogAdvisory { drug: "Baricitinib".into(), related_gene: "STAT1".into() },
                CatalogAdvisory { drug: "Ruxolitinib".into(), related_gene: "STAT1".into() },
            ]
        );
        assert!(advisories[0].to_string().contains("STAT1"));
    }

    #[test]
    fn test_csv_is_stable_across_builds() {
        let render = || {
            let mut out = Vec::new();
            CompoundCatalog::authored().write_csv(&mut out).unwrap();
            String::from_utf8(out).unwrap()
        };
        let first = render();
        assert_eq!(first, render());
        assert_eq!(first.lines().next().unwrap(), COMPOUND_COLUMNS.join(","));
        assert_eq!(first.lines().count(), 26);
        assert!(first.contains("Tocilizumab,IL6R,IL6,9.0,4,IL-6R blockade"));
    }
}
