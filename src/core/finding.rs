//! Joining personal genotypes with the variant index

use crate::core::genotype::{GenotypeMap, UserGenotype};
use crate::core::index::{VariantIndex, VariantRecord};
use crate::core::matcher::{genotype_matches, match_status, MatchStatus};
use crate::core::significance::Significance;
use serde::Serialize;

/// A genotype call that carries a pathogenic or likely pathogenic allele
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rsid: String,
    pub user_genotype: String,
    pub chromosome: String,
    pub position: String,
    pub gene: String,
    pub disease: String,
    pub significance: Significance,
    #[serde(rename = "ref")]
    pub ref_allele: String,
    pub alt: String,
    #[serde(rename = "match")]
    pub match_status: MatchStatus,
    pub variation_id: String,
    pub allele_id: String,
    pub hgvs: String,
    pub review_status: String,
    pub molecular_consequence: String,
    pub origin: String,
}

fn prefer_user(user: &str, record: &str) -> String {
    if user.is_empty() {
        record.to_string()
    } else {
        user.to_string()
    }
}

impl Finding {
    /// Build a finding for an accepted pair
    ///
    /// The user's chromosome and position take precedence; the record's
    /// values fill in when the user's are empty.
    pub fn new(rsid: &str, call: &UserGenotype, record: &VariantRecord) -> Self {
        Self {
            rsid: rsid.to_string(),
            user_genotype: call.genotype.clone(),
            chromosome: prefer_user(&call.chromosome, &record.chromosome),
            position: prefer_user(&call.position, &record.position),
            gene: record.gene.clone(),
            disease: record.disease.clone(),
            significance: record.significance,
            ref_allele: record.ref_allele.clone(),
            alt: record.alt.clone(),
            match_status: match_status(&call.genotype, &record.ref_allele, &record.alt),
            variation_id: record.variation_id.clone(),
            allele_id: record.allele_id.clone(),
            hgvs: record.hgvs.clone(),
            review_status: record.review_status.clone(),
            molecular_consequence: record.molecular_consequence.clone(),
            origin: record.origin.clone(),
        }
    }
}

/// Match every call against the index
///
/// Findings follow the genotype map's iteration order. Calls whose rsID
/// is not indexed, or that fail [`genotype_matches`], produce nothing.
pub fn collect_findings(genotypes: &GenotypeMap, index: &VariantIndex) -> Vec<Finding> {
    collect_findings_with(genotypes, index, |_| {})
}

/// Like [`collect_findings`], invoking `on_progress` after each call
pub fn collect_findings_with<F>(genotypes: &GenotypeMap, index: &VariantIndex, mut on_progress: F) -> Vec<Finding>
where
    F: FnMut(usize),
{
    let mut findings = Vec::new();

    for (processed, (rsid, call)) in genotypes.iter().enumerate() {
        if let Some(record) = index.get(rsid) {
            if genotype_matches(&call.genotype, &record.ref_allele, &record.alt) {
                findings.push(Finding::new(rsid, call, record));
            }
        }
        on_progress(processed + 1);
    }

    findings
}

/// Findings of one significance class, sorted by disease for display
#[derive(Debug, Clone)]
pub struct FindingGroup<'a> {
    pub significance: Significance,
    pub findings: Vec<&'a Finding>,
}

/// Group findings by significance (highest rank first), each group
/// sorted by disease name
///
/// Empty groups are omitted. The sort is stable, so findings with the same
/// disease keep their input order.
pub fn group_for_display(findings: &[Finding]) -> Vec<FindingGroup<'_>> {
    [Significance::Pathogenic, Significance::LikelyPathogenic]
        .into_iter()
        .filter_map(|significance| {
            let mut group: Vec<&Finding> =
                findings.iter().filter(|f| f.significance == significance).collect();
            if group.is_empty() {
                return None;
            }
            group.sort_by(|a, b| a.disease.cmp(&b.disease));
            Some(FindingGroup { significance, findings: group })
        })
        .collect()
}

/// Per-class counts for report headers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FindingSummary {
    pub pathogenic: usize,
    pub likely_pathogenic: usize,
}

impl FindingSummary {
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut acc, f| {
            match f.significance {
                Significance::Pathogenic => acc.pathogenic += 1,
                Significance::LikelyPathogenic => acc.likely_pathogenic += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.pathogenic + self.likely_pathogenic
    }
}
