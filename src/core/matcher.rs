//! Genotype matching
//!
//! Decides whether a diploid genotype call carries a pathogenic ALT allele
//! and labels its zygosity relative to REF/ALT.
//!
//! [`genotype_matches`] is the gate. [`match_status`] is a display label
//! and may return `RefRef` or `Other` for inputs the gate rejects, so it
//! should only be computed for accepted pairs.

use crate::core::allele::{allele_tokens, is_snv_allele};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Zygosity of a call relative to REF/ALT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    #[serde(rename = "Ref/Ref")]
    RefRef,
    #[serde(rename = "Ref/Alt")]
    RefAlt,
    #[serde(rename = "Alt/Alt")]
    AltAlt,
    Other,
    Unknown,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::RefRef => "Ref/Ref",
            MatchStatus::RefAlt => "Ref/Alt",
            MatchStatus::AltAlt => "Alt/Alt",
            MatchStatus::Other => "Other",
            MatchStatus::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the two alleles of a diploid call
///
/// Only ASCII letters are kept (so `"A/G"` and `"ag"` both yield
/// `('A', 'G')`). Any count other than two is rejected.
pub fn diploid_alleles(genotype: &str) -> Option<(char, char)> {
    let mut letters = genotype
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());

    let a1 = letters.next()?;
    let a2 = letters.next()?;
    if letters.next().is_some() {
        return None;
    }
    Some((a1, a2))
}

fn single_base(allele: &str) -> Option<char> {
    if is_snv_allele(allele) {
        allele.chars().next()
    } else {
        None
    }
}

/// Gate: does `genotype` carry at least one ALT allele?
///
/// Fails closed on empty inputs, an invalid REF, no valid single-base
/// ALT, or a call that is not exactly two letters. Accepts only when both
/// alleles are in `{REF} ∪ ALT` and at least one is in ALT, so
/// homozygous-reference calls are always rejected.
///
/// # Examples
/// ```
/// use clinvar_report::core::matcher::genotype_matches;
///
/// assert!(genotype_matches("AG", "A", "G"));
/// assert!(genotype_matches("GG", "A", "G"));
/// assert!(!genotype_matches("AA", "A", "G"));
/// assert!(!genotype_matches("AT", "A", "G"));
/// ```
pub fn genotype_matches(genotype: &str, ref_allele: &str, alt: &str) -> bool {
    if genotype.is_empty() || ref_allele.trim().is_empty() || alt.trim().is_empty() {
        return false;
    }

    let ref_norm = ref_allele.trim().to_ascii_uppercase();
    let ref_base = match single_base(&ref_norm) {
        Some(b) => b,
        None => return false,
    };

    let alt_set: HashSet<char> = allele_tokens(alt)
        .iter()
        .filter_map(|a| single_base(a))
        .collect();
    if alt_set.is_empty() {
        return false;
    }

    let (a1, a2) = match diploid_alleles(genotype) {
        Some(pair) => pair,
        None => return false,
    };

    let is_valid = |a: char| a == ref_base || alt_set.contains(&a);
    let both_valid = is_valid(a1) && is_valid(a2);
    let any_alt = alt_set.contains(&a1) || alt_set.contains(&a2);

    both_valid && any_alt
}

/// Label the zygosity of `genotype` against a normalized REF and
/// comma-joined ALT
///
/// # Examples
/// ```
/// use clinvar_report::core::matcher::{match_status, MatchStatus};
///
/// assert_eq!(match_status("AG", "A", "G"), MatchStatus::RefAlt);
/// assert_eq!(match_status("GG", "A", "G"), MatchStatus::AltAlt);
/// assert_eq!(match_status("A", "A", "G"), MatchStatus::Unknown);
/// ```
pub fn match_status(genotype: &str, ref_allele: &str, alt_csv: &str) -> MatchStatus {
    if genotype.is_empty() || ref_allele.is_empty() || alt_csv.is_empty() {
        return MatchStatus::Unknown;
    }

    let (a1, a2) = match diploid_alleles(genotype) {
        Some(pair) => pair,
        None => return MatchStatus::Unknown,
    };

    let in_alt = |a: char| alt_csv.split(',').any(|alt| alt.len() == 1 && alt.starts_with(a));
    let is_ref = |a: char| ref_allele.len() == 1 && ref_allele.starts_with(a);

    if in_alt(a1) && in_alt(a2) {
        MatchStatus::AltAlt
    } else if (in_alt(a1) && is_ref(a2)) || (in_alt(a2) && is_ref(a1)) {
        MatchStatus::RefAlt
    } else if is_ref(a1) && is_ref(a2) {
        MatchStatus::RefRef
    } else {
        MatchStatus::Other
    }
}
