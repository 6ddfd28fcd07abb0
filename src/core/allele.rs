//! REF/ALT allele normalization
//!
//! Reduces raw REF/ALT text to a single-nucleotide REF and a sorted,
//! deduplicated set of single-nucleotide ALTs. Multi-base alleles,
//! symbolic alleles (`<DEL>`) and IUPAC ambiguity codes do not survive.

use std::collections::BTreeSet;

/// Check if a byte is one of the four unambiguous uppercase bases
#[inline]
pub fn is_snv_base(base: u8) -> bool {
    matches!(base, b'A' | b'C' | b'G' | b'T')
}

/// Check if a token is exactly one unambiguous uppercase base
///
/// # Examples
/// ```
/// use clinvar_report::core::allele::is_snv_allele;
///
/// assert!(is_snv_allele("A"));
/// assert!(!is_snv_allele("a"));
/// assert!(!is_snv_allele("AG"));
/// assert!(!is_snv_allele("N"));
/// ```
#[inline]
pub fn is_snv_allele(token: &str) -> bool {
    token.len() == 1 && is_snv_base(token.as_bytes()[0])
}

#[inline]
fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | '/' | ';' | '|') || c.is_whitespace()
}

/// Split an allele field on runs of `,/;|` or whitespace, uppercased
///
/// Empty tokens are dropped.
pub fn allele_tokens(raw: &str) -> Vec<String> {
    raw.split(is_delimiter)
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_uppercase())
        .collect()
}

/// Successfully normalized REF/ALT pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAlleles {
    ref_allele: String,
    alt_alleles: Vec<String>,
}

impl NormalizedAlleles {
    /// Single-base REF
    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    /// Sorted, deduplicated single-base ALTs (never empty)
    pub fn alt_alleles(&self) -> &[String] {
        &self.alt_alleles
    }

    /// ALTs joined with `,`
    pub fn alt_csv(&self) -> String {
        self.alt_alleles.join(",")
    }

    pub fn into_parts(self) -> (String, String) {
        let alt = self.alt_csv();
        (self.ref_allele, alt)
    }
}

/// Outcome of [`normalize_alleles`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlleleNormalization {
    /// REF and at least one ALT are valid
    Valid(NormalizedAlleles),
    /// REF is valid but no ALT survived filtering
    MissingAlt { ref_allele: String },
    /// REF is missing or not a single base
    InvalidRef,
}

impl AlleleNormalization {
    /// Canonical REF, if it was valid
    pub fn ref_allele(&self) -> Option<&str> {
        match self {
            AlleleNormalization::Valid(n) => Some(n.ref_allele()),
            AlleleNormalization::MissingAlt { ref_allele } => Some(ref_allele),
            AlleleNormalization::InvalidRef => None,
        }
    }

    /// Canonical comma-joined ALT, if normalization fully succeeded
    pub fn alt_csv(&self) -> Option<String> {
        match self {
            AlleleNormalization::Valid(n) => Some(n.alt_csv()),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, AlleleNormalization::Valid(_))
    }

    pub fn into_valid(self) -> Option<NormalizedAlleles> {
        match self {
            AlleleNormalization::Valid(n) => Some(n),
            _ => None,
        }
    }
}

/// Normalize raw REF/ALT values
///
/// When REF holds two or more tokens and ALT holds none (e.g. REF `"C/A"`
/// with an empty ALT), the first REF token is taken as REF and the rest
/// as ALT candidates.
///
/// # Examples
/// ```
/// use clinvar_report::core::allele::normalize_alleles;
///
/// let n = normalize_alleles(Some("C/A"), Some(""));
/// assert_eq!(n.ref_allele(), Some("C"));
/// assert_eq!(n.alt_csv().as_deref(), Some("A"));
///
/// let n = normalize_alleles(Some("a"), Some("g,c,c"));
/// assert_eq!(n.alt_csv().as_deref(), Some("C,G"));
/// ```
pub fn normalize_alleles(ref_raw: Option<&str>, alt_raw: Option<&str>) -> AlleleNormalization {
    let mut ref_parts = ref_raw.map(allele_tokens).unwrap_or_default();
    let mut alt_parts = alt_raw.map(allele_tokens).unwrap_or_default();

    if ref_parts.len() >= 2 && alt_parts.is_empty() {
        alt_parts = ref_parts.split_off(1);
    }

    let ref_allele = match ref_parts.into_iter().next() {
        Some(r) if is_snv_allele(&r) => r,
        _ => return AlleleNormalization::InvalidRef,
    };

    let alts: BTreeSet<String> = alt_parts.into_iter().filter(|a| is_snv_allele(a)).collect();
    if alts.is_empty() {
        return AlleleNormalization::MissingAlt { ref_allele };
    }

    AlleleNormalization::Valid(NormalizedAlleles {
        ref_allele,
        alt_alleles: alts.into_iter().collect(),
    })
}
