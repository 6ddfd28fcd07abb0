//! Clinical significance classification
//!
//! Maps free-text `CLNSIG` annotations onto the two retained severity
//! classes. Anything else is excluded and the owning line is dropped.
//!
//! Exclusion terms are matched as substrings anywhere in the text, so a
//! value mentioning e.g. "benign" in any position is excluded even when it
//! also reads as pathogenic.

use serde::{Deserialize, Serialize};

/// Substrings that veto classification
const EXCLUDE_TERMS: [&str; 9] = [
    "conflicting",
    "uncertain",
    "benign",
    "not provided",
    "no classification",
    "association",
    "protective",
    "affects",
    "confers sensitivity",
];

/// Combined spellings that still count as pathogenic despite "likely"
const COMBINED_PATHOGENIC: [&str; 2] = ["pathogenic/likely pathogenic", "pathogenic|likely pathogenic"];

/// Retained severity class
///
/// Ordered by rank so that `Pathogenic > LikelyPathogenic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Significance {
    /// Rank 4
    #[serde(rename = "4")]
    LikelyPathogenic,
    /// Rank 5
    #[serde(rename = "5")]
    Pathogenic,
}

impl Significance {
    /// Numeric rank (5 or 4)
    pub fn rank(&self) -> u8 {
        match self {
            Significance::Pathogenic => 5,
            Significance::LikelyPathogenic => 4,
        }
    }

    /// Compact class code used in the serialized index
    pub fn code(&self) -> &'static str {
        match self {
            Significance::Pathogenic => "5",
            Significance::LikelyPathogenic => "4",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Significance::Pathogenic => "Pathogenic",
            Significance::LikelyPathogenic => "Likely pathogenic",
        }
    }
}

impl std::fmt::Display for Significance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a raw `CLNSIG` value
///
/// Returns `None` for empty input, for any text containing an exclusion
/// term, and for text that matches none of the pathogenic rules.
///
/// # Examples
/// ```
/// use clinvar_report::core::significance::{classify_significance, Significance};
///
/// assert_eq!(classify_significance("Pathogenic"), Some(Significance::Pathogenic));
/// assert_eq!(classify_significance("Likely_pathogenic"), Some(Significance::LikelyPathogenic));
/// assert_eq!(classify_significance("Uncertain_significance"), None);
/// ```
pub fn classify_significance(raw: &str) -> Option<Significance> {
    if raw.is_empty() {
        return None;
    }

    let text = raw.to_lowercase().replace('_', " ");

    if EXCLUDE_TERMS.iter().any(|term| text.contains(term)) {
        return None;
    }

    // a bare "pathogenic ... likely" that is not a combined prefix falls through
    if text.starts_with("pathogenic")
        && (!text.contains("likely") || COMBINED_PATHOGENIC.iter().any(|p| text.starts_with(p)))
    {
        return Some(Significance::Pathogenic);
    }

    if text.starts_with("likely pathogenic") {
        return Some(Significance::LikelyPathogenic);
    }

    if let Some((first, _)) = text.split_once('|') {
        match first.trim() {
            "pathogenic" => return Some(Significance::Pathogenic),
            "likely pathogenic" => return Some(Significance::LikelyPathogenic),
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_classes() {
        assert_eq!(classify_significance("Pathogenic"), Some(Significance::Pathogenic));
        assert_eq!(classify_significance("Likely_pathogenic"), Some(Significance::LikelyPathogenic));
        assert_eq!(classify_significance("likely pathogenic"), Some(Significance::LikelyPathogenic));
    }

    #[test]
    fn test_combined_prefixes() {
        assert_eq!(
            classify_significance("Pathogenic/Likely_pathogenic"),
            Some(Significance::Pathogenic)
        );
        assert_eq!(
            classify_significance("Pathogenic|Likely_pathogenic"),
            Some(Significance::Pathogenic)
        );
    }

    #[test]
    fn test_comma_combined_falls_through() {
        assert_eq!(classify_significance("Pathogenic,_Likely_pathogenic"), None);
    }

    #[test]
    fn test_likely_after_pipe_prefix_rule() {
        // starts with "pathogenic", contains "likely", not a combined prefix;
        // the pipe rule still rescues it
        assert_eq!(
            classify_significance("Pathogenic|risk_factor,_likely"),
            Some(Significance::Pathogenic)
        );
    }

    #[test]
    fn test_exclusions() {
        assert_eq!(classify_significance(""), None);
        assert_eq!(classify_significance("Uncertain_significance"), None);
        assert_eq!(classify_significance("Conflicting_classifications_of_pathogenicity"), None);
        assert_eq!(classify_significance("Benign/Likely_benign"), None);
        assert_eq!(classify_significance("not_provided"), None);
        assert_eq!(classify_significance("Pathogenic|association"), None);
        assert_eq!(classify_significance("Pathogenic/Likely_pathogenic|protective"), None);
        assert_eq!(classify_significance("drug_response"), None);
        assert_eq!(classify_significance("Affects"), None);
        assert_eq!(classify_significance("confers_sensitivity"), None);
    }

    #[test]
    fn test_pipe_prefix() {
        assert_eq!(classify_significance("Pathogenic|other"), Some(Significance::Pathogenic));
        assert_eq!(
            classify_significance("risk_factor|Pathogenic"),
            None
        );
        assert_eq!(
            classify_significance("likely_pathogenic|drug_response"),
            Some(Significance::LikelyPathogenic)
        );
    }

    #[test]
    fn test_pathogenic_low_penetrance() {
        assert_eq!(
            classify_significance("Pathogenic,_low_penetrance"),
            Some(Significance::Pathogenic)
        );
    }

    #[test]
    fn test_rank_ordering() {
        assert!(Significance::Pathogenic > Significance::LikelyPathogenic);
        assert_eq!(Significance::Pathogenic.rank(), 5);
        assert_eq!(Significance::LikelyPathogenic.code(), "4");
        assert_eq!(Significance::LikelyPathogenic.to_string(), "Likely pathogenic");
    }
}
