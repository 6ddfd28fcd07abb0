//! Error types for clinvar-report
//!
//! Only resource-level failures are errors. Per-line anomalies in the
//! annotation or genotype sources are counted and skipped, never raised.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clinvar-report operations
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Genotype source header lacks a required column
    #[error("Genotype file is missing required column: {0}")]
    MissingColumn(String),

    /// Genotype source has no header or data rows
    #[error("Genotype file is empty or contains only comments")]
    EmptyGenotypeSource,

    /// Delimited row could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON index could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for clinvar-report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Why a single annotation line did not reach the index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Header or comment line
    Comment,
    /// Fewer than 8 tab-separated fields
    Malformed,
    /// No usable `RS` value
    MissingRsid,
    /// `CLNSIG` is not pathogenic or likely pathogenic
    ExcludedSignificance,
    /// REF/ALT could not be reduced to single nucleotides
    InvalidAlleles,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Comment => "comment",
            SkipReason::Malformed => "malformed",
            SkipReason::MissingRsid => "missing rsID",
            SkipReason::ExcludedSignificance => "excluded significance",
            SkipReason::InvalidAlleles => "invalid alleles",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
