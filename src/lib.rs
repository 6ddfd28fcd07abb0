//! clinvar-report - ClinVar annotation index and personal genotype matching
//!
//! Builds an rsID-keyed index of pathogenic and likely pathogenic
//! single-nucleotide variants from a ClinVar VCF, then intersects it with a
//! 23andMe-style raw genotype file to report carried risk alleles.
//!
//! # Features
//!
//! - Streaming VCF parsing with zero-copy field views
//! - Plain, gzip/bgzip and bzip2 inputs
//! - Compact JSON index for repeated runs
//! - Self-contained HTML report
//!
//! # Example
//!
//! ```ignore
//! use clinvar_report::{collect_findings, formats};
//!
//! let (index, _stats) = formats::build_index_from_file("clinvar.vcf.gz", false)?;
//! let (genotypes, _) = formats::read_genotypes_from_file("genome.txt", false)?;
//!
//! for finding in collect_findings(&genotypes, &index) {
//!     println!("{} {} {}", finding.rsid, finding.gene, finding.match_status);
//! }
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use crate::core::{
    classify_significance, collect_findings, genotype_matches, match_status, normalize_alleles,
    parse_info, Finding, GenotypeMap, IndexStats, MatchStatus, ReportError, Result, Significance,
    UserGenotype, VariantIndex, VariantIndexBuilder, VariantRecord,
};
pub use crate::formats::{clinvar, genome, html, json};
