//! Core annotation and matching functionality
//!
//! This module contains the INFO parser, significance classifier,
//! allele normalizer, variant index and genotype matcher.

pub mod allele;
pub mod error;
pub mod finding;
pub mod genotype;
pub mod index;
pub mod info;
pub mod io;
pub mod matcher;
pub mod record;
pub mod significance;

pub use allele::{allele_tokens, is_snv_allele, is_snv_base, normalize_alleles, AlleleNormalization, NormalizedAlleles};
pub use error::{ReportError, Result, SkipReason};
pub use finding::{collect_findings, collect_findings_with, group_for_display, Finding, FindingGroup, FindingSummary};
pub use genotype::{is_accepted_identifier, is_no_call, GenotypeMap, GenotypeSkip, UserGenotype, NO_CALLS};
pub use index::{
    decode_origin, parse_annotation_line, parse_rsids, IndexStats, LineOutcome, VariantIndex,
    VariantIndexBuilder, VariantRecord, UNKNOWN,
};
pub use info::{parse_info, InfoMap, InfoValue};
pub use io::{
    detect_compression, open_text, CompressionFormat, LineIterator, SmartReader,
    DEFAULT_BUFFER_SIZE, LARGE_BUFFER_SIZE, MMAP_THRESHOLD,
};
pub use matcher::{diploid_alleles, genotype_matches, match_status, MatchStatus};
pub use record::{VcfLineError, VcfLineView, MIN_VCF_FIELDS};
pub use significance::{classify_significance, Significance};
