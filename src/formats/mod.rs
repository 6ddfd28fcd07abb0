//! File format adapters
//!
//! Adapters for the ClinVar VCF, 23andMe raw genotype files, the compact
//! JSON index and the HTML report.

pub mod clinvar;
pub mod genome;
pub mod html;
pub mod json;

pub use clinvar::{build_index_from_file, build_index_from_reader};
pub use genome::{read_genotypes_from_file, read_genotypes_from_reader, GenotypeColumns, GenotypeStats};
pub use html::{escape_html, render_report, write_report};
pub use json::{read_index, read_index_file, write_findings_file, write_index, write_index_file};
