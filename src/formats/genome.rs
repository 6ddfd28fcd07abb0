//! 23andMe-style raw genotype adapter
//!
//! ```text
//! # rsid	chromosome	position	genotype
//! rs548049170	1	69869	TT
//! rs13328684	1	74792	--
//! ```
//!
//! The header is either the comment line `# rsid ...` or the first
//! non-comment line `rsid,...`. The delimiter is a tab when the header
//! contains one, otherwise a comma.

use crate::core::error::{ReportError, Result};
use crate::core::genotype::{GenotypeMap, GenotypeSkip};
use crate::core::io::{open_text, LineIterator};
use crate::formats::clinvar::{spinner, PROGRESS_INTERVAL};
use indicatif::ProgressBar;
use log::{debug, info};
use std::io::BufRead;
use std::path::Path;

/// Column positions resolved from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenotypeColumns {
    pub rsid: usize,
    pub genotype: usize,
    pub chromosome: Option<usize>,
    pub position: Option<usize>,
    pub delimiter: u8,
}

fn normalize_header_name(name: &str) -> String {
    name.trim().trim_start_matches('#').trim().to_lowercase()
}

impl GenotypeColumns {
    /// Resolve columns from a header line
    ///
    /// `rsid` and `genotype` are required; names are matched
    /// case-insensitively and a leading `#` is ignored.
    pub fn from_header(header: &str) -> Result<Self> {
        let delimiter = if header.contains('\t') { b'\t' } else { b',' };
        let names: Vec<String> = header
            .split(delimiter as char)
            .map(normalize_header_name)
            .collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        Ok(Self {
            rsid: find("rsid").ok_or_else(|| ReportError::MissingColumn("rsid".to_string()))?,
            genotype: find("genotype").ok_or_else(|| ReportError::MissingColumn("genotype".to_string()))?,
            chromosome: find("chromosome"),
            position: find("position"),
            delimiter,
        })
    }
}

fn is_header_comment(line: &str) -> bool {
    normalize_header_name(line).starts_with("rsid")
}

/// Counters for one genotype-loading pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenotypeStats {
    /// Data rows seen
    pub rows: usize,
    /// Rows stored in the map
    pub stored: usize,
    pub no_calls: usize,
    pub unsupported_ids: usize,
    pub missing_fields: usize,
}

/// Find the header line, leaving `lines` positioned at the first data row
fn read_header<R: BufRead>(lines: &mut LineIterator<R>) -> Result<String> {
    while let Some(line) = lines.next_line() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if is_header_comment(line) {
                return Ok(line.to_string());
            }
            continue;
        }
        return Ok(line.to_string());
    }
    Err(ReportError::EmptyGenotypeSource)
}

/// Load genotypes from any line source
pub fn read_genotypes_from_reader<R: BufRead>(reader: R, show_progress: bool) -> Result<(GenotypeMap, GenotypeStats)> {
    let mut lines = LineIterator::new(reader);
    let header = read_header(&mut lines)?;
    let columns = GenotypeColumns::from_header(&header)?;
    debug!("genotype header: {:?}", columns);

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(columns.delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(lines.into_inner());

    let pb = if show_progress {
        spinner("Parsing genotype data")
    } else {
        ProgressBar::hidden()
    };

    let mut genotypes = GenotypeMap::new();
    let mut stats = GenotypeStats::default();

    for result in csv_reader.byte_records() {
        let record = result?;
        stats.rows += 1;
        if stats.rows % PROGRESS_INTERVAL == 0 {
            pb.set_message(format!("{} rows", stats.rows));
            pb.tick();
        }

        // invalid UTF-8 is replaced, matching the VCF path
        let field = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(String::from_utf8_lossy)
                .unwrap_or_default()
        };
        match genotypes.insert_raw(
            &field(Some(columns.rsid)),
            &field(Some(columns.genotype)),
            &field(columns.chromosome),
            &field(columns.position),
        ) {
            Ok(()) => stats.stored += 1,
            Err(GenotypeSkip::NoCall) => stats.no_calls += 1,
            Err(GenotypeSkip::UnsupportedId) => stats.unsupported_ids += 1,
            Err(GenotypeSkip::MissingField) => stats.missing_fields += 1,
        }
    }

    pb.finish_and_clear();
    info!(
        "loaded {} genotypes from {} rows ({} no-calls)",
        genotypes.len(),
        stats.rows,
        stats.no_calls
    );
    Ok((genotypes, stats))
}

/// Load genotypes from a plain, gzip or bzip2 file
pub fn read_genotypes_from_file<P: AsRef<Path>>(path: P, show_progress: bool) -> Result<(GenotypeMap, GenotypeStats)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.to_path_buf()));
    }
    read_genotypes_from_reader(open_text(path)?, show_progress)
}
