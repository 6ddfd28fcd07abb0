//! ClinVar VCF adapter
//!
//! Streams an annotation file line by line into a
//! [`VariantIndexBuilder`]. Memory use follows the size of the index, not
//! the input.

use crate::core::error::{ReportError, Result};
use crate::core::index::{IndexStats, VariantIndex, VariantIndexBuilder};
use crate::core::io::{open_text, LineIterator};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use std::io::BufRead;
use std::path::Path;

/// Lines between progress updates
pub(crate) const PROGRESS_INTERVAL: usize = 10_000;

pub(crate) fn spinner(prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix(prefix.to_string());
    pb
}

/// Build an index from any line source
///
/// A read error aborts the pass; malformed or excluded lines never do.
pub fn build_index_from_reader<R: BufRead>(reader: R, show_progress: bool) -> Result<(VariantIndex, IndexStats)> {
    let pb = if show_progress {
        spinner("Indexing ClinVar VCF")
    } else {
        ProgressBar::hidden()
    };

    let mut builder = VariantIndexBuilder::new();
    let mut lines = LineIterator::new(reader);
    let mut seen = 0usize;

    while let Some(line) = lines.next_line() {
        builder.push_line(line?);
        seen += 1;
        if seen % PROGRESS_INTERVAL == 0 {
            pb.set_message(format!("{} lines, {} rsIDs", seen, builder.len()));
            pb.tick();
        }
    }

    pb.finish_and_clear();
    let (index, stats) = builder.finish();
    info!(
        "indexed {} rsIDs from {} data lines ({} skipped)",
        index.len(),
        stats.total,
        stats.skipped()
    );
    Ok((index, stats))
}

/// Build an index from a plain, gzip or bzip2 VCF file
pub fn build_index_from_file<P: AsRef<Path>>(path: P, show_progress: bool) -> Result<(VariantIndex, IndexStats)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.to_path_buf()));
    }
    let reader = open_text(path)?;
    build_index_from_reader(reader, show_progress)
}
