//! Compact JSON persistence for the variant index
//!
//! ```text
//! {"rs123":{"g":"BRCA1","d":"Hereditary cancer","c":"17","p":"43045712",
//!           "r":"A","a":"G","s":"5","v":"55407","al":"","h":"","rv":"","mc":"","o":"unknown"}}
//! ```

use crate::core::error::{ReportError, Result};
use crate::core::finding::Finding;
use crate::core::index::VariantIndex;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Serialize an index without whitespace
pub fn write_index<W: Write>(writer: W, index: &VariantIndex) -> Result<()> {
    serde_json::to_writer(writer, index)?;
    Ok(())
}

/// Write an index to `path`, returning the file size in bytes
pub fn write_index_file<P: AsRef<Path>>(path: P, index: &VariantIndex) -> Result<u64> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_index(&mut writer, index)?;
    writer.flush()?;
    drop(writer);
    Ok(std::fs::metadata(path)?.len())
}

/// Load an index previously written by [`write_index`]
pub fn read_index<R: Read>(reader: R) -> Result<VariantIndex> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_index_file<P: AsRef<Path>>(path: P) -> Result<VariantIndex> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReportError::FileNotFound(path.to_path_buf()));
    }
    read_index(BufReader::new(File::open(path)?))
}

/// Write findings as a pretty-printed JSON array
pub fn write_findings_file<P: AsRef<Path>>(path: P, findings: &[Finding]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer_pretty(&mut writer, findings)?;
    writer.flush()?;
    Ok(())
}
