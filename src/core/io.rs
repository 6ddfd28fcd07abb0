//! Input abstraction layer
//!
//! Opens plain, gzip or bzip2 text files as a single `BufRead` and yields
//! decoded lines, so the parsers above never deal with file handles or
//! compression.

use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

/// Default buffer size for BufReader (128KB)
pub const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// Large buffer size for high-throughput I/O (1MB)
pub const LARGE_BUFFER_SIZE: usize = 1024 * 1024;

/// Threshold for using memory mapping on plain files (100MB)
pub const MMAP_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compression format of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// Plain text (uncompressed)
    Plain,
    /// Gzip or bgzip compressed (.gz)
    Gzip,
    /// Bzip2 compressed (.bz2)
    Bzip2,
}

fn format_from_magic(magic: &[u8]) -> CompressionFormat {
    if magic.starts_with(&[0x1f, 0x8b]) {
        CompressionFormat::Gzip
    } else if magic.starts_with(b"BZh") {
        CompressionFormat::Bzip2
    } else {
        CompressionFormat::Plain
    }
}

/// Detect compression format from file extension, then magic bytes
pub fn detect_compression<P: AsRef<Path>>(path: P) -> io::Result<CompressionFormat> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => return Ok(CompressionFormat::Gzip),
        Some("bz2") => return Ok(CompressionFormat::Bzip2),
        _ => {}
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let bytes_read = file.read(&mut magic)?;
    Ok(format_from_magic(&magic[..bytes_read]))
}

/// Plain-text reader over a read-only memory map
pub struct MappedReader {
    map: Mmap,
    offset: usize,
}

impl MappedReader {
    pub fn new(file: &File) -> io::Result<Self> {
        // SAFETY: inputs are opened read-only and not modified during a run
        let map = unsafe { Mmap::map(file)? };
        Ok(Self { map, offset: 0 })
    }

    fn rest(&self) -> &[u8] {
        &self.map[self.offset..]
    }
}

impl Read for MappedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = buf.len().min(self.rest().len());
        buf[..n].copy_from_slice(&self.rest()[..n]);
        self.offset += n;
        Ok(n)
    }
}

impl BufRead for MappedReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        Ok(self.rest())
    }

    fn consume(&mut self, amt: usize) {
        self.offset = (self.offset + amt).min(self.map.len());
    }
}

/// Uncompressed input: mapped above [`MMAP_THRESHOLD`], buffered below
pub enum SmartReader {
    Buffered(BufReader<File>),
    Mapped(MappedReader),
}

impl SmartReader {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path.as_ref())?;
        let size = file.metadata()?.len();

        let reader = match size {
            s if s >= MMAP_THRESHOLD => SmartReader::Mapped(MappedReader::new(&file)?),
            s if s > 10 * 1024 * 1024 => SmartReader::Buffered(BufReader::with_capacity(LARGE_BUFFER_SIZE, file)),
            _ => SmartReader::Buffered(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
        };
        Ok(reader)
    }

    pub fn is_mapped(&self) -> bool {
        matches!(self, SmartReader::Mapped(_))
    }

    fn inner(&mut self) -> &mut dyn BufRead {
        match self {
            SmartReader::Buffered(r) => r,
            SmartReader::Mapped(r) => r,
        }
    }
}

impl Read for SmartReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner().read(buf)
    }
}

impl BufRead for SmartReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner().fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner().consume(amt)
    }
}

/// Open a possibly-compressed text file
///
/// Gzip input is read with a multi-member decoder so bgzip files
/// (e.g. `clinvar.vcf.gz`) decode completely.
pub fn open_text<P: AsRef<Path>>(path: P) -> io::Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    match detect_compression(path)? {
        CompressionFormat::Gzip => {
            let decoder = flate2::read::MultiGzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Bzip2 => {
            let decoder = bzip2::read::BzDecoder::new(File::open(path)?);
            Ok(Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, decoder)))
        }
        CompressionFormat::Plain => Ok(Box::new(SmartReader::open(path)?)),
    }
}

/// Line iterator that reuses its buffers
///
/// Invalid UTF-8 is replaced rather than treated as an error.
pub struct LineIterator<R: BufRead> {
    reader: R,
    bytes: Vec<u8>,
    buffer: String,
}

impl<R: BufRead> LineIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            bytes: Vec::with_capacity(4096),
            buffer: String::with_capacity(4096),
        }
    }

    /// Read the next line without its terminator
    /// Returns None at EOF, Some(Ok(&str)) on success, Some(Err) on error
    pub fn next_line(&mut self) -> Option<io::Result<&str>> {
        self.bytes.clear();
        match self.reader.read_until(b'\n', &mut self.bytes) {
            Ok(0) => None,
            Ok(_) => {
                if self.bytes.last() == Some(&b'\n') {
                    self.bytes.pop();
                    if self.bytes.last() == Some(&b'\r') {
                        self.bytes.pop();
                    }
                }
                self.buffer.clear();
                self.buffer.push_str(&String::from_utf8_lossy(&self.bytes));
                Some(Ok(&self.buffer))
            }
            Err(e) => Some(Err(e)),
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
