//! Zero-copy view over one tab-separated VCF data line
//!
//! Only the first eight columns are addressed by name. Sample columns are
//! reachable through [`VcfLineView::field`] but never interpreted.

use memchr::memchr_iter;

/// Minimum number of tab-separated columns in a VCF data line
pub const MIN_VCF_FIELDS: usize = 8;

/// VCF line parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VcfLineError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Borrowed view of a VCF data line
#[derive(Debug, Clone)]
pub struct VcfLineView<'a> {
    line: &'a str,
    /// Field boundaries (start, end) into `line`
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> VcfLineView<'a> {
    /// Split a data line on tabs
    ///
    /// Fails when the line has fewer than [`MIN_VCF_FIELDS`] columns.
    pub fn parse(line: &'a str) -> Result<Self, VcfLineError> {
        if line.is_empty() {
            return Err(VcfLineError::EmptyLine);
        }

        let bytes = line.as_bytes();
        let mut field_bounds = Vec::with_capacity(MIN_VCF_FIELDS);
        let mut start = 0;
        for tab in memchr_iter(b'\t', bytes) {
            field_bounds.push((start, tab));
            start = tab + 1;
        }
        field_bounds.push((start, bytes.len()));

        if field_bounds.len() < MIN_VCF_FIELDS {
            return Err(VcfLineError::TooFewFields {
                expected: MIN_VCF_FIELDS,
                found: field_bounds.len(),
            });
        }

        Ok(Self { line, field_bounds })
    }

    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Field by 0-based column index
    pub fn field(&self, index: usize) -> Option<&'a str> {
        // tab is ASCII, so every bound is a char boundary
        self.field_bounds
            .get(index)
            .map(|&(start, end)| &self.line[start..end])
    }

    fn column(&self, index: usize) -> &'a str {
        self.field(index).unwrap_or("")
    }

    pub fn chrom(&self) -> &'a str {
        self.column(0)
    }

    pub fn pos(&self) -> &'a str {
        self.column(1)
    }

    /// ID column (ClinVar variation ID)
    pub fn id(&self) -> &'a str {
        self.column(2)
    }

    pub fn ref_allele(&self) -> &'a str {
        self.column(3)
    }

    pub fn alt_alleles(&self) -> &'a str {
        self.column(4)
    }

    pub fn qual(&self) -> &'a str {
        self.column(5)
    }

    pub fn filter(&self) -> &'a str {
        self.column(6)
    }

    pub fn info(&self) -> &'a str {
        self.column(7)
    }
}
