//! rsID-keyed index of pathogenic ClinVar variants
//!
//! Built by a single linear pass over annotation lines. When an rsID
//! recurs, the later record replaces the earlier one outright.

use crate::core::allele::normalize_alleles;
use crate::core::error::SkipReason;
use crate::core::info::{parse_info, InfoMap};
use crate::core::record::VcfLineView;
use crate::core::significance::{classify_significance, Significance};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default for missing gene and disease names
pub const UNKNOWN: &str = "Unknown";

/// One indexed ClinVar variant
///
/// Serialized with abbreviated field names for a compact JSON index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    #[serde(rename = "g")]
    pub gene: String,
    #[serde(rename = "d")]
    pub disease: String,
    #[serde(rename = "c")]
    pub chromosome: String,
    #[serde(rename = "p")]
    pub position: String,
    /// Single-base REF
    #[serde(rename = "r")]
    pub ref_allele: String,
    /// Sorted single-base ALTs, comma-joined
    #[serde(rename = "a")]
    pub alt: String,
    #[serde(rename = "s")]
    pub significance: Significance,
    #[serde(rename = "v")]
    pub variation_id: String,
    #[serde(rename = "al")]
    pub allele_id: String,
    #[serde(rename = "h")]
    pub hgvs: String,
    #[serde(rename = "rv")]
    pub review_status: String,
    #[serde(rename = "mc")]
    pub molecular_consequence: String,
    #[serde(rename = "o")]
    pub origin: String,
}

/// Decode a ClinVar `ORIGIN` code
///
/// Unrecognized and missing codes decode to `"unknown"`.
pub fn decode_origin(code: &str) -> &'static str {
    match code {
        "1" => "germline",
        "2" => "somatic",
        "4" => "inherited",
        "8" => "paternal",
        "16" => "maternal",
        "32" => "de-novo",
        "64" => "biparental",
        "128" => "uniparental",
        _ => "unknown",
    }
}

/// Lowercase `rs`-prefixed identifiers from an `RS` value like `"123,456"`
///
/// Placeholders (`""`, `"."`, `"-1"`) yield nothing.
pub fn parse_rsids(rs_raw: &str) -> Vec<String> {
    let trimmed = rs_raw.trim();
    if matches!(trimmed, "" | "." | "-1") {
        return Vec::new();
    }
    rs_raw
        .split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(|r| format!("rs{}", r).to_lowercase())
        .collect()
}

fn first_segment(value: &str, sep: char) -> &str {
    value.split(sep).next().unwrap_or("")
}

fn or_unknown(value: String) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value
    }
}

fn extract_gene(info: &InfoMap) -> String {
    let geneinfo = info.value_or_empty("GENEINFO");
    or_unknown(first_segment(first_segment(geneinfo, ':'), '|').to_string())
}

fn extract_disease(info: &InfoMap) -> String {
    let clndn = info.value_or_empty("CLNDN").replace('_', " ");
    or_unknown(first_segment(&clndn, '|').to_string())
}

fn extract_molecular_consequence(info: &InfoMap) -> String {
    info.value_or_empty("MC")
        .split('|')
        .nth(1)
        .map(|mc| mc.replace('_', " "))
        .unwrap_or_default()
}

/// Parse one annotation line into its rsIDs and record
///
/// Pure function of the line. Every rejection is reported as a
/// [`SkipReason`]; none of them are errors.
pub fn parse_annotation_line(line: &str) -> Result<(Vec<String>, VariantRecord), SkipReason> {
    if line.starts_with('#') {
        return Err(SkipReason::Comment);
    }

    let view = VcfLineView::parse(line.trim()).map_err(|_| SkipReason::Malformed)?;
    let info = parse_info(view.info());

    let rsids = info.value("RS").map(parse_rsids).unwrap_or_default();
    if rsids.is_empty() {
        return Err(SkipReason::MissingRsid);
    }

    let significance =
        classify_significance(info.value_or_empty("CLNSIG")).ok_or(SkipReason::ExcludedSignificance)?;

    let alleles = normalize_alleles(Some(view.ref_allele()), Some(view.alt_alleles()))
        .into_valid()
        .ok_or(SkipReason::InvalidAlleles)?;
    let (ref_allele, alt) = alleles.into_parts();

    let record = VariantRecord {
        gene: extract_gene(&info),
        disease: extract_disease(&info),
        chromosome: view.chrom().to_string(),
        position: view.pos().to_string(),
        ref_allele,
        alt,
        significance,
        variation_id: view.id().to_string(),
        allele_id: info.value_or_empty("ALLELEID").to_string(),
        hgvs: info.value_or_empty("CLNHGVS").to_string(),
        review_status: info.value_or_empty("CLNREVSTAT").replace('_', " "),
        molecular_consequence: extract_molecular_consequence(&info),
        origin: decode_origin(info.value_or_empty("ORIGIN")).to_string(),
    };

    Ok((rsids, record))
}

/// rsID → record mapping, read-only once built
///
/// Keys iterate in sorted order so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantIndex {
    records: BTreeMap<String, VariantRecord>,
}

impl VariantIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from annotation lines, discarding statistics
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = VariantIndexBuilder::new();
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish().0
    }

    /// Look up an rsID (case-insensitive)
    pub fn get(&self, rsid: &str) -> Option<&VariantRecord> {
        match self.records.get(rsid) {
            Some(record) => Some(record),
            None => self.records.get(&rsid.to_lowercase()),
        }
    }

    /// Insert or replace; returns the replaced record
    pub fn insert(&mut self, rsid: String, record: VariantRecord) -> Option<VariantRecord> {
        self.records.insert(rsid, record)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariantRecord)> {
        self.records.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Count of records per significance class
    pub fn count_by_significance(&self, significance: Significance) -> usize {
        self.records.values().filter(|r| r.significance == significance).count()
    }
}

/// Counters for one index-building pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexStats {
    /// Non-comment lines seen
    pub total: usize,
    /// Lines that produced a record
    pub indexed: usize,
    pub malformed: usize,
    pub missing_rsid: usize,
    pub excluded: usize,
    pub invalid_alleles: usize,
    /// Index entries overwritten by a later line
    pub replaced: usize,
}

impl IndexStats {
    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Comment => {}
            SkipReason::Malformed => self.malformed += 1,
            SkipReason::MissingRsid => self.missing_rsid += 1,
            SkipReason::ExcludedSignificance => self.excluded += 1,
            SkipReason::InvalidAlleles => self.invalid_alleles += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.malformed + self.missing_rsid + self.excluded + self.invalid_alleles
    }
}

/// Result of feeding one line to the builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Record stored under this many rsIDs
    Indexed(usize),
    Skipped(SkipReason),
}

/// Incremental index construction
#[derive(Debug, Default)]
pub struct VariantIndexBuilder {
    index: VariantIndex,
    stats: IndexStats,
    line_number: usize,
}

impl VariantIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one raw annotation line
    pub fn push_line(&mut self, line: &str) -> LineOutcome {
        self.line_number += 1;

        match parse_annotation_line(line) {
            Ok((rsids, record)) => {
                self.stats.total += 1;
                self.stats.indexed += 1;
                let count = rsids.len();
                for rsid in rsids {
                    if self.index.insert(rsid, record.clone()).is_some() {
                        self.stats.replaced += 1;
                    }
                }
                LineOutcome::Indexed(count)
            }
            Err(SkipReason::Comment) => LineOutcome::Skipped(SkipReason::Comment),
            Err(reason) => {
                self.stats.total += 1;
                self.stats.record_skip(reason);
                let chrom = line.split('\t').next().unwrap_or("");
                debug!("line {} [{}]: skipped ({})", self.line_number, chrom, reason);
                LineOutcome::Skipped(reason)
            }
        }
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn finish(self) -> (VariantIndex, IndexStats) {
        (self.index, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRCA1_LINE: &str = "17\t43045712\t55407\tA\tG\t.\t.\t\
        ALLELEID=70000;CLNDN=Hereditary_cancer|Breast-ovarian_cancer;CLNHGVS=NC_000017.11:g.43045712A>G;\
        CLNREVSTAT=reviewed_by_expert_panel;CLNSIG=Pathogenic;GENEINFO=BRCA1:672;\
        MC=SO:0001583|missense_variant;ORIGIN=1;RS=123";

    #[test]
    fn test_parse_full_line() {
        let (rsids, record) = parse_annotation_line(BRCA1_LINE).unwrap();
        assert_eq!(rsids, vec!["rs123"]);
        assert_eq!(record.gene, "BRCA1");
        assert_eq!(record.disease, "Hereditary cancer");
        assert_eq!(record.chromosome, "17");
        assert_eq!(record.position, "43045712");
        assert_eq!(record.ref_allele, "A");
        assert_eq!(record.alt, "G");
        assert_eq!(record.significance, Significance::Pathogenic);
        assert_eq!(record.variation_id, "55407");
        assert_eq!(record.allele_id, "70000");
        assert_eq!(record.hgvs, "NC_000017.11:g.43045712A>G");
        assert_eq!(record.review_status, "reviewed by expert panel");
        assert_eq!(record.molecular_consequence, "missense variant");
        assert_eq!(record.origin, "germline");
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let line = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Likely_pathogenic;RS=5";
        let (_, record) = parse_annotation_line(line).unwrap();
        assert_eq!(record.gene, UNKNOWN);
        assert_eq!(record.disease, UNKNOWN);
        assert_eq!(record.allele_id, "");
        assert_eq!(record.molecular_consequence, "");
        assert_eq!(record.origin, "unknown");
        assert_eq!(record.significance, Significance::LikelyPathogenic);
    }

    #[test]
    fn test_gene_with_multiple_entries() {
        let line = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=5;GENEINFO=GENE1:11|GENE2:22";
        let (_, record) = parse_annotation_line(line).unwrap();
        assert_eq!(record.gene, "GENE1");
    }

    #[test]
    fn test_single_segment_mc() {
        let line = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=5;MC=SO:0001583";
        let (_, record) = parse_annotation_line(line).unwrap();
        assert_eq!(record.molecular_consequence, "");
    }

    #[test]
    fn test_multiple_rsids() {
        let line = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=5, 6,,RS7";
        let (rsids, _) = parse_annotation_line(line).unwrap();
        assert_eq!(rsids, vec!["rs5", "rs6", "rsrs7"]);
    }

    #[test]
    fn test_parse_rsids_placeholders() {
        assert!(parse_rsids("").is_empty());
        assert!(parse_rsids(" . ").is_empty());
        assert!(parse_rsids("-1").is_empty());
        assert!(parse_rsids(",,").is_empty());
    }

    #[test]
    fn test_skip_reasons() {
        assert_eq!(parse_annotation_line("##fileformat=VCFv4.1").unwrap_err(), SkipReason::Comment);
        assert_eq!(parse_annotation_line("1\t100\t1\tC").unwrap_err(), SkipReason::Malformed);
        assert_eq!(
            parse_annotation_line("1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic").unwrap_err(),
            SkipReason::MissingRsid
        );
        assert_eq!(
            parse_annotation_line("1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS").unwrap_err(),
            SkipReason::MissingRsid
        );
        assert_eq!(
            parse_annotation_line("1\t100\t1\tC\tT\t.\t.\tCLNSIG=Benign;RS=1").unwrap_err(),
            SkipReason::ExcludedSignificance
        );
        assert_eq!(
            parse_annotation_line("1\t100\t1\tC\tCT\t.\t.\tCLNSIG=Pathogenic;RS=1").unwrap_err(),
            SkipReason::InvalidAlleles
        );
        assert_eq!(
            parse_annotation_line("1\t100\t1\tCT\tC\t.\t.\tCLNSIG=Pathogenic;RS=1").unwrap_err(),
            SkipReason::InvalidAlleles
        );
    }

    #[test]
    fn test_decode_origin() {
        assert_eq!(decode_origin("0"), "unknown");
        assert_eq!(decode_origin("1"), "germline");
        assert_eq!(decode_origin("32"), "de-novo");
        assert_eq!(decode_origin("3"), "unknown");
        assert_eq!(decode_origin(""), "unknown");
    }

    #[test]
    fn test_last_write_wins() {
        let first = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=123;GENEINFO=FIRST:1";
        let second = "2\t200\t2\tG\tA\t.\t.\tCLNSIG=Likely_pathogenic;RS=123;GENEINFO=SECOND:2";

        let mut builder = VariantIndexBuilder::new();
        assert_eq!(builder.push_line(first), LineOutcome::Indexed(1));
        assert_eq!(builder.push_line(second), LineOutcome::Indexed(1));
        let (index, stats) = builder.finish();

        let record = index.get("rs123").unwrap();
        assert_eq!(record.gene, "SECOND");
        assert_eq!(record.chromosome, "2");
        assert_eq!(record.ref_allele, "G");
        assert_eq!(record.alt, "A");
        assert_eq!(record.significance, Significance::LikelyPathogenic);
        assert_eq!(index.len(), 1);
        assert_eq!(stats.replaced, 1);
    }

    #[test]
    fn test_builder_stats() {
        let lines = [
            "##fileformat=VCFv4.1",
            "#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO",
            BRCA1_LINE,
            "1\t100\t1\tC",
            "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Uncertain_significance;RS=9",
            "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=-1",
            "1\t100\t1\tC\t<DEL>\t.\t.\tCLNSIG=Pathogenic;RS=8",
        ];
        let mut builder = VariantIndexBuilder::new();
        for line in lines {
            builder.push_line(line);
        }
        let (index, stats) = builder.finish();

        assert_eq!(index.len(), 1);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.indexed, 1);
        assert_eq!(stats.malformed, 1);
        assert_eq!(stats.excluded, 1);
        assert_eq!(stats.missing_rsid, 1);
        assert_eq!(stats.invalid_alleles, 1);
        assert_eq!(stats.skipped(), 4);
    }

    #[test]
    fn test_shared_record_for_multiple_rsids() {
        let line = "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=1,2";
        let index = VariantIndex::from_lines([line]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("rs1"), index.get("rs2"));
    }

    #[test]
    fn test_case_insensitive_get() {
        let index = VariantIndex::from_lines([BRCA1_LINE]);
        assert!(index.get("RS123").is_some());
        assert!(index.get("rs999").is_none());
    }

    #[test]
    fn test_compact_json_field_names() {
        let (_, record) = parse_annotation_line(BRCA1_LINE).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        for key in ["g", "d", "c", "p", "r", "a", "s", "v", "al", "h", "rv", "mc", "o"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(json["s"], "5");
        assert_eq!(json["g"], "BRCA1");
    }

    #[test]
    fn test_count_by_significance() {
        let lines = [
            "1\t100\t1\tC\tT\t.\t.\tCLNSIG=Pathogenic;RS=1",
            "1\t101\t2\tC\tT\t.\t.\tCLNSIG=Likely_pathogenic;RS=2",
            "1\t102\t3\tC\tT\t.\t.\tCLNSIG=Likely_pathogenic;RS=3",
        ];
        let index = VariantIndex::from_lines(lines);
        assert_eq!(index.count_by_significance(Significance::Pathogenic), 1);
        assert_eq!(index.count_by_significance(Significance::LikelyPathogenic), 2);
    }

    struct CaptureLogger;

    static CAPTURED: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());
    static LOGGER: CaptureLogger = CaptureLogger;

    impl log::Log for CaptureLogger {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Debug
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut lines) = CAPTURED.lock() {
                lines.push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    #[test]
    fn test_every_skip_reason_logged() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Debug);

        let mut builder = VariantIndexBuilder::new();
        builder.push_line("##fileformat=VCFv4.1");
        builder.push_line("chrSKIPLOG\t1");
        builder.push_line("chrSKIPLOG\t2\t1\tA\tG\t.\t.\tCLNSIG=Pathogenic");
        builder.push_line("chrSKIPLOG\t3\t1\tA\tG\t.\t.\tCLNSIG=Benign;RS=1");
        builder.push_line("chrSKIPLOG\t4\t1\tAT\tG\t.\t.\tCLNSIG=Pathogenic;RS=2");

        let captured = CAPTURED.lock().unwrap();
        let ours: Vec<&String> = captured.iter().filter(|m| m.contains("[chrSKIPLOG]")).collect();
        assert_eq!(ours.len(), 4);
        for reason in [
            SkipReason::Malformed,
            SkipReason::MissingRsid,
            SkipReason::ExcludedSignificance,
            SkipReason::InvalidAlleles,
        ] {
            let tag = format!("skipped ({})", reason);
            assert!(ours.iter().any(|m| m.ends_with(&tag)), "no log for {}", reason);
        }
        assert!(!captured.iter().any(|m| m.contains("##fileformat")));
    }
}
