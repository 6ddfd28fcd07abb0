//! Performance benchmarks for clinvar-report
//!
//! Run with: cargo bench
//!
//! Inputs are synthetic so the benchmarks run without a ClinVar download.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use clinvar_report::core::{
    collect_findings, genotype_matches, normalize_alleles, parse_info, GenotypeMap, VariantIndex,
};
use clinvar_report::formats::build_index_from_reader;

const BASES: [char; 4] = ['A', 'C', 'G', 'T'];

const SIGNIFICANCES: [&str; 4] = ["Pathogenic", "Likely_pathogenic", "Benign", "Uncertain_significance"];

/// Generate a synthetic ClinVar VCF with `n` data lines
fn synthetic_vcf(n: usize) -> String {
    let mut out = String::from("##fileformat=VCFv4.1\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n");
    for i in 0..n {
        let r = BASES[i % 4];
        let a = BASES[(i + 1) % 4];
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\t.\t.\tALLELEID={};CLNDN=Disease_{};CLNREVSTAT=criteria_provided;\
             CLNSIG={};GENEINFO=GENE{}:{};MC=SO:0001583|missense_variant;ORIGIN=1;RS={}\n",
            i % 22 + 1,
            10_000 + i,
            i,
            r,
            a,
            i,
            i % 100,
            SIGNIFICANCES[i % SIGNIFICANCES.len()],
            i % 500,
            i,
            i
        ));
    }
    out
}

/// Generate a genotype map covering every other rsID
fn synthetic_genotypes(n: usize) -> GenotypeMap {
    let mut map = GenotypeMap::new();
    for i in (0..n).step_by(2) {
        let call = format!("{}{}", BASES[i % 4], BASES[(i + 1) % 4]);
        let _ = map.insert_raw(&format!("rs{}", i), &call, "1", "1");
    }
    map
}

/// Benchmark INFO parsing
fn bench_parse_info(c: &mut Criterion) {
    let blob = "ALLELEID=70000;CLNDISDB=MedGen:C0027672|Orphanet:145;CLNDN=Hereditary_cancer|Breast-ovarian_cancer;\
                CLNHGVS=NC_000017.11:g.43045712A>G;CLNREVSTAT=reviewed_by_expert_panel;CLNSIG=Pathogenic;\
                CLNVC=single_nucleotide_variant;GENEINFO=BRCA1:672;MC=SO:0001583|missense_variant;ORIGIN=1;RS=123";

    c.bench_function("parse_info", |b| b.iter(|| black_box(parse_info(black_box(blob)))));
}

/// Benchmark allele normalization
fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_alleles", |b| {
        b.iter(|| black_box(normalize_alleles(black_box(Some("a")), black_box(Some("g,c,c,T")))))
    });
}

/// Benchmark index building
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for size in [1_000usize, 10_000, 100_000] {
        let vcf = synthetic_vcf(size);
        group.throughput(Throughput::Bytes(vcf.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &vcf, |b, vcf| {
            b.iter(|| black_box(build_index_from_reader(vcf.as_bytes(), false)))
        });
    }

    group.finish();
}

/// Benchmark genotype matching
fn bench_matching(c: &mut Criterion) {
    c.bench_function("genotype_matches", |b| {
        b.iter(|| black_box(genotype_matches(black_box("AG"), black_box("A"), black_box("C,G,T"))))
    });

    let mut group = c.benchmark_group("collect_findings");
    for size in [10_000usize, 100_000] {
        let index = VariantIndex::from_lines(synthetic_vcf(size).lines());
        let genotypes = synthetic_genotypes(size);
        group.throughput(Throughput::Elements(genotypes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &(index, genotypes), |b, (index, genotypes)| {
            b.iter(|| black_box(collect_findings(genotypes, index)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_info,
    bench_normalize,
    bench_index_build,
    bench_matching,
);

criterion_main!(benches);
