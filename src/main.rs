//! clinvar-report CLI entry point
//!
//! Builds a ClinVar pathogenic-variant index and matches personal genotype
//! files against it.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use clinvar_report::core::{collect_findings_with, FindingSummary, IndexStats, Significance, VariantIndex};
use clinvar_report::formats;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// How the `report` source should be read
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum IndexFormatArg {
    /// Pick by extension: `.json` is a prebuilt index, anything else a VCF
    #[default]
    #[value(name = "auto")]
    Auto,
    /// ClinVar VCF (plain, gzip or bzip2)
    #[value(name = "vcf")]
    Vcf,
    /// Index written by the `index` subcommand
    #[value(name = "json")]
    Json,
}

#[derive(Parser)]
#[command(name = "clinvar-report")]
#[command(about = "Match personal genotypes against ClinVar pathogenic variants")]
#[command(version)]
struct Cli {
    /// Disable progress spinners
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a compact JSON index from a ClinVar VCF
    Index {
        /// ClinVar VCF file (.vcf, .vcf.gz, .vcf.bz2)
        input: PathBuf,
        /// Output index file
        #[arg(default_value = "clinvar_index.json")]
        output: PathBuf,
    },
    /// Generate an HTML disease report from a genotype file
    Report {
        /// ClinVar VCF or JSON index
        source: PathBuf,
        /// 23andMe raw genotype file
        genome: PathBuf,
        /// Output HTML report
        #[arg(default_value = "genomics_disease_report.html")]
        output: PathBuf,
        /// Format of the source file
        #[arg(long = "index-format", default_value = "auto")]
        index_format: IndexFormatArg,
        /// Also write findings as JSON
        #[arg(long = "json-findings")]
        json_findings: Option<PathBuf>,
    },
}

fn require_file(path: &Path, what: &str) -> anyhow::Result<()> {
    if !path.exists() {
        bail!("{} not found: {}", what, path.display());
    }
    Ok(())
}

fn print_index_stats(stats: &IndexStats, index: &VariantIndex) {
    eprintln!("\n=== Index Statistics ===");
    eprintln!("Data lines:         {}", stats.total);
    eprintln!("Indexed lines:      {}", stats.indexed);
    eprintln!("Unique rsIDs:       {}", index.len());
    eprintln!("  - Pathogenic:     {}", index.count_by_significance(Significance::Pathogenic));
    eprintln!("  - Likely path.:   {}", index.count_by_significance(Significance::LikelyPathogenic));
    eprintln!("Skipped:            {}", stats.skipped());
    eprintln!("  - Excluded:       {}", stats.excluded);
    eprintln!("  - InvalidAlleles: {}", stats.invalid_alleles);
    eprintln!("  - MissingRsid:    {}", stats.missing_rsid);
    eprintln!("  - Malformed:      {}", stats.malformed);
    eprintln!("Replaced entries:   {}", stats.replaced);
}

fn load_index(source: &Path, format: IndexFormatArg, show_progress: bool) -> anyhow::Result<VariantIndex> {
    let is_json = match format {
        IndexFormatArg::Json => true,
        IndexFormatArg::Vcf => false,
        IndexFormatArg::Auto => source.extension().and_then(|e| e.to_str()) == Some("json"),
    };

    let start = Instant::now();
    if is_json {
        eprintln!("Loading index: {:?}", source);
        let index = formats::read_index_file(source)
            .with_context(|| format!("Failed to load index {}", source.display()))?;
        eprintln!("Loaded {} variants in {:.2}s", index.len(), start.elapsed().as_secs_f64());
        Ok(index)
    } else {
        eprintln!("Indexing ClinVar VCF: {:?}", source);
        let (index, stats) = formats::build_index_from_file(source, show_progress)
            .with_context(|| format!("Failed to index {}", source.display()))?;
        print_index_stats(&stats, &index);
        Ok(index)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();
    let show_progress = !cli.quiet;

    match cli.command {
        Commands::Index { input, output } => {
            require_file(&input, "ClinVar VCF")?;

            eprintln!("Indexing ClinVar VCF: {:?} -> {:?}", input, output);
            let (index, stats) = formats::build_index_from_file(&input, show_progress)
                .with_context(|| format!("Failed to index {}", input.display()))?;
            let size = formats::write_index_file(&output, &index)
                .with_context(|| format!("Failed to write {}", output.display()))?;

            print_index_stats(&stats, &index);
            eprintln!("Index size:         {:.1} MB", size as f64 / 1024.0 / 1024.0);
            eprintln!("Time elapsed:       {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Report { source, genome, output, index_format, json_findings } => {
            require_file(&source, "ClinVar source")?;
            require_file(&genome, "Genotype file")?;

            let index = load_index(&source, index_format, show_progress)?;

            eprintln!("Loading genotypes: {:?}", genome);
            let (genotypes, gstats) = formats::read_genotypes_from_file(&genome, show_progress)
                .with_context(|| format!("Failed to read {}", genome.display()))?;
            if genotypes.is_empty() {
                bail!("No usable genotype calls in {}", genome.display());
            }

            let pb = if show_progress {
                let pb = ProgressBar::new(genotypes.len() as u64);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} Matching")
                        .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                pb
            } else {
                ProgressBar::hidden()
            };
            let findings = collect_findings_with(&genotypes, &index, |n| pb.set_position(n as u64));
            pb.finish_and_clear();

            let summary = FindingSummary::from_findings(&findings);
            eprintln!("\n=== Match Statistics ===");
            eprintln!("Genotype rows:      {}", gstats.rows);
            eprintln!("Usable calls:       {}", genotypes.len());
            eprintln!("  - NoCalls:        {}", gstats.no_calls);
            eprintln!("  - UnsupportedIds: {}", gstats.unsupported_ids);
            eprintln!("Findings:           {}", summary.total());
            eprintln!("  - Pathogenic:     {}", summary.pathogenic);
            eprintln!("  - Likely path.:   {}", summary.likely_pathogenic);

            if let Some(path) = json_findings {
                formats::write_findings_file(&path, &findings)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!("Findings JSON:      {:?}", path);
            }

            if findings.is_empty() {
                eprintln!("No pathogenic or likely pathogenic variants found; no report written");
            } else {
                formats::write_report(&output, &findings)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                eprintln!("Report:             {:?}", output);
            }
            eprintln!("Time elapsed:       {:.2}s", start.elapsed().as_secs_f64());
        }
    }

    Ok(())
}
