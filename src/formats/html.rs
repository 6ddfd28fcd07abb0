//! Self-contained HTML report
//!
//! Findings are grouped by significance (pathogenic first) and sorted by
//! disease inside each group. Every interpolated value is escaped.

use crate::core::error::Result;
use crate::core::finding::{group_for_display, Finding, FindingSummary};
use crate::core::significance::Significance;
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;

const STYLE: &str = r#"
        :root { --pathogenic: #c0152f; --likely: #e67e22; --border: #ecf0f1; --text: #2c3e50; }
        * { box-sizing: border-box; }
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
               line-height: 1.6; color: var(--text); background: #ecf0f1; margin: 0; padding: 20px; }
        .container { max-width: 1200px; margin: 0 auto; background: #fff; padding: 40px;
                     border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.1); }
        h1 { border-bottom: 3px solid #3498db; padding-bottom: 15px; }
        h2 { color: #34495e; margin-top: 40px; font-size: 20px; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 20px; margin: 40px 0; }
        .summary-card { background: #667eea; color: #fff; padding: 20px; border-radius: 8px; text-align: center; }
        .summary-card.pathogenic { background: var(--pathogenic); }
        .summary-card.likely { background: var(--likely); }
        .summary-number { font-size: 32px; font-weight: bold; }
        .finding-card { border: 1px solid var(--border); border-left: 5px solid #3498db;
                        padding: 20px; margin-bottom: 20px; border-radius: 6px; }
        .finding-card.pathogenic { border-left-color: var(--pathogenic); }
        .finding-card.likely { border-left-color: var(--likely); }
        .finding-header { display: flex; justify-content: space-between; }
        .finding-title { font-size: 18px; font-weight: 600; }
        .badge { padding: 6px 12px; border-radius: 4px; font-size: 12px; font-weight: 600;
                 text-transform: uppercase; color: #fff; }
        .badge-pathogenic { background: var(--pathogenic); }
        .badge-likely { background: var(--likely); }
        .finding-details { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 15px; margin: 15px 0; }
        .detail-label { color: #7f8c8d; font-weight: 600; text-transform: uppercase; font-size: 11px; }
        .detail-value { font-family: 'Courier New', monospace; font-size: 13px; }
        .disease-info { background: #f8f9fa; padding: 12px; border-radius: 4px; margin: 15px 0; font-size: 14px; }
        .disclaimer { background: #fff3cd; border: 1px solid #ffc107; padding: 20px; border-radius: 6px; color: #856404; }
        .external-link { color: #3498db; text-decoration: none; font-size: 12px; }
        .timestamp { text-align: right; font-size: 12px; color: #7f8c8d; margin-top: 30px;
                     border-top: 1px solid var(--border); padding-top: 15px; }
"#;

const DISCLAIMER: &str = r#"        <div class="disclaimer">
            <h3>Important Medical Disclaimer</h3>
            <p><strong>This report is for educational and informational purposes only.</strong></p>
            <p>This is NOT medical advice and should NOT be used for self-diagnosis or treatment decisions.
            Many genetic variants have incomplete penetrance or require specific environmental factors to manifest.
            Please consult a qualified healthcare provider or genetic counselor to interpret these findings.</p>
        </div>
"#;

/// Escape text for HTML element and attribute content
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn css_class(significance: Significance) -> &'static str {
    match significance {
        Significance::Pathogenic => "pathogenic",
        Significance::LikelyPathogenic => "likely",
    }
}

fn group_heading(significance: Significance) -> &'static str {
    match significance {
        Significance::Pathogenic => "Pathogenic Variants",
        Significance::LikelyPathogenic => "Likely Pathogenic Variants",
    }
}

fn detail(out: &mut String, label: &str, value: &str) {
    let _ = write!(
        out,
        "                <div class=\"detail-item\"><div class=\"detail-label\">{}</div><div class=\"detail-value\">{}</div></div>\n",
        label,
        escape_html(value)
    );
}

fn finding_card(out: &mut String, finding: &Finding) {
    let class = css_class(finding.significance);
    let _ = write!(
        out,
        "        <div class=\"finding-card {class}\">\n            <div class=\"finding-header\">\n                \
         <div class=\"finding-title\">{}: {}</div>\n                \
         <span class=\"badge badge-{class}\">{}</span>\n            </div>\n            <div class=\"finding-details\">\n",
        escape_html(&finding.gene),
        escape_html(&finding.disease),
        finding.significance.label(),
    );

    detail(out, "SNP ID", &finding.rsid);
    detail(out, "Your Genotype", &finding.user_genotype);
    detail(out, "Reference/Alt", &format!("{} / {}", finding.ref_allele, finding.alt.replace(',', ", ")));
    detail(out, "Position", &format!("Chr {}:{}", finding.chromosome, finding.position));
    detail(out, "Genotype Match", finding.match_status.as_str());
    if !finding.molecular_consequence.is_empty() {
        detail(out, "Molecular Effect", &finding.molecular_consequence);
    }
    if !finding.origin.is_empty() {
        detail(out, "Origin", &capitalize(&finding.origin));
    }
    if !finding.review_status.is_empty() {
        detail(out, "Review Status", &finding.review_status);
    }
    let _ = write!(
        out,
        "            </div>\n            <div class=\"disease-info\"><strong>Associated Disease/Condition:</strong> {}</div>\n            <div>\n",
        escape_html(&finding.disease)
    );

    let _ = write!(
        out,
        "                <a href=\"https://www.snpedia.com/index.php/{}\" target=\"_blank\" class=\"external-link\">View on SNPedia</a>",
        escape_html(&finding.rsid)
    );
    if !finding.variation_id.is_empty() {
        let _ = write!(
            out,
            " | <a href=\"https://www.ncbi.nlm.nih.gov/clinvar/variation/{}/\" target=\"_blank\" class=\"external-link\">View on ClinVar</a>",
            escape_html(&finding.variation_id)
        );
    }
    out.push_str("\n            </div>\n        </div>\n");
}

/// Render the full report
pub fn render_report(findings: &[Finding], generated_at: DateTime<Local>) -> String {
    let summary = FindingSummary::from_findings(findings);
    let mut out = String::with_capacity(8 * 1024 + findings.len() * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n");
    out.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    out.push_str("    <title>Genomic Disease Report</title>\n    <style>");
    out.push_str(STYLE);
    out.push_str("    </style>\n</head>\n<body>\n    <div class=\"container\">\n");
    out.push_str("        <h1>Genomic Disease Risk Report</h1>\n");
    out.push_str(DISCLAIMER);

    out.push_str("        <div class=\"summary\">\n");
    for (class, count, label) in [
        ("pathogenic", summary.pathogenic, "Pathogenic Variants"),
        ("likely", summary.likely_pathogenic, "Likely Pathogenic Variants"),
        ("", summary.total(), "Total Disease Associations"),
    ] {
        let _ = write!(
            out,
            "            <div class=\"summary-card {}\"><div class=\"summary-number\">{}</div><div class=\"summary-label\">{}</div></div>\n",
            class, count, label
        );
    }
    out.push_str("        </div>\n");

    for group in group_for_display(findings) {
        let _ = writeln!(out, "        <h2>{}</h2>", group_heading(group.significance));
        for finding in group.findings {
            finding_card(&mut out, finding);
        }
    }

    let _ = write!(
        out,
        "        <div class=\"timestamp\">Report generated: {}<br>Based on ClinVar VCF database</div>\n    </div>\n</body>\n</html>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S %:z")
    );
    out
}

/// Render and write the report to `path`
pub fn write_report<P: AsRef<Path>>(path: P, findings: &[Finding]) -> Result<()> {
    let html = render_report(findings, Local::now());
    std::fs::write(path.as_ref(), html)?;
    Ok(())
}
