//! Markdown report generation
//!
//! Renders an extraction report as a human-readable markdown document:
//! summary counts, one section per analyzed URL with its modules and
//! submodules, and the list of URLs that yielded nothing.

use crate::output::ExtractionReport;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown report file
///
/// # Arguments
///
/// * `report` - The extraction report data
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the markdown report
/// * `Err(ModmapError)` - Failed to write the report
pub fn generate_markdown_report(report: &ExtractionReport, output_path: &Path) -> crate::Result<()> {
    let markdown = format_markdown_report(report);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats an extraction report as markdown
pub fn format_markdown_report(report: &ExtractionReport) -> String {
    let mut md = String::new();

    // Title and summary
    md.push_str("# Module Extraction Report\n\n");
    md.push_str(&format!(
        "- **Generated**: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    md.push_str(&format!("- **Sources analyzed**: {}\n", report.results.len()));
    md.push_str(&format!("- **Sources failed**: {}\n", report.failed_urls.len()));
    md.push_str(&format!("- **Modules identified**: {}\n\n", report.total_modules()));

    // Per-URL module sections
    for result in &report.results {
        md.push_str(&format!("## {}\n\n", result.url));

        if result.modules.is_empty() {
            md.push_str("No modules were identified for this source.\n\n");
            continue;
        }

        for record in &result.modules {
            md.push_str(&format!("### {}\n\n", record.module));

            if !record.description.is_empty() {
                md.push_str(&format!("{}\n\n", record.description));
            }

            if !record.submodules.is_empty() {
                for (name, description) in &record.submodules {
                    md.push_str(&format!("- **{}**: {}\n", name, description));
                }
                md.push_str("\n");
            }
        }
    }

    // Failed URLs
    if !report.failed_urls.is_empty() {
        md.push_str("## Failed URLs\n\n");
        md.push_str("No usable content could be crawled from:\n\n");
        for url in &report.failed_urls {
            md.push_str(&format!("- {}\n", url));
        }
        md.push_str("\n");
    }

    md
}
