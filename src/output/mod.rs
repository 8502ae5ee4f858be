//! Output module for extraction reports
//!
//! This module handles:
//! - Assembling the per-URL extraction results into one report
//! - Rendering the report as a human-readable markdown summary
//! - Exporting the report as pretty-printed JSON

mod markdown;

pub use markdown::{format_markdown_report, generate_markdown_report};

use crate::extractor::ModuleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Modules extracted for one seed URL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlModules {
    /// Seed URL the modules were extracted from
    pub url: String,
    /// Extracted module records; empty when structuring failed for this URL
    pub modules: Vec<ModuleRecord>,
}

/// Complete result of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// When the report was assembled
    pub generated_at: DateTime<Utc>,
    /// One entry per seed URL that yielded crawlable content
    pub results: Vec<UrlModules>,
    /// Seed URLs that produced no usable content
    pub failed_urls: Vec<String>,
}

impl ExtractionReport {
    /// Assembles a report timestamped at the current instant
    pub fn new(results: Vec<UrlModules>, failed_urls: Vec<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            results,
            failed_urls,
        }
    }

    /// Total number of modules across all URLs
    pub fn total_modules(&self) -> usize {
        self.results.iter().map(|r| r.modules.len()).sum()
    }
}

/// Writes the report as pretty-printed JSON
///
/// # Arguments
///
/// * `report` - The extraction report to serialize
/// * `path` - Path where the JSON file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the JSON report
/// * `Err(ModmapError)` - Serialization or file write failed
pub fn write_json_report(report: &ExtractionReport, path: &Path) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(report)?;

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_modules_sums_across_urls() {
        let record = ModuleRecord {
            module: "Billing".to_string(),
            description: String::new(),
            submodules: Default::default(),
        };

        let report = ExtractionReport::new(
            vec![
                UrlModules {
                    url: "https://a.example.com/".to_string(),
                    modules: vec![record.clone(), record.clone()],
                },
                UrlModules {
                    url: "https://b.example.com/".to_string(),
                    modules: vec![record],
                },
            ],
            vec![],
        );

        assert_eq!(report.total_modules(), 3);
    }

    #[test]
    fn test_json_report_round_trips() {
        let report = ExtractionReport::new(
            vec![UrlModules {
                url: "https://docs.example.com/".to_string(),
                modules: vec![],
            }],
            vec!["https://broken.example.com/".to_string()],
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_json_report(&report, &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: ExtractionReport = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].url, "https://docs.example.com/");
        assert_eq!(parsed.failed_urls, vec!["https://broken.example.com/".to_string()]);
    }
}
