//! Multi-seed extraction pipeline
//!
//! Processes a batch of seed URLs sequentially: each URL is crawled under
//! its own hard timeout, then each crawled document goes to the structuring
//! service in its own call. Failure domains are isolated per URL at both
//! stages - a dead site or a quota error affects only its own entry in the
//! report, never the batch.

use crate::crawler::Crawler;
use crate::extractor::{PageContent, Structurer};
use crate::output::{ExtractionReport, UrlModules};
use crate::ModmapError;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// Runs the crawl-then-structure pipeline over a batch of seed URLs
///
/// # Arguments
///
/// * `crawler` - Shared crawler; one crawl runs at a time
/// * `structurer` - Structuring service called once per crawled URL
/// * `urls` - Seed URLs to process
/// * `url_timeout` - Hard cap on each URL's crawl, including retries
///
/// # Returns
///
/// * `Ok(ExtractionReport)` - Results for every URL that yielded content,
///   plus the list of URLs that did not
/// * `Err(ModmapError::InvalidRequest)` - The URL list was empty
/// * `Err(ModmapError::NoUsableContent)` - Every URL failed to yield content
pub async fn run_pipeline(
    crawler: &Crawler,
    structurer: &dyn Structurer,
    urls: &[String],
    url_timeout: Duration,
) -> crate::Result<ExtractionReport> {
    if urls.is_empty() {
        return Err(ModmapError::InvalidRequest(
            "At least one URL is required".to_string(),
        ));
    }

    let mut crawled: Vec<PageContent> = Vec::new();
    let mut failed_urls: Vec<String> = Vec::new();

    for url in urls {
        info!("Processing {}", url);
        match timeout(url_timeout, crawler.crawl(url)).await {
            Ok(content) if !content.trim().is_empty() => {
                crawled.push(PageContent {
                    url: url.clone(),
                    content,
                });
            }
            Ok(_) => {
                warn!("No content extracted from {}", url);
                failed_urls.push(url.clone());
            }
            Err(_) => {
                warn!("Crawl of {} exceeded {:?}, skipping", url, url_timeout);
                failed_urls.push(url.clone());
            }
        }
    }

    if crawled.is_empty() {
        return Err(ModmapError::NoUsableContent);
    }

    // One structuring call per URL so a failure stays with its URL
    let mut results = Vec::with_capacity(crawled.len());
    for page in &crawled {
        match structurer.extract_modules(std::slice::from_ref(page)).await {
            Ok(modules) => {
                info!("Extracted {} module(s) from {}", modules.len(), page.url);
                results.push(UrlModules {
                    url: page.url.clone(),
                    modules,
                });
            }
            Err(e) => {
                error!("Module extraction failed for {}: {}", page.url, e);
                results.push(UrlModules {
                    url: page.url.clone(),
                    modules: Vec::new(),
                });
            }
        }
    }

    Ok(ExtractionReport::new(results, failed_urls))
}
