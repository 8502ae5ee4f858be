//! Crawler module for documentation harvesting
//!
//! This module contains the core crawling logic, including:
//! - Single-page HTTP fetching with retry logic
//! - HTML cleaning and link extraction
//! - The budget-bounded frontier traversal
//! - Overall crawl coordination

mod budget;
mod coordinator;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, fetch_page, PageFetch, PAGE_TEXT_CAP, TRUNCATION_MARKER};
pub use frontier::Frontier;
pub use parser::{clean_html, clean_text, extract_links, truncate_chars};
