//! Crawl budget accounting
//!
//! One crawl is bounded four ways at once: page count, link depth, total
//! content size, and wall-clock time. Depth rides along in the frontier
//! entries; the other three live here. All limits are checked at loop
//! boundaries, so a crawl may overshoot by at most one in-flight fetch.

use std::time::Duration;
use tokio::time::Instant;

/// Running budget state for a single crawl
#[derive(Debug)]
pub struct CrawlBudget {
    max_pages: usize,
    max_content_chars: usize,
    deadline: Instant,
    pages_visited: usize,
    content_chars: usize,
}

impl CrawlBudget {
    /// Starts a fresh budget; the wall-clock window opens immediately
    pub fn start(max_pages: usize, max_content_chars: usize, max_total_time: Duration) -> Self {
        Self {
            max_pages,
            max_content_chars,
            deadline: Instant::now() + max_total_time,
            pages_visited: 0,
            content_chars: 0,
        }
    }

    /// Absolute point at which the crawl must stop issuing requests
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Whether the wall-clock window has closed
    pub fn time_exhausted(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// Whether another page may still be visited
    pub fn has_page_room(&self) -> bool {
        self.pages_visited < self.max_pages
    }

    /// Whether more content may still be collected
    pub fn has_content_room(&self) -> bool {
        self.content_chars < self.max_content_chars
    }

    /// Characters still available before the content cap
    pub fn content_remaining(&self) -> usize {
        self.max_content_chars.saturating_sub(self.content_chars)
    }

    /// Counts one dequeued-and-processed page
    pub fn record_visit(&mut self) {
        self.pages_visited += 1;
    }

    /// Counts collected content, in characters
    pub fn record_content(&mut self, chars: usize) {
        self.content_chars += chars;
    }

    pub fn pages_visited(&self) -> usize {
        self.pages_visited
    }

    pub fn content_chars(&self) -> usize {
        self.content_chars
    }
}
