//! Crawl orchestration - the main traversal loop
//!
//! This module drives one crawl from seed to finished text document:
//! - Seeding and draining the frontier
//! - Enforcing the page, depth, content, and wall-clock budgets
//! - Assembling tagged per-page content blocks in visit order
//! - Falling back to a single bare re-fetch of the seed when the whole
//!   traversal produced nothing

use crate::config::Config;
use crate::crawler::budget::CrawlBudget;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::Frontier;
use crate::crawler::parser::truncate_chars;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

/// At most this many links are taken from any single page, in document order
const MAX_LINKS_PER_PAGE: usize = 10;

/// Pause inserted after every third page visit
const POLITENESS_DELAY: Duration = Duration::from_millis(200);

/// Documentation crawler
///
/// Holds the shared HTTP client so connections are reused across pages and
/// across crawls. Carries no other cross-call state: every [`crawl`] call
/// starts from a fresh frontier, visited set, and budget.
///
/// [`crawl`]: Crawler::crawl
pub struct Crawler {
    config: Config,
    client: Client,
}

impl Crawler {
    /// Creates a crawler from a validated configuration
    ///
    /// # Arguments
    ///
    /// * `config` - Budgets and user agent identity for all crawls
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to crawl
    /// * `Err(ModmapError)` - The HTTP client could not be built
    pub fn new(config: &Config) -> crate::Result<Self> {
        let client = build_http_client(config)?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Crawls documentation starting from a seed URL
    ///
    /// Performs a breadth-first traversal of same-site pages, with one
    /// priority tweak: links discovered on the seed page itself jump to the
    /// front of the frontier, so when budgets are tight the pages closest to
    /// the seed are represented first.
    ///
    /// The traversal stops as soon as any budget closes: page count, total
    /// content size, or wall-clock time. Per-page failures never abort the
    /// crawl. If the traversal ends with no content at all, the seed is
    /// re-fetched once more, bare, and whatever that yields becomes the
    /// whole output.
    ///
    /// Returns the collected content blocks joined by newlines; an empty
    /// string when nothing could be retrieved. This method never fails.
    pub async fn crawl(&self, seed_url: &str) -> String {
        let seed = match Url::parse(seed_url) {
            Ok(seed) => seed,
            Err(e) => {
                warn!("Cannot parse seed URL {}: {}", seed_url, e);
                return String::new();
            }
        };

        let limits = &self.config.crawler;
        let page_timeout = Duration::from_secs(limits.page_timeout_secs);
        let started = std::time::Instant::now();

        let mut budget = CrawlBudget::start(
            limits.max_pages,
            limits.max_content_length,
            Duration::from_secs(limits.max_total_time_secs),
        );
        let mut frontier = Frontier::seeded(seed.clone());
        let mut visited: HashSet<String> = HashSet::new();
        let mut blocks: Vec<String> = Vec::new();

        info!("Starting crawl of {}", seed);

        while !frontier.is_empty() && budget.has_page_room() && budget.has_content_room() {
            if budget.time_exhausted() {
                info!(
                    "Time budget exhausted after {} pages, keeping partial results",
                    budget.pages_visited()
                );
                break;
            }

            let (url, depth) = match frontier.pop_front() {
                Some(entry) => entry,
                None => break,
            };

            if visited.contains(url.as_str()) || depth > limits.max_depth {
                continue;
            }

            visited.insert(url.as_str().to_owned());
            budget.record_visit();

            debug!(
                "Fetching {} (depth {}, page {}/{})",
                url,
                depth,
                budget.pages_visited(),
                limits.max_pages
            );

            let fetch = fetch_page(
                &self.client,
                &url,
                &seed,
                limits.retries,
                page_timeout,
                budget.deadline(),
            )
            .await;

            if !fetch.text.is_empty() {
                let remaining = budget.content_remaining();
                if remaining == 0 {
                    break;
                }

                let text = if fetch.text.chars().count() > remaining {
                    truncate_chars(&fetch.text, remaining).to_owned()
                } else {
                    fetch.text
                };

                budget.record_content(text.chars().count());
                blocks.push(format!("--- Content from {} ---\n\n{}", url, text));
            }

            // Links only spread while there is room for the pages they lead to
            if let Some(links) = fetch.links {
                if depth < limits.max_depth && budget.has_page_room() {
                    for link in links.into_iter().take(MAX_LINKS_PER_PAGE) {
                        if visited.contains(link.as_str()) || frontier.contains(&link) {
                            continue;
                        }

                        // Seed-page children get priority over deeper siblings
                        if link == seed || depth == 0 {
                            frontier.push_front(link, depth + 1);
                        } else {
                            frontier.push_back(link, depth + 1);
                        }
                    }
                }
            }

            if budget.pages_visited() % 3 == 0 {
                sleep(POLITENESS_DELAY).await;
            }
        }

        if blocks.is_empty() {
            debug!("No content collected, re-fetching seed once");
            let fetch = fetch_page(&self.client, &seed, &seed, 0, page_timeout, budget.deadline()).await;
            if !fetch.text.is_empty() {
                blocks.push(format!("Content from {}:\n{}", seed, fetch.text));
            }
        }

        info!(
            "Crawl of {} finished: {} pages visited, {} content chars in {:?}",
            seed,
            budget.pages_visited(),
            budget.content_chars(),
            started.elapsed()
        );

        blocks.join("\n")
    }
}
