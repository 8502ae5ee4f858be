//! Single-page fetching with bounded retries
//!
//! A fetch never fails the crawl: every outcome is reported as a
//! [`PageFetch`] whose fields say what was obtained. Network errors, bad
//! statuses, and timeouts all collapse to "nothing retrieved" once the
//! retry budget is spent.

use crate::config::Config;
use crate::crawler::parser::{clean_text, extract_links, truncate_chars};
use scraper::Html;
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};
use url::Url;

/// Per-page character cap applied before the page joins the crawl output
pub const PAGE_TEXT_CAP: usize = 5_000;

/// Marker appended when a page was cut at [`PAGE_TEXT_CAP`]
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Pause between attempts for the same page
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Guard added on top of the per-request timeout so a stalled body read
/// cannot hang an attempt past its budget
const ATTEMPT_GRACE: Duration = Duration::from_secs(2);

/// Outcome of fetching one page
///
/// `links` is `Some` whenever a document was retrieved and parsed, even if
/// its cleaned text came out empty; it is `None` only when no document was
/// obtained at all.
#[derive(Debug, Clone)]
pub struct PageFetch {
    /// URL the fetch was issued for
    pub url: Url,
    /// Cleaned page text, capped at [`PAGE_TEXT_CAP`] characters
    pub text: String,
    /// Admissible links found on the page, in document order
    pub links: Option<Vec<Url>>,
}

impl PageFetch {
    fn empty(url: Url) -> Self {
        Self {
            url,
            text: String::new(),
            links: None,
        }
    }
}

/// Builds the HTTP client shared by every request in one crawl
///
/// # Arguments
///
/// * `config` - Source of the user agent identity and per-page timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(ModmapError)` - Failed to build client
pub fn build_http_client(config: &Config) -> crate::Result<reqwest::Client> {
    // Format: Mozilla/5.0 (compatible; CrawlerName/Version)
    let user_agent = format!(
        "Mozilla/5.0 (compatible; {}/{})",
        config.user_agent.crawler_name, config.user_agent.crawler_version
    );

    let client = reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(config.crawler.page_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()?;

    Ok(client)
}

/// Fetches one page, retrying transient failures
///
/// Makes up to `retries + 1` attempts. Before each attempt the crawl
/// deadline is consulted; once it has passed no further network traffic
/// happens and the page is reported as empty.
///
/// On success the body is parsed exactly once, serving both the cleaned
/// text (capped at [`PAGE_TEXT_CAP`] characters with a truncation marker)
/// and the admissible outbound links.
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Non-2xx status | Retry after 500ms |
/// | Timeout | Retry after 500ms |
/// | Connection error | Retry after 500ms |
/// | Retries exhausted | Empty result, crawl continues |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page to fetch
/// * `seed` - Seed URL that link admissibility is judged against
/// * `retries` - Number of re-attempts after the first failure
/// * `page_timeout` - Time budget for a single attempt
/// * `deadline` - Absolute point at which the whole crawl stops
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &Url,
    seed: &Url,
    retries: u32,
    page_timeout: Duration,
    deadline: Instant,
) -> PageFetch {
    for attempt in 0..=retries {
        if Instant::now() >= deadline {
            debug!("Crawl deadline reached, skipping fetch of {}", url);
            return PageFetch::empty(url.clone());
        }

        let request = async {
            let response = client.get(url.clone()).timeout(page_timeout).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchFailure::Status(status.as_u16()));
            }
            let body = response.text().await?;
            Ok::<String, FetchFailure>(body)
        };

        match timeout(page_timeout + ATTEMPT_GRACE, request).await {
            Ok(Ok(body)) => {
                let document = Html::parse_document(&body);
                let cleaned = clean_text(&document);
                let links = extract_links(&document, url, seed);

                let text = if cleaned.chars().count() > PAGE_TEXT_CAP {
                    let mut capped = truncate_chars(&cleaned, PAGE_TEXT_CAP).to_string();
                    capped.push_str(TRUNCATION_MARKER);
                    capped
                } else {
                    cleaned
                };

                return PageFetch {
                    url: url.clone(),
                    text,
                    links: Some(links),
                };
            }
            Ok(Err(failure)) => {
                warn!("Attempt {} for {} failed: {}", attempt + 1, url, failure);
            }
            Err(_) => {
                warn!("Attempt {} for {} timed out", attempt + 1, url);
            }
        }

        if attempt < retries {
            sleep(RETRY_DELAY).await;
        }
    }

    PageFetch::empty(url.clone())
}

#[derive(Debug)]
enum FetchFailure {
    Status(u16),
    Transport(reqwest::Error),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "HTTP status {}", code),
            FetchFailure::Transport(err) => write!(f, "{}", err),
        }
    }
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        FetchFailure::Transport(err)
    }
}
