use serde::Deserialize;

/// Main configuration structure for modmap
///
/// Every section and field is optional in the TOML file; missing values fall
/// back to the defaults below, so an empty file (or no file at all) yields a
/// fully working configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub extractor: ExtractorConfig,
    pub pipeline: PipelineConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            user_agent: UserAgentConfig::default(),
            extractor: ExtractorConfig::default(),
            pipeline: PipelineConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Crawl budget configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of pages visited per crawl
    #[serde(rename = "max-pages")]
    pub max_pages: usize,

    /// Maximum link depth from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum total collected text, in characters
    #[serde(rename = "max-content-length")]
    pub max_content_length: usize,

    /// Per-page request timeout (seconds)
    #[serde(rename = "page-timeout-secs")]
    pub page_timeout_secs: u64,

    /// Wall-clock budget for one whole crawl (seconds)
    #[serde(rename = "max-total-time-secs")]
    pub max_total_time_secs: u64,

    /// Retries after a failed page fetch (total attempts = retries + 1)
    pub retries: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: 20,
            max_depth: 2,
            max_content_length: 40_000,
            page_timeout_secs: 8,
            max_total_time_secs: 60,
            retries: 2,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "modmap".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Structuring service configuration
///
/// The API key is deliberately absent here: it is read from the
/// `OPENAI_API_KEY` environment variable and never from a config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Model identifier sent to the chat completions endpoint
    pub model: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(rename = "api-base")]
    pub api_base: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Completion token cap
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout for the chat completions call (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            temperature: 0.3,
            max_tokens: 2000,
            request_timeout_secs: 60,
        }
    }
}

/// Multi-URL pipeline configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Hard cap on each seed URL's crawl, including retries (seconds)
    #[serde(rename = "url-timeout-secs")]
    pub url_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            url_timeout_secs: 90,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the markdown report
    #[serde(rename = "summary-path")]
    pub summary_path: String,

    /// Path to the JSON module data
    #[serde(rename = "modules-path")]
    pub modules_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: "./modmap-report.md".to_string(),
            modules_path: "./modmap-modules.json".to_string(),
        }
    }
}
