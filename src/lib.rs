//! Modmap: a documentation-to-module-map toolkit
//!
//! This crate crawls documentation websites under strict page, depth, time,
//! and content budgets, then asks an OpenAI-compatible model to structure the
//! collected text into product modules and submodules.

pub mod config;
pub mod crawler;
pub mod extractor;
pub mod output;
pub mod pipeline;
pub mod url;

use thiserror::Error;

/// Main error type for modmap operations
#[derive(Debug, Error)]
pub enum ModmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Module extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("None of the provided URLs yielded usable content")]
    NoUsableContent,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors surfaced by the module structuring service
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingApiKey,

    #[error("Model API rate limit or quota reached: {message}")]
    RateLimited { message: String },

    #[error("Model API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("Could not locate a module list in the model response")]
    InvalidResponse,
}

/// Result type alias for modmap operations
pub type Result<T> = std::result::Result<T, ModmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for module extraction operations
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::Crawler;
pub use extractor::{ModuleRecord, OpenAiStructurer, PageContent, Structurer};
pub use output::{ExtractionReport, UrlModules};
pub use pipeline::run_pipeline;
