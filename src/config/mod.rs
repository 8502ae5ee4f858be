//! Configuration module for modmap
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! All keys are optional; defaults match the documented crawl budgets.
//!
//! # Example
//!
//! ```no_run
//! use modmap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("modmap.toml")).unwrap();
//! println!("Crawler will visit at most {} pages", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, ExtractorConfig, OutputConfig, PipelineConfig, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
