use crate::config::types::{
    Config, CrawlerConfig, ExtractorConfig, OutputConfig, PipelineConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_extractor_config(&config.extractor)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl budget configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 || config.max_pages > 1000 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be between 1 and 1000, got {}",
            config.max_pages
        )));
    }

    if config.max_depth > 10 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= 10, got {}",
            config.max_depth
        )));
    }

    if config.max_content_length < 1 {
        return Err(ConfigError::Validation(
            "max_content_length must be >= 1".to_string(),
        ));
    }

    if config.page_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "page_timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.max_total_time_secs > 3600 {
        return Err(ConfigError::Validation(format!(
            "max_total_time_secs must be <= 3600, got {}",
            config.max_total_time_secs
        )));
    }

    if config.retries > 10 {
        return Err(ConfigError::Validation(format!(
            "retries must be <= 10, got {}",
            config.retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // The name lands in the User-Agent header, so keep it header-safe
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates structuring service configuration
fn validate_extractor_config(config: &ExtractorConfig) -> Result<(), ConfigError> {
    if config.model.is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_base: {}", e)))?;

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    if config.max_tokens < 1 {
        return Err(ConfigError::Validation(
            "max_tokens must be >= 1".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates pipeline configuration
fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.url_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "url_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    if config.modules_path.is_empty() {
        return Err(ConfigError::Validation(
            "modules_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
