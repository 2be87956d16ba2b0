use crate::config::types::{CatalogConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_catalog_config(&config.catalog)?;
    validate_output_config(&config.output)?;

    if config.leagues.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "leagues output_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.start_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid start_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "start_url '{}' must use http or https",
            config.start_url
        )));
    }

    if config.per_run_quota < 1 {
        return Err(ConfigError::Validation(format!(
            "per_run_quota must be >= 1, got {}",
            config.per_run_quota
        )));
    }

    if config.page_timeout_secs < 1 || config.asset_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "request timeouts must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
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

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler_version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates catalog selectors and markers
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    Selector::parse(&config.item_selector).map_err(|e| {
        ConfigError::InvalidSelector(format!("'{}': {:?}", config.item_selector, e))
    })?;

    if config.next_link_text.trim().is_empty() {
        return Err(ConfigError::Validation(
            "next_link_text cannot be empty".to_string(),
        ));
    }

    if config.asset_suffix.is_empty() {
        return Err(ConfigError::Validation(
            "asset_suffix cannot be empty".to_string(),
        ));
    }

    if config.start_markers.iter().all(|m| m.is_empty())
        || config.end_markers.iter().all(|m| m.is_empty())
    {
        return Err(ConfigError::Validation(
            "start_markers and end_markers need at least one non-empty marker each".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let paths = [
        ("state_path", &config.state_path),
        ("txt_dir", &config.txt_dir),
        ("html_dir", &config.html_dir),
        ("index_path", &config.index_path),
    ];

    for (name, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}
