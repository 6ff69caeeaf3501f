use crate::config::types::CrawlConfig;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &CrawlConfig) -> Result<(), ConfigError> {
    let scheme = config.seed_url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed URL must use http or https, got '{}'",
            config.seed_url
        )));
    }

    if config.seed_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "seed URL has no host: '{}'",
            config.seed_url
        )));
    }

    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
