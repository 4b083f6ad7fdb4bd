use crate::config::types::{CheckerConfig, Config, OutputConfig, StoragePatternEntry, UserAgentConfig};
use crate::ConfigError;
use scraper::Selector;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_checker_config(&config.checker)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_storage_patterns(&config.storage_patterns)?;
    Ok(())
}

/// Validates checker configuration
fn validate_checker_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    for domain in &config.allowed_domains {
        if domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "allowed_domains cannot contain empty entries".to_string(),
            ));
        }
    }

    for selector in &config.content_selectors {
        Selector::parse(selector).map_err(|e| {
            ConfigError::Validation(format!("Invalid content selector '{}': {:?}", selector, e))
        })?;
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.max_concurrent_pages < 1 || config.max_concurrent_pages > 32 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_pages must be between 1 and 32, got {}",
            config.max_concurrent_pages
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user agent name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates storage classification entries
fn validate_storage_patterns(patterns: &[StoragePatternEntry]) -> Result<(), ConfigError> {
    for entry in patterns {
        if entry.pattern.is_empty() {
            return Err(ConfigError::Validation(format!(
                "storage pattern for label '{}' cannot be empty",
                entry.label
            )));
        }

        if entry.label.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "storage pattern '{}' needs a label",
                entry.pattern
            )));
        }
    }

    Ok(())
}
