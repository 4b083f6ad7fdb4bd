use crate::config::types::{
    Config, RunConfig, RunMode, StoragePatternEntry, DEFAULT_ALLOWED_DOMAINS,
    DEFAULT_CONTENT_SELECTORS, DEFAULT_OUTPUT_DIRECTORY, DEFAULT_STORAGE_PATTERNS,
};
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;
use url::Url;

/// Loads and parses a configuration file from the given path
///
/// Empty lists in the file fall back to the built-in defaults before the
/// result is validated.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use broken_image_checker::config::load_config;
///
/// let config = load_config(Path::new("checker.toml")).unwrap();
/// println!("Allowed domains: {:?}", config.checker.allowed_domains);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses configuration from a TOML string, applying defaults and validation
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    let config = apply_defaults(config);
    validate(&config)?;
    Ok(config)
}

/// Replaces every empty list or path with its built-in default
pub fn apply_defaults(mut config: Config) -> Config {
    if config.checker.allowed_domains.is_empty() {
        config.checker.allowed_domains = DEFAULT_ALLOWED_DOMAINS
            .iter()
            .map(|d| d.to_string())
            .collect();
    }

    if config.checker.content_selectors.is_empty() {
        config.checker.content_selectors = DEFAULT_CONTENT_SELECTORS
            .iter()
            .map(|s| s.to_string())
            .collect();
    }

    if config.output.directory.trim().is_empty() {
        config.output.directory = DEFAULT_OUTPUT_DIRECTORY.to_string();
    }

    if config.storage_patterns.is_empty() {
        config.storage_patterns = DEFAULT_STORAGE_PATTERNS
            .iter()
            .map(|(pattern, label)| StoragePatternEntry {
                pattern: pattern.to_string(),
                label: label.to_string(),
            })
            .collect();
    }

    config
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at start-up so reports can be tied back to the settings that
/// produced them.
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

/// Builds the run configuration from the raw mode and target strings
///
/// # Returns
///
/// * `Ok(RunConfig)` - Mode recognised, target parsed and settings valid
/// * `Err(ConfigError)` - Invalid mode, missing or malformed target, or
///   settings that fail validation
pub fn build_run_config(mode: &str, target: &str, settings: Config) -> Result<RunConfig, ConfigError> {
    let mode: RunMode = mode.parse()?;

    let target = target.trim();
    if target.is_empty() {
        return Err(ConfigError::InvalidUrl(match mode {
            RunMode::Single => "No page URL provided".to_string(),
            RunMode::All => "No sitemap URL provided".to_string(),
        }));
    }

    Url::parse(target)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid target URL '{}': {}", target, e)))?;
    let target = target.to_string();

    let settings = apply_defaults(settings);
    validate(&settings)?;

    Ok(RunConfig {
        mode,
        target,
        settings,
    })
}
