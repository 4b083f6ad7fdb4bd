//! Configuration module for the broken image checker
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, and building the [`RunConfig`] a run is driven by.
//!
//! # Example
//!
//! ```no_run
//! use broken_image_checker::config::{build_run_config, load_config};
//! use std::path::Path;
//!
//! let settings = load_config(Path::new("checker.toml")).unwrap();
//! let run = build_run_config("all", "https://example.com/sitemap.xml", settings).unwrap();
//! println!("Reports go to: {}", run.settings.output.directory);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CheckerConfig, Config, OutputConfig, RunConfig, RunMode, StoragePatternEntry,
    UserAgentConfig, DEFAULT_ALLOWED_DOMAINS, DEFAULT_CONTENT_SELECTORS,
    DEFAULT_OUTPUT_DIRECTORY, DEFAULT_STORAGE_PATTERNS,
};

// Re-export parser functions
pub use parser::{
    apply_defaults, build_run_config, compute_config_hash, load_config, load_config_with_hash,
    parse_config,
};
pub use validation::validate;
