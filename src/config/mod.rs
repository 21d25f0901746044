//! Configuration module for partner-finder.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - Named presets for the supported scoring/edge combinations
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use partner_finder::config::{AppConfig, ConfigPreset};
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use a preset
//! let config = AppConfig::from_preset(ConfigPreset::Symmetric);
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .scoring_mode(ScoringMode::Symmetric)
//!     .factor_weight("ESGScore", 2.0)
//!     .limit(Some(5))
//!     .build();
//!
//! // Load from file
//! use partner_finder::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.partner-finder.yaml` file in your project root or `~/.config/partner-finder/`:
//!
//! ```yaml
//! scoring:
//!   mode: symmetric
//! graph:
//!   edge_mode: single-distance-edge
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

// Re-export main types
pub use defaults::{
    ConfigPreset, DEFAULT_BASE_URI, DEFAULT_CATEGORICAL_PLACEHOLDER, DEFAULT_NUMERIC_SUBSTITUTE,
};
pub use types::{
    AppConfig, AppConfigBuilder, DatasetConfig, GraphConfig, OutputConfig, ScoringConfig,
};
pub use validation::{ConfigError, Validatable};

// Re-export file utilities
pub use file::{
    discover_config_file, generate_full_example_config, load_config_file,
    load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.partner-finder.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> serde_json::Result<String> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["scoring", "graph", "metrics", "dataset", "output"] {
            assert!(schema.contains(section), "schema is missing {section}");
        }
    }
}
