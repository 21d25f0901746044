//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".partner-finder.yaml",
    ".partner-finder.yml",
    "partner-finder.yaml",
    "partner-finder.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/partner-finder/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // 1. Use explicit path if provided
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    // 2. Search current directory
    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    // 3. Search git root (if in a repo)
    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    // 4. Search user config directory
    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("partner-finder")) {
            return Some(path);
        }
    }

    // 5. Search home directory
    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override. The metric
    /// catalog is never merged: it comes from the config file alone.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Scoring config
        if other.scoring.mode != defaults.scoring.mode {
            self.scoring.mode = other.scoring.mode;
        }
        for (factor, weight) in other.scoring.factor_weights.iter() {
            self.scoring
                .factor_weights
                .0
                .insert(factor.to_string(), weight);
        }
        if other.scoring.missing != defaults.scoring.missing {
            self.scoring.missing.clone_from(&other.scoring.missing);
        }

        // Graph config
        if other.graph.edge_mode != defaults.graph.edge_mode {
            self.graph.edge_mode = other.graph.edge_mode;
        }
        if other.graph.limit.is_some() {
            self.graph.limit = other.graph.limit;
        }

        // Dataset config
        if other.dataset.path.is_some() {
            self.dataset.path.clone_from(&other.dataset.path);
        }
        if other.dataset.format != defaults.dataset.format {
            self.dataset.format = other.dataset.format;
        }

        // Output config - only override if explicitly set
        if other.output.format != defaults.output.format {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# Partner Finder Configuration File
# ==================================
#
# Place it at:
#   - .partner-finder.yaml in your project root
#   - ~/.config/partner-finder/partner-finder.yaml for global config
#
# CLI arguments always override file settings.

# Scoring configuration
scoring:
  # Mode: asymmetric-penalty (outperformers pay a quadratic penalty) or symmetric
  mode: asymmetric-penalty
  # Per-factor weights, unlisted factors weigh 1.0
  # factor_weights:
  #   ESGScore: 2.0
  missing:
    # Substitute for absent or unparseable numeric values
    numeric_default: 0.0
    # Placeholder label for absent categorical values
    categorical_placeholder: Unknown

# Graph assembly
graph:
  # per-factor-edges or single-distance-edge
  edge_mode: per-factor-edges
  # Keep only the N closest companies
  # limit: 10

# Dataset source (omit path to use the built-in demo dataset)
dataset:
  # path: ./companies.csv
  # Format: csv, json, split-csv
  format: csv

# Output configuration
output:
  # Format: auto, json, csv, table, summary
  format: auto
  # Output file path (omit for stdout)
  # file: recommendations.json
  no_color: false

# Metric catalog (replaces the built-in catalog entirely when present)
# metrics:
#   stockPrice:
#     label: Stock Price
#     spec: { kind: range, min: 0, max: 2000 }
#   RiskLevel:
#     label: Low/Medium Risk
#     column: Risk Level
#     spec:
#       kind: categorical
#       table: { Low: 100 }
#       default: 50
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
