//! Configuration validation for partner-finder.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DatasetConfig, GraphConfig, OutputConfig, ScoringConfig};
use crate::error::{PartnerError, Result};
use crate::model::{MetricCatalog, MetricSpec};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Fail with a [`PartnerError::Configuration`] listing every problem.
    fn ensure_valid(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            return Ok(());
        }
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(PartnerError::configuration(joined))
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.metrics.validate());
        errors.extend(self.scoring.validate());
        errors.extend(self.graph.validate());
        errors.extend(self.dataset.validate());
        errors.extend(self.output.validate());

        for (factor, _) in self.scoring.factor_weights.iter() {
            if !self.metrics.contains(factor) {
                errors.push(ConfigError::new(
                    format!("scoring.factor_weights.{factor}"),
                    format!("Weight given for unknown metric '{factor}'"),
                ));
            }
        }

        errors
    }
}

impl Validatable for MetricCatalog {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.is_empty() {
            errors.push(ConfigError::new(
                "metrics",
                "At least one metric must be configured",
            ));
        }

        for (name, definition) in self.iter() {
            let field = format!("metrics.{name}");
            if name.trim().is_empty() {
                errors.push(ConfigError::new(&field, "Metric name must not be blank"));
            }
            match &definition.spec {
                MetricSpec::Range { min, max } => {
                    if !min.is_finite() || !max.is_finite() {
                        errors.push(ConfigError::new(
                            format!("{field}.spec"),
                            format!("Range bounds must be finite, got [{min}, {max}]"),
                        ));
                    } else if min == max {
                        errors.push(ConfigError::new(
                            format!("{field}.spec"),
                            format!("Degenerate range: min and max are both {min}"),
                        ));
                    }
                }
                MetricSpec::Categorical { table, default } => {
                    if !default.is_finite() {
                        errors.push(ConfigError::new(
                            format!("{field}.spec.default"),
                            format!("Default score must be finite, got {default}"),
                        ));
                    }
                    for (label, score) in table {
                        if !score.is_finite() {
                            errors.push(ConfigError::new(
                                format!("{field}.spec.table.{label}"),
                                format!("Score must be finite, got {score}"),
                            ));
                        }
                    }
                }
            }
        }

        errors
    }
}

impl Validatable for ScoringConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (factor, weight) in self.factor_weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                errors.push(ConfigError::new(
                    format!("scoring.factor_weights.{factor}"),
                    format!("Weight must be a non-negative finite number, got {weight}"),
                ));
            }
        }

        if !self.missing.numeric_default.is_finite() {
            errors.push(ConfigError::new(
                "scoring.missing.numeric_default",
                format!(
                    "Numeric substitute must be finite, got {}",
                    self.missing.numeric_default
                ),
            ));
        }

        errors
    }
}

impl Validatable for GraphConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.limit == Some(0) {
            errors.push(ConfigError::new(
                "graph.limit",
                "Limit must be at least 1 (omit it to keep every match)",
            ));
        }
        errors
    }
}

impl Validatable for DatasetConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref path) = self.path {
            if !path.exists() {
                errors.push(ConfigError::new(
                    "dataset.path",
                    format!("Dataset not found: {}", path.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Validate output file path if specified
        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

// ============================================================================
// Tests
// ============================================================================
