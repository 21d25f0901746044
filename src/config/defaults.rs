//! Default configurations and presets for partner-finder.
//!
//! Provides named presets for the supported scoring/edge combinations.

use super::types::{AppConfig, GraphConfig, ScoringConfig};
use crate::recommend::EdgeMode;
use crate::scoring::ScoringMode;

// ============================================================================
// Configuration Presets
// ============================================================================

/// Named configuration presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigPreset {
    /// Asymmetric penalty with one edge per selected factor
    Default,
    /// Symmetric distance with a single distance-labeled edge per match
    Symmetric,
    /// Symmetric distance with one edge per selected factor
    Legacy,
}

impl ConfigPreset {
    /// Get the preset name as a string.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Symmetric => "symmetric",
            Self::Legacy => "legacy",
        }
    }

    /// Parse a preset from a string name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "default" | "asymmetric" | "asymmetric-penalty" => Some(Self::Default),
            "symmetric" | "euclidean" => Some(Self::Symmetric),
            "legacy" | "classic" => Some(Self::Legacy),
            _ => None,
        }
    }

    /// Get a description of this preset.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Default => {
                "Penalize candidates that outperform the affected company; one edge per factor"
            }
            Self::Symmetric => "Plain Euclidean distance; one edge per match labeled with the distance",
            Self::Legacy => "Plain Euclidean distance; one edge per factor",
        }
    }

    /// Get all available presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Default, Self::Symmetric, Self::Legacy]
    }
}

impl std::fmt::Display for ConfigPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Preset Implementations
// ============================================================================

impl AppConfig {
    /// Create an `AppConfig` from a named preset.
    #[must_use]
    pub fn from_preset(preset: ConfigPreset) -> Self {
        match preset {
            ConfigPreset::Default => Self::default(),
            ConfigPreset::Symmetric => Self::symmetric_preset(),
            ConfigPreset::Legacy => Self::legacy_preset(),
        }
    }

    /// Symmetric preset.
    ///
    /// - Euclidean distance
    /// - One edge per recommended company carrying the distance
    #[must_use]
    pub fn symmetric_preset() -> Self {
        Self {
            scoring: ScoringConfig {
                mode: ScoringMode::Symmetric,
                ..ScoringConfig::default()
            },
            graph: GraphConfig {
                edge_mode: EdgeMode::SingleDistanceEdge,
                limit: None,
            },
            ..Self::default()
        }
    }

    /// Legacy preset.
    ///
    /// - Euclidean distance
    /// - One edge per (company, factor) pair
    #[must_use]
    pub fn legacy_preset() -> Self {
        Self {
            scoring: ScoringConfig {
                mode: ScoringMode::Symmetric,
                ..ScoringConfig::default()
            },
            graph: GraphConfig {
                edge_mode: EdgeMode::PerFactorEdges,
                limit: None,
            },
            ..Self::default()
        }
    }
}

// ============================================================================
// Default Value Constants
// ============================================================================

/// Default numeric substitute for absent or unparseable values.
pub const DEFAULT_NUMERIC_SUBSTITUTE: f64 = 0.0;

/// Default placeholder label for absent categorical values.
pub const DEFAULT_CATEGORICAL_PLACEHOLDER: &str = "Unknown";

/// Default base URI for the triple export.
pub const DEFAULT_BASE_URI: &str = "http://example.org/";

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        assert_eq!(ConfigPreset::Default.name(), "default");
        assert_eq!(ConfigPreset::Symmetric.name(), "symmetric");
        assert_eq!(ConfigPreset::Legacy.name(), "legacy");
    }

    #[test]
    fn test_preset_from_name() {
        assert_eq!(
            ConfigPreset::from_name("default"),
            Some(ConfigPreset::Default)
        );
        assert_eq!(
            ConfigPreset::from_name("Asymmetric-Penalty"),
            Some(ConfigPreset::Default)
        );
        assert_eq!(
            ConfigPreset::from_name("euclidean"),
            Some(ConfigPreset::Symmetric)
        );
        assert_eq!(ConfigPreset::from_name("legacy"), Some(ConfigPreset::Legacy));
        assert_eq!(ConfigPreset::from_name("invalid"), None);
    }

    #[test]
    fn test_symmetric_preset() {
        let config = AppConfig::symmetric_preset();
        assert_eq!(config.scoring.mode, ScoringMode::Symmetric);
        assert_eq!(config.graph.edge_mode, EdgeMode::SingleDistanceEdge);
    }

    #[test]
    fn test_legacy_preset() {
        let config = AppConfig::legacy_preset();
        assert_eq!(config.scoring.mode, ScoringMode::Symmetric);
        assert_eq!(config.graph.edge_mode, EdgeMode::PerFactorEdges);
    }

    #[test]
    fn test_from_preset() {
        let default = AppConfig::from_preset(ConfigPreset::Default);
        assert_eq!(default.scoring.mode, ScoringMode::AsymmetricPenalty);
        assert_eq!(default.graph.edge_mode, EdgeMode::PerFactorEdges);
        assert_eq!(
            default.scoring.missing.numeric_default,
            DEFAULT_NUMERIC_SUBSTITUTE
        );
        assert_eq!(
            default.scoring.missing.categorical_placeholder,
            DEFAULT_CATEGORICAL_PLACEHOLDER
        );
    }

    #[test]
    fn test_all_presets() {
        assert_eq!(ConfigPreset::all().len(), 3);
    }
}
