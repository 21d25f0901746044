//! Distance between two normalized score vectors.
//!
//! Two scoring modes are supported:
//!
//! - `symmetric`: plain Euclidean distance, `sqrt(sum(delta^2))`.
//! - `asymmetric-penalty`: with `delta = comparison - affected`, a candidate
//!   that scores higher than the affected company pays `delta^2`, one that
//!   scores equal or lower pays `|delta|^1.5`. Candidates that outperform
//!   the affected company are pushed further away.
//!
//! Both modes take the square root of the accumulated sum. Lower is closer.

use super::NormalizedScoreVector;
use crate::error::{PartnerError, Result};
use clap::ValueEnum;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Exponent applied when the candidate outperforms the affected company.
pub const OUTPERFORM_EXPONENT: f64 = 2.0;
/// Exponent applied when the candidate scores equal or lower.
pub const UNDERPERFORM_EXPONENT: f64 = 1.5;

/// Distance semantics used by the ranking engine.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringMode {
    /// Euclidean distance, identical penalty in both directions
    Symmetric,
    /// Quadratic penalty for outperforming, softer penalty otherwise
    #[default]
    AsymmetricPenalty,
}

impl ScoringMode {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::AsymmetricPenalty => "asymmetric-penalty",
        }
    }

    /// Contribution of a single factor before weighting.
    #[must_use]
    pub fn factor_term(self, affected: f64, comparison: f64) -> f64 {
        let delta = comparison - affected;
        match self {
            Self::Symmetric => delta * delta,
            // Strict `>`: equal scores take the softer branch
            Self::AsymmetricPenalty if delta > 0.0 => delta.powf(OUTPERFORM_EXPONENT),
            Self::AsymmetricPenalty => delta.abs().powf(UNDERPERFORM_EXPONENT),
        }
    }
}

impl std::fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-factor multipliers. Factors without an entry weigh 1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FactorWeights(pub IndexMap<String, f64>);

impl FactorWeights {
    #[must_use]
    pub fn weight(&self, factor: &str) -> f64 {
        self.0.get(factor).copied().unwrap_or(1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Unweighted distance between two vectors over the selected factors.
pub fn distance(
    affected: &NormalizedScoreVector,
    comparison: &NormalizedScoreVector,
    factors: &[String],
    mode: ScoringMode,
) -> Result<f64> {
    weighted_distance(affected, comparison, factors, mode, &FactorWeights::default())
}

/// Distance with per-factor weights applied to each accumulated term.
///
/// Fails if `factors` is empty or a factor is missing from either vector.
pub fn weighted_distance(
    affected: &NormalizedScoreVector,
    comparison: &NormalizedScoreVector,
    factors: &[String],
    mode: ScoringMode,
    weights: &FactorWeights,
) -> Result<f64> {
    if factors.is_empty() {
        return Err(PartnerError::invalid_factor(
            "",
            "at least one factor must be selected",
        ));
    }

    let mut sum = 0.0;
    for factor in factors {
        let a = affected.get(factor).ok_or_else(|| {
            PartnerError::invalid_factor(factor, "missing from affected company scores")
        })?;
        let c = comparison.get(factor).ok_or_else(|| {
            PartnerError::invalid_factor(factor, "missing from comparison company scores")
        })?;
        sum += weights.weight(factor) * mode.factor_term(a, c);
    }

    Ok(sum.sqrt())
}
