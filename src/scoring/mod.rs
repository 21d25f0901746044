//! Normalization, missing-value handling, distance and ranking.
//!
//! The pipeline for one request is:
//!
//! 1. Clean every (company, metric) pair with [`MissingValuePolicy`]
//! 2. Normalize the cleaned values onto 0-100 ([`normalize`])
//! 3. Measure [`weighted_distance`] to the affected company over the selected factors
//! 4. Sort ascending into a [`Ranking`]
//!
//! Data-quality problems never abort a request; they are tallied in
//! [`DataQualityStats`].

mod distance;
mod missing;
mod normalize;
mod ranking;
mod stats;

pub use distance::{
    distance, weighted_distance, FactorWeights, ScoringMode, OUTPERFORM_EXPONENT,
    UNDERPERFORM_EXPONENT,
};
pub use missing::{Cleaned, MissingValuePolicy, Substitution};
pub use normalize::{normalize, normalize_tracked, Normalized, NormalizedScoreVector};
pub use ranking::{CleanedRow, DistanceResult, NormalizedCompany, Ranking, RankingEngine};
pub use stats::{DataQualityStats, MetricQuality};
