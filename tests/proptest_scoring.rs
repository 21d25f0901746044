//! Property-based tests for normalization, distance and ranking invariants.

use partner_finder::config::ScoringConfig;
use partner_finder::model::{CompanyRecord, MetricCatalog, MetricSpec, RawValue};
use partner_finder::scoring::{distance, normalize, NormalizedScoreVector, RankingEngine, ScoringMode};
use proptest::prelude::*;

const FACTORS: [&str; 4] = ["stockPrice", "ESGScore", "GovernanceRating", "RiskLevel"];

fn vector(scores: &[f64]) -> NormalizedScoreVector {
    let mut v = NormalizedScoreVector::new();
    for (factor, score) in FACTORS.iter().zip(scores) {
        v.insert(*factor, *score);
    }
    v
}

fn selection(len: usize) -> Vec<String> {
    FACTORS[..len].iter().map(ToString::to_string).collect()
}

fn any_mode() -> impl Strategy<Value = ScoringMode> {
    prop_oneof![Just(ScoringMode::Symmetric), Just(ScoringMode::AsymmetricPenalty)]
}

proptest! {
    // Arithmetic checks are cheap, so run a broad sample.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn range_endpoints_map_to_0_and_100(min in -1.0e6f64..1.0e6, span in 1.0f64..1.0e6) {
        let max = min + span;
        let spec = MetricSpec::range(min, max);

        prop_assert_eq!(normalize(&RawValue::Number(min), &spec), 0.0);
        prop_assert!((normalize(&RawValue::Number(max), &spec) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn range_is_monotonic(a in 0.0f64..2000.0, b in 0.0f64..2000.0) {
        let spec = MetricSpec::range(0.0, 2000.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(normalize(&RawValue::Number(lo), &spec) <= normalize(&RawValue::Number(hi), &spec));
    }

    #[test]
    fn symmetric_distance_is_symmetric(
        a in prop::collection::vec(0.0f64..100.0, 4),
        b in prop::collection::vec(0.0f64..100.0, 4),
        len in 1usize..=4,
    ) {
        let factors = selection(len);
        let ab = distance(&vector(&a), &vector(&b), &factors, ScoringMode::Symmetric).unwrap();
        let ba = distance(&vector(&b), &vector(&a), &factors, ScoringMode::Symmetric).unwrap();
        prop_assert_eq!(ab, ba);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn self_distance_is_zero(
        a in prop::collection::vec(0.0f64..100.0, 4),
        len in 1usize..=4,
        mode in any_mode(),
    ) {
        let v = vector(&a);
        prop_assert_eq!(distance(&v, &v, &selection(len), mode).unwrap(), 0.0);
    }

    #[test]
    fn outperforming_costs_at_least_underperforming(base in 0u32..=100, delta in 1u32..=100) {
        // Whole numbers keep the deltas exact
        let affected = f64::from(base);
        let delta = f64::from(delta);
        let mode = ScoringMode::AsymmetricPenalty;

        let above = mode.factor_term(affected, affected + delta);
        let below = mode.factor_term(affected, affected - delta);
        prop_assert!(above >= below, "above {} < below {}", above, below);
    }

    #[test]
    fn asymmetric_distance_depends_on_direction(a in 0u32..=100, b in 0u32..=100) {
        // A gap of exactly 1 costs the same either way (1^2 == 1^1.5)
        prop_assume!(a.abs_diff(b) >= 2);
        let factors = selection(1);
        let va = vector(&[f64::from(a)]);
        let vb = vector(&[f64::from(b)]);
        let mode = ScoringMode::AsymmetricPenalty;

        let ab = distance(&va, &vb, &factors, mode).unwrap();
        let ba = distance(&vb, &va, &factors, mode).unwrap();
        prop_assert_ne!(ab, ba);
        // The direction where the candidate scores higher is the costlier one
        if b > a {
            prop_assert!(ab > ba);
        } else {
            prop_assert!(ba > ab);
        }
    }

    #[test]
    fn ranking_is_sorted_and_excludes_affected(
        rows in prop::collection::vec((0.0f64..2000.0, 0.0f64..100.0), 2..40),
        mode in any_mode(),
    ) {
        let records: Vec<CompanyRecord> = rows
            .iter()
            .enumerate()
            .map(|(i, (stock, esg))| {
                CompanyRecord::new(format!("c{i}"))
                    .with_value("stockPrice", *stock)
                    .with_value("ESGScore", *esg)
            })
            .collect();
        let catalog = MetricCatalog::builtin();
        let scoring = ScoringConfig::default();
        let engine = RankingEngine::new(&catalog, &scoring).with_mode(mode);

        let ranking = engine.rank(&records, "c0", &selection(2)).unwrap();

        prop_assert_eq!(ranking.len(), records.len() - 1);
        prop_assert!(ranking.iter().all(|r| r.company != "c0"));
        prop_assert!(ranking.results().windows(2).all(|w| w[0].distance <= w[1].distance));
    }
}
