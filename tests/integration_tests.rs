//! End-to-end recommendation tests against the built-in demo dataset.
//!
//! These pin the worked scenarios: ranking order, rounded total scores,
//! graph shape for both edge modes, and request-level failures.

use partner_finder::config::{AppConfig, ConfigPreset};
use partner_finder::recommend::{round2, EdgeMode, RecommendationRequest, Recommender};
use partner_finder::scoring::ScoringMode;
use partner_finder::{Dataset, PartnerError, RawValue};

fn factors(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

fn demo_recommender(config: &AppConfig) -> Recommender {
    Recommender::new(config, Dataset::demo()).expect("default config is valid")
}

fn ranked(graph: &partner_finder::RecommendationGraph) -> Vec<(&str, f64)> {
    graph
        .recommendations
        .iter()
        .map(|r| (r.company.as_str(), r.total_score))
        .collect()
}

// ============================================================================
// Worked scenarios
// ============================================================================

mod scenarios {
    use super::*;

    #[test]
    fn samsung_asymmetric_stock_and_esg() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Samsung", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        assert_eq!(ranked(&graph), vec![("Microsoft", 11.18), ("Apple", 25.0)]);
    }

    #[test]
    fn apple_symmetric_stock_and_esg() {
        let recommender = demo_recommender(&AppConfig::from_preset(ConfigPreset::Legacy));
        let graph = recommender
            .compute_recommendations("Apple", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        // Microsoft: -15, -5 -> sqrt(250); Samsung: -20, -15 -> 25
        assert_eq!(ranked(&graph), vec![("Microsoft", 15.81), ("Samsung", 25.0)]);
    }

    #[test]
    fn apple_asymmetric_stock_and_esg() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Apple", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        let expected_ms = (15.0_f64.powf(1.5) + 5.0_f64.powf(1.5)).sqrt();
        let expected_samsung = (20.0_f64.powf(1.5) + 15.0_f64.powf(1.5)).sqrt();
        assert_eq!(
            ranked(&graph),
            vec![
                ("Microsoft", round2(expected_ms)),
                ("Samsung", round2(expected_samsung))
            ]
        );
        assert_eq!(graph.recommendations[0].total_score, 8.32);
        assert_eq!(graph.recommendations[1].total_score, 12.15);
    }

    #[test]
    fn categorical_factor_two_tier_risk() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Apple", &factors(&["RiskLevel"]))
            .unwrap();

        // Medium and High both score 50; Samsung (Low) outperforms at 100
        assert_eq!(ranked(&graph), vec![("Microsoft", 0.0), ("Samsung", 50.0)]);
    }

    #[test]
    fn recommendations_carry_cleaned_raw_values() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Samsung", &factors(&["stockPrice", "GovernanceRating"]))
            .unwrap();

        let microsoft = graph
            .recommendations
            .iter()
            .find(|r| r.company == "Microsoft")
            .unwrap();
        assert_eq!(
            microsoft.values.get("Stock Price"),
            Some(&RawValue::Number(900.0))
        );
        assert_eq!(
            microsoft.values.get("Governance Rating"),
            Some(&RawValue::from("B+"))
        );
        assert_eq!(microsoft.values.len(), 2);
    }
}

// ============================================================================
// Graph assembly
// ============================================================================

mod graph_shape {
    use super::*;

    #[test]
    fn per_factor_edges() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Samsung", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        assert_eq!(graph.affected(), Some("Samsung"));
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 4);
        assert!(graph.edges.iter().all(|e| e.data.source == "Samsung"));
        let labels: Vec<&str> = graph.edges.iter().map(|e| e.data.label.as_str()).collect();
        assert_eq!(labels, vec!["stockPrice", "ESGScore", "stockPrice", "ESGScore"]);
    }

    #[test]
    fn single_distance_edges() {
        let recommender = demo_recommender(&AppConfig::from_preset(ConfigPreset::Symmetric));
        let graph = recommender
            .compute_recommendations("Apple", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].data.target, "Microsoft");
        assert_eq!(graph.edges[0].data.label, "15.81");
        assert_eq!(graph.edges[1].data.label, "25.00");
    }

    #[test]
    fn request_overrides_config_modes() {
        let recommender = demo_recommender(&AppConfig::default());
        let request = RecommendationRequest::new("Apple", ["stockPrice", "ESGScore"])
            .with_mode(Some(ScoringMode::Symmetric))
            .with_edge_mode(Some(EdgeMode::SingleDistanceEdge));
        let result = recommender.recommend(&request).unwrap();

        assert_eq!(result.mode, ScoringMode::Symmetric);
        assert_eq!(result.edge_mode, EdgeMode::SingleDistanceEdge);
        assert_eq!(result.graph.recommendations[0].total_score, 15.81);
    }

    #[test]
    fn graph_serializes_for_front_ends() {
        let recommender = demo_recommender(&AppConfig::default());
        let graph = recommender
            .compute_recommendations("Samsung", &factors(&["ESGScore"]))
            .unwrap();
        let value = serde_json::to_value(&graph).unwrap();

        assert_eq!(value["nodes"][0]["data"]["label"], "Samsung");
        assert_eq!(value["edges"][0]["data"]["label"], "ESGScore");
        assert_eq!(value["recommendations"][0]["company"], "Microsoft");
        assert_eq!(value["recommendations"][0]["ESG Score"], 85.0);
        assert!(value["recommendations"][0]["Total Score"].is_number());
    }
}

// ============================================================================
// Request extras
// ============================================================================

mod request_extras {
    use super::*;

    #[test]
    fn threshold_drops_low_candidates() {
        let recommender = demo_recommender(&AppConfig::default());
        let request = RecommendationRequest::new("Samsung", ["stockPrice", "ESGScore"])
            .with_threshold("ESGScore", 88.0);
        let result = recommender.recommend(&request).unwrap();

        assert_eq!(ranked(&result.graph), vec![("Apple", 25.0)]);
    }

    #[test]
    fn threshold_on_unselected_factor_rejected() {
        let recommender = demo_recommender(&AppConfig::default());
        let request =
            RecommendationRequest::new("Samsung", ["stockPrice"]).with_threshold("ESGScore", 50.0);
        let err = recommender.recommend(&request).unwrap_err();

        assert!(matches!(err, PartnerError::InvalidFactor { ref factor, .. } if factor == "ESGScore"));
    }

    #[test]
    fn limit_keeps_closest() {
        let config = AppConfig::builder().limit(Some(5)).build();
        let recommender = demo_recommender(&config);
        let request =
            RecommendationRequest::new("Samsung", ["stockPrice", "ESGScore"]).with_limit(Some(1));
        let result = recommender.recommend(&request).unwrap();

        assert_eq!(ranked(&result.graph), vec![("Microsoft", 11.18)]);
        assert_eq!(result.graph.nodes.len(), 2);
    }

    #[test]
    fn factor_weights_scale_terms() {
        let config = AppConfig::builder()
            .scoring_mode(ScoringMode::Symmetric)
            .factor_weight("ESGScore", 10.0)
            .build();
        let recommender = demo_recommender(&config);
        let graph = recommender
            .compute_recommendations("Samsung", &factors(&["stockPrice", "ESGScore"]))
            .unwrap();

        // Microsoft: 25 + 10*100 -> sqrt(1025); Apple: 400 + 10*225 -> sqrt(2650)
        assert_eq!(
            ranked(&graph),
            vec![
                ("Microsoft", round2(1025.0_f64.sqrt())),
                ("Apple", round2(2650.0_f64.sqrt()))
            ]
        );
    }
}

// ============================================================================
// Failures
// ============================================================================

mod failures {
    use super::*;

    #[test]
    fn unknown_company_is_not_found() {
        let recommender = demo_recommender(&AppConfig::default());
        let err = recommender
            .compute_recommendations("Nokia", &factors(&["ESGScore"]))
            .unwrap_err();

        assert!(matches!(err, PartnerError::NotFound { ref company } if company == "Nokia"));
        assert!(err.is_request_error());
    }

    #[test]
    fn unknown_factor_is_invalid() {
        let recommender = demo_recommender(&AppConfig::default());
        let err = recommender
            .compute_recommendations("Apple", &factors(&["Revenue"]))
            .unwrap_err();
        assert!(matches!(err, PartnerError::InvalidFactor { .. }));
    }

    #[test]
    fn degenerate_catalog_rejected_at_startup() {
        use partner_finder::model::{MetricCatalog, MetricDefinition, MetricSpec};

        let catalog = MetricCatalog::builtin().with_metric(
            "ESGScore",
            MetricDefinition::new("ESG Score", MetricSpec::range(50.0, 50.0)),
        );
        let config = AppConfig::builder().metrics(catalog).build();
        let err = Recommender::new(&config, Dataset::demo()).unwrap_err();
        assert!(matches!(err, PartnerError::Configuration(_)));
    }

    #[test]
    fn single_company_dataset_yields_empty_graph() {
        let dataset = Dataset::from_records([
            partner_finder::CompanyRecord::new("Solo").with_value("ESGScore", 50)
        ]);
        let recommender = Recommender::new(&AppConfig::default(), dataset).unwrap();
        let graph = recommender
            .compute_recommendations("Solo", &factors(&["ESGScore"]))
            .unwrap();

        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
        assert_eq!(graph.nodes.len(), 1);
    }
}

// ============================================================================
// Dataset reload
// ============================================================================

#[test]
fn reload_swaps_snapshot_for_later_requests() {
    let recommender = demo_recommender(&AppConfig::default());
    let before = recommender.dataset();

    let replacement = Dataset::from_records([
        partner_finder::CompanyRecord::new("Samsung").with_value("ESGScore", 75),
        partner_finder::CompanyRecord::new("Siemens").with_value("ESGScore", 80),
    ]);
    let previous = recommender.reload(replacement);

    assert_eq!(previous.len(), before.len());
    assert_eq!(before.len(), 3);
    let graph = recommender
        .compute_recommendations("Samsung", &factors(&["ESGScore"]))
        .unwrap();
    assert_eq!(ranked(&graph), vec![("Siemens", 5.0)]);
}
