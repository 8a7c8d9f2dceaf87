use std::sync::Arc;

use claim_scope_core::model::{
    ClaimType, DependencyTree, FeatureType, MarkushGroup, NumericalRange, ParsedClaim,
    ParsedClaimSet, TechnicalFeature, TransitionalType,
};
use claim_scope_core::{CancellationToken, ClaimEmbedder, CoreError};
use claim_scope_core::scope::{GapSeverity, ScopeAnalyzer, ScopeRelationship};

struct OneHotEmbedder;

impl ClaimEmbedder for OneHotEmbedder {
    fn embed_feature(
        &self,
        feature: &TechnicalFeature,
        _cancellation: &CancellationToken,
    ) -> Result<Vec<f32>, CoreError> {
        let dims = ["f1", "f2", "f3", "f4", "f5"];
        let mut vector = vec![0.0f32; dims.len()];
        if let Some(idx) = dims.iter().position(|&d| d == feature.text) {
            vector[idx] = 1.0;
        }
        Ok(vector)
    }

    fn embed_claim(
        &self,
        _claim: &ParsedClaim,
        _cancellation: &CancellationToken,
    ) -> Result<Vec<f32>, CoreError> {
        Ok(Vec::new())
    }
}

fn feature(text: &str) -> TechnicalFeature {
    TechnicalFeature {
        id: text.to_string(),
        text: text.to_string(),
        start_offset: 0,
        end_offset: text.len(),
        feature_type: FeatureType::Structural,
        is_essential: true,
        chemical_entities: Vec::new(),
        numerical_ranges: Vec::new(),
        embedding: None,
    }
}

fn claim(number: u32, claim_type: ClaimType, feature_texts: &[&str]) -> ParsedClaim {
    ParsedClaim {
        claim_number: number,
        claim_type,
        preamble: "A widget".to_string(),
        transitional_phrase: "comprising".to_string(),
        transitional_type: TransitionalType::Comprising,
        body: "features".to_string(),
        features: feature_texts.iter().map(|t| feature(t)).collect(),
        depends_on: Vec::new(),
        scope_score: 0.5,
        markush_groups: Vec::new(),
        confidence: 0.8,
        truncated: false,
    }
}

#[test]
fn claim_a_with_fewer_features_is_contained_in_richer_claim_b() {
    let analyzer = ScopeAnalyzer::new(Arc::new(OneHotEmbedder));
    let a = claim(1, ClaimType::Independent, &["f1", "f2", "f3"]);
    let b = claim(2, ClaimType::Independent, &["f1", "f2", "f3", "f4", "f5"]);

    let comparison = analyzer
        .compare_scopes(&a, &b, &CancellationToken::new())
        .unwrap();

    assert!(matches!(comparison.relationship, ScopeRelationship::AContainsB));
    assert_eq!(comparison.shared, 3);
    assert_eq!(comparison.unique_to_a, 0);
    assert_eq!(comparison.unique_to_b, 2);
}

#[test]
fn disjoint_claims_share_nothing() {
    let analyzer = ScopeAnalyzer::new(Arc::new(OneHotEmbedder));
    let a = claim(1, ClaimType::Independent, &["f1"]);
    let b = claim(2, ClaimType::Independent, &["f4"]);

    let comparison = analyzer
        .compare_scopes(&a, &b, &CancellationToken::new())
        .unwrap();

    assert!(matches!(comparison.relationship, ScopeRelationship::Disjoint));
    assert_eq!(comparison.shared, 0);
}

#[test]
fn product_only_claim_set_flags_missing_categories() {
    let analyzer = ScopeAnalyzer::new(Arc::new(OneHotEmbedder));
    let claims = vec![
        claim(1, ClaimType::Product, &["f1"]),
        claim(2, ClaimType::Product, &["f2"]),
    ];
    let claim_set = ParsedClaimSet {
        independent_claims: claims.iter().map(|c| c.claim_number).collect(),
        claim_count: claims.len(),
        claims,
        dependency_tree: DependencyTree::default(),
    };

    let analysis = analyzer
        .analyze_claim_set_scope(&claim_set, &CancellationToken::new())
        .unwrap();

    // product-only claim set: missing "method" must be CRITICAL (spec §8 scenario 7).
    assert!(analysis.gaps.iter().any(
        |g| g.gap_type == "missing_category" && g.description.contains("method") && g.severity == GapSeverity::Critical
    ));
    // "product" itself is present, so no missing_category gap should name it.
    assert!(!analysis
        .gaps
        .iter()
        .any(|g| g.gap_type == "missing_category" && g.description.contains("product")));
    assert_eq!(analysis.category_coverage.get("product"), Some(&2));
}

#[test]
fn thin_closed_markush_group_is_flagged() {
    let analyzer = ScopeAnalyzer::new(Arc::new(OneHotEmbedder));
    let mut narrow_claim = claim(1, ClaimType::Independent, &["f1"]);
    narrow_claim.markush_groups.push(MarkushGroup {
        group_id: "markush-1".to_string(),
        lead_phrase: "selected from the group consisting of".to_string(),
        members: vec!["aspirin".to_string(), "ibuprofen".to_string()],
        is_open_ended: false,
        chemical_type: None,
    });
    let claims = vec![narrow_claim];
    let claim_set = ParsedClaimSet {
        independent_claims: claims.iter().map(|c| c.claim_number).collect(),
        claim_count: claims.len(),
        claims,
        dependency_tree: DependencyTree::default(),
    };

    let analysis = analyzer
        .analyze_claim_set_scope(&claim_set, &CancellationToken::new())
        .unwrap();

    assert!(analysis.gaps.iter().any(|g| g.gap_type
        == "thin_markush_group"
        && g.affected_claims == vec![1]
        && g.severity == GapSeverity::Minor));
}

#[test]
fn wide_numerical_range_widens_breadth_score() {
    let analyzer = ScopeAnalyzer::new(Arc::new(OneHotEmbedder));
    let mut wide_claim = claim(1, ClaimType::Independent, &["f1"]);
    wide_claim.features[0].numerical_ranges.push(NumericalRange {
        parameter: Some("temperature".to_string()),
        lower_bound: Some(10.0),
        upper_bound: Some(200.0),
        unit: Some("C".to_string()),
        is_approximate: false,
    });
    let narrow_claim = claim(2, ClaimType::Independent, &["f1"]);

    let wide_analysis = analyzer.analyze_scope(&wide_claim);
    let narrow_analysis = analyzer.analyze_scope(&narrow_claim);
    assert!(wide_analysis.breadth_score >= narrow_analysis.breadth_score);
}
