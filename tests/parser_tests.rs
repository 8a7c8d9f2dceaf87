use std::collections::HashMap;
use std::sync::Arc;

use claim_scope_core::backend::{Backend, BackendRequest, BackendResponse, TaskHead};
use claim_scope_core::config::TokenizerOptions;
use claim_scope_core::parser::analyze_dependency;
use claim_scope_core::vocab::{SpecialTokens, WordPieceVocab};
use claim_scope_core::{CancellationToken, ClaimParser, ClaimType, DomainTokenizer, ParserConfig};

struct StubBackend {
    probabilities: Vec<f32>,
}

impl Backend for StubBackend {
    fn predict(
        &self,
        _request: &BackendRequest,
        _cancellation: &CancellationToken,
    ) -> claim_scope_core::Result<BackendResponse> {
        let mut task_outputs = HashMap::new();
        task_outputs.insert(
            TaskHead::Classification.name().to_string(),
            serde_json::to_vec(&serde_json::json!({ "probabilities": self.probabilities })).unwrap(),
        );
        Ok(BackendResponse { task_outputs })
    }
}

fn build_tokenizer() -> Arc<DomainTokenizer> {
    let mut lines: Vec<String> = vec!["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
        .into_iter()
        .map(String::from)
        .collect();
    for word in "a pharmaceutical composition comprising compound formula of and carrier acceptable device wherein metal housing the I claim 1 9".split_whitespace() {
        lines.push(word.to_string());
    }
    let special = SpecialTokens {
        cls: "[CLS]".into(),
        sep: "[SEP]".into(),
        unk: "[UNK]".into(),
        pad: "[PAD]".into(),
        mask: "[MASK]".into(),
    };
    let vocab = WordPieceVocab::from_lines(lines, special).unwrap();
    Arc::new(DomainTokenizer::new(vocab, TokenizerOptions::default()).unwrap())
}

fn build_parser(probabilities: Vec<f32>) -> ClaimParser {
    ClaimParser::new(
        build_tokenizer(),
        Arc::new(StubBackend { probabilities }),
        "model-v1",
        ParserConfig::default(),
    )
    .unwrap()
}

#[test]
fn empty_claim_text_is_rejected() {
    let parser = build_parser(vec![0.85, 0.05, 0.03, 0.05, 0.02]);
    let result = parser.parse_claim("   ", &CancellationToken::new());
    assert!(result.is_err());
}

#[test]
fn rule_based_dependency_refines_classification_to_dependent() {
    // classification head votes INDEPENDENT, but a rule-extracted
    // dependency reference must still refine the claim to DEPENDENT (§4.4 step i).
    let parser = build_parser(vec![0.85, 0.05, 0.03, 0.05, 0.02]);
    let claim = parser
        .parse_claim(
            "2. The composition of claim 1, wherein the compound is crystalline.",
            &CancellationToken::new(),
        )
        .unwrap();
    assert!(matches!(claim.claim_type, ClaimType::Dependent));
    assert_eq!(claim.depends_on, vec![1]);
}

#[test]
fn truncated_claims_carry_a_confidence_penalty() {
    let parser = build_parser(vec![0.85, 0.05, 0.03, 0.05, 0.02]);
    let long_text = format!("1. A device wherein {}.", "housing ".repeat(2000));
    let claim = parser
        .parse_claim(&long_text, &CancellationToken::new())
        .unwrap();
    assert!(claim.truncated);
    assert!(claim.confidence <= 0.85 * 0.8 + 1e-9);
}

#[test]
fn parse_claim_set_assigns_fallback_numbers_and_sorts_by_claim_number() {
    let parser = build_parser(vec![0.85, 0.05, 0.03, 0.05, 0.02]);
    let texts = vec![
        "A device wherein the housing is metal.".to_string(),
        "1. A device comprising a housing.".to_string(),
    ];
    let set = parser
        .parse_claim_set(&texts, &CancellationToken::new())
        .unwrap();
    assert_eq!(set.claim_count, 2);
    // the unnumbered claim at index 0 falls back to claim_number = index + 1 = 1,
    // colliding with the explicitly numbered claim 1; both survive, sorted.
    let numbers: Vec<u32> = set.claims.iter().map(|c| c.claim_number).collect();
    assert_eq!(numbers, vec![1, 1]);
}

#[test]
fn analyze_dependency_builds_english_chain_roots_and_depth() {
    let texts = vec![
        "1. A composition comprising a compound of formula (I).".to_string(),
        "2. The composition of claim 1, wherein the compound is crystalline.".to_string(),
        "3. The composition of claim 2, further comprising a diluent.".to_string(),
    ];
    let tree = analyze_dependency(&texts);

    assert_eq!(tree.roots, vec![1]);
    assert_eq!(tree.children.get(&1), Some(&vec![2]));
    assert_eq!(tree.children.get(&2), Some(&vec![3]));
    assert_eq!(tree.depth, 3);
}

#[test]
fn analyze_dependency_chinese_claim_with_two_parents() {
    // §8 scenario 5.
    let texts = vec![
        "1、一种组合物，包含化合物甲。".to_string(),
        "2、一种方法，包含步骤乙。".to_string(),
        "3、如权利要求1或2所述的产品，其特征在于还包含稳定剂。".to_string(),
    ];
    let tree = analyze_dependency(&texts);

    assert_eq!(tree.roots, vec![1, 2]);
    assert_eq!(tree.children.get(&1), Some(&vec![3]));
    assert_eq!(tree.children.get(&2), Some(&vec![3]));
}

#[test]
fn analyze_dependency_broken_reference_is_not_linked() {
    let texts = vec![
        "1. A device comprising a housing.".to_string(),
        "2. The device of claim 9, wherein the housing is metal.".to_string(),
    ];
    let tree = analyze_dependency(&texts);

    assert!(tree.roots.contains(&1));
    assert!(tree.roots.contains(&2));
    assert!(tree.children.values().flatten().all(|&c| c != 2));
}

#[test]
fn analyze_dependency_cyclic_references_do_not_loop_forever() {
    let texts = vec![
        "1. The widget of claim 2, wherein the widget is red.".to_string(),
        "2. The widget of claim 1, wherein the widget is blue.".to_string(),
    ];
    let tree = analyze_dependency(&texts);
    assert!(tree.depth <= texts.len());
}
