// Copyright 2018 The Open AI Team Authors, The Google AI Language Team Authors
// Copyright 2018 The HuggingFace Inc. team.
// Copyright 2019-2020 Guillaume Becquin
// Copyright 2020 Maarten van Gompel
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Claim parser (§4.4)
//!
//! Orchestrates tokenizer -> backend -> BIO decoder -> rule extractors
//! into a [`ParsedClaim`], and a set of claims into a [`ParsedClaimSet`]
//! with its dependency tree. Holds borrowed/shared handles to its
//! collaborators; it neither owns nor creates the backend or tokenizer.

mod classify;

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;

use crate::backend::{Backend, BackendRequest, TaskHead};
use crate::bio::{correct_bio, extract_spans, spans_to_char_offsets};
use crate::cancellation::CancellationToken;
use crate::config::ParserConfig;
use crate::error::{CoreError, Result};
use crate::logging::warn_partial_decode;
use crate::model::{ClaimType, DependencyTree, ParsedClaim, ParsedClaimSet, TechnicalFeature};
use crate::rules;
use crate::tokenizer::DomainTokenizer;

pub use classify::classify_by_rules;

pub struct ClaimParser {
    tokenizer: Arc<DomainTokenizer>,
    backend: Arc<dyn Backend>,
    model_id: String,
    config: ParserConfig,
}

const CLASS_ORDER: [ClaimType; 5] = [
    ClaimType::Independent,
    ClaimType::Dependent,
    ClaimType::Method,
    ClaimType::Product,
    ClaimType::Use,
];

impl ClaimParser {
    pub fn new(
        tokenizer: Arc<DomainTokenizer>,
        backend: Arc<dyn Backend>,
        model_id: impl Into<String>,
        config: ParserConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(ClaimParser {
            tokenizer,
            backend,
            model_id: model_id.into(),
            config,
        })
    }

    /// §4.4 `parse_claim`, steps (a)-(l).
    pub fn parse_claim(&self, text: &str, cancellation: &CancellationToken) -> Result<ParsedClaim> {
        cancellation.check()?;

        // (a)
        if text.trim().is_empty() {
            return Err(CoreError::InvalidInput("EMPTY_CLAIM".to_string()));
        }

        // (b)
        let preprocessed = rules::preprocess(text);

        // (c)
        let max_chars = self.tokenizer.options().max_sequence_length;
        let char_count = preprocessed.chars().count();
        let (working_text, truncated) = if char_count > max_chars {
            let truncated_text: String = preprocessed.chars().take(max_chars).collect();
            (truncated_text, true)
        } else {
            (preprocessed, false)
        };

        // (d)
        let tokenized = self.tokenizer.tokenize(&working_text);
        let encoded = self.tokenizer.encode(&working_text);
        let content_len = tokenized
            .tokens
            .len()
            .min(self.tokenizer.options().max_sequence_length.saturating_sub(2));

        cancellation.check()?;

        // (e)
        let request = BackendRequest {
            model_id: self.model_id.clone(),
            task_heads: vec![
                TaskHead::Classification,
                TaskHead::Bio,
                TaskHead::Scope,
                TaskHead::Dependency,
            ],
            input_ids: encoded.input_ids.clone(),
            attention_mask: encoded.attention_mask.clone(),
            token_type_ids: encoded.token_type_ids.clone(),
        };
        let call_started = std::time::Instant::now();
        let response = self.backend.predict(&request, cancellation)?;
        if call_started.elapsed() > self.config.request_timeout {
            return Err(CoreError::Timeout(self.config.request_timeout));
        }

        // rule-based dependency refs are computed eagerly: the
        // classification fallback needs to know whether any exist.
        let rule_deps = rules::extract_dependency_refs(&working_text);
        let has_rule_deps = !rule_deps.claim_numbers.is_empty();

        // (f) classification
        let (claim_type, classification_confidence) = match response.classification() {
            Some(out) if out.probabilities.len() == 5 => {
                let (idx, &prob) = out
                    .probabilities
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .unwrap();
                (CLASS_ORDER[idx], prob as f64)
            }
            _ => {
                warn_partial_decode("classification", 0, "missing or malformed output");
                classify_by_rules(&working_text, has_rule_deps)
            }
        };

        // (f) BIO
        let full_tags = response.bio().map(|b| b.tags);
        let features = match full_tags {
            Some(tags) if tags.len() >= 1 + content_len => {
                let content_tags = &tags[1..1 + content_len];
                let corrected = correct_bio(content_tags);
                let spans = extract_spans(&corrected);
                let decoded = spans_to_char_offsets(
                    &spans,
                    Some(&tokenized.offsets[..content_len]),
                    Some(&tokenized.tokens[..content_len]),
                    &working_text,
                );
                let mut next_id = 1usize;
                decoded
                    .into_iter()
                    .filter_map(|span| {
                        let raw = working_text.get(
                            char_to_byte(&working_text, span.start_char)
                                ..char_to_byte(&working_text, span.end_char),
                        )?;
                        let trimmed = raw.trim();
                        if trimmed.is_empty() {
                            return None;
                        }
                        let id = format!("f{}", next_id);
                        next_id += 1;
                        Some(TechnicalFeature {
                            id,
                            text: trimmed.to_string(),
                            start_offset: span.start_char,
                            end_offset: span.end_char,
                            feature_type: span.category,
                            is_essential: false,
                            chemical_entities: Vec::new(),
                            numerical_ranges: Vec::new(),
                            embedding: None,
                        })
                    })
                    .collect::<Vec<_>>()
            }
            _ => {
                warn_partial_decode("bio", 0, "missing or malformed output");
                Vec::new()
            }
        };

        // (f) scope
        let scope_score = match response.scope() {
            Some(out) if out.score.is_finite() => out.score.clamp(0.0, 1.0),
            _ => {
                warn_partial_decode("scope", 0, "missing or malformed output");
                0.5
            }
        };

        // (f) dependency (model head)
        let model_deps: Vec<u32> = response
            .dependency()
            .map(|d| {
                d.references
                    .into_iter()
                    .filter(|&v| v > 0)
                    .map(|v| v as u32)
                    .collect()
            })
            .unwrap_or_default();

        // (g) rule-based extraction
        let claim_number = rules::extract_claim_number(&working_text);
        let transitional = rules::detect_transitional_phrase(&working_text);
        let (preamble, body) = rules::split_preamble_body(&working_text, &transitional.phrase);
        let markush_groups = rules::extract_markush_groups(&working_text);

        // (h) merge dependency lists
        let mut depends_on: Vec<u32> = model_deps
            .into_iter()
            .chain(rule_deps.claim_numbers.into_iter())
            .filter(|&n| n > 0 && n != claim_number)
            .collect();
        depends_on.sort_unstable();
        depends_on.dedup();

        // (i) refine claim type
        let refined_type = if !depends_on.is_empty() && matches!(claim_type, ClaimType::Independent)
        {
            ClaimType::Dependent
        } else {
            claim_type
        };

        // (j) enrich features
        let mut features = features;
        for feature in &mut features {
            feature.chemical_entities = rules::find_chemical_entities(&feature.text);
            feature.numerical_ranges = rules::extract_numerical_ranges(&feature.text);
        }

        // (k) essentiality
        let is_essential = matches!(
            refined_type,
            ClaimType::Independent | ClaimType::Method | ClaimType::Product | ClaimType::Use
        );
        for feature in &mut features {
            feature.is_essential = is_essential;
        }

        // (l) truncation penalty
        let confidence = if truncated {
            (classification_confidence * 0.8).clamp(0.0001, 1.0)
        } else {
            classification_confidence.clamp(0.0001, 1.0)
        };

        Ok(ParsedClaim {
            claim_number,
            claim_type: refined_type,
            preamble,
            transitional_phrase: transitional.phrase,
            transitional_type: transitional.transitional_type,
            body,
            features,
            depends_on,
            scope_score,
            markush_groups,
            confidence,
            truncated,
        })
    }

    /// §4.4 `parse_claim_set`: claims are parsed independently (in
    /// parallel for throughput, §5) then reassembled in input order,
    /// zero-numbered claims are assigned `index + 1`, and the
    /// dependency tree is built from the original texts.
    pub fn parse_claim_set(
        &self,
        texts: &[String],
        cancellation: &CancellationToken,
    ) -> Result<ParsedClaimSet> {
        if texts.is_empty() {
            return Ok(ParsedClaimSet {
                claims: Vec::new(),
                dependency_tree: DependencyTree::default(),
                independent_claims: Vec::new(),
                claim_count: 0,
            });
        }

        let results: Vec<(usize, Result<ParsedClaim>)> = texts
            .par_iter()
            .enumerate()
            .map(|(index, text)| (index, self.parse_claim(text, cancellation)))
            .collect();

        let mut claims: Vec<ParsedClaim> = Vec::new();
        for (index, result) in results.into_iter() {
            match result {
                Ok(mut claim) => {
                    if claim.claim_number == 0 {
                        claim.claim_number = (index + 1) as u32;
                    }
                    claims.push(claim);
                }
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping claim that failed to parse");
                }
            }
        }
        claims.sort_by_key(|c| c.claim_number);

        let dependency_tree = analyze_dependency(texts);

        let mut independent_claims: Vec<u32> = claims
            .iter()
            .filter(|c| c.depends_on.is_empty())
            .map(|c| c.claim_number)
            .collect();
        independent_claims.sort_unstable();

        let claim_count = claims.len();
        Ok(ParsedClaimSet {
            claims,
            dependency_tree,
            independent_claims,
            claim_count,
        })
    }
}

/// §4.4 `analyze_dependency`: extracts each text's claim number (falling
/// back to its 1-based index), builds the parent->children map, and
/// computes BFS-longest-path depth defensively capped at `|claims|`
/// (§9 cyclic-dependency note).
pub fn analyze_dependency(texts: &[String]) -> DependencyTree {
    if texts.is_empty() {
        return DependencyTree::default();
    }

    let mut numbers = Vec::with_capacity(texts.len());
    let mut refs_by_claim: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for (index, text) in texts.iter().enumerate() {
        let preprocessed = rules::preprocess(text);
        let mut number = rules::extract_claim_number(&preprocessed);
        if number == 0 {
            number = (index + 1) as u32;
        }
        numbers.push(number);
        let deps = rules::extract_dependency_refs(&preprocessed);
        refs_by_claim.insert(
            number,
            deps.claim_numbers.into_iter().filter(|&n| n != number).collect(),
        );
    }

    let known: std::collections::BTreeSet<u32> = numbers.iter().copied().collect();
    let mut children: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    let mut has_parent: std::collections::BTreeSet<u32> = std::collections::BTreeSet::new();

    for (&child, parents) in &refs_by_claim {
        for &parent in parents {
            if known.contains(&parent) {
                children.entry(parent).or_default().push(child);
                has_parent.insert(child);
            }
        }
    }
    for list in children.values_mut() {
        list.sort_unstable();
        list.dedup();
    }

    let mut roots: Vec<u32> = numbers
        .iter()
        .copied()
        .filter(|n| !has_parent.contains(n))
        .collect();
    roots.sort_unstable();
    roots.dedup();

    let depth = bfs_depth(&roots, &children, numbers.len());

    DependencyTree {
        roots,
        children,
        depth,
    }
}

fn bfs_depth(roots: &[u32], children: &BTreeMap<u32, Vec<u32>>, claim_count: usize) -> usize {
    if roots.is_empty() {
        return 0;
    }
    let mut depth = 0usize;
    let mut frontier: Vec<u32> = roots.to_vec();
    let mut visited: std::collections::BTreeSet<u32> = frontier.iter().copied().collect();
    let mut steps = 0usize;
    while !frontier.is_empty() && steps <= claim_count {
        depth += 1;
        let mut next = Vec::new();
        for node in &frontier {
            if let Some(kids) = children.get(node) {
                for &kid in kids {
                    if visited.insert(kid) {
                        next.push(kid);
                    }
                }
            }
        }
        frontier = next;
        steps += 1;
    }
    depth
}

fn char_to_byte(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendResponse, TaskHead};
    use crate::config::TokenizerOptions;
    use crate::model::TransitionalType;
    use crate::vocab::{SpecialTokens, WordPieceVocab};
    use std::collections::HashMap;

    struct StubBackend {
        probabilities: Vec<f32>,
    }

    impl Backend for StubBackend {
        fn predict(
            &self,
            _request: &BackendRequest,
            _cancellation: &CancellationToken,
        ) -> Result<BackendResponse> {
            let mut task_outputs = HashMap::new();
            task_outputs.insert(
                TaskHead::Classification.name().to_string(),
                serde_json::to_vec(&serde_json::json!({ "probabilities": self.probabilities }))
                    .unwrap(),
            );
            Ok(BackendResponse { task_outputs })
        }
    }

    fn build_tokenizer() -> Arc<DomainTokenizer> {
        let mut lines: Vec<String> = vec!["[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]"]
            .into_iter()
            .map(String::from)
            .collect();
        for word in "a pharmaceutical composition comprising compound formula of and carrier acceptable I claim 1".split_whitespace() {
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

    #[test]
    fn rejects_empty_claim() {
        let parser = ClaimParser::new(
            build_tokenizer(),
            Arc::new(StubBackend {
                probabilities: vec![0.85, 0.05, 0.03, 0.05, 0.02],
            }),
            "model-v1",
            ParserConfig::default(),
        )
        .unwrap();
        let result = parser.parse_claim("   ", &CancellationToken::new());
        assert!(result.is_err());
    }

    #[test]
    fn scenario_one_independent_pharmaceutical_claim() {
        let parser = ClaimParser::new(
            build_tokenizer(),
            Arc::new(StubBackend {
                probabilities: vec![0.85, 0.05, 0.03, 0.05, 0.02],
            }),
            "model-v1",
            ParserConfig::default(),
        )
        .unwrap();
        let claim = parser
            .parse_claim(
                "1. A pharmaceutical composition comprising a compound of formula (I) and a pharmaceutically acceptable carrier.",
                &CancellationToken::new(),
            )
            .unwrap();
        assert_eq!(claim.claim_number, 1);
        assert!(matches!(claim.claim_type, ClaimType::Independent));
        assert!(matches!(claim.transitional_type, TransitionalType::Comprising));
        assert!(claim.preamble.contains("pharmaceutical composition"));
        assert!(claim.depends_on.is_empty());
    }
}
