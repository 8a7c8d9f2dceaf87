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

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::embedder::ClaimEmbedder;
use crate::error::Result;
use crate::model::{ParsedClaim, TechnicalFeature};

const MATCH_THRESHOLD: f64 = 0.80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeRelationship {
    Equivalent,
    AContainsB,
    BContainsA,
    Overlapping,
    Disjoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeComparison {
    pub relationship: ScopeRelationship,
    pub shared: usize,
    pub unique_to_a: usize,
    pub unique_to_b: usize,
    pub overlap_score: f64,
    pub analysis_text: String,
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| (*x as f64) * (*y as f64)).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn embeddings_for(
    features: &[TechnicalFeature],
    embedder: &dyn ClaimEmbedder,
    cancellation: &CancellationToken,
) -> Result<Vec<Vec<f32>>> {
    features
        .par_iter()
        .map(|feature| {
            cancellation.check()?;
            if let Some(embedding) = &feature.embedding {
                Ok(embedding.clone())
            } else {
                embedder.embed_feature(feature, cancellation)
            }
        })
        .collect()
}

/// §4.5 "Compare scopes": greedy bipartite matching over a cosine
/// similarity matrix of feature embeddings. A deliberate choice over the
/// Hungarian algorithm (§9) - deterministic and linear in the number of
/// candidate pairs above threshold.
pub fn compare_scopes(
    a: &ParsedClaim,
    b: &ParsedClaim,
    embedder: &dyn ClaimEmbedder,
    cancellation: &CancellationToken,
) -> Result<ScopeComparison> {
    if a.features.is_empty() && b.features.is_empty() {
        return Ok(ScopeComparison {
            relationship: ScopeRelationship::Equivalent,
            shared: 0,
            unique_to_a: 0,
            unique_to_b: 0,
            overlap_score: 1.0,
            analysis_text: "both claims recite no technical features".to_string(),
        });
    }

    let embeddings_a = embeddings_for(&a.features, embedder, cancellation)?;
    let embeddings_b = embeddings_for(&b.features, embedder, cancellation)?;

    let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
    for (i, emb_a) in embeddings_a.iter().enumerate() {
        for (j, emb_b) in embeddings_b.iter().enumerate() {
            let similarity = cosine(emb_a, emb_b);
            if similarity >= MATCH_THRESHOLD {
                candidates.push((i, j, similarity));
            }
        }
    }
    candidates.sort_by(|x, y| y.2.partial_cmp(&x.2).unwrap());

    let mut matched_a = vec![false; embeddings_a.len()];
    let mut matched_b = vec![false; embeddings_b.len()];
    let mut shared = 0usize;
    for (i, j, _) in candidates {
        if !matched_a[i] && !matched_b[j] {
            matched_a[i] = true;
            matched_b[j] = true;
            shared += 1;
        }
    }

    let len_a = a.features.len();
    let len_b = b.features.len();
    let frac_a = if len_a == 0 { 1.0 } else { shared as f64 / len_a as f64 };
    let frac_b = if len_b == 0 { 1.0 } else { shared as f64 / len_b as f64 };
    let overlap_score = if len_a.max(len_b) == 0 {
        1.0
    } else {
        shared as f64 / len_a.max(len_b) as f64
    };

    let relationship = if frac_a >= 0.90 && frac_b >= 0.90 {
        ScopeRelationship::Equivalent
    } else if frac_a >= 0.90 && frac_b < 0.90 {
        ScopeRelationship::AContainsB
    } else if frac_b >= 0.90 && frac_a < 0.90 {
        ScopeRelationship::BContainsA
    } else if overlap_score > 0.0 {
        ScopeRelationship::Overlapping
    } else {
        ScopeRelationship::Disjoint
    };

    let unique_to_a = len_a.saturating_sub(shared);
    let unique_to_b = len_b.saturating_sub(shared);

    let analysis_text = match relationship {
        ScopeRelationship::Equivalent => {
            "claims recite substantially the same technical features".to_string()
        }
        ScopeRelationship::AContainsB => {
            format!("claim A's {} features are fully matched within claim B's {}; B falls within A's scope", len_a, len_b)
        }
        ScopeRelationship::BContainsA => {
            format!("claim B's {} features are fully matched within claim A's {}; A falls within B's scope", len_b, len_a)
        }
        ScopeRelationship::Overlapping => format!(
            "{} of {} (A) and {} (B) features overlap; {} unique to A, {} unique to B",
            shared, len_a, len_b, unique_to_a, unique_to_b
        ),
        ScopeRelationship::Disjoint => "claims share no matching technical features".to_string(),
    };

    Ok(ScopeComparison {
        relationship,
        shared,
        unique_to_a,
        unique_to_b,
        overlap_score,
        analysis_text,
    })
}
