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

//! # Scope analyzer (§4.5)
//!
//! Consumes a [`crate::embedder::ClaimEmbedder`] capability. Breadth
//! scoring is pure (no embeddings needed); pairwise comparison,
//! claim-set analysis and visualization all require the embedder.

mod breadth;
mod compare;
mod gaps;
mod visualization;

pub use breadth::{compute_breadth_score, BreadthLevel};
pub use compare::{ScopeComparison, ScopeRelationship};
pub use gaps::{GapSeverity, ScopeGap};
pub use visualization::{EdgeType, ScopeVisualizationData, VizEdge, VizNode};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::embedder::ClaimEmbedder;
use crate::error::Result;
use crate::logging::warn_degraded;
use crate::model::{ClaimType, ParsedClaim, ParsedClaimSet};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeAnalysis {
    pub breadth_score: f64,
    pub breadth_level: BreadthLevel,
    pub feature_count: usize,
    pub markush_expansion: u64,
    pub normalized_range_width: f64,
    pub key_limitations: Vec<String>,
    pub broadening_opportunities: Vec<String>,
    pub narrowing_risks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimSetScopeAnalysis {
    pub per_claim: BTreeMap<u32, ScopeAnalysis>,
    pub overall_coverage: f64,
    pub widest: Option<u32>,
    pub narrowest: Option<u32>,
    pub category_coverage: BTreeMap<String, usize>,
    pub gaps: Vec<ScopeGap>,
    pub visualization: ScopeVisualizationData,
}

/// Heuristic claim category used for gap identification and
/// visualization coloring. `ParsedClaim` carries no explicit category
/// field (§3); this derives one from claim type and preamble wording,
/// defaulting to `"unclassified"` (§4.5, §9 Open Question).
pub fn infer_category(claim: &ParsedClaim) -> String {
    match claim.claim_type {
        ClaimType::Method => "method".to_string(),
        ClaimType::Use => "use".to_string(),
        ClaimType::Product => {
            let preamble_lower = claim.preamble.to_lowercase();
            if preamble_lower.contains("composition") || preamble_lower.contains("组合物") {
                "composition".to_string()
            } else {
                "product".to_string()
            }
        }
        ClaimType::Independent | ClaimType::Dependent => "unclassified".to_string(),
    }
}

pub struct ScopeAnalyzer {
    embedder: Arc<dyn ClaimEmbedder>,
}

impl ScopeAnalyzer {
    pub fn new(embedder: Arc<dyn ClaimEmbedder>) -> Self {
        ScopeAnalyzer { embedder }
    }

    /// §4.5 "Analyze scope": pure breadth scoring plus derived
    /// limitations/opportunities/risks, no embeddings required.
    pub fn analyze_scope(&self, claim: &ParsedClaim) -> ScopeAnalysis {
        breadth::analyze_scope(claim)
    }

    /// §4.5 "Compare scopes": greedy bipartite matching over feature
    /// embeddings, with independent per-feature embedding calls fanned
    /// out via rayon (§5) and short-circuited on cancellation.
    pub fn compare_scopes(
        &self,
        a: &ParsedClaim,
        b: &ParsedClaim,
        cancellation: &CancellationToken,
    ) -> Result<ScopeComparison> {
        compare::compare_scopes(a, b, self.embedder.as_ref(), cancellation)
    }

    /// §4.5 "Analyze claim-set scope": per-claim analysis aggregated
    /// with coverage, gap identification and visualization. Gap and
    /// visualization failures degrade to empty structures rather than
    /// propagating (§7).
    pub fn analyze_claim_set_scope(
        &self,
        claim_set: &ParsedClaimSet,
        cancellation: &CancellationToken,
    ) -> Result<ClaimSetScopeAnalysis> {
        let mut per_claim = BTreeMap::new();
        for claim in &claim_set.claims {
            per_claim.insert(claim.claim_number, self.analyze_scope(claim));
        }

        let independent_scores: Vec<f64> = claim_set
            .independent_claims
            .iter()
            .filter_map(|n| per_claim.get(n).map(|a| a.breadth_score))
            .collect();
        let overall_coverage = if independent_scores.is_empty() {
            0.0
        } else {
            independent_scores.iter().sum::<f64>() / independent_scores.len() as f64
        };

        let widest = per_claim
            .iter()
            .max_by(|a, b| a.1.breadth_score.partial_cmp(&b.1.breadth_score).unwrap())
            .map(|(&n, _)| n);
        let narrowest = per_claim
            .iter()
            .min_by(|a, b| a.1.breadth_score.partial_cmp(&b.1.breadth_score).unwrap())
            .map(|(&n, _)| n);

        let mut category_coverage: BTreeMap<String, usize> = BTreeMap::new();
        for claim in &claim_set.claims {
            *category_coverage.entry(infer_category(claim)).or_insert(0) += 1;
        }

        let gaps = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            gaps::identify_gaps(claim_set, &per_claim)
        })) {
            Ok(gaps) => gaps,
            Err(_) => {
                warn_degraded("gap_identification", "internal failure");
                Vec::new()
            }
        };

        let visualization = visualization::generate_visualization(
            claim_set,
            &per_claim,
            self.embedder.as_ref(),
            cancellation,
        )
        .unwrap_or_else(|e| {
            warn_degraded("visualization", &e.to_string());
            ScopeVisualizationData::default()
        });

        Ok(ClaimSetScopeAnalysis {
            per_claim,
            overall_coverage,
            widest,
            narrowest,
            category_coverage,
            gaps,
            visualization,
        })
    }
}
