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

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ParsedClaimSet;

use super::breadth::BreadthLevel;
use super::{infer_category, ScopeAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GapSeverity {
    Minor,
    Major,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeGap {
    pub gap_type: String,
    pub severity: GapSeverity,
    pub affected_claims: Vec<u32>,
    pub description: String,
    pub recommendation: String,
}

const EXPECTED_CATEGORIES: [&str; 4] = ["product", "method", "composition", "use"];

/// §4.5 "Identify gaps": five checks over a fully parsed and scored
/// claim set, returned most-severe first.
pub fn identify_gaps(
    claim_set: &ParsedClaimSet,
    per_claim: &BTreeMap<u32, ScopeAnalysis>,
) -> Vec<ScopeGap> {
    let mut gaps = Vec::new();

    let present_categories: BTreeSet<String> =
        claim_set.claims.iter().map(infer_category).collect();
    for category in EXPECTED_CATEGORIES {
        if present_categories.contains(category) {
            continue;
        }
        let severity = if category == "product" || category == "method" {
            GapSeverity::Critical
        } else {
            GapSeverity::Major
        };
        gaps.push(ScopeGap {
            gap_type: "missing_category".to_string(),
            severity,
            affected_claims: Vec::new(),
            description: format!("no claim falls into category: {}", category),
            recommendation: format!("consider adding a {} claim", category),
        });
    }

    let orphans: Vec<u32> = claim_set
        .independent_claims
        .iter()
        .copied()
        .filter(|n| !claim_set.dependency_tree.children.contains_key(n))
        .collect();
    if !orphans.is_empty() {
        gaps.push(ScopeGap {
            gap_type: "orphaned_independent_claim".to_string(),
            severity: GapSeverity::Major,
            affected_claims: orphans,
            description: "independent claim has no dependent claims narrowing it".to_string(),
            recommendation: "add dependent claims covering fallback positions".to_string(),
        });
    }

    let known_numbers: BTreeSet<u32> = claim_set.claims.iter().map(|c| c.claim_number).collect();
    let mut broken_affected = Vec::new();
    for claim in &claim_set.claims {
        if claim
            .depends_on
            .iter()
            .any(|referenced| !known_numbers.contains(referenced))
        {
            broken_affected.push(claim.claim_number);
        }
    }
    if !broken_affected.is_empty() {
        gaps.push(ScopeGap {
            gap_type: "broken_dependency_reference".to_string(),
            severity: GapSeverity::Critical,
            affected_claims: broken_affected,
            description: "claim depends on a claim number absent from the set".to_string(),
            recommendation: "fix the dependency reference or renumber the claim set".to_string(),
        });
    }

    let mut thin_markush_affected = Vec::new();
    for claim in &claim_set.claims {
        if claim
            .markush_groups
            .iter()
            .any(|g| !g.is_open_ended && g.members.len() < 3)
        {
            thin_markush_affected.push(claim.claim_number);
        }
    }
    if !thin_markush_affected.is_empty() {
        gaps.push(ScopeGap {
            gap_type: "thin_markush_group".to_string(),
            severity: GapSeverity::Minor,
            affected_claims: thin_markush_affected,
            description: "closed Markush group recites fewer than three members".to_string(),
            recommendation: "broaden the group or convert to an open-ended list".to_string(),
        });
    }

    let independent_levels: Vec<BreadthLevel> = claim_set
        .independent_claims
        .iter()
        .filter_map(|n| per_claim.get(n).map(|a| a.breadth_level))
        .collect();
    if !independent_levels.is_empty()
        && independent_levels
            .iter()
            .all(|level| matches!(level, BreadthLevel::Narrow | BreadthLevel::VeryNarrow))
    {
        gaps.push(ScopeGap {
            gap_type: "all_claims_narrow".to_string(),
            severity: GapSeverity::Critical,
            affected_claims: claim_set.independent_claims.clone(),
            description: "every independent claim scores narrow or very narrow".to_string(),
            recommendation: "add at least one broader independent claim".to_string(),
        });
    }

    gaps.sort_by(|a, b| b.severity.cmp(&a.severity));
    gaps
}
