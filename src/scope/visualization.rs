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

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::embedder::ClaimEmbedder;
use crate::error::Result;
use crate::model::ParsedClaimSet;

use super::compare::compare_scopes;
use super::{infer_category, ScopeAnalysis, ScopeRelationship};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeType {
    Dependency,
    Containment,
    Overlap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizNode {
    pub claim_number: u32,
    pub label: String,
    pub category: String,
    pub breadth_score: f64,
    pub layer: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizEdge {
    pub from: u32,
    pub to: u32,
    pub edge_type: EdgeType,
    pub weight: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeVisualizationData {
    pub nodes: Vec<VizNode>,
    pub edges: Vec<VizEdge>,
    pub heatmap: Vec<Vec<f64>>,
    pub layers: Vec<Vec<u32>>,
}

/// §4.5 "Generate visualization": dependency edges come from the
/// dependency tree; containment/overlap edges and the similarity
/// heatmap come from pairwise `compare_scopes` over every claim pair.
/// Layers are assigned by BFS from the independent (root) claims.
pub fn generate_visualization(
    claim_set: &ParsedClaimSet,
    per_claim: &BTreeMap<u32, ScopeAnalysis>,
    embedder: &dyn ClaimEmbedder,
    cancellation: &CancellationToken,
) -> Result<ScopeVisualizationData> {
    let numbers: Vec<u32> = claim_set.claims.iter().map(|c| c.claim_number).collect();
    let layers = assign_layers(claim_set, &numbers);
    let layer_of: BTreeMap<u32, usize> = layers
        .iter()
        .enumerate()
        .flat_map(|(depth, claims)| claims.iter().map(move |&n| (n, depth)))
        .collect();

    let nodes: Vec<VizNode> = claim_set
        .claims
        .iter()
        .map(|claim| VizNode {
            claim_number: claim.claim_number,
            label: format!("claim {}", claim.claim_number),
            category: infer_category(claim),
            breadth_score: per_claim
                .get(&claim.claim_number)
                .map(|a| a.breadth_score)
                .unwrap_or(0.0),
            layer: layer_of.get(&claim.claim_number).copied().unwrap_or(0),
        })
        .collect();

    let mut edges = Vec::new();
    for (&parent, children) in &claim_set.dependency_tree.children {
        for &child in children {
            edges.push(VizEdge {
                from: child,
                to: parent,
                edge_type: EdgeType::Dependency,
                weight: 1.0,
            });
        }
    }

    let n = claim_set.claims.len();
    let mut heatmap = vec![vec![0.0; n]; n];
    for i in 0..n {
        heatmap[i][i] = 1.0;
        for j in (i + 1)..n {
            cancellation.check()?;
            let comparison = compare_scopes(
                &claim_set.claims[i],
                &claim_set.claims[j],
                embedder,
                cancellation,
            )?;
            heatmap[i][j] = comparison.overlap_score;
            heatmap[j][i] = comparison.overlap_score;

            let edge_type = match comparison.relationship {
                ScopeRelationship::AContainsB
                | ScopeRelationship::BContainsA
                | ScopeRelationship::Equivalent => Some(EdgeType::Containment),
                ScopeRelationship::Overlapping if comparison.overlap_score >= 0.30 => {
                    Some(EdgeType::Overlap)
                }
                ScopeRelationship::Overlapping | ScopeRelationship::Disjoint => None,
            };
            if let Some(edge_type) = edge_type {
                edges.push(VizEdge {
                    from: claim_set.claims[i].claim_number,
                    to: claim_set.claims[j].claim_number,
                    edge_type,
                    weight: comparison.overlap_score,
                });
            }
        }
    }

    Ok(ScopeVisualizationData {
        nodes,
        edges,
        heatmap,
        layers,
    })
}

fn assign_layers(claim_set: &ParsedClaimSet, numbers: &[u32]) -> Vec<Vec<u32>> {
    let mut visited: BTreeSet<u32> = BTreeSet::new();
    let mut layers: Vec<Vec<u32>> = Vec::new();
    let mut frontier: VecDeque<u32> = claim_set.independent_claims.iter().copied().collect();
    frontier.extend(
        claim_set
            .dependency_tree
            .roots
            .iter()
            .copied()
            .filter(|n| !claim_set.independent_claims.contains(n)),
    );

    while !frontier.is_empty() {
        let mut layer = Vec::new();
        let mut next_frontier = VecDeque::new();
        while let Some(claim_number) = frontier.pop_front() {
            if !visited.insert(claim_number) {
                continue;
            }
            layer.push(claim_number);
            if let Some(children) = claim_set.dependency_tree.children.get(&claim_number) {
                next_frontier.extend(children.iter().copied());
            }
        }
        if !layer.is_empty() {
            layer.sort_unstable();
            layers.push(layer);
        }
        frontier = next_frontier;
        if layers.len() > numbers.len() {
            break;
        }
    }

    let remaining: Vec<u32> = numbers
        .iter()
        .copied()
        .filter(|n| !visited.contains(n))
        .collect();
    if !remaining.is_empty() {
        layers.push(remaining);
    }

    layers
}
