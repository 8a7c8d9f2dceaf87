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

//! # Core data model
//!
//! Pure value objects shared by the claim parser and the scope analyzer.
//! None of these types hold a reference back to the tokenizer, backend or
//! embedder that produced them; they are plain owned data, serializable
//! for the convenience of host services (§6 keeps transports themselves
//! out of scope).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClaimType {
    Independent,
    Dependent,
    Method,
    Product,
    Use,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionalType {
    Comprising,
    ConsistingOf,
    ConsistingEssentiallyOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
    Structural,
    Functional,
    Process,
    Composition,
    Parameter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericalRange {
    pub parameter: Option<String>,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
    pub unit: Option<String>,
    pub is_approximate: bool,
}

impl NumericalRange {
    /// Width used by breadth scoring; falls back to `upper - lower` when
    /// neither bound is unbounded.
    pub fn width(&self) -> Option<f64> {
        match (self.lower_bound, self.upper_bound) {
            (Some(lo), Some(hi)) => Some(hi - lo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkushGroup {
    pub group_id: String,
    pub lead_phrase: String,
    pub members: Vec<String>,
    pub is_open_ended: bool,
    pub chemical_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalFeature {
    pub id: String,
    pub text: String,
    pub start_offset: usize,
    pub end_offset: usize,
    pub feature_type: FeatureType,
    pub is_essential: bool,
    pub chemical_entities: Vec<String>,
    pub numerical_ranges: Vec<NumericalRange>,
    pub embedding: Option<Vec<f32>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedClaim {
    pub claim_number: u32,
    pub claim_type: ClaimType,
    pub preamble: String,
    pub transitional_phrase: String,
    pub transitional_type: TransitionalType,
    pub body: String,
    pub features: Vec<TechnicalFeature>,
    pub depends_on: Vec<u32>,
    pub scope_score: f64,
    pub markush_groups: Vec<MarkushGroup>,
    pub confidence: f64,
    pub truncated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyTree {
    pub roots: Vec<u32>,
    pub children: BTreeMap<u32, Vec<u32>>,
    pub depth: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedClaimSet {
    pub claims: Vec<ParsedClaim>,
    pub dependency_tree: DependencyTree,
    pub independent_claims: Vec<u32>,
    pub claim_count: usize,
}
