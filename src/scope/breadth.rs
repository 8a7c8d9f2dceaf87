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

use serde::{Deserialize, Serialize};

use crate::model::{ParsedClaim, TransitionalType};

use super::ScopeAnalysis;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreadthLevel {
    Broad,
    Moderate,
    Narrow,
    VeryNarrow,
}

pub fn breadth_level(score: f64) -> BreadthLevel {
    if score >= 0.75 {
        BreadthLevel::Broad
    } else if score >= 0.50 {
        BreadthLevel::Moderate
    } else if score >= 0.25 {
        BreadthLevel::Narrow
    } else {
        BreadthLevel::VeryNarrow
    }
}

/// §4.5 breadth score: base from the parsed claim's own scope estimate,
/// adjusted for transitional phrase, feature count, Markush groups and
/// numerical range widths, then clamped to `[0, 1]`.
pub fn compute_breadth_score(claim: &ParsedClaim) -> f64 {
    let mut score = if claim.scope_score > 0.0 {
        claim.scope_score
    } else {
        0.5
    };

    score += match claim.transitional_type {
        TransitionalType::Comprising => 0.10,
        TransitionalType::ConsistingEssentiallyOf => 0.0,
        TransitionalType::ConsistingOf => -0.15,
    };

    let n = claim.features.len();
    score += if n == 0 {
        0.0
    } else if n <= 3 {
        0.05
    } else if n >= 8 {
        -0.10
    } else {
        0.05 - ((n - 3) as f64 / 5.0) * 0.15
    };

    if let Some(group) = claim
        .markush_groups
        .iter()
        .find(|g| g.members.len() >= 5)
    {
        score += 0.08;
        if group.is_open_ended {
            score += 0.05;
        }
    }

    let ranges: Vec<f64> = claim
        .features
        .iter()
        .flat_map(|f| f.numerical_ranges.iter())
        .filter_map(|r| r.width())
        .collect();
    if !ranges.is_empty() {
        let avg_tanh = ranges.iter().map(|w| (w / 100.0).tanh()).sum::<f64>() / ranges.len() as f64;
        score += avg_tanh * 0.05;
    }

    score.clamp(0.0, 1.0)
}

fn markush_expansion(claim: &ParsedClaim) -> u64 {
    if claim.markush_groups.is_empty() {
        0
    } else {
        claim
            .markush_groups
            .iter()
            .map(|g| g.members.len() as u64)
            .product()
    }
}

fn normalized_range_width(claim: &ParsedClaim) -> f64 {
    let widths: Vec<f64> = claim
        .features
        .iter()
        .flat_map(|f| f.numerical_ranges.iter())
        .filter_map(|r| r.width())
        .collect();
    if widths.is_empty() {
        0.0
    } else {
        widths.iter().map(|w| (w / 100.0).tanh()).sum::<f64>() / widths.len() as f64
    }
}

/// Essential-feature text longer than this is flagged as an overly
/// specific key limitation (no fixed threshold given in spec §4.5;
/// chosen to flag features that read like full sentences rather than
/// a recited element).
const LONG_FEATURE_TEXT_CHARS: usize = 100;

pub fn analyze_scope(claim: &ParsedClaim) -> ScopeAnalysis {
    let breadth_score = compute_breadth_score(claim);
    let breadth_level = breadth_level(breadth_score);

    let mut key_limitations = Vec::new();
    let mut broadening_opportunities = Vec::new();
    let mut narrowing_risks = Vec::new();

    if matches!(claim.transitional_type, TransitionalType::ConsistingOf) {
        key_limitations.push(
            "closed transitional phrase (\"consisting of\") excludes unrecited elements"
                .to_string(),
        );
    }
    for range in claim.features.iter().flat_map(|f| f.numerical_ranges.iter()) {
        if let Some(width) = range.width() {
            if width < 10.0 {
                key_limitations.push(format!(
                    "narrow numerical range ({}{})",
                    width,
                    range.unit.as_deref().unwrap_or("")
                ));
            }
        }
    }
    for feature in &claim.features {
        if feature.is_essential && feature.text.chars().count() > LONG_FEATURE_TEXT_CHARS {
            key_limitations.push(format!(
                "long essential feature narrows the claim: \"{}\"",
                feature.text
            ));
        }
    }
    if claim.features.len() >= 8 {
        key_limitations.push(format!(
            "{} recited features narrow the claim substantially",
            claim.features.len()
        ));
    }

    if matches!(claim.transitional_type, TransitionalType::ConsistingOf) {
        broadening_opportunities
            .push("replace \"consisting of\" with \"comprising\" for open coverage".to_string());
    }
    if claim.features.len() >= 6 {
        broadening_opportunities.push(format!(
            "trim recited features ({} present) to broaden scope",
            claim.features.len()
        ));
    }
    if breadth_score < 0.60 && claim.markush_groups.is_empty() {
        broadening_opportunities
            .push("introduce a Markush group to cover functional alternatives".to_string());
    }
    if claim.markush_groups.iter().any(|g| !g.is_open_ended) {
        broadening_opportunities
            .push("open the closed Markush group to an open-ended list".to_string());
    }
    if claim.features.iter().any(|f| {
        f.numerical_ranges
            .iter()
            .any(|r| r.width().map(|w| w < 10.0).unwrap_or(false))
    }) {
        broadening_opportunities.push("widen narrow numerical ranges".to_string());
    }

    if breadth_score >= 0.75 {
        narrowing_risks
            .push("broad claim carries elevated prior-art invalidation risk".to_string());
    }
    if matches!(claim.transitional_type, TransitionalType::Comprising) && claim.features.len() <= 2
    {
        narrowing_risks.push(
            "open transitional phrase with very few features risks a §112 written-description challenge"
                .to_string(),
        );
    }
    if claim
        .markush_groups
        .iter()
        .any(|g| g.members.len() > 20)
    {
        narrowing_risks.push("Markush group exceeding 20 members risks a unity-of-invention objection".to_string());
    }
    if claim.features.len() <= 2 {
        narrowing_risks.push("very few recited features invite a specificity challenge".to_string());
    }

    ScopeAnalysis {
        breadth_score,
        breadth_level,
        feature_count: claim.features.len(),
        markush_expansion: markush_expansion(claim),
        normalized_range_width: normalized_range_width(claim),
        key_limitations,
        broadening_opportunities,
        narrowing_risks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClaimType, FeatureType, TechnicalFeature};

    fn base_claim() -> ParsedClaim {
        ParsedClaim {
            claim_number: 1,
            claim_type: ClaimType::Independent,
            preamble: "A composition".to_string(),
            transitional_phrase: "comprising".to_string(),
            transitional_type: TransitionalType::Comprising,
            body: "a compound".to_string(),
            features: Vec::new(),
            depends_on: Vec::new(),
            scope_score: 0.5,
            markush_groups: Vec::new(),
            confidence: 0.8,
            truncated: false,
        }
    }

    #[test]
    fn comprising_scores_higher_than_consisting_of() {
        let mut comprising = base_claim();
        comprising.transitional_type = TransitionalType::Comprising;
        let mut consisting = base_claim();
        consisting.transitional_type = TransitionalType::ConsistingOf;
        assert!(compute_breadth_score(&comprising) > compute_breadth_score(&consisting));
    }

    #[test]
    fn many_features_narrow_the_claim() {
        let mut claim = base_claim();
        for i in 0..9 {
            claim.features.push(TechnicalFeature {
                id: format!("f{}", i),
                text: "a feature".to_string(),
                start_offset: 0,
                end_offset: 0,
                feature_type: FeatureType::Structural,
                is_essential: true,
                chemical_entities: Vec::new(),
                numerical_ranges: Vec::new(),
                embedding: None,
            });
        }
        let level = breadth_level(compute_breadth_score(&claim));
        assert!(matches!(level, BreadthLevel::Narrow | BreadthLevel::VeryNarrow));
    }

    #[test]
    fn score_is_clamped() {
        let mut claim = base_claim();
        claim.scope_score = 1.0;
        claim.transitional_type = TransitionalType::Comprising;
        assert!(compute_breadth_score(&claim) <= 1.0);
    }
}
