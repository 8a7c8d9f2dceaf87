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

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::ClaimType;

static METHOD_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)a\s+method|a\s+process|method\s+for|process\s+for|method\s+of|process\s+of|the\s+method|the\s+process|步骤|方法|工艺").unwrap()
});
static USE_CUES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)use\s+of|the\s+use\s+of|a\s+use\s+of|用途|应用").unwrap());
static PRODUCT_CUES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)a\s+composition|a\s+compound|a\s+formulation|a\s+device|a\s+system|a\s+kit|an\s+apparatus|a\s+pharmaceutical|组合物|化合物|制剂|装置|系统|试剂盒").unwrap()
});

/// §4.4 rule-based classification fallback, used when the backend's
/// classification head decode fails. Confidences follow the canonical
/// scale settled in §9 (0.85/0.75/0.70/0.70/0.60).
pub fn classify_by_rules(text: &str, has_dependency_refs: bool) -> (ClaimType, f64) {
    if has_dependency_refs {
        return (ClaimType::Dependent, 0.85);
    }
    if METHOD_CUES.is_match(text) {
        return (ClaimType::Method, 0.75);
    }
    if USE_CUES.is_match(text) {
        return (ClaimType::Use, 0.70);
    }
    if PRODUCT_CUES.is_match(text) {
        return (ClaimType::Product, 0.70);
    }
    (ClaimType::Independent, 0.60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_refs_take_priority() {
        let (claim_type, confidence) = classify_by_rules("a method for doing X", true);
        assert!(matches!(claim_type, ClaimType::Dependent));
        assert_eq!(confidence, 0.85);
    }

    #[test]
    fn method_cue() {
        let (claim_type, _) = classify_by_rules("A method for synthesizing X", false);
        assert!(matches!(claim_type, ClaimType::Method));
    }

    #[test]
    fn default_is_independent() {
        let (claim_type, confidence) = classify_by_rules("something unrelated entirely", false);
        assert!(matches!(claim_type, ClaimType::Independent));
        assert_eq!(confidence, 0.60);
    }
}
