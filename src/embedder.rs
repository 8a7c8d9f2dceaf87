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

//! # Embedding contract (§6)
//!
//! The scope analyzer never computes embeddings itself (Non-goals, §1); it
//! consumes an injected [`ClaimEmbedder`]. An empty vector returned for a
//! feature or claim is equivalent to similarity 0 against any counterpart.

use crate::cancellation::CancellationToken;
use crate::error::Result;
use crate::model::{ParsedClaim, TechnicalFeature};

pub trait ClaimEmbedder: Send + Sync {
    fn embed_feature(
        &self,
        feature: &TechnicalFeature,
        cancellation: &CancellationToken,
    ) -> Result<Vec<f32>>;

    fn embed_claim(
        &self,
        claim: &ParsedClaim,
        cancellation: &CancellationToken,
    ) -> Result<Vec<f32>>;
}
