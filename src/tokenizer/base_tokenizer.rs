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

/// Character offset pair into the cleaned text, half-open `[start, end)`.
/// Framing and padding slots of an [`EncodedInput`] use [`NULL_OFFSET`].
pub type CharOffset = (i64, i64);

pub const NULL_OFFSET: CharOffset = (-1, -1);

/// Mirrors the teacher crate's truncation strategy enumeration. `encode`
/// always behaves as `OnlyFirst` (tail-truncates the single sequence);
/// `encode_pair` always behaves as `LongestFirst` (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationStrategy {
    LongestFirst,
    OnlyFirst,
    OnlySecond,
    DoNotTruncate,
}

/// Output of [`crate::tokenizer::DomainTokenizer::tokenize`]: an ordered
/// sequence of sub-word strings with their character spans into the
/// cleaned text, plus a parallel special-tokens mask (always all-zero,
/// since `tokenize` never inserts framing tokens).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenizedOutput {
    pub tokens: Vec<String>,
    pub offsets: Vec<(usize, usize)>,
    pub special_tokens_mask: Vec<u8>,
}

/// Output of `encode`/`encode_pair`: parallel vectors of length
/// `max_sequence_length` (§3).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncodedInput {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
    pub offsets: Vec<CharOffset>,
    pub overflow_ids: Vec<i64>,
    pub num_truncated: usize,
}
