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

//! # Tokenizer
//!
//! A WordPiece tokenizer augmented with chemical-entity pre-tokenization
//! (§4.1). Byte-exact... rather, char-exact offset tracking is preserved
//! end to end: every sub-word piece carries the character span of the
//! original (cleaned) text it was derived from.

mod base_tokenizer;
mod chemical_pretokenizer;
mod domain_tokenizer;
pub(crate) mod tokenization_utils;

pub use base_tokenizer::{CharOffset, EncodedInput, TokenizedOutput, TruncationStrategy, NULL_OFFSET};
pub use domain_tokenizer::DomainTokenizer;
