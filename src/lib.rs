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

//! # claim_scope_core
//!
//! A semantic parser and scope analyzer for chemical patent claims.
//! Tokenization, rule-based extraction and BIO decoding run entirely
//! in-process; claim classification, span tagging and embeddings come
//! from an injected [`backend::Backend`] and [`embedder::ClaimEmbedder`]
//! (§1, §6). The crate never trains, owns, or serves a model itself.
//!
//! The two entry points are [`parser::ClaimParser`], which turns raw
//! claim text into a [`model::ParsedClaim`] / [`model::ParsedClaimSet`],
//! and [`scope::ScopeAnalyzer`], which scores, compares and visualizes
//! the scope of already-parsed claims.

pub mod backend;
pub mod bio;
pub mod cancellation;
pub mod config;
pub mod embedder;
pub mod error;
pub mod logging;
pub mod model;
pub mod parser;
pub mod rules;
pub mod scope;
pub mod tokenizer;
pub mod vocab;

pub use backend::{Backend, BackendRequest, BackendResponse, TaskHead};
pub use cancellation::CancellationToken;
pub use config::{ParserConfig, TokenizerOptions};
pub use embedder::ClaimEmbedder;
pub use error::{CoreError, Result};
pub use model::{
    ClaimType, DependencyTree, FeatureType, MarkushGroup, NumericalRange, ParsedClaim,
    ParsedClaimSet, TechnicalFeature, TransitionalType,
};
pub use parser::ClaimParser;
pub use scope::{ClaimSetScopeAnalysis, ScopeAnalysis, ScopeAnalyzer};
pub use tokenizer::DomainTokenizer;
pub use vocab::{Vocab, WordPieceVocab};
