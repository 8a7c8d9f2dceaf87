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

//! # Error variants
//!
//! `CoreError` is the single error type surfaced across the tokenizer,
//! rule extractors, BIO decoder, claim parser and scope analyzer. Decode
//! failures for an individual backend task head are recovered locally
//! (see `parser::ClaimParser`) and never raised as `CoreError`; only the
//! kinds that are meant to propagate to the caller are represented here.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("vocabulary file not found: {path}")]
    VocabularyFileNotFound { path: PathBuf },

    #[error("vocabulary validation failed: {0}")]
    VocabularyValidation(String),

    #[error("MODEL_INFERENCE_FAILED: {0}")]
    InferenceFailed(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("operation timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to deserialize JSON: {0}")]
    JsonDeserialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
