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

//! # Neural backend contract (§6)
//!
//! The backend and its serving infrastructure are external collaborators.
//! The core only depends on the narrow [`Backend`] trait; it never loads,
//! owns, or trains a model.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cancellation::CancellationToken;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskHead {
    Classification,
    Bio,
    Scope,
    Dependency,
}

impl TaskHead {
    pub fn name(&self) -> &'static str {
        match self {
            TaskHead::Classification => "classification",
            TaskHead::Bio => "bio",
            TaskHead::Scope => "scope",
            TaskHead::Dependency => "dependency",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRequest {
    pub model_id: String,
    pub task_heads: Vec<TaskHead>,
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub token_type_ids: Vec<i64>,
}

/// Raw per-task-head JSON payloads, keyed by [`TaskHead::name`]. Missing
/// keys, malformed JSON, or wrong-length vectors are recoverable by the
/// caller (§4.4, §7 `PartialDecode`), never a hard backend error.
#[derive(Debug, Clone, Default)]
pub struct BackendResponse {
    pub task_outputs: HashMap<String, Vec<u8>>,
}

#[derive(Debug, Deserialize)]
pub struct ClassificationOutput {
    pub probabilities: Vec<f32>,
}

#[derive(Debug, Deserialize)]
pub struct BioOutput {
    pub tags: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ScopeOutput {
    pub score: f64,
}

#[derive(Debug, Deserialize)]
pub struct DependencyOutput {
    pub references: Vec<i64>,
}

impl BackendResponse {
    pub fn classification(&self) -> Option<ClassificationOutput> {
        self.task_outputs
            .get(TaskHead::Classification.name())
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }

    pub fn bio(&self) -> Option<BioOutput> {
        self.task_outputs
            .get(TaskHead::Bio.name())
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }

    pub fn scope(&self) -> Option<ScopeOutput> {
        self.task_outputs
            .get(TaskHead::Scope.name())
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }

    pub fn dependency(&self) -> Option<DependencyOutput> {
        self.task_outputs
            .get(TaskHead::Dependency.name())
            .and_then(|bytes| serde_json::from_slice(bytes).ok())
    }
}

/// Capability for an opaque neural backend. Implementations must be safe
/// for concurrent invocation (§5) and must honor the cancellation token.
pub trait Backend: Send + Sync {
    fn predict(
        &self,
        request: &BackendRequest,
        cancellation: &CancellationToken,
    ) -> Result<BackendResponse>;
}
