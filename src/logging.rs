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

//! # Logging helpers
//!
//! The core does not own a logging sink (§1); it only emits `tracing`
//! events at the points §7 calls out as warnings, so a host service can
//! subscribe a collector of its choice.

/// Emitted whenever a single task head's decode falls back to a
/// rule-based or default value (§7 `PartialDecode`).
pub fn warn_partial_decode(task: &str, claim_number: u32, reason: &str) {
    tracing::warn!(task, claim_number, reason, "partial decode, falling back");
}

/// Emitted when visualization or gap identification degrades to an empty
/// structure rather than failing (§7).
pub fn warn_degraded(stage: &str, reason: &str) {
    tracing::warn!(stage, reason, "degraded to empty result");
}
