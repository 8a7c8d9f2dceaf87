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

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CoreError, Result};

/// Standard interface for accessing a token vocabulary, mirroring the
/// teacher crate's `Vocab` trait (`values`/`indices`/`from_file`).
pub trait Vocab {
    fn get_unknown_value(&self) -> &str;
    fn values(&self) -> &HashMap<String, i64>;
    fn indices(&self) -> &HashMap<i64, String>;
    fn token_to_id(&self, token: &str) -> Option<i64> {
        self.values().get(token).copied()
    }
    fn id_to_token(&self, id: i64) -> Option<&str> {
        self.indices().get(&id).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SpecialTokens {
    pub cls: String,
    pub sep: String,
    pub unk: String,
    pub pad: String,
    pub mask: String,
}

/// A flat vocab.txt-backed WordPiece vocabulary: one token per line, line
/// number is the id, duplicates resolved last-occurrence-wins, blank
/// lines still consume an id (§4.1, §6).
#[derive(Debug, Clone)]
pub struct WordPieceVocab {
    values: HashMap<String, i64>,
    indices: HashMap<i64, String>,
    special_tokens: SpecialTokens,
}

impl WordPieceVocab {
    pub fn from_file<P: AsRef<Path>>(path: P, special_tokens: SpecialTokens) -> Result<Self> {
        let lines = read_lines(path.as_ref())?;
        Self::from_lines(lines, special_tokens)
    }

    pub fn from_lines(lines: Vec<String>, special_tokens: SpecialTokens) -> Result<Self> {
        if lines.is_empty() {
            return Err(CoreError::VocabularyValidation(
                "vocabulary file is empty".to_string(),
            ));
        }
        let mut values: HashMap<String, i64> = HashMap::with_capacity(lines.len());
        for (index, line) in lines.into_iter().enumerate() {
            values.insert(line, index as i64);
        }
        for required in [
            &special_tokens.cls,
            &special_tokens.sep,
            &special_tokens.unk,
            &special_tokens.pad,
            &special_tokens.mask,
        ] {
            if !values.contains_key(required) {
                return Err(CoreError::VocabularyValidation(format!(
                    "required special token '{}' missing from vocabulary",
                    required
                )));
            }
        }
        let indices = swap_key_values(&values);
        Ok(WordPieceVocab {
            values,
            indices,
            special_tokens,
        })
    }

    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.special_tokens
    }

    pub fn cls_id(&self) -> i64 {
        self.values[&self.special_tokens.cls]
    }
    pub fn sep_id(&self) -> i64 {
        self.values[&self.special_tokens.sep]
    }
    pub fn unk_id(&self) -> i64 {
        self.values[&self.special_tokens.unk]
    }
    pub fn pad_id(&self) -> i64 {
        self.values[&self.special_tokens.pad]
    }
    pub fn mask_id(&self) -> i64 {
        self.values[&self.special_tokens.mask]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Vocab for WordPieceVocab {
    fn get_unknown_value(&self) -> &str {
        &self.special_tokens.unk
    }
    fn values(&self) -> &HashMap<String, i64> {
        &self.values
    }
    fn indices(&self) -> &HashMap<i64, String> {
        &self.indices
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        lines.push(line);
    }
    Ok(lines)
}

fn swap_key_values(input: &HashMap<String, i64>) -> HashMap<i64, String> {
    input.iter().map(|(k, &v)| (v, k.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_special() -> SpecialTokens {
        SpecialTokens {
            cls: "[CLS]".into(),
            sep: "[SEP]".into(),
            unk: "[UNK]".into(),
            pad: "[PAD]".into(),
            mask: "[MASK]".into(),
        }
    }

    #[test]
    fn rejects_empty_vocab() {
        let result = WordPieceVocab::from_lines(vec![], default_special());
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_special_token() {
        let lines = vec!["[CLS]".into(), "[SEP]".into(), "[UNK]".into(), "[PAD]".into()];
        let result = WordPieceVocab::from_lines(lines, default_special());
        assert!(result.is_err());
    }

    #[test]
    fn last_duplicate_wins() {
        let lines = vec![
            "[PAD]".into(),
            "[UNK]".into(),
            "[CLS]".into(),
            "[SEP]".into(),
            "[MASK]".into(),
            "hello".into(),
            "hello".into(),
        ];
        let vocab = WordPieceVocab::from_lines(lines, default_special()).unwrap();
        assert_eq!(vocab.token_to_id("hello"), Some(6));
    }
}
