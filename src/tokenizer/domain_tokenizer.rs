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

use crate::config::TokenizerOptions;
use crate::error::Result;
use crate::vocab::{SpecialTokens, Vocab, WordPieceVocab};

use super::base_tokenizer::{CharOffset, EncodedInput, TokenizedOutput, NULL_OFFSET};
use super::chemical_pretokenizer::find_chemical_spans;
use super::tokenization_utils::{
    clean_text, split_into_words, tokenize_wordpiece, truncate_longest_first, truncate_tail,
};

/// WordPiece tokenizer augmented with chemical-entity pre-tokenization
/// (§4.1). Immutable after construction: the vocabulary and options never
/// change, so a `DomainTokenizer` is `Send + Sync` and safe to share
/// across the rayon fan-outs used elsewhere in the crate.
pub struct DomainTokenizer {
    vocab: WordPieceVocab,
    options: TokenizerOptions,
}

impl DomainTokenizer {
    pub fn new(vocab: WordPieceVocab, options: TokenizerOptions) -> Result<Self> {
        options.validate()?;
        Ok(DomainTokenizer { vocab, options })
    }

    pub fn from_vocab_file<P: AsRef<std::path::Path>>(
        path: P,
        options: TokenizerOptions,
    ) -> Result<Self> {
        let special_tokens = SpecialTokens {
            cls: options.cls_token.clone(),
            sep: options.sep_token.clone(),
            unk: options.unk_token.clone(),
            pad: options.pad_token.clone(),
            mask: options.mask_token.clone(),
        };
        let vocab = WordPieceVocab::from_file(path, special_tokens)?;
        Self::new(vocab, options)
    }

    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// §4.1 pipeline steps 1-5.
    pub fn tokenize(&self, text: &str) -> TokenizedOutput {
        let cleaned = clean_text(text, self.options.lowercase, self.options.strip_accents);
        let chemical_spans = find_chemical_spans(&cleaned);
        let words = split_into_words(&cleaned, &chemical_spans);

        let mut tokens = Vec::new();
        let mut offsets = Vec::new();
        for word in &words {
            let pieces = tokenize_wordpiece(&word.text, word.start, &self.vocab);
            for piece in pieces {
                tokens.push(piece.text);
                offsets.push((piece.start, piece.end));
            }
        }
        let special_tokens_mask = vec![0u8; tokens.len()];
        TokenizedOutput {
            tokens,
            offsets,
            special_tokens_mask,
        }
    }

    fn ids_for(&self, tokens: &[String]) -> Vec<i64> {
        tokens
            .iter()
            .map(|t| self.vocab.token_to_id(t).unwrap_or_else(|| self.vocab.unk_id()))
            .collect()
    }

    /// §4.1 `encode`: `[CLS] content [SEP]`, padded, tail-truncated.
    pub fn encode(&self, text: &str) -> EncodedInput {
        let tokenized = self.tokenize(text);
        let max = self.options.max_sequence_length;
        let budget = max.saturating_sub(2);

        let mut ids = self.ids_for(&tokenized.tokens);
        let mut offsets: Vec<CharOffset> = tokenized
            .offsets
            .iter()
            .map(|&(s, e)| (s as i64, e as i64))
            .collect();

        let overflow_ids = truncate_tail(&mut ids, budget);
        truncate_tail(&mut offsets, budget);
        let num_truncated = overflow_ids.len();

        let mut input_ids = Vec::with_capacity(max);
        let mut token_type_ids = Vec::with_capacity(max);
        let mut out_offsets = Vec::with_capacity(max);

        input_ids.push(self.vocab.cls_id());
        out_offsets.push(NULL_OFFSET);
        token_type_ids.push(0);

        for (id, off) in ids.into_iter().zip(offsets.into_iter()) {
            input_ids.push(id);
            out_offsets.push(off);
            token_type_ids.push(0);
        }

        input_ids.push(self.vocab.sep_id());
        out_offsets.push(NULL_OFFSET);
        token_type_ids.push(0);

        let content_len = input_ids.len();
        let mut attention_mask = vec![1i64; content_len];
        while input_ids.len() < max {
            input_ids.push(self.vocab.pad_id());
            attention_mask.push(0);
            token_type_ids.push(0);
            out_offsets.push(NULL_OFFSET);
        }

        EncodedInput {
            input_ids,
            attention_mask,
            token_type_ids,
            offsets: out_offsets,
            overflow_ids,
            num_truncated,
        }
    }

    /// §4.1 `encode_pair`: `[CLS] A [SEP] B [SEP]`, longest-first
    /// truncation, `token_type_ids` 0 through the first `[SEP]`
    /// inclusive and 1 thereafter.
    pub fn encode_pair(&self, a: &str, b: &str) -> EncodedInput {
        let tok_a = self.tokenize(a);
        let tok_b = self.tokenize(b);
        let max = self.options.max_sequence_length;
        let budget = max.saturating_sub(3);

        let mut ids_a = self.ids_for(&tok_a.tokens);
        let mut ids_b = self.ids_for(&tok_b.tokens);
        let mut off_a: Vec<CharOffset> = tok_a
            .offsets
            .iter()
            .map(|&(s, e)| (s as i64, e as i64))
            .collect();
        let mut off_b: Vec<CharOffset> = tok_b
            .offsets
            .iter()
            .map(|&(s, e)| (s as i64, e as i64))
            .collect();

        let total = ids_a.len() + ids_b.len();
        let num_truncated = total.saturating_sub(budget);
        let overflow_ids = truncate_longest_first(&mut ids_a, &mut ids_b, num_truncated);
        // Keep offsets aligned with ids after truncation.
        off_a.truncate(ids_a.len());
        off_b.truncate(ids_b.len());

        let mut input_ids = Vec::with_capacity(max);
        let mut token_type_ids = Vec::with_capacity(max);
        let mut out_offsets = Vec::with_capacity(max);

        input_ids.push(self.vocab.cls_id());
        out_offsets.push(NULL_OFFSET);
        token_type_ids.push(0);

        for (id, off) in ids_a.into_iter().zip(off_a.into_iter()) {
            input_ids.push(id);
            out_offsets.push(off);
            token_type_ids.push(0);
        }
        input_ids.push(self.vocab.sep_id());
        out_offsets.push(NULL_OFFSET);
        token_type_ids.push(0);

        for (id, off) in ids_b.into_iter().zip(off_b.into_iter()) {
            input_ids.push(id);
            out_offsets.push(off);
            token_type_ids.push(1);
        }
        input_ids.push(self.vocab.sep_id());
        out_offsets.push(NULL_OFFSET);
        token_type_ids.push(1);

        let content_len = input_ids.len();
        let mut attention_mask = vec![1i64; content_len];
        while input_ids.len() < max {
            input_ids.push(self.vocab.pad_id());
            attention_mask.push(0);
            token_type_ids.push(1);
            out_offsets.push(NULL_OFFSET);
        }

        EncodedInput {
            input_ids,
            attention_mask,
            token_type_ids,
            offsets: out_offsets,
            overflow_ids,
            num_truncated,
        }
    }

    pub fn batch_encode(&self, texts: &[String]) -> Vec<EncodedInput> {
        texts.iter().map(|t| self.encode(t)).collect()
    }

    /// §4.1 `decode`: drop `[CLS]`/`[SEP]`/`[PAD]`, keep `[UNK]`
    /// verbatim, join continuation pieces without a separating space.
    pub fn decode(&self, ids: &[i64]) -> String {
        let special = self.vocab.special_tokens();
        let mut out = String::new();
        let mut emitted_any = false;
        for &id in ids {
            let token = self
                .vocab
                .id_to_token(id)
                .map(|s| s.to_string())
                .unwrap_or_else(|| special.unk.clone());
            if token == special.cls || token == special.sep || token == special.pad {
                continue;
            }
            if let Some(rest) = token.strip_prefix("##") {
                out.push_str(rest);
            } else {
                if emitted_any {
                    out.push(' ');
                }
                out.push_str(&token);
            }
            emitted_any = true;
        }
        out
    }
}
